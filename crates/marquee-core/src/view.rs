//! Render target abstraction and the retained in-memory surface.
//!
//! Controllers never draw directly. They issue the small capability set of
//! [`RenderTarget`], and [`Surface`] records the result so a front end (or a
//! test) can read it back.

use std::collections::HashMap;

/// The movie shelves, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShelfId {
    Upcoming,
    TopTen,
    TrendingToday,
    TrendingWeek,
    TrendingMonth,
}

impl ShelfId {
    pub const ALL: [ShelfId; 5] = [
        ShelfId::Upcoming,
        ShelfId::TopTen,
        ShelfId::TrendingToday,
        ShelfId::TrendingWeek,
        ShelfId::TrendingMonth,
    ];

    pub const TRENDING: [ShelfId; 3] = [
        ShelfId::TrendingToday,
        ShelfId::TrendingWeek,
        ShelfId::TrendingMonth,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ShelfId::Upcoming => "Upcoming",
            ShelfId::TopTen => "Top 10",
            ShelfId::TrendingToday => "Today",
            ShelfId::TrendingWeek => "This Week",
            ShelfId::TrendingMonth => "This Month",
        }
    }

    pub fn is_trending(self) -> bool {
        Self::TRENDING.contains(&self)
    }
}

/// An ordered container of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    VerticalRail,
    HorizontalRail,
    HeroGenres,
    SeriesGenres,
    SeasonTabs,
    EpisodeList,
    SearchResults,
    Shelf(ShelfId),
    TrendingTabs,
    ContinueRow,
}

/// A show/hide-able region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Hero,
    VerticalRail,
    HorizontalRail,
    SeriesSection,
    ContinueWatching,
    Shelf(ShelfId),
    SearchBox,
    SearchResults,
    UserMenu,
    NavDrawer,
    NavOverlay,
    ScrollLock,
    BackToTop,
    HeaderCompact,
}

impl Region {
    /// Page sections start shown; overlays and toggled chrome start hidden.
    pub fn visible_by_default(self) -> bool {
        matches!(
            self,
            Region::Hero
                | Region::VerticalRail
                | Region::SeriesSection
                | Region::ContinueWatching
                | Region::Shelf(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    HeroTitle,
    HeroRating,
    HeroDuration,
    HeroDescription,
    HeroCast,
    SeriesNumber,
    SeriesRank,
    SeriesTitle,
    SeriesRating,
    SeriesYear,
    SeriesSeasons,
    SeriesEpisodes,
    SeriesDescription,
    SeasonsCount,
    SearchHeading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backdrop {
    Hero,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Eased,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset: f32,
    pub transition: Transition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewItem {
    RailCard {
        index: usize,
        title: String,
        genre: String,
        poster: Option<String>,
    },
    Tag(String),
    SeasonTab {
        season: u32,
    },
    Episode {
        /// Position of the owning series in the collection.
        series_index: usize,
        season: u32,
        number: u32,
        title: String,
        duration: String,
        image: Option<String>,
    },
    MovieCard {
        title: String,
        duration: String,
        quality: String,
        image: Option<String>,
    },
    ResumeCard {
        title: String,
        date: String,
        rating: String,
        progress: f64,
        image: Option<String>,
    },
    SearchHit {
        title: String,
        meta: String,
        image: Option<String>,
    },
    Placeholder(String),
}

pub trait RenderTarget {
    fn clear(&mut self, slot: Slot);
    fn append_item(&mut self, slot: Slot, item: ViewItem);
    fn toggle_active(&mut self, slot: Slot, index: usize, active: bool);
    fn set_text(&mut self, field: TextField, text: &str);
    /// `None` clears the backdrop.
    fn set_background(&mut self, backdrop: Backdrop, url: Option<&str>);
    fn set_visible(&mut self, region: Region, visible: bool);
    fn set_transform(&mut self, slot: Slot, offset: f32, transition: Transition);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub item: ViewItem,
    pub active: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Surface {
    slots: HashMap<Slot, Vec<Entry>>,
    text: HashMap<TextField, String>,
    backgrounds: HashMap<Backdrop, Option<String>>,
    visibility: HashMap<Region, bool>,
    transforms: HashMap<Slot, Transform>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self, slot: Slot) -> &[Entry] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_indices(&self, slot: Slot) -> Vec<usize> {
        self.items(slot)
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn active_index(&self, slot: Slot) -> Option<usize> {
        self.items(slot).iter().position(|e| e.active)
    }

    pub fn text(&self, field: TextField) -> &str {
        self.text.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn background(&self, backdrop: Backdrop) -> Option<&str> {
        self.backgrounds.get(&backdrop).and_then(|b| b.as_deref())
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visibility
            .get(&region)
            .copied()
            .unwrap_or_else(|| region.visible_by_default())
    }

    pub fn transform(&self, slot: Slot) -> Option<Transform> {
        self.transforms.get(&slot).copied()
    }
}

impl RenderTarget for Surface {
    fn clear(&mut self, slot: Slot) {
        self.slots.remove(&slot);
        self.transforms.remove(&slot);
    }

    fn append_item(&mut self, slot: Slot, item: ViewItem) {
        self.slots
            .entry(slot)
            .or_default()
            .push(Entry { item, active: false });
    }

    fn toggle_active(&mut self, slot: Slot, index: usize, active: bool) {
        if let Some(entry) = self.slots.get_mut(&slot).and_then(|s| s.get_mut(index)) {
            entry.active = active;
        }
    }

    fn set_text(&mut self, field: TextField, text: &str) {
        self.text.insert(field, text.to_string());
    }

    fn set_background(&mut self, backdrop: Backdrop, url: Option<&str>) {
        self.backgrounds.insert(backdrop, url.map(str::to_string));
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.visibility.insert(region, visible);
    }

    fn set_transform(&mut self, slot: Slot, offset: f32, transition: Transition) {
        self.transforms.insert(slot, Transform { offset, transition });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlays_start_hidden() {
        let surface = Surface::new();
        assert!(surface.is_visible(Region::Hero));
        assert!(surface.is_visible(Region::Shelf(ShelfId::TopTen)));
        assert!(!surface.is_visible(Region::SearchResults));
        assert!(!surface.is_visible(Region::UserMenu));
        assert!(!surface.is_visible(Region::HorizontalRail));
    }

    #[test]
    fn clear_drops_items_and_transform() {
        let mut surface = Surface::new();
        surface.append_item(Slot::HeroGenres, ViewItem::Tag("Drama".into()));
        surface.append_item(Slot::HeroGenres, ViewItem::Tag("Crime".into()));
        surface.toggle_active(Slot::HeroGenres, 1, true);
        surface.set_transform(Slot::HeroGenres, 12.0, Transition::Eased);
        assert_eq!(surface.active_index(Slot::HeroGenres), Some(1));

        surface.clear(Slot::HeroGenres);
        assert!(surface.items(Slot::HeroGenres).is_empty());
        assert!(surface.transform(Slot::HeroGenres).is_none());
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut surface = Surface::new();
        surface.toggle_active(Slot::SeasonTabs, 3, true);
        assert!(surface.active_indices(Slot::SeasonTabs).is_empty());
    }
}
