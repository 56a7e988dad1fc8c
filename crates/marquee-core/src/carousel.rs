//! Hero carousel with its two synchronized rails.
//!
//! The primary rail is vertical and shows on wide viewports; the mobile rail
//! is horizontal and shows at or below the breakpoint. Both always carry the
//! same cards and the same active index; only the visible one is re-centered.

use tracing::debug;

use crate::state::{wrap_next, wrap_prev, ApplicationState};
use crate::view::{Backdrop, Region, RenderTarget, Slot, TextField, Transition, ViewItem};

// ── Centering constants (layout units) ────────────────────────────────────────

pub const ACTIVE_CARD_SPAN: f32 = 380.0;
pub const INACTIVE_CARD_SPAN: f32 = 220.0;
/// The first card sits flush with the rail top, so it occupies a shorter span.
pub const FIRST_CARD_SPAN: f32 = 200.0;
pub const ACTIVE_CARD_HALF: f32 = 190.0;
pub const MOBILE_CARD_WIDTH: f32 = 160.0;
pub const MOBILE_CARD_GAP: f32 = 15.0;
pub const DEFAULT_BREAKPOINT: f32 = 991.0;

/// Center of the active card measured from the top of the vertical rail.
pub fn active_card_position(index: usize) -> f32 {
    let preceding = match index {
        0 => 0.0,
        n => FIRST_CARD_SPAN + (n - 1) as f32 * INACTIVE_CARD_SPAN,
    };
    preceding + ACTIVE_CARD_HALF
}

/// Vertical rail translation that centers card `index` in a rail of `container_height`.
pub fn vertical_offset(container_height: f32, index: usize) -> f32 {
    container_height / 2.0 - active_card_position(index)
}

/// Horizontal rail translation that centers card `index` in a rail of `container_width`.
pub fn horizontal_offset(container_width: f32, index: usize) -> f32 {
    let center = container_width / 2.0 - MOBILE_CARD_WIDTH / 2.0;
    center - index as f32 * (MOBILE_CARD_WIDTH + MOBILE_CARD_GAP)
}

/// Span of card `index` in the vertical rail while `active_index` is active.
pub fn card_span(index: usize, active_index: usize) -> f32 {
    if index == active_index {
        ACTIVE_CARD_SPAN
    } else if index == 0 {
        FIRST_CARD_SPAN
    } else {
        INACTIVE_CARD_SPAN
    }
}

/// Top edge of card `index`, before the rail translation is applied.
pub fn card_top(index: usize, active_index: usize) -> f32 {
    (0..index).map(|i| card_span(i, active_index)).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailMode {
    Vertical,
    Horizontal,
}

impl RailMode {
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if width > breakpoint {
            RailMode::Vertical
        } else {
            RailMode::Horizontal
        }
    }
}

/// Viewport and rail container sizes, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub rail_height: f32,
    pub rail_width: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            rail_height: 760.0,
            rail_width: 1280.0,
        }
    }
}

pub struct CarouselController {
    current_index: usize,
    len: usize,
    enabled: bool,
    viewport: Viewport,
    breakpoint: f32,
}

impl CarouselController {
    pub fn new(viewport: Viewport, breakpoint: f32) -> Self {
        Self {
            current_index: 0,
            len: 0,
            enabled: false,
            viewport,
            breakpoint,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> RailMode {
        RailMode::for_width(self.viewport.width, self.breakpoint)
    }

    /// Build both rails and show item 0. An empty carousel hides the hero
    /// and leaves the controller inert.
    pub fn initial_render(&mut self, state: &ApplicationState, target: &mut impl RenderTarget) {
        self.current_index = 0;
        self.len = state.carousel.len();
        target.clear(Slot::VerticalRail);
        target.clear(Slot::HorizontalRail);
        target.clear(Slot::HeroGenres);

        if state.carousel.is_empty() {
            debug!("carousel: no data, hiding hero");
            self.enabled = false;
            target.set_visible(Region::Hero, false);
            return;
        }
        self.enabled = true;
        target.set_visible(Region::Hero, true);

        for slot in [Slot::VerticalRail, Slot::HorizontalRail] {
            for (index, feature) in state.carousel.iter().enumerate() {
                target.append_item(
                    slot,
                    ViewItem::RailCard {
                        index,
                        title: feature.card_title.clone(),
                        genre: feature.card_genre.clone(),
                        poster: feature.poster.clone(),
                    },
                );
            }
        }

        self.apply_rail_visibility(target);
        self.sync(state, target, Transition::Eased);
    }

    pub fn select_index(
        &mut self,
        index: usize,
        state: &ApplicationState,
        target: &mut impl RenderTarget,
    ) {
        if !self.enabled || index >= self.len {
            return;
        }
        self.current_index = index;
        self.sync(state, target, Transition::Eased);
    }

    pub fn next(&mut self, state: &ApplicationState, target: &mut impl RenderTarget) {
        if !self.enabled {
            return;
        }
        self.select_index(wrap_next(self.current_index, self.len), state, target);
    }

    pub fn previous(&mut self, state: &ApplicationState, target: &mut impl RenderTarget) {
        if !self.enabled {
            return;
        }
        self.select_index(wrap_prev(self.current_index, self.len), state, target);
    }

    /// Swap rail visibility for the new viewport and snap the visible rail
    /// into place without a transition.
    pub fn resize(&mut self, viewport: Viewport, target: &mut impl RenderTarget) {
        let before = self.mode();
        self.viewport = viewport;
        if before != self.mode() {
            debug!("carousel: rail mode {:?} -> {:?}", before, self.mode());
        }
        if !self.enabled {
            return;
        }
        self.apply_rail_visibility(target);
        self.center_visible(target, Transition::None);
    }

    fn apply_rail_visibility(&self, target: &mut impl RenderTarget) {
        let vertical = self.mode() == RailMode::Vertical;
        target.set_visible(Region::VerticalRail, vertical);
        target.set_visible(Region::HorizontalRail, !vertical);
    }

    fn sync(
        &self,
        state: &ApplicationState,
        target: &mut impl RenderTarget,
        transition: Transition,
    ) {
        let Some(feature) = state.carousel.get(self.current_index) else {
            return;
        };

        target.set_text(TextField::HeroTitle, &feature.title);
        target.set_text(TextField::HeroRating, &feature.rating);
        target.set_text(TextField::HeroDuration, &feature.duration);
        target.set_text(TextField::HeroDescription, &feature.description);
        target.set_text(TextField::HeroCast, &feature.cast);
        target.clear(Slot::HeroGenres);
        for genre in &feature.genres {
            target.append_item(Slot::HeroGenres, ViewItem::Tag(genre.clone()));
        }
        // The previous backdrop stays when the item has none.
        if let Some(url) = feature.hero_bg.as_deref() {
            target.set_background(Backdrop::Hero, Some(url));
        }

        for slot in [Slot::VerticalRail, Slot::HorizontalRail] {
            for i in 0..self.len {
                target.toggle_active(slot, i, i == self.current_index);
            }
        }

        self.center_visible(target, transition);
    }

    fn center_visible(&self, target: &mut impl RenderTarget, transition: Transition) {
        match self.mode() {
            RailMode::Vertical => target.set_transform(
                Slot::VerticalRail,
                vertical_offset(self.viewport.rail_height, self.current_index),
                transition,
            ),
            RailMode::Horizontal => target.set_transform(
                Slot::HorizontalRail,
                horizontal_offset(self.viewport.rail_width, self.current_index),
                transition,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::view::Surface;
    use serde_json::json;

    fn state_with(n: usize) -> ApplicationState {
        let items: Vec<_> = (0..n)
            .map(|i| {
                let hero_bg = (i % 2 == 0).then(|| format!("bg{}.jpg", i));
                json!({
                    "title": format!("Film {}", i),
                    "genres": ["Action", "Drama"],
                    "hero_bg": hero_bg,
                })
            })
            .collect();
        let mut state = ApplicationState::new();
        state.populate(&RawCatalog::from_values(
            json!(items),
            json!([]),
            json!([]),
            json!([]),
        ));
        state
    }

    fn wide() -> Viewport {
        Viewport {
            width: 1400.0,
            rail_height: 800.0,
            rail_width: 1400.0,
        }
    }

    fn narrow() -> Viewport {
        Viewport {
            width: 600.0,
            rail_height: 800.0,
            rail_width: 600.0,
        }
    }

    #[test]
    fn centering_math() {
        assert_eq!(active_card_position(0), 190.0);
        assert_eq!(active_card_position(1), 390.0);
        assert_eq!(active_card_position(3), 830.0);
        assert_eq!(vertical_offset(800.0, 0), 210.0);
        assert_eq!(vertical_offset(800.0, 2), 400.0 - 610.0);
        assert_eq!(horizontal_offset(600.0, 0), 220.0);
        assert_eq!(horizontal_offset(600.0, 2), 220.0 - 350.0);
    }

    #[test]
    fn drawn_card_centers_match_centering_math() {
        for active in 0..5 {
            let center = card_top(active, active) + ACTIVE_CARD_HALF;
            assert_eq!(center, active_card_position(active));
        }
        assert_eq!(card_top(3, 1), 200.0 + 380.0 + 220.0);
    }

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(RailMode::for_width(992.0, 991.0), RailMode::Vertical);
        assert_eq!(RailMode::for_width(991.0, 991.0), RailMode::Horizontal);
    }

    #[test]
    fn empty_carousel_hides_hero_and_ignores_navigation() {
        let state = ApplicationState::new();
        let mut surface = Surface::new();
        let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
        carousel.initial_render(&state, &mut surface);
        carousel.next(&state, &mut surface);

        assert!(!surface.is_visible(Region::Hero));
        assert!(!carousel.is_enabled());
        assert_eq!(carousel.current_index(), 0);
        assert!(surface.items(Slot::VerticalRail).is_empty());
    }

    #[test]
    fn initial_render_activates_first_card_in_both_rails() {
        let state = state_with(4);
        let mut surface = Surface::new();
        let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
        carousel.initial_render(&state, &mut surface);

        assert_eq!(surface.items(Slot::VerticalRail).len(), 4);
        assert_eq!(surface.items(Slot::HorizontalRail).len(), 4);
        assert_eq!(surface.active_indices(Slot::VerticalRail), vec![0]);
        assert_eq!(surface.active_indices(Slot::HorizontalRail), vec![0]);
        assert_eq!(surface.text(TextField::HeroTitle), "Film 0");
        assert_eq!(surface.background(Backdrop::Hero), Some("bg0.jpg"));
        assert!(surface.is_visible(Region::VerticalRail));
        assert!(!surface.is_visible(Region::HorizontalRail));
        assert_eq!(
            surface.transform(Slot::VerticalRail).map(|t| t.offset),
            Some(vertical_offset(800.0, 0))
        );
    }

    #[test]
    fn next_and_previous_are_inverses() {
        for len in 1..6 {
            let state = state_with(len);
            let mut surface = Surface::new();
            let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
            carousel.initial_render(&state, &mut surface);
            for start in 0..len {
                carousel.select_index(start, &state, &mut surface);
                carousel.next(&state, &mut surface);
                carousel.previous(&state, &mut surface);
                assert_eq!(carousel.current_index(), start);
                carousel.previous(&state, &mut surface);
                carousel.next(&state, &mut surface);
                assert_eq!(carousel.current_index(), start);
            }
        }
    }

    #[test]
    fn navigation_keeps_one_active_card_per_rail() {
        let state = state_with(3);
        let mut surface = Surface::new();
        let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
        carousel.initial_render(&state, &mut surface);

        carousel.previous(&state, &mut surface);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(surface.active_indices(Slot::VerticalRail), vec![2]);
        assert_eq!(surface.active_indices(Slot::HorizontalRail), vec![2]);
        assert_eq!(surface.text(TextField::HeroTitle), "Film 2");
        assert_eq!(surface.background(Backdrop::Hero), Some("bg2.jpg"));

        // Film 1 has no backdrop, so the previous one stays.
        carousel.next(&state, &mut surface);
        carousel.next(&state, &mut surface);
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(surface.background(Backdrop::Hero), Some("bg0.jpg"));
        let tags: Vec<_> = surface.items(Slot::HeroGenres).to_vec();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let state = state_with(2);
        let mut surface = Surface::new();
        let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
        carousel.initial_render(&state, &mut surface);
        carousel.select_index(9, &state, &mut surface);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn resize_swaps_rails_without_transition() {
        let state = state_with(3);
        let mut surface = Surface::new();
        let mut carousel = CarouselController::new(wide(), DEFAULT_BREAKPOINT);
        carousel.initial_render(&state, &mut surface);
        carousel.select_index(1, &state, &mut surface);

        carousel.resize(narrow(), &mut surface);
        assert_eq!(carousel.mode(), RailMode::Horizontal);
        assert!(!surface.is_visible(Region::VerticalRail));
        assert!(surface.is_visible(Region::HorizontalRail));
        let t = surface.transform(Slot::HorizontalRail).unwrap();
        assert_eq!(t.offset, horizontal_offset(600.0, 1));
        assert_eq!(t.transition, Transition::None);

        carousel.next(&state, &mut surface);
        let t = surface.transform(Slot::HorizontalRail).unwrap();
        assert_eq!(t.offset, horizontal_offset(600.0, 2));
        assert_eq!(t.transition, Transition::Eased);
    }
}
