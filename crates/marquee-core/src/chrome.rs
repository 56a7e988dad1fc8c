//! Page chrome that does not depend on catalog data: the user menu, the
//! navigation drawer and the scroll-driven header/back-to-top state.

use crate::view::{Region, RenderTarget};

pub const BACK_TO_TOP_THRESHOLD: f32 = 300.0;
pub const HEADER_SHRINK_THRESHOLD: f32 = 50.0;

#[derive(Debug, Default)]
pub struct UserMenu {
    open: bool,
}

impl UserMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, target: &mut impl RenderTarget) {
        self.open = !self.open;
        target.set_visible(Region::UserMenu, self.open);
    }

    /// Outside click or cancel key.
    pub fn close(&mut self, target: &mut impl RenderTarget) {
        self.open = false;
        target.set_visible(Region::UserMenu, false);
    }
}

/// The mobile navigation drawer. Page scrolling is locked while it is open.
#[derive(Debug, Default)]
pub struct NavDrawer {
    open: bool,
}

impl NavDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, target: &mut impl RenderTarget) {
        self.set_open(!self.open, target);
    }

    /// Close control or overlay click.
    pub fn close(&mut self, target: &mut impl RenderTarget) {
        self.set_open(false, target);
    }

    fn set_open(&mut self, open: bool, target: &mut impl RenderTarget) {
        self.open = open;
        target.set_visible(Region::NavDrawer, open);
        target.set_visible(Region::NavOverlay, open);
        target.set_visible(Region::ScrollLock, open);
    }
}

pub struct ScrollChrome {
    back_to_top_threshold: f32,
    header_shrink_threshold: f32,
    position: f32,
}

impl Default for ScrollChrome {
    fn default() -> Self {
        Self::new(BACK_TO_TOP_THRESHOLD, HEADER_SHRINK_THRESHOLD)
    }
}

impl ScrollChrome {
    pub fn new(back_to_top_threshold: f32, header_shrink_threshold: f32) -> Self {
        Self {
            back_to_top_threshold,
            header_shrink_threshold,
            position: 0.0,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn on_scroll(&mut self, position: f32, target: &mut impl RenderTarget) {
        self.position = position.max(0.0);
        target.set_visible(
            Region::BackToTop,
            self.position > self.back_to_top_threshold,
        );
        target.set_visible(
            Region::HeaderCompact,
            self.position > self.header_shrink_threshold,
        );
    }

    pub fn scroll_to_top(&mut self, target: &mut impl RenderTarget) {
        self.on_scroll(0.0, target);
    }
}
