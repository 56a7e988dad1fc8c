//! AppState: shared read-only data passed to all components during render/event.
//!
//! Only the App event loop writes to it, through the core controllers.

use marquee_core::view::{Region, Surface};
use marquee_core::ApplicationState;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Catalog ─────────────────────────────────────────────────────────────
    pub catalog: ApplicationState,
    /// What the controllers rendered; every component draws from this.
    pub surface: Surface,
    pub loading: bool,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
    /// Layout units; at or below this width the mobile chrome is used.
    pub breakpoint: f32,
}

impl AppState {
    pub fn new(breakpoint: f32) -> Self {
        Self {
            catalog: ApplicationState::new(),
            surface: Surface::new(),
            loading: true,
            input_mode: InputMode::Normal,
            breakpoint,
        }
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.surface.is_visible(region)
    }
}
