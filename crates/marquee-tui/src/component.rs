//! Component trait: the interface every UI panel implements.
//!
//! - Components own only presentation state (cursors, animations, hit areas).
//! - Catalog data and the retained surface reach them through `AppState`, read-only.
//! - Components produce `Vec<Action>`; the App applies them to the controllers.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Only called when this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action>;

    /// Called each animation tick.
    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// True while a transition is still running and frames should keep coming.
    fn is_animating(&self) -> bool {
        false
    }

    /// Components see every dispatched action, focused or not.
    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action>;

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
