//! SearchInput: wraps tui-input for the header search box.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, PartialEq)]
pub enum InputAction {
    Changed(String),
    Confirmed,
    /// Esc: leave the box, keeping the text.
    Cancelled,
    /// Ctrl+U: clear the text and leave the box.
    Cleared,
    None,
}

pub struct SearchInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc => {
                self.deactivate();
                InputAction::Cancelled
            }
            KeyCode::Enter => InputAction::Confirmed,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                self.deactivate();
                InputAction::Cleared
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    InputAction::None
                } else {
                    InputAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if area.width < 4 {
            return;
        }
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(3) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(format!("⌕ {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("⌕ {}", visible), Style::default().fg(C_FILTER_FG))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG));
        frame.render_widget(paragraph, area);

        if self.active {
            let cursor_x = area.x + 2 + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new("Search titles...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_the_new_text() {
        let mut input = SearchInput::default();
        input.activate();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('d'))),
            InputAction::Changed("d".into())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('u'))),
            InputAction::Changed("du".into())
        );
    }

    #[test]
    fn escape_keeps_the_query() {
        let mut input = SearchInput::default();
        input.activate();
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputAction::Cancelled);
        assert!(!input.is_active());
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn ctrl_u_clears_and_closes() {
        let mut input = SearchInput::default();
        input.activate();
        input.handle_key(key(KeyCode::Char('x')));
        let action = input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(action, InputAction::Cleared);
        assert_eq!(input.text(), "");
        assert!(!input.is_active());
    }
}
