//! Toast notices: the confirmation messages for stubbed actions, plus the
//! loading spinner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn color(self) -> ratatui::style::Color {
        match self {
            Severity::Info => C_TOAST_INFO,
            Severity::Success => C_TOAST_SUCCESS,
            Severity::Error => C_TOAST_ERROR,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Error => "✗",
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<(String, usize)>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    /// A repeated message replaces its earlier copy instead of stacking.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(6));
    }

    /// Persistent until dismissed; animates on every `tick()`.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some((message.into(), 0));
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some((_, frame)) = self.spinner.as_mut() {
            *frame = (*frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<(&str, Severity)> {
        self.toasts.back().map(|t| (t.message.as_str(), t.severity))
    }

    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }

    /// Render in the top-right corner of `area`, spinner first.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 70).min(area.width);
        let bottom = area.y + area.height;
        let mut y = area.y + 1;

        let spinner_line = self.spinner.as_ref().map(|(message, i)| {
            let icon = SPINNER_FRAMES[i % SPINNER_FRAMES.len()];
            (format!(" {} {} ", icon, message), C_TOAST_INFO)
        });
        let toast_lines = self
            .toasts
            .iter()
            .rev()
            .take(self.max_visible)
            .map(|t| {
                (
                    format!(" {} {} ", t.severity.icon(), t.message),
                    t.severity.color(),
                )
            });

        for (text, color) in spinner_line.into_iter().chain(toast_lines) {
            if y >= bottom {
                break;
            }
            let w = (text.width() as u16).min(max_width);
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))),
                toast_area,
            );
            y += 1;
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}
