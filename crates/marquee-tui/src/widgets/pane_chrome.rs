//! Section frame for the page: rounded border, accent marker on focus,
//! the `1`-`4` shortcut beside the title and an optional corner badge.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::theme::{
    style_focused_border, style_unfocused_border, C_ACCENT, C_MUTED, C_NUMBER_HINT, C_PRIMARY,
};

/// Bottom-right text, e.g. the carousel position "2/5".
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let (marker, title_style, border_style) = if focused {
        (
            "▍",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            style_focused_border(),
        )
    } else {
        (" ", Style::default().fg(C_MUTED), style_unfocused_border())
    };

    let mut title_spans = vec![
        Span::styled(marker, Style::default().fg(C_ACCENT)),
        Span::styled(title, title_style),
    ];
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!(" {}", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::raw(" "));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn frame_shows_title_shortcut_and_badge() {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        pane_chrome(
            "Series",
            Some('4'),
            true,
            Some(Badge {
                text: "2/5",
                color: C_MUTED,
            }),
        )
        .render(area, &mut buf);

        let top = row_text(&buf, 0);
        assert!(top.starts_with('╭'));
        assert!(top.contains("▍Series 4"));
        assert!(row_text(&buf, 2).contains(" 2/5 "));
    }

    #[test]
    fn unfocused_frame_has_no_marker() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        pane_chrome("Movies", None, false, None).render(area, &mut buf);
        let top = row_text(&buf, 0);
        assert!(!top.contains('▍'));
        assert!(top.contains("Movies"));
    }
}
