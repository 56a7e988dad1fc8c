//! Smooth Unicode progress bar for resume cards.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PROGRESS, C_SEPARATOR};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// The bar glyphs for `percent` (0..=100) across `width` cells, eighth-cell precision.
pub fn bar_text(percent: f64, width: usize) -> String {
    let eighths = (percent.clamp(0.0, 100.0) / 100.0 * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width + 4);
    for _ in 0..full_blocks.min(width) {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

/// Render the bar with a trailing percentage label.
pub fn draw_progress(frame: &mut Frame, area: Rect, percent: f64) {
    if area.width < 6 || area.height == 0 {
        return;
    }
    let label = format!(" {:>3.0}%", percent.clamp(0.0, 100.0));
    let bar_w = area.width.saturating_sub(label.len() as u16) as usize;

    let spans = vec![
        Span::styled(
            bar_text(percent, bar_w),
            Style::default().fg(C_PROGRESS).bg(C_SEPARATOR),
        ),
        Span::styled(label, Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar_text(0.0, 4), "    ");
        assert_eq!(bar_text(50.0, 4), "██  ");
        assert_eq!(bar_text(100.0, 4), "████");
        // 1/16th of 4 cells is half a cell.
        assert_eq!(bar_text(12.5, 4), "▌   ");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(bar_text(250.0, 3), "███");
        assert_eq!(bar_text(-5.0, 3), "   ");
    }
}
