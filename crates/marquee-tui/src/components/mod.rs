pub mod continue_row;
pub mod header;
pub mod help_overlay;
pub mod hero;
pub mod nav_drawer;
pub mod search_results;
pub mod series_panel;
pub mod shelves;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` cells, ending in an ellipsis when cut.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Drop the first `skip` cells of `text` (for cards clipped on the left).
pub fn skip_cells(text: &str, skip: usize) -> String {
    let mut used = 0;
    text.chars()
        .skip_while(|ch| {
            let keep_skipping = used < skip;
            used += ch.width().unwrap_or(0);
            keep_skipping
        })
        .collect()
}
