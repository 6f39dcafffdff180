//! Cell metrics for text. A grapheme takes as many cells as its display
//! width, so CJK and other wide glyphs count double.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub fn text_width(text: &str) -> f32 {
    text.width() as f32
}

/// Cuts `text` to the longest run of whole graphemes that fits in `cells`.
pub fn truncate(text: &str, cells: usize) -> &str {
    let mut used = 0;
    for (byte, g) in text.grapheme_indices(true) {
        used += g.width();
        if used > cells {
            return &text[..byte];
        }
    }
    text
}
