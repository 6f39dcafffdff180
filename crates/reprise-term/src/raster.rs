use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as TermColor, Style};
use reprise_core::{Color, Rect, Scene, SceneNode};
use unicode_width::UnicodeWidthStr;

pub(crate) fn term_color(c: Color) -> TermColor {
    TermColor::Rgb(c.0, c.1, c.2)
}

/// Snaps a scene rect to whole cells, clipped to `bounds`.
fn cell_rect(r: Rect, bounds: CellRect) -> CellRect {
    let snap = |v: f32| v.round().clamp(0.0, u16::MAX as f32) as u16;
    let (x0, y0) = (snap(r.x), snap(r.y));
    let (x1, y1) = (snap(r.x + r.w), snap(r.y + r.h));
    CellRect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0)).intersection(bounds)
}

/// Paints scene nodes into `buf` in order; later nodes cover earlier ones.
pub fn paint_scene(scene: &Scene, buf: &mut Buffer) {
    let bounds = buf.area;
    buf.set_style(bounds, Style::default().bg(term_color(scene.clear_color)));

    for node in &scene.nodes {
        match node {
            SceneNode::Rect { rect, color } => {
                if color.is_transparent() {
                    continue;
                }
                buf.set_style(cell_rect(*rect, bounds), Style::default().bg(term_color(*color)));
            }
            SceneNode::Text { rect, text, color } => {
                let area = cell_rect(Rect { h: 1.0, ..*rect }, bounds);
                if area.is_empty() {
                    continue;
                }
                buf.set_stringn(
                    area.x,
                    area.y,
                    text,
                    area.width as usize,
                    Style::default().fg(term_color(*color)),
                );
            }
        }
    }
}

/// Row text with trailing blanks removed. Cells hidden under a wide glyph
/// are skipped, so each row reads as it appears on screen.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            let mut hidden = 0;
            for x in area.left()..area.right() {
                if hidden > 0 {
                    hidden -= 1;
                    continue;
                }
                let symbol = buf[(x, y)].symbol();
                line.push_str(symbol);
                hidden = symbol.width().saturating_sub(1);
            }
            line.trim_end().to_string()
        })
        .collect()
}
