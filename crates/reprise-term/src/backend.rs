use ratatui::Terminal;
use ratatui::backend::Backend;
use reprise_core::{Result, Scene};

use crate::raster::paint_scene;

pub trait RenderBackend {
    /// Picks up a new surface size before the next frame.
    fn configure_surface(&mut self, cols: u32, rows: u32) -> Result<()>;
    fn frame(&mut self, scene: &Scene) -> Result<()>;
}

/// Frames go through ratatui, which diffs against the previous buffer and
/// writes only the cells that changed.
impl<B: Backend> RenderBackend for Terminal<B> {
    fn configure_surface(&mut self, cols: u32, rows: u32) -> Result<()> {
        log::debug!("surface resized to {cols}x{rows}");
        self.autoresize()?;
        Ok(())
    }

    fn frame(&mut self, scene: &Scene) -> Result<()> {
        self.draw(|f| paint_scene(scene, f.buffer_mut()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use reprise_core::{Color, Rect, SceneNode};

    use super::*;
    use crate::raster::{buffer_lines, term_color};

    fn label(text: &str, color: Color) -> Scene {
        Scene {
            clear_color: Color::BLACK,
            nodes: vec![SceneNode::Text {
                rect: Rect {
                    x: 0.0,
                    y: 0.0,
                    w: text.len() as f32,
                    h: 1.0,
                },
                text: text.into(),
                color,
            }],
        }
    }

    #[test]
    fn frame_draws_text_and_colors() {
        let mut terminal = Terminal::new(TestBackend::new(4, 1)).unwrap();
        terminal.frame(&label("P1", Color::from_rgb(1, 2, 3))).unwrap();

        let buf = terminal.backend().buffer();
        assert_eq!(buffer_lines(buf), vec!["P1"]);
        assert_eq!(buf[(0, 0)].fg, term_color(Color::from_rgb(1, 2, 3)));
    }

    #[test]
    fn surface_follows_backend_size() {
        let mut terminal = Terminal::new(TestBackend::new(4, 1)).unwrap();
        terminal.backend_mut().resize(12, 2);
        terminal.configure_surface(12, 2).unwrap();
        terminal.frame(&label("Player 1: 0", Color::WHITE)).unwrap();

        assert_eq!(buffer_lines(terminal.backend().buffer()), vec!["Player 1: 0", ""]);
    }
}
