use ratatui::Terminal;
use ratatui::backend::TestBackend;
use reprise_core::*;

use crate::a11y::A11yBridge;
use crate::app::{App, Flow};
use crate::backend::RenderBackend;
use crate::raster::buffer_lines;

/// Drives an app without a terminal: same composition, layout, input
/// dispatch and ratatui drawing as `run_terminal_app`, into a `TestBackend`
/// whose buffer is read back as text.
///
/// Composition state is thread-local: a second `Headless` on the same
/// thread fails with `Error::AlreadyMounted` until the first is unmounted
/// or dropped.
pub struct Headless {
    app: App,
    terminal: Terminal<TestBackend>,
}

fn cells(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Headless {
    pub fn new(root: impl FnMut(&mut Scheduler) -> View + 'static) -> Result<Self> {
        Self::with_size(root, 40, 8)
    }

    pub fn with_size(
        root: impl FnMut(&mut Scheduler) -> View + 'static,
        cols: u32,
        rows: u32,
    ) -> Result<Self> {
        let mut app = App::new(Box::new(root));
        app.sched.size = (cols, rows);
        let terminal = Terminal::new(TestBackend::new(cells(cols), cells(rows)))?;
        app.compose()?;
        let mut h = Self { app, terminal };
        h.draw()?;
        Ok(h)
    }

    fn draw(&mut self) -> Result<()> {
        if let Some(frame) = self.app.frame() {
            self.terminal.frame(&frame.scene)?;
        }
        Ok(())
    }

    pub fn with_a11y(mut self, a11y: Box<dyn A11yBridge>) -> Self {
        self.app = self.app.with_a11y(a11y);
        self
    }

    pub fn hit_regions(&self) -> &[HitRegion] {
        self.app.frame().map(|f| f.hit_regions.as_slice()).unwrap_or(&[])
    }

    pub fn focused(&self) -> Option<u64> {
        self.app.sched.focused
    }

    /// Labels of all text-bearing views, in paint order.
    pub fn texts(&self) -> Vec<String> {
        self.app
            .frame()
            .map(|f| {
                f.semantics_nodes
                    .iter()
                    .filter_map(|n| n.label.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The last drawn frame, one string per terminal row.
    pub fn screen(&self) -> Vec<String> {
        buffer_lines(self.terminal.backend().buffer())
    }

    pub fn send(&mut self, event: InputEvent) -> Result<Flow> {
        let flow = self.app.handle(event);
        self.app.ensure_frame()?;
        self.draw()?;
        Ok(flow)
    }

    pub fn pointer_down(&mut self, position: Vec2) -> Result<()> {
        self.pointer(PointerEventKind::Down(PointerButton::Primary), position)
    }

    pub fn pointer_up(&mut self, position: Vec2) -> Result<()> {
        self.pointer(PointerEventKind::Up(PointerButton::Primary), position)
    }

    fn pointer(&mut self, event: PointerEventKind, position: Vec2) -> Result<()> {
        self.send(InputEvent::Pointer(PointerEvent {
            event,
            position,
            modifiers: Modifiers::default(),
        }))
        .map(|_| ())
    }

    pub fn click(&mut self, position: Vec2) -> Result<()> {
        self.pointer_down(position)?;
        self.pointer_up(position)
    }

    /// Clicks the center of the first clickable view whose label contains
    /// `needle`. Returns `false` when nothing matches.
    pub fn click_text(&mut self, needle: &str) -> Result<bool> {
        let target = self.app.frame().and_then(|f| {
            f.semantics_nodes
                .iter()
                .filter(|n| n.label.as_deref().is_some_and(|l| l.contains(needle)))
                .find_map(|n| f.hit_regions.iter().find(|h| h.id == n.id))
                .map(|h| h.rect.center())
        });
        match target {
            Some(pos) => {
                self.click(pos)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn press(&mut self, key: Key) -> Result<Flow> {
        self.send(InputEvent::Key(KeyEvent::new(key)))
    }

    pub fn focus_next(&mut self) -> Result<()> {
        self.press(Key::Tab).map(|_| ())
    }

    pub fn resize(&mut self, cols: u32, rows: u32) -> Result<()> {
        self.terminal.backend_mut().resize(cells(cols), cells(rows));
        self.terminal.configure_surface(cols, rows)?;
        self.send(InputEvent::Resize { cols, rows }).map(|_| ())
    }

    /// Removes the app from display, discarding all remembered state.
    pub fn unmount(&mut self) {
        self.app.unmount();
    }

    /// Mounts the app again after `unmount`.
    pub fn remount(&mut self) -> Result<()> {
        self.app.compose()?;
        self.draw()
    }
}
