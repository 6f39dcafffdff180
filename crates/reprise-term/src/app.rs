use reprise_core::runtime::needs_recompose;
use reprise_core::*;
use reprise_ui::layout_and_paint;

use crate::a11y::{A11yBridge, LogA11y};
use crate::dispatch::{hit_index_by_id, next_focus, top_hit_index};

pub type RootFn = Box<dyn FnMut(&mut Scheduler) -> View>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runner-independent host: owns the composition, the last frame, and
/// pointer capture. The terminal loop and the headless harness both drive
/// one of these.
pub struct App {
    root: RootFn,
    pub sched: Scheduler,
    frame_cache: Option<Frame>,
    capture_id: Option<u64>,
    a11y: Box<dyn A11yBridge>,
    last_focus: Option<u64>,
}

impl App {
    pub fn new(root: RootFn) -> Self {
        Self {
            root,
            sched: Scheduler::new(),
            frame_cache: None,
            capture_id: None,
            a11y: Box::new(LogA11y),
            last_focus: None,
        }
    }

    pub fn with_a11y(mut self, a11y: Box<dyn A11yBridge>) -> Self {
        self.a11y = a11y;
        self
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame_cache.as_ref()
    }

    pub fn needs_frame(&self) -> bool {
        self.frame_cache.is_none() || needs_recompose()
    }

    pub fn compose(&mut self) -> Result<()> {
        let frame = self.sched.repose(&mut self.root, &layout_and_paint)?;
        self.a11y.publish_tree(&frame.semantics_nodes);
        self.frame_cache = Some(frame);
        self.announce_focus_change();
        Ok(())
    }

    /// Recomposes only when something changed since the last frame.
    pub fn ensure_frame(&mut self) -> Result<()> {
        if self.needs_frame() {
            self.compose()?;
        }
        Ok(())
    }

    /// Drops the composition and its state. The next `compose` mounts fresh.
    pub fn unmount(&mut self) {
        self.sched.unmount();
        self.frame_cache = None;
        self.capture_id = None;
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Pointer(pe) => {
                self.pointer(pe);
                Flow::Continue
            }
            InputEvent::Key(ke) => self.key(ke),
            InputEvent::Resize { cols, rows } => {
                self.sched.size = (cols, rows);
                runtime::request_recompose();
                Flow::Continue
            }
        }
    }

    fn pointer(&mut self, pe: PointerEvent) {
        let Some(f) = &self.frame_cache else {
            return;
        };
        match pe.event {
            PointerEventKind::Down(PointerButton::Primary) => {
                self.capture_id = top_hit_index(f, pe.position).map(|i| f.hit_regions[i].id);
                if let Some(cid) = self.capture_id
                    && self.sched.focused != Some(cid)
                {
                    self.sched.focused = Some(cid);
                    runtime::request_recompose();
                }
            }
            PointerEventKind::Up(PointerButton::Primary) => {
                // Click on release if pointer is still over the captured hit region
                if let Some(cid) = self.capture_id.take()
                    && let Some(i) = hit_index_by_id(f, cid)
                    && f.hit_regions[i].rect.contains(pe.position)
                {
                    self.activate(cid);
                }
            }
            _ => {}
        }
    }

    fn key(&mut self, ke: KeyEvent) -> Flow {
        match ke.key {
            Key::Escape | Key::Character('q') => return Flow::Exit,
            Key::Character('c') if ke.modifiers.ctrl => return Flow::Exit,
            Key::Tab => self.move_focus(ke.modifiers.shift),
            Key::ArrowDown => self.move_focus(false),
            Key::ArrowUp => self.move_focus(true),
            Key::Enter | Key::Space => {
                if let Some(id) = self.sched.focused {
                    self.activate(id);
                }
            }
            Key::Character(_) => {}
        }
        Flow::Continue
    }

    fn move_focus(&mut self, backwards: bool) {
        let Some(f) = &self.frame_cache else {
            return;
        };
        let next = next_focus(&f.focus_chain, self.sched.focused, backwards);
        if next != self.sched.focused {
            self.sched.focused = next;
            runtime::request_recompose();
        }
    }

    /// Runs the click handler of hit region `id`. Returns whether one ran.
    pub fn activate(&mut self, id: u64) -> bool {
        let Some(f) = &self.frame_cache else {
            return false;
        };
        let Some(cb) = hit_index_by_id(f, id).and_then(|i| f.hit_regions[i].on_click.clone())
        else {
            return false;
        };
        let label = f
            .semantics_nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.label.clone())
            .unwrap_or_default();

        cb();
        log::debug!("activated {id} ({label})");
        self.a11y.announce(&format!("Activated {label}"));
        true
    }

    fn announce_focus_change(&mut self) {
        if self.sched.focused == self.last_focus {
            return;
        }
        self.last_focus = self.sched.focused;
        let node = self.frame_cache.as_ref().and_then(|f| {
            self.sched
                .focused
                .and_then(|id| f.semantics_nodes.iter().find(|n| n.id == id))
        });
        self.a11y.focus_changed(node);
    }
}
