use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;
use crate::{Callback, Error, Rect, Result, Scene, View, semantics::Role};

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static DIRTY: Cell<bool> = const { Cell::new(true) };
    // Remembered slots are per thread, so only one root may own them.
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

#[derive(Default)]
struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
}

impl Composer {
    fn clear(&mut self) {
        self.slots.clear();
        self.keyed_slots.clear();
        self.cursor = 0;
    }
}

/// Marks the composition stale; the runner recomposes before the next paint.
pub fn request_recompose() {
    DIRTY.with(|d| d.set(true));
}

pub fn needs_recompose() -> bool {
    DIRTY.with(|d| d.get())
}

struct ComposeGuard {
    scope: Scope,
}

impl ComposeGuard {
    fn begin(scope: Scope) -> Self {
        COMPOSER.with(|c| c.borrow_mut().cursor = 0);
        DIRTY.with(|d| d.set(false));
        ComposeGuard { scope }
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let (used, stored) = COMPOSER.with(|c| {
            let c = c.borrow();
            (c.cursor, c.slots.len())
        });
        if used != stored {
            log::debug!("composition used {used} of {stored} remembered slots");
        }
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let cursor = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        cursor
    });

    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        match c.slots.get(cursor) {
            Some(slot) => match slot.downcast_ref::<Rc<T>>() {
                Some(rc) => Ok(Some(rc.clone())),
                None => Err(()),
            },
            None => Ok(None),
        }
    });

    match existing {
        Ok(Some(rc)) => rc,
        Ok(None) => {
            // `init` runs without the composer borrowed so it may remember too.
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| c.borrow_mut().slots.push(Box::new(rc.clone())));
            rc
        }
        Err(()) => {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| c.borrow_mut().slots[cursor] = Box::new(rc.clone()));
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        c.borrow()
            .keyed_slots
            .get(&key)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    });

    match existing {
        Some(Some(rc)) => return rc,
        Some(None) => log::warn!(
            "remember_with_key: key '{}' reused with a different type; replacing.",
            key
        ),
        None => {}
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut()
            .keyed_slots
            .insert(key, Box::new(rc.clone()))
    });
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// Frame: output of composition for a tick: scene + input/semantics.
#[derive(Debug)]
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub focus_chain: Vec<u64>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_click: Option<Callback>,
    pub focusable: bool,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("on_click", &self.on_click.as_ref().map(|_| "<callback>"))
            .field("focusable", &self.focusable)
            .finish()
    }
}

/// Flattened semantics node produced by `layout_and_paint`.
///
/// Carries the resolved rect, role and label of every text-bearing view.
/// Runners read visible text back from here and feed it to accessibility
/// announcements.
#[derive(Clone, Debug)]
pub struct SemNode {
    /// Stable id, shared with the associated `HitRegion` / `ViewId`.
    pub id: u64,
    pub role: Role,
    pub label: Option<String>,
    pub rect: Rect,
    pub focused: bool,
    pub enabled: bool,
}

pub type LayoutPaint<'a> =
    dyn Fn(&View, (u32, u32), Option<u64>) -> Result<(Scene, Vec<HitRegion>, Vec<SemNode>)> + 'a;

pub struct Scheduler {
    pub focused: Option<u64>,
    /// Viewport in terminal cells (columns, rows).
    pub size: (u32, u32),
    root_scope: Option<Scope>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            focused: None,
            size: (80, 24),
            root_scope: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.root_scope.is_some()
    }

    /// Runs one composition and lays it out. The root scope (and every
    /// remembered slot) persists until `unmount`.
    ///
    /// Fails with `Error::AlreadyMounted` if another scheduler on this thread
    /// still holds a mounted root.
    pub fn repose<F>(&mut self, mut build_root: F, layout_paint: &LayoutPaint<'_>) -> Result<Frame>
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        let scope = match &self.root_scope {
            Some(scope) => scope.clone(),
            None => {
                if MOUNTED.with(|m| m.replace(true)) {
                    return Err(Error::AlreadyMounted);
                }
                log::info!("mounting root composition");
                let scope = Scope::new();
                self.root_scope = Some(scope.clone());
                scope
            }
        };

        let guard = ComposeGuard::begin(scope);
        let root = guard.scope().run(|| build_root(self));
        drop(guard);

        let (scene, hits, sem) = layout_paint(&root, self.size, self.focused)?;

        let focus_chain: Vec<u64> = hits.iter().filter(|h| h.focusable).map(|h| h.id).collect();
        if let Some(id) = self.focused
            && !focus_chain.contains(&id)
        {
            self.focused = None;
        }

        log::debug!(
            "frame: {} scene nodes, {} hit regions",
            scene.nodes.len(),
            hits.len()
        );

        Ok(Frame {
            scene,
            hit_regions: hits,
            semantics_nodes: sem,
            focus_chain,
        })
    }

    /// Tears down the composition: runs unmount effects and drops all
    /// remembered state. The next `repose` starts from fresh slots.
    pub fn unmount(&mut self) {
        let Some(scope) = self.root_scope.take() else {
            return;
        };
        log::info!("unmounting root composition");
        scope.dispose();
        COMPOSER.with(|c| c.borrow_mut().clear());
        MOUNTED.with(|m| m.set(false));
        self.focused = None;
        request_recompose();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.unmount();
    }
}
