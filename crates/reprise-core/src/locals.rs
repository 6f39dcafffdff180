//! # Theming and locals
//!
//! Global UI parameters are thread‑local "composition locals". The only one
//! a terminal needs is the `Theme`, overridable for a subtree:
//!
//! ```rust
//! use reprise_core::*;
//!
//! let light = Theme {
//!     background: Color::WHITE,
//!     on_surface: Color::from_hex("#222222"),
//!     ..Theme::default()
//! };
//!
//! with_theme(light, || {
//!     assert_eq!(theme().background, Color::WHITE);
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        let mut st = st.borrow_mut();
        match st.last_mut() {
            Some(top) => {
                top.insert(t, v);
            }
            None => {
                let mut m = HashMap::new();
                m.insert(t, v);
                st.push(m);
            }
        }
    });
}

fn local<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

/// Color theme used by widgets and the painter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Terminal background / app root.
    pub background: Color,
    /// Default container surface.
    pub surface: Color,
    /// Foreground text on top of `surface`/`background`.
    pub on_surface: Color,
    /// Accent for buttons.
    pub primary: Color,
    pub on_primary: Color,
    /// Background of the focused row.
    pub focus: Color,
    pub on_focus: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            surface: Color::from_hex("#1E1E1E"),
            on_surface: Color::from_hex("#DDDDDD"),
            primary: Color::from_hex("#34AF82"),
            on_primary: Color::WHITE,
            focus: Color::from_hex("#88CCFF"),
            on_focus: Color::from_hex("#121212"),
        }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Theme>(), Box::new(theme));
        f()
    })
}

pub fn theme() -> Theme {
    local::<Theme>()
}
