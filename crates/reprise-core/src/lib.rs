//! # State, Signals, and Effects
//!
//! Reprise keeps UI state in a small reactive core instead of a widget tree
//! with mutable fields. There are three main pieces:
//!
//! - `Signal<T>`: observable value; writes schedule a recomposition.
//! - `remember*`: storage bound to the composition, kept across frames.
//! - `effect` / `on_unmount`: side effects with cleanup.
//!
//! ## Signals
//!
//! ```rust
//! use reprise_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! Component-local state lives in `remember` slots. Each call site owns one
//! slot, so two calls give two independent values:
//!
//! ```rust
//! use reprise_core::*;
//!
//! fn two_counters() -> (Signal<u32>, Signal<u32>) {
//!     let a = remember(|| signal(0u32));
//!     let b = remember(|| signal(0u32));
//!     ((*a).clone(), (*b).clone())
//! }
//! # let (a, b) = two_counters();
//! # a.update(|v| *v += 1);
//! # assert_eq!((a.get(), b.get()), (1, 0));
//! ```
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   composition always refers to the Nth stored value.
//! - `remember_with_key` is key-based and stable across conditional branches.
//!
//! Slots are dropped when the composition is unmounted
//! (`Scheduler::unmount`), which also runs every registered `on_unmount`.
//! Slots are thread-local, so a thread hosts one mounted root at a time; a
//! second scheduler's first `repose` fails with `Error::AlreadyMounted`.

pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod view;

mod tests;

pub use color::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use locals::*;
pub use modifier::*;
pub use runtime::*;
pub use scope::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
