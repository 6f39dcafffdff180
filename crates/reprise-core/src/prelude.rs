pub use crate::color::Color;
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::{Error, Result};
pub use crate::geometry::{Rect, Vec2};
pub use crate::input::{InputEvent, Key, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use crate::locals::{Theme, theme, with_theme};
pub use crate::modifier::Modifier;
pub use crate::runtime::{Frame, HitRegion, Scheduler, SemNode, remember, remember_state, remember_with_key};
pub use crate::scope::{Scope, current_scope};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
