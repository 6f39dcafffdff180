use std::rc::Rc;

use crate::{Callback, Semantics};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Layout and input decoration for a `View`. Units are terminal cells.
#[derive(Clone, Default)]
pub struct Modifier {
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub padding: Option<f32>,
    pub padding_values: Option<PaddingValues>,
    pub on_click: Option<Callback>,
    pub semantics: Option<Semantics>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("fill_max", &self.fill_max)
            .field("fill_max_w", &self.fill_max_w)
            .field("padding", &self.padding)
            .field("padding_values", &self.padding_values)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .field("semantics", &self.semantics)
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding_values = Some(padding);
        self
    }
    /// Makes the view activatable: it gets a hit region, joins the focus
    /// chain, and runs `on_click` on click or Enter/Space while focused.
    pub fn clickable(mut self, on_click: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }
    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
}
