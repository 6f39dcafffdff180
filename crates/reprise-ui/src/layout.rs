use std::collections::HashMap;

use reprise_core::*;
use taffy::geometry::{Rect as TRect, Size as TSize};
use taffy::prelude::{AvailableSpace, NodeId, TaffyTree, length, percent};
use taffy::style::{AlignItems, Display, FlexDirection, JustifyContent, Style};

use crate::text::{text_width, truncate};

#[derive(Clone)]
enum NodeCtx {
    Text { text: String },
    Button { label: String },
    Container,
}

/// Button label padding: "[ " + label + " ]".
const BUTTON_CHROME: f32 = 4.0;

fn layout_err(e: taffy::TaffyError) -> Error {
    Error::Layout(e.to_string())
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind) -> Style {
    let mut s = Style {
        display: Display::Flex,
        ..Style::default()
    };

    match kind {
        ViewKind::Column | ViewKind::Surface => {
            s.flex_direction = FlexDirection::Column;
            s.align_items = Some(AlignItems::Stretch);
        }
        ViewKind::Text { .. } | ViewKind::Button { .. } => {}
    }
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(pv) = m.padding_values {
        s.padding = TRect {
            left: length(pv.left),
            right: length(pv.right),
            top: length(pv.top),
            bottom: length(pv.bottom),
        };
    } else if let Some(p) = m.padding {
        s.padding = TRect {
            left: length(p),
            right: length(p),
            top: length(p),
            bottom: length(p),
        };
    }

    if m.fill_max || m.fill_max_w {
        s.size.width = percent(1.0);
    }
    if m.fill_max {
        s.size.height = percent(1.0);
    }

    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes_map: &mut HashMap<ViewId, NodeId>,
) -> Result<NodeId> {
    let style = style_from_modifier(&v.modifier, &v.kind);

    let node = match &v.kind {
        ViewKind::Text { text, .. } => t
            .new_leaf_with_context(style, NodeCtx::Text { text: text.clone() })
            .map_err(layout_err)?,
        ViewKind::Button { text, .. } => t
            .new_leaf_with_context(
                style,
                NodeCtx::Button {
                    label: text.clone(),
                },
            )
            .map_err(layout_err)?,
        ViewKind::Surface | ViewKind::Column => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes_map))
                .collect::<Result<Vec<_>>>()?;
            let n = t.new_with_children(style, &children).map_err(layout_err)?;
            t.set_node_context(n, Some(NodeCtx::Container))
                .map_err(layout_err)?;
            n
        }
    };

    nodes_map.insert(v.id, node);
    Ok(node)
}

struct Painter<'a> {
    taffy: &'a TaffyTree<NodeCtx>,
    nodes_map: &'a HashMap<ViewId, NodeId>,
    focused: Option<ViewId>,
    theme: Theme,
    scene: Scene,
    hits: Vec<HitRegion>,
    sems: Vec<SemNode>,
}

impl Painter<'_> {
    fn walk(&mut self, v: &View, parent: (f32, f32)) -> Result<()> {
        let Some(&node) = self.nodes_map.get(&v.id) else {
            log::warn!("view {} has no layout node; skipped", v.id);
            return Ok(());
        };
        let l = self.taffy.layout(node).map_err(layout_err)?;
        let rect = Rect {
            x: parent.0 + l.location.x,
            y: parent.1 + l.location.y,
            w: l.size.width,
            h: l.size.height,
        };
        let content = Rect {
            x: rect.x + l.padding.left,
            y: rect.y + l.padding.top,
            w: (rect.w - l.padding.left - l.padding.right).max(0.0),
            h: (rect.h - l.padding.top - l.padding.bottom).max(0.0),
        };

        let on_click = v.on_click().cloned();
        let is_focused = on_click.is_some() && self.focused == Some(v.id);

        let background = match &v.kind {
            _ if is_focused => Some(self.theme.focus),
            ViewKind::Surface => Some(self.theme.surface),
            ViewKind::Button { .. } => Some(self.theme.primary),
            _ => None,
        };
        if let Some(color) = background
            && !rect.is_empty()
        {
            self.scene.nodes.push(SceneNode::Rect { rect, color });
        }

        let semantics = v.modifier.semantics.as_ref().or(v.semantics.as_ref());

        match &v.kind {
            ViewKind::Text { text, color } => {
                let shown = truncate(text, content.w as usize);
                self.scene.nodes.push(SceneNode::Text {
                    rect: Rect {
                        w: text_width(shown),
                        h: 1.0,
                        ..content
                    },
                    text: shown.to_string(),
                    color: if is_focused { self.theme.on_focus } else { *color },
                });
                self.sems.push(SemNode {
                    id: v.id,
                    role: semantics.map(|s| s.role).unwrap_or(Role::Text),
                    label: semantics
                        .and_then(|s| s.label.clone())
                        .or_else(|| Some(text.clone())),
                    rect,
                    focused: is_focused,
                    enabled: semantics.map(|s| s.enabled).unwrap_or(true),
                });
            }
            ViewKind::Button { text, .. } => {
                let label = format!("[ {text} ]");
                let shown = truncate(&label, content.w as usize);
                self.scene.nodes.push(SceneNode::Text {
                    rect: Rect {
                        w: text_width(shown),
                        h: 1.0,
                        ..content
                    },
                    text: shown.to_string(),
                    color: if is_focused {
                        self.theme.on_focus
                    } else {
                        self.theme.on_primary
                    },
                });
                self.sems.push(SemNode {
                    id: v.id,
                    role: Role::Button,
                    label: semantics
                        .and_then(|s| s.label.clone())
                        .or_else(|| Some(text.clone())),
                    rect,
                    focused: is_focused,
                    enabled: semantics.map(|s| s.enabled).unwrap_or(true),
                });
            }
            ViewKind::Surface | ViewKind::Column => {}
        }

        if on_click.is_some() && !rect.is_empty() {
            self.hits.push(HitRegion {
                id: v.id,
                rect,
                on_click,
                focusable: true,
            });
        }

        for child in &v.children {
            self.walk(child, (rect.x, rect.y))?;
        }
        Ok(())
    }
}

/// Lays `root` out on a `size` (columns, rows) cell grid and paints it.
///
/// Ids are stamped in depth-first order starting at 1, so an unchanged tree
/// shape keeps the same ids (and focus) across frames. A viewport with no
/// cells paints an empty scene; the composition and its state are untouched.
pub fn layout_and_paint(
    root: &View,
    size: (u32, u32),
    focused: Option<u64>,
) -> Result<(Scene, Vec<HitRegion>, Vec<SemNode>)> {
    let theme = theme();
    if size.0 == 0 || size.1 == 0 {
        log::debug!("viewport {}x{} has no cells; nothing to paint", size.0, size.1);
        let scene = Scene {
            clear_color: theme.background,
            nodes: Vec::new(),
        };
        return Ok((scene, Vec::new(), Vec::new()));
    }

    let mut id = 1u64;
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let root = stamp(root.clone(), &mut id);

    let mut taffy: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes_map = HashMap::new();
    let root_node = build_node(&root, &mut taffy, &mut nodes_map)?;

    {
        let mut rs = taffy.style(root_node).map_err(layout_err)?.clone();
        rs.size.width = length(size.0 as f32);
        rs.size.height = length(size.1 as f32);
        taffy.set_style(root_node, rs).map_err(layout_err)?;
    }

    let available = TSize {
        width: AvailableSpace::Definite(size.0 as f32),
        height: AvailableSpace::Definite(size.1 as f32),
    };

    taffy
        .compute_layout_with_measure(root_node, available, |known, _avail, _node, ctx, _style| {
            match ctx {
                Some(NodeCtx::Text { text }) => TSize {
                    width: known.width.unwrap_or(text_width(text)),
                    height: known.height.unwrap_or(1.0),
                },
                Some(NodeCtx::Button { label }) => TSize {
                    width: known.width.unwrap_or(text_width(label) + BUTTON_CHROME),
                    height: known.height.unwrap_or(1.0),
                },
                Some(NodeCtx::Container) | None => TSize::ZERO,
            }
        })
        .map_err(layout_err)?;

    let mut painter = Painter {
        taffy: &taffy,
        nodes_map: &nodes_map,
        focused,
        theme,
        scene: Scene {
            clear_color: theme.background,
            nodes: Vec::new(),
        },
        hits: Vec::new(),
        sems: Vec::new(),
    };
    painter.walk(&root, (0.0, 0.0))?;

    Ok((painter.scene, painter.hits, painter.sems))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{Button, Column, Text, ViewExt};

    fn scoreboard(clicks: Rc<Cell<u32>>) -> View {
        Column(Modifier::new().padding(1.0)).child((
            Text("Player 1: 0").modifier(Modifier::new().clickable(move || {
                clicks.set(clicks.get() + 1);
            })),
            Text("Player 2: 0"),
        ))
    }

    fn text_dump(scene: &Scene) -> String {
        scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { rect, text, .. } => Some(format!("{},{} {:?}", rect.x, rect.y, text)),
                SceneNode::Rect { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn column_stacks_text_rows() {
        let (scene, _, _) =
            layout_and_paint(&scoreboard(Rc::new(Cell::new(0))), (20, 5), None).unwrap();
        insta::assert_snapshot!(text_dump(&scene), @r#"
        1,1 "Player 1: 0"
        1,2 "Player 2: 0"
        "#);
    }

    #[test]
    fn clickable_text_gets_a_full_width_hit_region() {
        let clicks = Rc::new(Cell::new(0));
        let (_, hits, sems) = layout_and_paint(&scoreboard(clicks.clone()), (20, 5), None).unwrap();

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.id, 2);
        assert_eq!(
            hit.rect,
            Rect {
                x: 1.0,
                y: 1.0,
                w: 18.0,
                h: 1.0
            }
        );
        (hit.on_click.as_ref().unwrap())();
        assert_eq!(clicks.get(), 1);

        let labels: Vec<_> = sems.iter().filter_map(|s| s.label.clone()).collect();
        assert_eq!(labels, vec!["Player 1: 0", "Player 2: 0"]);
        assert!(sems.iter().all(|s| s.role == Role::Text));
    }

    #[test]
    fn focused_view_is_highlighted() {
        let (scene, _, sems) =
            layout_and_paint(&scoreboard(Rc::new(Cell::new(0))), (20, 5), Some(2)).unwrap();
        let th = Theme::default();

        assert!(scene.nodes.contains(&SceneNode::Rect {
            rect: Rect {
                x: 1.0,
                y: 1.0,
                w: 18.0,
                h: 1.0
            },
            color: th.focus,
        }));
        assert!(sems[0].focused);
        assert!(!sems[1].focused);
    }

    #[test]
    fn long_text_is_truncated_to_its_box() {
        let root = Column(Modifier::new()).child(Text("Player 1: 123456"));
        let (scene, _, _) = layout_and_paint(&root, (8, 2), None).unwrap();
        assert_eq!(text_dump(&scene), r#"0,0 "Player 1""#);
    }

    #[test]
    fn button_has_chrome_and_role() {
        let root = Column(Modifier::new()).child(Button("Reset", || {}));
        let (scene, hits, sems) = layout_and_paint(&root, (20, 3), None).unwrap();
        assert_eq!(text_dump(&scene), r#"0,0 "[ Reset ]""#);
        assert_eq!(hits.len(), 1);
        assert_eq!(sems[0].role, Role::Button);
    }

    #[test]
    fn empty_viewport_paints_nothing() {
        let clicks = Rc::new(Cell::new(0));
        for size in [(0, 10), (20, 0)] {
            let (scene, hits, sems) = layout_and_paint(&scoreboard(clicks.clone()), size, Some(2)).unwrap();
            assert!(scene.nodes.is_empty());
            assert!(hits.is_empty());
            assert!(sems.is_empty());
        }
    }

    #[test]
    fn wide_glyphs_are_measured_in_cells() {
        let root = Column(Modifier::new().padding(1.0)).child((
            Text("世界 1: 0").modifier(Modifier::new().clickable(|| {})),
            Text("Player 2: 0"),
        ));
        let (scene, hits, _) = layout_and_paint(&root, (20, 5), None).unwrap();
        let widths: Vec<_> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { rect, .. } => Some(rect.w),
                SceneNode::Rect { .. } => None,
            })
            .collect();
        assert_eq!(widths, vec![9.0, 11.0]);
        assert_eq!(hits[0].rect.w, 18.0);
    }
}
