use reprise_core::SemNode;

/// Accessibility sink. The terminal has no OS accessibility tree, so the
/// default bridge only logs.
pub trait A11yBridge {
    fn publish_tree(&mut self, nodes: &[SemNode]);
    fn focus_changed(&mut self, node: Option<&SemNode>);
    fn announce(&mut self, msg: &str);
}

pub struct LogA11y;

impl A11yBridge for LogA11y {
    fn publish_tree(&mut self, nodes: &[SemNode]) {
        log::debug!("a11y: publish {} nodes", nodes.len());
    }
    fn focus_changed(&mut self, node: Option<&SemNode>) {
        if let Some(n) = node {
            log::info!("a11y focus: {:?} {:?}", n.role, n.label);
        } else {
            log::info!("a11y focus: None");
        }
    }
    fn announce(&mut self, msg: &str) {
        log::info!("a11y announce: {msg}");
    }
}
