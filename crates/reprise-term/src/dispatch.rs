use reprise_core::{Frame, Vec2};

/// Find the top-most hit region index under `pos` (reverse iteration).
pub(crate) fn top_hit_index(frame: &Frame, pos: Vec2) -> Option<usize> {
    frame
        .hit_regions
        .iter()
        .enumerate()
        .rev()
        .find(|(_, h)| h.rect.contains(pos))
        .map(|(i, _)| i)
}

pub(crate) fn hit_index_by_id(frame: &Frame, id: u64) -> Option<usize> {
    frame.hit_regions.iter().position(|h| h.id == id)
}

/// Next id in the focus chain, wrapping at both ends.
pub(crate) fn next_focus(chain: &[u64], current: Option<u64>, backwards: bool) -> Option<u64> {
    if chain.is_empty() {
        return None;
    }
    let len = chain.len();
    let idx = match current.and_then(|id| chain.iter().position(|c| *c == id)) {
        None if backwards => len - 1,
        None => 0,
        Some(i) if backwards => (i + len - 1) % len,
        Some(i) => (i + 1) % len,
    };
    Some(chain[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_both_ways() {
        let chain = [2, 3];
        assert_eq!(next_focus(&chain, None, false), Some(2));
        assert_eq!(next_focus(&chain, None, true), Some(3));
        assert_eq!(next_focus(&chain, Some(2), false), Some(3));
        assert_eq!(next_focus(&chain, Some(3), false), Some(2));
        assert_eq!(next_focus(&chain, Some(2), true), Some(3));
        assert_eq!(next_focus(&[], Some(2), false), None);
    }

    #[test]
    fn unknown_focus_restarts_chain() {
        assert_eq!(next_focus(&[4, 5], Some(9), false), Some(4));
    }
}
