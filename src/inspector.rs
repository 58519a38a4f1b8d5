use tracing::debug;

use crate::node::{NodeId, Position};
use crate::registry::Registry;

/// Notification target for "the renderer should redraw now".
///
/// The inspector never calls into presentation code; it raises this signal
/// and the external renderer decides what a refresh means.
pub trait RefreshSink {
    fn refresh_requested(&mut self);
}

impl<F: FnMut()> RefreshSink for F {
    fn refresh_requested(&mut self) {
        self()
    }
}

/// A sink for callers that do not care about redraws (headless runs, tests).
pub struct NoRefresh;

impl RefreshSink for NoRefresh {
    fn refresh_requested(&mut self) {}
}

/// Rejected position edit. The node's position is left untouched; the
/// editor stays open with its previous values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("coordinate {axis} is not a finite number: {value:?}")]
pub struct ValidationError {
    pub axis: &'static str,
    pub value: String,
}

/// One open node-inspection session.
///
/// Exactly one node is selected per session, and that node is the only one
/// carrying the `highlighted` flag while the session is open. Navigation is
/// by identifier adjacency: `next` looks for `id + 1`, `previous` for
/// `id - 1`, not for the enumeration neighbor.
#[derive(Debug)]
pub struct InspectorSession {
    selected: NodeId,
    has_predecessor: bool,
    has_successor: bool,
}

impl InspectorSession {
    /// Open a session on `id`. Returns `None` when the node does not exist.
    ///
    /// Any stale highlight is force-cleared so the "at most one node
    /// highlighted" invariant holds no matter how the previous session
    /// ended.
    pub fn open(
        registry: &mut Registry,
        id: NodeId,
        sink: &mut dyn RefreshSink,
    ) -> Option<InspectorSession> {
        if !registry.contains(id) {
            return None;
        }

        for node in registry.nodes_mut() {
            node.highlighted = false;
        }
        registry.get_mut(id)?.highlighted = true;

        let session = InspectorSession {
            selected: id,
            has_predecessor: scan_for_id(registry, id.predecessor()),
            has_successor: scan_for_id(registry, id.successor()),
        };

        debug!(node = %id, "inspector opened");
        sink.refresh_requested();
        Some(session)
    }

    pub fn selected(&self) -> NodeId {
        self.selected
    }

    pub fn has_predecessor(&self) -> bool {
        self.has_predecessor
    }

    pub fn has_successor(&self) -> bool {
        self.has_successor
    }

    /// Move the selection to the node with `id + 1`, if it exists. A gap in
    /// the id space means no-op, even when higher ids exist.
    pub fn next(&mut self, registry: &mut Registry, sink: &mut dyn RefreshSink) {
        if let Some(target) = self.selected.successor()
            && scan_for_id(registry, Some(target))
        {
            self.select(registry, target, sink);
        }
    }

    /// Move the selection to the node with `id - 1`, if it exists.
    pub fn previous(&mut self, registry: &mut Registry, sink: &mut dyn RefreshSink) {
        if let Some(target) = self.selected.predecessor()
            && scan_for_id(registry, Some(target))
        {
            self.select(registry, target, sink);
        }
    }

    /// Switch the selection: old highlight off, new highlight on, adjacency
    /// recomputed, renderer notified.
    fn select(&mut self, registry: &mut Registry, id: NodeId, sink: &mut dyn RefreshSink) {
        if let Some(old) = registry.get_mut(self.selected) {
            old.highlighted = false;
        }

        self.selected = id;
        if let Some(new) = registry.get_mut(id) {
            new.highlighted = true;
        }

        self.has_predecessor = scan_for_id(registry, id.predecessor());
        self.has_successor = scan_for_id(registry, id.successor());

        debug!(node = %id, "inspector selection moved");
        sink.refresh_requested();
    }

    /// Apply an edited position to the selected node.
    ///
    /// All three fields are validated before anything is written: a single
    /// bad field rejects the whole edit and the position stays as it was.
    pub fn set_position(
        &mut self,
        registry: &mut Registry,
        x: &str,
        y: &str,
        z: &str,
        sink: &mut dyn RefreshSink,
    ) -> Result<(), ValidationError> {
        let position = Position::new(
            parse_coordinate("x", x)?,
            parse_coordinate("y", y)?,
            parse_coordinate("z", z)?,
        );

        if let Some(node) = registry.get_mut(self.selected) {
            node.position = position;
        }

        sink.refresh_requested();
        Ok(())
    }

    /// End the session. Position edits already applied stay applied whether
    /// or not `commit` is set; only the highlight is undone. The flag
    /// mirrors the OK/Cancel split of the editing dialog this backs.
    pub fn close(self, registry: &mut Registry, commit: bool, sink: &mut dyn RefreshSink) {
        if let Some(node) = registry.get_mut(self.selected) {
            node.highlighted = false;
        }

        debug!(node = %self.selected, commit, "inspector closed");
        sink.refresh_requested();
    }
}

// Deliberately a linear scan over the enumeration, not an index lookup:
// adjacency is by identifier value and the inherited contract is O(n).
fn scan_for_id(registry: &Registry, id: Option<NodeId>) -> bool {
    let Some(id) = id else {
        return false;
    };
    registry.nodes().any(|node| node.id == id)
}

fn parse_coordinate(axis: &'static str, value: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError {
        axis,
        value: value.to_owned(),
    };

    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn registry_with_ids(ids: &[u64]) -> Registry {
        let mut registry = Registry::new();
        for &id in ids {
            registry
                .add(Node::new(NodeId::new(id), Position::ORIGIN))
                .unwrap();
        }
        registry
    }

    fn highlighted_ids(registry: &Registry) -> Vec<NodeId> {
        registry
            .nodes()
            .filter(|node| node.highlighted)
            .map(|node| node.id)
            .collect()
    }

    #[test]
    fn open_highlights_exactly_the_selected_node() {
        let mut registry = registry_with_ids(&[1, 2, 3]);

        let session =
            InspectorSession::open(&mut registry, NodeId::new(2), &mut NoRefresh).unwrap();
        assert_eq!(session.selected(), NodeId::new(2));
        assert_eq!(highlighted_ids(&registry), vec![NodeId::new(2)]);

        session.close(&mut registry, true, &mut NoRefresh);
        assert!(highlighted_ids(&registry).is_empty());
    }

    #[test]
    fn reopening_moves_the_single_highlight() {
        let mut registry = registry_with_ids(&[1, 2]);

        let first = InspectorSession::open(&mut registry, NodeId::new(1), &mut NoRefresh).unwrap();
        first.close(&mut registry, false, &mut NoRefresh);

        let _second =
            InspectorSession::open(&mut registry, NodeId::new(2), &mut NoRefresh).unwrap();
        assert_eq!(highlighted_ids(&registry), vec![NodeId::new(2)]);
    }

    #[test]
    fn adjacency_is_by_id_not_enumeration_position() {
        // Ids 5 and 7 are enumeration neighbors, but numerically not
        // adjacent: node 5 must report no successor.
        let mut registry = registry_with_ids(&[5, 7]);

        let session =
            InspectorSession::open(&mut registry, NodeId::new(5), &mut NoRefresh).unwrap();
        assert!(!session.has_predecessor());
        assert!(!session.has_successor());
    }

    #[test]
    fn next_selects_id_plus_one_when_present() {
        let mut registry = registry_with_ids(&[7, 8, 9]);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(7), &mut NoRefresh).unwrap();
        session.next(&mut registry, &mut NoRefresh);

        assert_eq!(session.selected(), NodeId::new(8));
        assert_eq!(highlighted_ids(&registry), vec![NodeId::new(8)]);
        assert!(session.has_predecessor());
        assert!(session.has_successor());
    }

    #[test]
    fn next_is_a_noop_across_id_gaps() {
        // Node 10 exists, node 8 does not: next() from 7 must do nothing.
        let mut registry = registry_with_ids(&[7, 10]);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(7), &mut NoRefresh).unwrap();
        session.next(&mut registry, &mut NoRefresh);

        assert_eq!(session.selected(), NodeId::new(7));
        assert_eq!(highlighted_ids(&registry), vec![NodeId::new(7)]);
    }

    #[test]
    fn previous_from_id_zero_is_a_noop() {
        let mut registry = registry_with_ids(&[0, 1]);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(0), &mut NoRefresh).unwrap();
        assert!(!session.has_predecessor());
        session.previous(&mut registry, &mut NoRefresh);
        assert_eq!(session.selected(), NodeId::new(0));
    }

    #[test]
    fn invalid_coordinate_rejects_the_whole_edit() {
        let mut registry = registry_with_ids(&[1]);
        registry.get_mut(NodeId::new(1)).unwrap().position = Position::new(9.0, 9.0, 9.0);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(1), &mut NoRefresh).unwrap();
        let err = session
            .set_position(&mut registry, "1.5", "abc", "2.0", &mut NoRefresh)
            .unwrap_err();

        assert_eq!(err.axis, "y");
        assert_eq!(err.value, "abc");
        assert_eq!(
            registry.get(NodeId::new(1)).unwrap().position,
            Position::new(9.0, 9.0, 9.0)
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut registry = registry_with_ids(&[1]);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(1), &mut NoRefresh).unwrap();
        assert!(
            session
                .set_position(&mut registry, "inf", "0", "0", &mut NoRefresh)
                .is_err()
        );
        assert!(
            session
                .set_position(&mut registry, "0", "NaN", "0", &mut NoRefresh)
                .is_err()
        );
    }

    #[test]
    fn close_without_commit_keeps_applied_edits() {
        let mut registry = registry_with_ids(&[1]);

        let mut session =
            InspectorSession::open(&mut registry, NodeId::new(1), &mut NoRefresh).unwrap();
        session
            .set_position(&mut registry, "1.0", "2.0", "3.0", &mut NoRefresh)
            .unwrap();
        session.close(&mut registry, false, &mut NoRefresh);

        let node = registry.get(NodeId::new(1)).unwrap();
        assert_eq!(node.position, Position::new(1.0, 2.0, 3.0));
        assert!(!node.highlighted);
    }

    #[test]
    fn refresh_is_raised_on_every_transition() {
        let mut registry = registry_with_ids(&[1, 2]);
        let mut refreshes = 0usize;

        {
            let mut sink = || refreshes += 1;
            let mut session =
                InspectorSession::open(&mut registry, NodeId::new(1), &mut sink).unwrap();
            session.next(&mut registry, &mut sink);
            session
                .set_position(&mut registry, "1", "1", "1", &mut sink)
                .unwrap();
            // A rejected edit does not refresh.
            let _ = session.set_position(&mut registry, "x", "1", "1", &mut sink);
            session.close(&mut registry, true, &mut sink);
        }

        assert_eq!(refreshes, 4);
    }
}
