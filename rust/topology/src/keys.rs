// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph key types for arena-based storage.
//!
//! Each node and edge gets a unique, type-safe key for O(1) lookup in the
//! arena. Keys are generational, so a key from a node that was merged away
//! by fusion never silently resolves to a different, later node.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a node (junction cluster).
    pub struct NodeKey;

    /// Key for an edge (curvilinear voxel chain).
    pub struct EdgeKey;
}

/// A key that can reference either graph entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKey {
    Node(NodeKey),
    Edge(EdgeKey),
}

impl From<NodeKey> for GraphKey {
    fn from(k: NodeKey) -> Self {
        GraphKey::Node(k)
    }
}

impl From<EdgeKey> for GraphKey {
    fn from(k: EdgeKey) -> Self {
        GraphKey::Edge(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_from_distinct_arenas_are_distinguishable_via_graph_key() {
        let mut nodes = slotmap::SlotMap::<NodeKey, ()>::with_key();
        let mut edges = slotmap::SlotMap::<EdgeKey, ()>::with_key();
        let nk = nodes.insert(());
        let ek = edges.insert(());
        let gk_node: GraphKey = nk.into();
        let gk_edge: GraphKey = ek.into();
        assert_ne!(gk_node, gk_edge);
    }
}
