// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The voxel classification map.
//!
//! Every skeleton voxel that has been visited by the graph builder carries
//! exactly one tag: it belongs to a node cluster, or to an edge chain, or it
//! has not been visited yet. The tag is a sum type rather than a pair of
//! optional references, so the exclusivity invariant holds by construction
//! instead of by convention.

use crate::keys::{EdgeKey, NodeKey};
use rustc_hash::FxHashMap;

/// The classification of a single skeleton voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not yet visited by the builder.
    Unclassified,
    /// Member of the given node cluster.
    NodeMember(NodeKey),
    /// Member of the given edge chain.
    EdgeMember(EdgeKey),
}

impl Classification {
    pub fn is_unclassified(&self) -> bool {
        matches!(self, Classification::Unclassified)
    }

    pub fn node(&self) -> Option<NodeKey> {
        match self {
            Classification::NodeMember(k) => Some(*k),
            _ => None,
        }
    }

    pub fn edge(&self) -> Option<EdgeKey> {
        match self {
            Classification::EdgeMember(k) => Some(*k),
            _ => None,
        }
    }
}

/// Sparse map from padded voxel index to its classification. Voxels absent
/// from the map are implicitly [`Classification::Unclassified`].
#[derive(Debug, Clone, Default)]
pub struct ClassificationMap {
    tags: FxHashMap<usize, Classification>,
}

impl ClassificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, voxel: usize) -> Classification {
        self.tags
            .get(&voxel)
            .copied()
            .unwrap_or(Classification::Unclassified)
    }

    pub fn set_node(&mut self, voxel: usize, node: NodeKey) {
        self.tags.insert(voxel, Classification::NodeMember(node));
    }

    pub fn set_edge(&mut self, voxel: usize, edge: EdgeKey) {
        self.tags.insert(voxel, Classification::EdgeMember(edge));
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_classified(&self, voxel: usize) -> bool {
        !self.get(voxel).is_unclassified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_voxel_is_unclassified() {
        let map = ClassificationMap::new();
        assert!(map.get(42).is_unclassified());
    }

    #[test]
    fn reclassifying_a_voxel_replaces_the_previous_tag() {
        let mut nodes = slotmap::SlotMap::<NodeKey, ()>::with_key();
        let mut edges = slotmap::SlotMap::<EdgeKey, ()>::with_key();
        let n = nodes.insert(());
        let e = edges.insert(());

        let mut map = ClassificationMap::new();
        map.set_node(7, n);
        assert_eq!(map.get(7).node(), Some(n));
        map.set_edge(7, e);
        assert_eq!(map.get(7).edge(), Some(e));
        assert!(map.get(7).node().is_none());
    }
}
