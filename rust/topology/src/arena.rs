// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the skeleton graph.
//!
//! [`GraphArena`] is the central owner of every node and edge discovered
//! during graph extraction. Both live in slot maps with stable, generational
//! keys; nodes and edges reference each other only through those keys, never
//! through raw pointers, so the cyclic node↔edge relationship the original
//! tool expressed with owning raw pointers (and leaked) is here just two
//! independent arenas plus cross-referencing handles. Dropping the arena
//! invalidates every key at once.

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::classification::ClassificationMap;
use crate::keys::{EdgeKey, NodeKey};

/// Data stored for a node: a cluster of skeleton voxels at a junction.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    /// Member voxel indices, in the order they were absorbed into the node.
    pub members: Vec<usize>,
    /// Edges currently incident to this node.
    pub edges: Vec<EdgeKey>,
}

impl NodeData {
    /// Number of distinct edges attached to this node.
    pub fn connectivity(&self) -> usize {
        self.edges.len()
    }
}

/// Data stored for an edge: a curvilinear voxel chain between at most two
/// nodes.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Member voxel indices, double-ended so the walk can append at either
    /// terminal depending on which direction it grows from.
    pub voxels: VecDeque<usize>,
    /// Accumulated geometric length: sum of 1 / √2 / √3 contributions, one
    /// per step, depending on the adjacency class used to reach that voxel.
    pub length: f64,
    /// The node at the "back" of the voxel deque, if any.
    pub first: Option<NodeKey>,
    /// The node at the "front" of the voxel deque, if any.
    pub second: Option<NodeKey>,
}

impl EdgeData {
    fn new(seed_voxel: usize) -> Self {
        let mut voxels = VecDeque::new();
        voxels.push_back(seed_voxel);
        EdgeData {
            voxels,
            length: 0.0,
            first: None,
            second: None,
        }
    }

    /// Appends a voxel to the back of the chain, adding `step_length` to the
    /// accumulated length.
    pub fn push_back(&mut self, voxel: usize, step_length: f64) {
        self.voxels.push_back(voxel);
        self.length += step_length;
    }

    /// Appends a voxel to the front of the chain, adding `step_length` to the
    /// accumulated length.
    pub fn push_front(&mut self, voxel: usize, step_length: f64) {
        self.voxels.push_front(voxel);
        self.length += step_length;
    }

    /// The first member voxel (one terminal of the chain).
    pub fn back_voxel(&self) -> usize {
        *self.voxels.front().expect("edge always has at least one voxel")
    }

    /// The last member voxel (the other terminal of the chain).
    pub fn front_voxel(&self) -> usize {
        *self.voxels.back().expect("edge always has at least one voxel")
    }
}

/// The central arena that owns every node and edge produced by graph
/// extraction, plus the voxel classification map they were built from.
#[derive(Debug, Default)]
pub struct GraphArena {
    pub(crate) nodes: SlotMap<NodeKey, NodeData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) classification: ClassificationMap,
}

impl GraphArena {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    pub fn new_node(&mut self) -> NodeKey {
        self.nodes.insert(NodeData::default())
    }

    pub fn node(&self, key: NodeKey) -> Option<&NodeData> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut NodeData> {
        self.nodes.get_mut(key)
    }

    pub fn remove_node(&mut self, key: NodeKey) -> Option<NodeData> {
        self.nodes.remove(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.keys()
    }

    // --- Edge operations ---

    pub fn new_edge(&mut self, seed_voxel: usize) -> EdgeKey {
        self.edges.insert(EdgeData::new(seed_voxel))
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut EdgeData> {
        self.edges.get_mut(key)
    }

    pub fn remove_edge(&mut self, key: EdgeKey) -> Option<EdgeData> {
        self.edges.remove(key)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.keys()
    }

    // --- Classification ---

    pub fn classification(&self) -> &ClassificationMap {
        &self.classification
    }

    pub fn classification_mut(&mut self) -> &mut ClassificationMap {
        &mut self.classification
    }

    /// Drops every node and edge and clears the classification map, keeping
    /// the arena allocation around for reuse across the re-extraction that
    /// follows branch pruning.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.classification.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arena_is_empty() {
        let arena = GraphArena::new();
        assert_eq!(arena.node_count(), 0);
        assert_eq!(arena.edge_count(), 0);
    }

    #[test]
    fn node_connectivity_counts_incident_edges() {
        let mut arena = GraphArena::new();
        let n = arena.new_node();
        let e1 = arena.new_edge(0);
        let e2 = arena.new_edge(1);
        arena.node_mut(n).unwrap().edges.push(e1);
        arena.node_mut(n).unwrap().edges.push(e2);
        assert_eq!(arena.node(n).unwrap().connectivity(), 2);
    }

    #[test]
    fn edge_accumulates_length_on_push() {
        let mut arena = GraphArena::new();
        let e = arena.new_edge(10);
        arena.edge_mut(e).unwrap().push_back(11, 1.0);
        arena.edge_mut(e).unwrap().push_front(9, std::f64::consts::SQRT_2);
        let data = arena.edge(e).unwrap();
        assert_eq!(data.voxels, std::collections::VecDeque::from([9, 10, 11]));
        assert!((data.length - (1.0 + std::f64::consts::SQRT_2)).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_everything() {
        let mut arena = GraphArena::new();
        let n = arena.new_node();
        arena.new_edge(0);
        arena.classification_mut().set_node(0, n);
        arena.reset();
        assert_eq!(arena.node_count(), 0);
        assert_eq!(arena.edge_count(), 0);
        assert!(arena.classification().get(0).is_unclassified());
    }
}
