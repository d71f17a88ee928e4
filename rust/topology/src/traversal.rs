// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only traversal queries over a built [`GraphArena`].
//!
//! Everything here is derived from the node/edge data already stored by the
//! builder passes — no traversal method mutates the arena.

use crate::arena::GraphArena;
use crate::keys::{EdgeKey, NodeKey};

impl GraphArena {
    /// The edges incident to `node`, or an empty slice if `node` is absent.
    pub fn node_edges(&self, node: NodeKey) -> &[EdgeKey] {
        self.node(node).map(|n| n.edges.as_slice()).unwrap_or(&[])
    }

    /// The member voxels of `node`, or an empty slice if `node` is absent.
    pub fn node_members(&self, node: NodeKey) -> &[usize] {
        self.node(node).map(|n| n.members.as_slice()).unwrap_or(&[])
    }

    /// `true` if `node` has exactly one incident edge (a dangling junction —
    /// rare, since most leaves are absorbed directly into an edge chain
    /// rather than a node cluster, but possible after fusion).
    pub fn is_leaf_node(&self, node: NodeKey) -> bool {
        self.node(node).map(|n| n.connectivity() == 1).unwrap_or(false)
    }

    /// The two endpoint nodes of `edge`, in `(first, second)` order. Either
    /// or both may be `None` for an edge that never reaches a node (a free
    /// rod between two tips, or a closed loop with no junction).
    pub fn edge_endpoints(&self, edge: EdgeKey) -> (Option<NodeKey>, Option<NodeKey>) {
        self.edge(edge).map(|e| (e.first, e.second)).unwrap_or((None, None))
    }

    /// `true` if `edge` is missing at least one endpoint node.
    pub fn edge_is_dangling(&self, edge: EdgeKey) -> bool {
        let (first, second) = self.edge_endpoints(edge);
        first.is_none() || second.is_none()
    }

    /// The other nodes reachable from `node` by crossing exactly one edge.
    pub fn adjacent_nodes(&self, node: NodeKey) -> Vec<NodeKey> {
        self.node_edges(node)
            .iter()
            .filter_map(|&e| {
                let (first, second) = self.edge_endpoints(e);
                match (first, second) {
                    (Some(a), Some(b)) if a == node => Some(b),
                    (Some(a), Some(b)) if b == node => Some(a),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_node_has_single_edge() {
        let mut arena = GraphArena::new();
        let n = arena.new_node();
        let e = arena.new_edge(0);
        arena.node_mut(n).unwrap().edges.push(e);
        assert!(arena.is_leaf_node(n));
    }

    #[test]
    fn dangling_edge_has_no_endpoints() {
        let mut arena = GraphArena::new();
        let e = arena.new_edge(0);
        assert!(arena.edge_is_dangling(e));
        let _ = e;
    }

    #[test]
    fn adjacent_nodes_crosses_shared_edge() {
        let mut arena = GraphArena::new();
        let a = arena.new_node();
        let b = arena.new_node();
        let e = arena.new_edge(0);
        arena.edge_mut(e).unwrap().first = Some(a);
        arena.edge_mut(e).unwrap().second = Some(b);
        arena.node_mut(a).unwrap().edges.push(e);
        arena.node_mut(b).unwrap().edges.push(e);

        assert_eq!(arena.adjacent_nodes(a), vec![b]);
        assert_eq!(arena.adjacent_nodes(b), vec![a]);
    }
}
