// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Final pass — adjacency emission.
//!
//! Every earlier pass leaves [`crate::arena::NodeData::edges`] and
//! [`crate::arena::EdgeData::first`]/`second` empty: refinement, pruning and
//! fusion all reason about node-edge adjacency structurally, by checking
//! whether two voxels are 26-adjacent, rather than by following a stored
//! cross-reference that could go stale mid-pass. This pass is the one place
//! those cross-references are actually written, once, after the skeleton's
//! voxel membership has settled for good.

use tubular_core::neighbourhood::is_26_adjacent;
use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::keys::NodeKey;

/// Walks every edge's two terminals, finds the node(s) touching each, and
/// records the adjacency on both sides.
pub fn emit_adjacency(volume: &Volume, arena: &mut GraphArena) {
    let edges: Vec<_> = arena.edge_keys().collect();
    for edge in edges {
        let (back, front) = {
            let data = arena.edge(edge).unwrap();
            (data.back_voxel(), data.front_voxel())
        };

        let back_node = node_touching(volume, arena, back);
        let front_node = node_touching(volume, arena, front);

        if let Some(n) = back_node {
            attach(arena, n, edge);
        }
        if let Some(n) = front_node {
            if Some(n) != back_node {
                attach(arena, n, edge);
            }
        }

        let data = arena.edge_mut(edge).unwrap();
        data.first = back_node;
        data.second = front_node;
    }
}

fn node_touching(volume: &Volume, arena: &GraphArena, terminal: usize) -> Option<NodeKey> {
    let tc = volume.padded_coords(terminal);
    arena.node_keys().find(|&n| {
        arena
            .node(n)
            .unwrap()
            .members
            .iter()
            .any(|&m| is_26_adjacent(tc, volume.padded_coords(m)))
    })
}

fn attach(arena: &mut GraphArena, node: NodeKey, edge: crate::keys::EdgeKey) {
    let data = arena.node_mut(node).unwrap();
    if !data.edges.contains(&edge) {
        data.edges.push(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction;

    #[test]
    fn straight_rod_edge_has_no_endpoints() {
        let raw = vec![1u8; 5];
        let mut volume = Volume::from_raw(&raw, 5, 1, 1).unwrap();
        tubular_core::skeletonize(&mut volume);
        let mut arena = GraphArena::new();
        construction::extract(&volume, &mut arena).unwrap();
        emit_adjacency(&volume, &mut arena);

        assert_eq!(arena.node_count(), 0);
        let edge = arena.edge_keys().next().unwrap();
        let data = arena.edge(edge).unwrap();
        assert!(data.first.is_none());
        assert!(data.second.is_none());
    }
}
