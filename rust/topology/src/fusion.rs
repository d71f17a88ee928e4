// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pass 4 — junction fusion.
//!
//! An internal edge (one touching two distinct nodes) shorter than
//! [`crate::EDGE_THRESHOLD`] almost certainly represents a single junction
//! that thinning split into two nearby blobs connected by a stub. Fusion
//! merges the two nodes and folds the connecting edge's own voxels into the
//! surviving node, destroying the edge.
//!
//! The merged node's connectivity is never computed here as
//! `back.conn + front.conn - 2` by hand — that identity falls out for free
//! once the final adjacency-emission pass (over the now-merged voxels)
//! recomputes incident edges from scratch.

use tubular_core::neighbourhood::is_26_adjacent;
use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::keys::{EdgeKey, NodeKey};
use crate::EDGE_THRESHOLD;

/// Runs Pass 4 to a fixed point: repeatedly fuses the first short internal
/// edge found until none remain.
pub fn fuse(volume: &Volume, arena: &mut GraphArena) {
    while let Some((edge, back, front)) = find_fusable_edge(volume, arena) {
        fuse_once(arena, edge, back, front);
    }
}

fn find_fusable_edge(volume: &Volume, arena: &GraphArena) -> Option<(EdgeKey, NodeKey, NodeKey)> {
    arena.edge_keys().find_map(|edge| {
        let data = arena.edge(edge).unwrap();
        if data.length >= EDGE_THRESHOLD {
            return None;
        }
        internal_edge_endpoints(volume, arena, edge).map(|(back, front)| (edge, back, front))
    })
}

/// Returns the two distinct nodes touching `edge`'s two terminals, if both
/// exist and differ (an internal edge); `None` for a branch or free-floating
/// edge.
fn internal_edge_endpoints(volume: &Volume, arena: &GraphArena, edge: EdgeKey) -> Option<(NodeKey, NodeKey)> {
    let data = arena.edge(edge).unwrap();
    let back = node_touching(volume, arena, data.back_voxel())?;
    let front = node_touching(volume, arena, data.front_voxel())?;
    (back != front).then_some((back, front))
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

fn fuse_once(arena: &mut GraphArena, edge: EdgeKey, back: NodeKey, front: NodeKey) {
    let back_members = arena.remove_node(back).unwrap().members;
    for &v in &back_members {
        arena.classification_mut().set_node(v, front);
    }
    arena.node_mut(front).unwrap().members.extend(back_members);

    let edge_data = arena.remove_edge(edge).unwrap();
    for &v in &edge_data.voxels {
        arena.classification_mut().set_node(v, front);
    }
    arena.node_mut(front).unwrap().members.extend(edge_data.voxels);
}
