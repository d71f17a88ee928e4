// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pass 2 — node refinement.
//!
//! Pass 1 is conservative: any voxel with more than two lit neighbours is
//! absorbed into a node, even voxels that only transiently look like a
//! junction because an edge brushes past the node's corner. Refinement
//! walks each edge's two endpoints outward, pulling a 26-adjacent node voxel
//! back into the edge whenever doing so would not disconnect the node's
//! remaining voxels from each other, and would not cut any other edge off
//! from the node.

use tubular_core::neighbourhood::{is_26_adjacent, step_length_between};
use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::classification::Classification;
use crate::keys::{EdgeKey, NodeKey};

/// Runs Pass 2 to completion over every edge in `arena`.
pub fn refine(volume: &Volume, arena: &mut GraphArena) {
    let edge_keys: Vec<EdgeKey> = arena.edge_keys().collect();
    for edge in edge_keys {
        loop {
            if try_absorb_at_end(volume, arena, edge, Endpoint::Back)
                || try_absorb_at_end(volume, arena, edge, Endpoint::Front)
            {
                continue;
            }
            break;
        }
    }
}

#[derive(Clone, Copy)]
enum Endpoint {
    Back,
    Front,
}

/// Attempts a single absorption at one endpoint of `edge`. Returns `true` if
/// a voxel was absorbed (the caller should re-examine both endpoints, since
/// the terminal has moved).
fn try_absorb_at_end(volume: &Volume, arena: &mut GraphArena, edge: EdgeKey, end: Endpoint) -> bool {
    let terminal = match end {
        Endpoint::Back => arena.edge(edge).unwrap().back_voxel(),
        Endpoint::Front => arena.edge(edge).unwrap().front_voxel(),
    };
    let terminal_coords = volume.padded_coords(terminal);

    let candidate = find_refinable_neighbour(volume, arena, edge, terminal, terminal_coords);
    let Some((voxel, node)) = candidate else {
        return false;
    };

    let voxel_coords = volume.padded_coords(voxel);
    let length = step_length_between(terminal_coords, voxel_coords);

    arena.classification_mut().set_edge(voxel, edge);
    {
        let node_data = arena.node_mut(node).unwrap();
        node_data.members.retain(|&m| m != voxel);
    }
    let edge_data = arena.edge_mut(edge).unwrap();
    match end {
        Endpoint::Back => edge_data.push_front(voxel, length),
        Endpoint::Front => edge_data.push_back(voxel, length),
    }

    if arena.node(node).unwrap().members.is_empty() {
        arena.remove_node(node);
    }
    true
}

/// Finds a node-tagged voxel 26-adjacent to `terminal` that can be safely
/// reclassified as part of `edge`, if one exists.
fn find_refinable_neighbour(
    volume: &Volume,
    arena: &GraphArena,
    edge: EdgeKey,
    terminal: usize,
    terminal_coords: (isize, isize, isize),
) -> Option<(usize, NodeKey)> {
    // Node membership is sparse; scanning every node's member list against the
    // terminal keeps the 26-neighbour test in coordinate space, independent
    // of how the caller happened to reach `terminal`.
    for node in arena.node_keys() {
        let members = &arena.node(node).unwrap().members;
        for &voxel in members {
            if !is_26_adjacent(terminal_coords, volume.padded_coords(voxel)) {
                continue;
            }
            if is_node_refinable(volume, arena, node, voxel, edge) {
                return Some((voxel, node));
            }
        }
    }
    None
}

/// Condition (i): removing `voxel` from `node` would not disconnect the
/// node's remaining members from each other, tested the same way `cond2`
/// tests simple points — but over the synthetic foreground "is a member of
/// this node" instead of the volume's real foreground.
fn removal_preserves_connectivity(volume: &Volume, arena: &GraphArena, node: NodeKey, voxel: usize) -> bool {
    let node_data = arena.node(node).unwrap();
    let remaining: Vec<usize> = node_data.members.iter().copied().filter(|&m| m != voxel).collect();
    if remaining.len() <= 1 {
        return true;
    }
    let voxel_coords = volume.padded_coords(voxel);
    let neighbours: Vec<usize> = remaining
        .iter()
        .copied()
        .filter(|&m| is_26_adjacent(voxel_coords, volume.padded_coords(m)))
        .collect();
    if neighbours.is_empty() {
        return true;
    }

    // Flood the 26-adjacency graph restricted to `remaining`, starting from
    // the first neighbour of `voxel`, and check it reaches every member of
    // `remaining` that is itself adjacent to the cluster.
    let mut visited = vec![false; remaining.len()];
    let mut stack = vec![0usize];
    visited[0] = true;
    let mut reached = 0usize;
    while let Some(i) = stack.pop() {
        reached += 1;
        let ci = volume.padded_coords(remaining[i]);
        for (j, &m) in remaining.iter().enumerate() {
            if !visited[j] && is_26_adjacent(ci, volume.padded_coords(m)) {
                visited[j] = true;
                stack.push(j);
            }
        }
    }
    reached == remaining.len()
}

/// Condition (ii): every other edge currently incident to `voxel` (i.e.
/// whose terminal voxel is 26-adjacent to it) must remain incident to `node`
/// through some other member voxel once `voxel` is removed.
fn other_incident_edges_stay_connected(
    volume: &Volume,
    arena: &GraphArena,
    node: NodeKey,
    voxel: usize,
    excluding: EdgeKey,
) -> bool {
    let voxel_coords = volume.padded_coords(voxel);
    let remaining: Vec<usize> = arena
        .node(node)
        .unwrap()
        .members
        .iter()
        .copied()
        .filter(|&m| m != voxel)
        .collect();

    for other in arena.edge_keys() {
        if other == excluding {
            continue;
        }
        let data = arena.edge(other).unwrap();
        for terminal in [data.back_voxel(), data.front_voxel()] {
            if !is_26_adjacent(voxel_coords, volume.padded_coords(terminal)) {
                continue;
            }
            let terminal_coords = volume.padded_coords(terminal);
            let still_adjacent = remaining
                .iter()
                .any(|&m| is_26_adjacent(terminal_coords, volume.padded_coords(m)));
            if !still_adjacent {
                return false;
            }
        }
    }
    true
}

fn is_node_refinable(volume: &Volume, arena: &GraphArena, node: NodeKey, voxel: usize, edge: EdgeKey) -> bool {
    debug_assert!(matches!(
        arena.classification().get(voxel),
        Classification::NodeMember(n) if n == node
    ));
    removal_preserves_connectivity(volume, arena, node, voxel)
        && other_incident_edges_stay_connected(volume, arena, node, voxel, edge)
}
