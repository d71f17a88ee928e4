// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pass 3 — branch pruning.
//!
//! A branch is an edge with exactly one terminal touching a node — a dead
//! end hanging off a junction rather than a through-connection. Short
//! branches are almost always thinning noise (a single stray voxel that
//! survived because it happened to be simple from every direction), so
//! branches below [`crate::BRANCH_THRESHOLD`] are erased from the skeleton
//! outright and the volume is re-thinned and re-extracted from scratch.

use tubular_core::neighbourhood::is_26_adjacent;
use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::construction;
use crate::error::Result;
use crate::keys::EdgeKey;
use crate::BRANCH_THRESHOLD;

/// Erases every branch shorter than [`BRANCH_THRESHOLD`], re-thins the
/// volume, and rebuilds `arena` from the result.
pub fn prune_and_rebuild(volume: &mut Volume, arena: &mut GraphArena) -> Result<()> {
    let short_branches: Vec<EdgeKey> = arena
        .edge_keys()
        .filter(|&e| is_branch(volume, arena, e) && arena.edge(e).unwrap().length < BRANCH_THRESHOLD)
        .collect();

    if short_branches.is_empty() {
        return Ok(());
    }

    for edge in short_branches {
        if let Some(data) = arena.remove_edge(edge) {
            for voxel in data.voxels {
                volume.set(voxel, 0);
            }
        }
    }

    tubular_core::skeletonize(volume);
    construction::extract(volume, arena)
}

fn is_branch(volume: &Volume, arena: &GraphArena, edge: EdgeKey) -> bool {
    let data = arena.edge(edge).unwrap();
    let back_adjacent = terminal_touches_any_node(volume, arena, data.back_voxel());
    let front_adjacent = terminal_touches_any_node(volume, arena, data.front_voxel());
    back_adjacent ^ front_adjacent
}

fn terminal_touches_any_node(volume: &Volume, arena: &GraphArena, terminal: usize) -> bool {
    let tc = volume.padded_coords(terminal);
    arena.node_keys().any(|n| {
        arena
            .node(n)
            .unwrap()
            .members
            .iter()
            .any(|&m| is_26_adjacent(tc, volume.padded_coords(m)))
    })
}
