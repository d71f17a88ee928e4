// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seed search and Pass 1 (initial extraction).
//!
//! Starting from an unambiguous tip voxel, the extraction alternates between
//! walking along an edge (while the current voxel has at most two lit
//! neighbours) and breadth-first absorption of a node cluster (once a voxel
//! with more than two lit neighbours is reached). Low-valence voxels
//! discovered during a node's BFS are deferred onto a work queue rather than
//! walked immediately, so the whole extraction is iterative instead of
//! mutually recursive.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tubular_core::neighbourhood::{collect_26, lit_count, offsets, step_length};
use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::error::{Error, Result};

/// Runs seed search and Pass 1 over `volume`, populating `arena` from
/// scratch. Any previous arena contents are dropped first.
pub fn extract(volume: &Volume, arena: &mut GraphArena) -> Result<()> {
    arena.reset();
    let offs = offsets(volume.plane(), volume.stride_y());

    let mut found_any_seed = false;
    loop {
        let seed = match find_tip(volume, arena, &offs) {
            Some(s) => s,
            None => break,
        };
        found_any_seed = true;

        let mut pending: VecDeque<usize> = VecDeque::new();
        pending.push_back(seed);
        while let Some(v) = pending.pop_front() {
            if arena.classification().is_classified(v) {
                continue;
            }
            walk_edge(volume, arena, &offs, v, &mut pending);
        }
    }

    let skipped = count_unreached_foreground(volume, arena);
    if skipped > 0 {
        tracing::warn!(
            skipped_voxels = skipped,
            "skeleton has one or more cycle components with no tip voxel; skipped"
        );
    }

    if !found_any_seed {
        return Err(Error::EmptySkeleton);
    }
    Ok(())
}

/// Finds the lowest-indexed unclassified foreground voxel with exactly one
/// lit neighbour.
fn find_tip(volume: &Volume, arena: &GraphArena, offs: &[isize; 26]) -> Option<usize> {
    volume.interior_indices().find(|&i| {
        if !volume.is_foreground(i) || arena.classification().is_classified(i) {
            return false;
        }
        let mut np = [0usize; 26];
        collect_26(&mut np, i, offs);
        lit_count(volume.as_slice(), &np) == 1
    })
}

fn count_unreached_foreground(volume: &Volume, arena: &GraphArena) -> usize {
    volume
        .interior_indices()
        .filter(|&i| volume.is_foreground(i) && !arena.classification().is_classified(i))
        .count()
}

/// Walks an edge from `start` (an unclassified voxel known to have at most
/// two lit neighbours) until it terminates in a dead end, a loop closure, or
/// a node cluster; in the last case the node's BFS is run immediately and
/// may enqueue further deferred edge seeds onto `pending`.
fn walk_edge(
    volume: &Volume,
    arena: &mut GraphArena,
    offs: &[isize; 26],
    start: usize,
    pending: &mut VecDeque<usize>,
) {
    let edge = arena.new_edge(start);
    arena.classification_mut().set_edge(start, edge);

    let mut current = start;
    loop {
        let mut np = [0usize; 26];
        collect_26(&mut np, current, offs);

        let next_position = (0..26).find(|&k| {
            volume.as_slice()[np[k]] != 0 && !arena.classification().is_classified(np[k])
        });

        let Some(k) = next_position else {
            break;
        };
        let next_voxel = np[k];

        let mut next_np = [0usize; 26];
        collect_26(&mut next_np, next_voxel, offs);
        let next_lit = lit_count(volume.as_slice(), &next_np);

        if next_lit <= 2 {
            arena.classification_mut().set_edge(next_voxel, edge);
            arena.edge_mut(edge).unwrap().push_back(next_voxel, step_length(k));
            current = next_voxel;
        } else {
            start_node_cluster(volume, arena, offs, next_voxel, pending);
            break;
        }
    }
}

/// Breadth-first absorbs a node cluster starting at `seed` (a voxel with
/// more than two lit neighbours). Unclassified lit neighbours with at most
/// two lit neighbours of their own are deferred as new edge seeds rather
/// than absorbed; the node's connectivity is the number of distinct seeds
/// this produces.
fn start_node_cluster(
    volume: &Volume,
    arena: &mut GraphArena,
    offs: &[isize; 26],
    seed: usize,
    pending: &mut VecDeque<usize>,
) {
    if arena.classification().is_classified(seed) {
        return;
    }
    let node = arena.new_node();
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    let mut deferred_seen: FxHashSet<usize> = FxHashSet::default();

    while let Some(v) = queue.pop_front() {
        if arena.classification().is_classified(v) {
            continue;
        }
        let mut np = [0usize; 26];
        collect_26(&mut np, v, offs);
        let lit = lit_count(volume.as_slice(), &np);

        if lit > 2 {
            arena.classification_mut().set_node(v, node);
            arena.node_mut(node).unwrap().members.push(v);
            for &nb in np.iter() {
                if volume.as_slice()[nb] != 0 && !arena.classification().is_classified(nb) {
                    queue.push_back(nb);
                }
            }
        } else if deferred_seen.insert(v) {
            pending.push_back(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubular_core::Volume;

    /// A 1x1x5 rod has two tips and no junction: extraction must yield a
    /// single edge with no nodes.
    #[test]
    fn straight_rod_yields_one_edge_no_nodes() {
        let raw = vec![1u8; 5];
        let volume = Volume::from_raw(&raw, 1, 1, 5).unwrap();
        let mut arena = GraphArena::new();
        extract(&volume, &mut arena).unwrap();
        assert_eq!(arena.node_count(), 0);
        assert_eq!(arena.edge_count(), 1);
        let edge = arena.edge(arena.edge_keys().next().unwrap()).unwrap();
        assert_eq!(edge.voxels.len(), 5);
    }

    #[test]
    fn empty_volume_is_empty_skeleton_error() {
        let raw = vec![0u8; 8];
        let volume = Volume::from_raw(&raw, 2, 2, 2).unwrap();
        let mut arena = GraphArena::new();
        assert!(matches!(extract(&volume, &mut arena), Err(Error::EmptySkeleton)));
    }
}
