// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level orchestration of the five graph-extraction passes.

use tubular_core::Volume;

use crate::arena::GraphArena;
use crate::error::Result;
use crate::{construction, emission, fusion, pruning, refinement};

/// Runs every pass against `volume` in order and returns the resulting
/// graph: seed search + initial extraction, node refinement, branch
/// pruning (which re-thins and re-extracts when it removes anything), node
/// refinement again over the rebuilt graph, junction fusion, and finally
/// adjacency emission.
///
/// `volume` is mutated in place by pruning's re-thinning step, so the
/// skeleton the caller holds afterwards reflects any branches that were
/// erased.
pub fn build(volume: &mut Volume) -> Result<GraphArena> {
    let mut arena = GraphArena::new();

    construction::extract(volume, &mut arena)?;
    refinement::refine(volume, &mut arena);

    pruning::prune_and_rebuild(volume, &mut arena)?;
    refinement::refine(volume, &mut arena);

    fusion::fuse(volume, &mut arena);
    emission::emit_adjacency(volume, &mut arena);

    tracing::debug!(
        nodes = arena.node_count(),
        edges = arena.edge_count(),
        "graph extraction complete"
    );

    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_rod_builds_edge_only_graph() {
        let raw = vec![1u8; 6];
        let mut volume = Volume::from_raw(&raw, 6, 1, 1).unwrap();
        let arena = build(&mut volume).unwrap();
        assert_eq!(arena.node_count(), 0);
        assert_eq!(arena.edge_count(), 1);
    }
}
