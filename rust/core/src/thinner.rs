// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The 6-subiteration topology-preserving thinning algorithm.
//!
//! Reference: "A sequential 3D thinning algorithm and its medical
//! applications" (Pudney, 2001). Each round sweeps the six directions in a
//! fixed order (`Direction::ALL`); within a direction, candidates are
//! collected against a snapshot and then re-checked to a fixed point before
//! the volume is mutated further, so that whether a voxel survives never
//! depends on the order voxels happen to be visited in.

use crate::neighbourhood::{collect_26, lit_count, offsets, Direction};
use crate::topology::is_simple;
use crate::volume::Volume;

/// Thins `volume` in place until no further voxel can be deleted without
/// changing its topology. Returns the number of outer rounds performed.
pub fn skeletonize(volume: &mut Volume) -> usize {
    let mut black: Vec<usize> = volume
        .interior_indices()
        .filter(|&i| volume.is_foreground(i))
        .collect();

    let mut rounds = 0;
    loop {
        let mut modified = 0;
        for direction in Direction::ALL {
            modified += subiteration(volume, &mut black, direction);
        }
        rounds += 1;
        tracing::debug!(round = rounds, modified, remaining = black.len(), "thinning round");
        if modified == 0 {
            break;
        }
    }
    rounds
}

/// Deletes every simple, non-end, border point of `black` seen from
/// `direction`, re-checking to a fixed point. Returns the number deleted.
fn subiteration(volume: &mut Volume, black: &mut Vec<usize>, direction: Direction) -> usize {
    let plane = volume.plane();
    let stride_y = volume.stride_y();
    let direction_offset = direction.offset(plane, stride_y);
    let offs = offsets(plane, stride_y);

    let deletable = |volume: &Volume, p: usize| -> bool {
        if !crate::topology::is_border_point(volume.as_slice(), p, direction_offset) {
            return false;
        }
        let mut np = [0usize; 26];
        collect_26(&mut np, p, &offs);
        let lit = lit_count(volume.as_slice(), &np);
        lit > 1 && is_simple(volume.as_slice(), &np, lit)
    };

    let mut candidates: Vec<usize> = black.iter().copied().filter(|&p| deletable(volume, p)).collect();

    let mut modified = 0usize;
    loop {
        let before = modified;
        let recheck = |volume: &Volume, p: usize| -> bool {
            let mut np = [0usize; 26];
            collect_26(&mut np, p, &offs);
            let lit = lit_count(volume.as_slice(), &np);
            lit > 1 && is_simple(volume.as_slice(), &np, lit)
        };
        candidates.retain(|&p| {
            if recheck(volume, p) {
                volume.set(p, 0);
                modified += 1;
                false
            } else {
                true
            }
        });
        if modified == before {
            break;
        }
    }

    if modified > 0 {
        black.retain(|&p| volume.is_foreground(p));
    }
    modified
}
