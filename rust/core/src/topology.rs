// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Border-point, end-point, and simple-point predicates.
//!
//! The simple-point test (`is_simple`) is the heart of the thinning
//! algorithm: it is the condition under which a foreground voxel can be
//! deleted without changing the topology of the object. It decomposes into
//! two independent connectivity checks, `cond2` and `cond4`, each a flood
//! fill over a precomputed adjacency graph (see [`crate::neighbourhood`]).
//!
//! Both floods here are iterative (an explicit stack) rather than the
//! recursive formulation of the textbook algorithm, so that the depth of a
//! single simple-point test never depends on call-stack headroom.

use crate::neighbourhood::{IDX26, IDX6_18, S26, S6_18};

/// True if the neighbour of `p` in `direction_offset` is background.
#[inline]
pub fn is_border_point(volume: &[u8], p: usize, direction_offset: isize) -> bool {
    volume[(p as isize + direction_offset) as usize] == 0
}

/// True if `p` has at most one foreground 26-neighbour.
#[inline]
pub fn is_end_point(lit_count: usize) -> bool {
    lit_count <= 1
}

/// True if deleting `p` would not change the topology of the foreground set,
/// i.e. `cond2(p) && cond4(p)`.
pub fn is_simple(volume: &[u8], np: &[usize; 26], lit_count: usize) -> bool {
    cond2(volume, np, lit_count) && cond4(volume, np)
}

/// Condition 2: the foreground 26-neighbours of `p` form a single
/// 26-connected component.
pub fn cond2(volume: &[u8], np: &[usize; 26], lit_count: usize) -> bool {
    let mut visited = [false; 26];
    let mut i = 0;
    while volume[np[i]] == 0 {
        visited[i] = true;
        i += 1;
    }
    connected26(volume, np, i, &mut visited) == lit_count
}

/// Flood-fills the 26-adjacency graph over foreground positions reachable
/// from `start`, returning the size of the reached component (including
/// `start`).
fn connected26(volume: &[u8], np: &[usize; 26], start: usize, visited: &mut [bool; 26]) -> usize {
    let mut stack = vec![start];
    visited[start] = true;
    let mut count = 0usize;
    while let Some(i) = stack.pop() {
        count += 1;
        let lo = IDX26[i] as usize;
        let hi = IDX26[i + 1] as usize;
        for &j in &S26[lo..hi] {
            let idx = j as usize;
            if !visited[idx] && volume[np[idx]] != 0 {
                visited[idx] = true;
                stack.push(idx);
            }
        }
    }
    count
}

/// Condition 4: the background 6-neighbours of `p` form a single
/// 6-connected component within the 18-neighbourhood.
pub fn cond4(volume: &[u8], np: &[usize; 26]) -> bool {
    let mut visited = [false; 18];
    let mut i = 0;
    while volume[np[i]] != 0 {
        visited[i] = true;
        i += 1;
    }
    let mut adjacent = [false; 6];
    if i < 6 {
        adjacent[i] = true;
    }
    connected6_18(volume, np, i, &mut visited, &mut adjacent);

    let foreground_6 = (0..6).filter(|&k| volume[np[k]] != 0).count();
    adjacent.iter().filter(|&&b| b).count() == 6 - foreground_6
}

/// Flood-fills the 6-in-18-adjacency graph over background positions
/// reachable from `start`, tagging which of the first 6 direction slots are
/// reached.
fn connected6_18(
    volume: &[u8],
    np: &[usize; 26],
    start: usize,
    visited: &mut [bool; 18],
    adjacent: &mut [bool; 6],
) {
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(i) = stack.pop() {
        let lo = IDX6_18[i] as usize;
        let hi = IDX6_18[i + 1] as usize;
        for &j in &S6_18[lo..hi] {
            let idx = j as usize;
            if !visited[idx] && volume[np[idx]] == 0 {
                if idx < 6 {
                    adjacent[idx] = true;
                }
                visited[idx] = true;
                stack.push(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbourhood::{collect_26, offsets};
    use crate::volume::Volume;

    fn solid_cube() -> (Volume, usize) {
        let raw = vec![1u8; 27];
        let v = Volume::from_raw(&raw, 3, 3, 3).unwrap();
        let center = v.index(2, 2, 2);
        (v, center)
    }

    #[test]
    fn interior_of_solid_cube_is_not_simple() {
        let (v, center) = solid_cube();
        let off = offsets(v.plane(), v.stride_y());
        let mut np = [0usize; 26];
        collect_26(&mut np, center, &off);
        let lit = crate::neighbourhood::lit_count(v.as_slice(), &np);
        assert_eq!(lit, 26);
        assert!(!is_simple(v.as_slice(), &np, lit));
    }

    #[test]
    fn isolated_voxel_is_end_point() {
        let raw = vec![0u8; 27];
        let mut raw = raw;
        raw[13] = 1; // centre of 3x3x3
        let v = Volume::from_raw(&raw, 3, 3, 3).unwrap();
        let center = v.index(2, 2, 2);
        let off = offsets(v.plane(), v.stride_y());
        let mut np = [0usize; 26];
        collect_26(&mut np, center, &off);
        let lit = crate::neighbourhood::lit_count(v.as_slice(), &np);
        assert!(is_end_point(lit));
    }

    #[test]
    fn face_voxel_of_solid_cube_is_a_border_point() {
        let (v, _) = solid_cube();
        let p = v.index(1, 2, 2); // on the +x face interior voxel (index 1..3 -> boundary at x=1)
        assert!(is_border_point(v.as_slice(), p, -1));
    }
}
