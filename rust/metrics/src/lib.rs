// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Tubular Metrics
//!
//! Pure, read-only scalar measures derived from a finished skeleton volume
//! and graph: bone-volume fraction, per-edge physical length statistics,
//! trabecula count, and the junction-connectivity histogram. Nothing here
//! mutates the volume or the graph — every function takes `&Volume` /
//! `&GraphArena` and returns an owned value.
//!
//! `tb_th`, `tb_sp`, and `tb_shape` (trabecular thickness, spacing, and
//! rod/plate shape classification) are declared but left as `TODO` in the
//! original research tool itself and are intentionally not part of this
//! crate's contract.

use std::f64::consts::PI;

use tubular_core::Volume;
use tubular_topology::GraphArena;

/// Bone-volume-over-total-volume ratio, as a percentage.
///
/// Assumes the sample is roughly spherical and inscribed in the volume's
/// extent: the denominator is `(pi/6) * nx * ny * nz`, the volume of a ball
/// inscribed in a box of those dimensions, not the box itself. Callers
/// outside the bone-morphometry domain that pass a non-spherical sample
/// will see values that exceed 100%; that is the formula working as
/// specified, not a bug.
pub fn bv_tv(volume: &Volume) -> f64 {
    let (nx, ny, nz) = volume.extents();
    let ball_volume = (PI / 6.0) * (nx * ny * nz) as f64;
    let foreground = volume.foreground_count() as f64;
    (foreground / ball_volume) * 100.0
}

/// Summary statistics (in the same physical unit as `voxel_spacing`) over a
/// graph's edge lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
}

/// Raw edge lengths at or below this (in voxel-step units, before
/// `voxel_spacing` is applied) are dust: single-step stubs left over from
/// upstream passes that are excluded from the reported minimum only, not
/// from the mean/max/stddev.
const DUST_LENGTH: f64 = 2.0;

/// Mean/min/max/stddev of edge length across the graph, each multiplied by
/// `voxel_spacing` (the isotropic voxel pitch). Returns `None` if the graph
/// has no edges.
///
/// The minimum ignores edges whose raw (pre-scaling) length is `<= 2.0`,
/// treating them as dust rather than genuine short trabeculae; mean, max,
/// and stddev are computed over every edge.
pub fn average_trabecular_length(graph: &GraphArena, voxel_spacing: f64) -> Option<LengthStats> {
    let raw_lengths: Vec<f64> = graph
        .edge_keys()
        .map(|k| graph.edge(k).unwrap().length)
        .collect();

    if raw_lengths.is_empty() {
        return None;
    }

    let scaled: Vec<f64> = raw_lengths.iter().map(|&l| l * voxel_spacing).collect();
    let n = scaled.len() as f64;
    let mean = scaled.iter().sum::<f64>() / n;
    let variance = scaled.iter().map(|&l| (l - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();
    let max = scaled.iter().copied().fold(f64::MIN, f64::max);

    let above_dust = raw_lengths
        .iter()
        .zip(scaled.iter())
        .filter(|&(&raw, _)| raw > DUST_LENGTH)
        .map(|(_, &scaled)| scaled)
        .fold(None, |acc: Option<f64>, l| Some(acc.map_or(l, |m| m.min(l))));
    let min = above_dust.unwrap_or_else(|| scaled.iter().copied().fold(f64::MAX, f64::min));

    Some(LengthStats { mean, min, max, stddev })
}

/// Number of trabeculae, i.e. the number of edges in the graph.
pub fn number_of_trabeculae(graph: &GraphArena) -> usize {
    graph.edge_count()
}

/// Sparse junction-connectivity histogram: `(connectivity, count)` pairs,
/// sorted by connectivity, for every distinct connectivity value that
/// appears among the graph's nodes.
pub fn nodes_connectivity(graph: &GraphArena) -> Vec<(usize, usize)> {
    let mut histogram: std::collections::BTreeMap<usize, usize> = std::collections::BTreeMap::new();
    for node in graph.node_keys() {
        let conn = graph.node(node).unwrap().connectivity();
        *histogram.entry(conn).or_insert(0) += 1;
    }
    histogram.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bv_tv_of_fully_lit_10_cube_matches_the_formula() {
        let raw = vec![1u8; 1000];
        let volume = Volume::from_raw(&raw, 10, 10, 10).unwrap();
        let value = bv_tv(&volume);
        assert_relative_eq!(value, 1000.0 / ((PI / 6.0) * 1000.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(value, 190.985, epsilon = 1e-3);
    }

    #[test]
    fn empty_graph_has_no_length_stats() {
        let graph = GraphArena::new();
        assert!(average_trabecular_length(&graph, 1.0).is_none());
    }

    #[test]
    fn length_stats_scale_by_voxel_spacing() {
        let mut graph = GraphArena::new();
        let e1 = graph.new_edge(0);
        graph.edge_mut(e1).unwrap().push_back(1, 9.0);
        let e2 = graph.new_edge(2);
        graph.edge_mut(e2).unwrap().push_back(3, 3.0);

        let stats = average_trabecular_length(&graph, 0.5).unwrap();
        assert_relative_eq!(stats.mean, ((9.0 + 3.0) / 2.0) * 0.5, epsilon = 1e-9);
        assert_relative_eq!(stats.max, 9.0 * 0.5, epsilon = 1e-9);
        assert_relative_eq!(stats.min, 3.0 * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn length_stats_minimum_ignores_dust_edges() {
        let mut graph = GraphArena::new();
        let dust = graph.new_edge(0);
        graph.edge_mut(dust).unwrap().push_back(1, 1.0); // <= DUST_LENGTH
        let real = graph.new_edge(2);
        graph.edge_mut(real).unwrap().push_back(3, 8.0);

        let stats = average_trabecular_length(&graph, 1.0).unwrap();
        assert_relative_eq!(stats.min, 8.0, epsilon = 1e-9);
        assert_relative_eq!(stats.mean, (1.0 + 8.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn number_of_trabeculae_counts_edges() {
        let mut graph = GraphArena::new();
        graph.new_edge(0);
        graph.new_edge(1);
        assert_eq!(number_of_trabeculae(&graph), 2);
    }

    #[test]
    fn connectivity_histogram_is_sparse_and_sorted() {
        let mut graph = GraphArena::new();
        let n1 = graph.new_node();
        let n2 = graph.new_node();
        let n3 = graph.new_node();
        let e1 = graph.new_edge(0);
        let e2 = graph.new_edge(1);
        let e3 = graph.new_edge(2);
        graph.node_mut(n1).unwrap().edges.push(e1);
        graph.node_mut(n2).unwrap().edges.extend([e2, e3]);
        graph.node_mut(n3).unwrap().edges.extend([e1, e2, e3]);

        assert_eq!(nodes_connectivity(&graph), vec![(1, 1), (2, 1), (3, 1)]);
    }
}
