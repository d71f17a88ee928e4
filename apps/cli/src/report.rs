// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renders the textual `<basename>_infos.txt` report: sample name, extents,
//! pixel pitch, trabecula count, BV/TV, trabecular length statistics, and
//! the junction-connectivity histogram, all rounded to two decimals.

use tubular_core::Volume;
use tubular_topology::GraphArena;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds the report text for `sample_name` from the graph extracted from a
/// skeleton, plus voxel spacing (millimetres).
///
/// `original_volume` must be the volume as loaded, *before* thinning: BV/TV
/// is a bone-volume fraction of the original object, not of the one-voxel
/// skeleton that pruning and fusion have since mutated, so passing a
/// post-thinning volume here would collapse the ratio to a few voxels'
/// worth of foreground instead of the sample's real density.
pub fn render(sample_name: &str, original_volume: &Volume, graph: &GraphArena, voxel_spacing: f64) -> String {
    let (nx, ny, nz) = original_volume.extents();
    let bv_tv = round2(tubular_metrics::bv_tv(original_volume));
    let trabeculae = tubular_metrics::number_of_trabeculae(graph);
    let connectivity = tubular_metrics::nodes_connectivity(graph);

    let mut out = String::new();
    out.push_str(&format!("sample: {sample_name}\n"));
    out.push_str(&format!("extents: {nx} x {ny} x {nz}\n"));
    out.push_str(&format!("pixel pitch (mm): {:.2}\n", round2(voxel_spacing)));
    out.push_str(&format!("trabeculae: {trabeculae}\n"));
    out.push_str(&format!("BV/TV (%): {bv_tv:.2}\n"));

    match tubular_metrics::average_trabecular_length(graph, voxel_spacing) {
        Some(stats) => {
            out.push_str(&format!("mean trabecular length (mm): {:.2}\n", round2(stats.mean)));
            out.push_str(&format!("min trabecular length (mm): {:.2}\n", round2(stats.min)));
            out.push_str(&format!("max trabecular length (mm): {:.2}\n", round2(stats.max)));
            out.push_str(&format!("stddev trabecular length (mm): {:.2}\n", round2(stats.stddev)));
        }
        None => {
            out.push_str("mean trabecular length (mm): n/a\n");
            out.push_str("min trabecular length (mm): n/a\n");
            out.push_str("max trabecular length (mm): n/a\n");
            out.push_str("stddev trabecular length (mm): n/a\n");
        }
    }

    out.push_str("connectivity histogram:\n");
    if connectivity.is_empty() {
        out.push_str("  (no junctions)\n");
    } else {
        for (k, count) in connectivity {
            out.push_str(&format!("  {k}: {count}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_includes_sample_name_and_extents() {
        let raw = vec![1u8; 10];
        let volume = Volume::from_raw(&raw, 10, 1, 1).unwrap();
        let graph = GraphArena::new();
        let text = render("demo", &volume, &graph, 0.35);
        assert!(text.contains("sample: demo"));
        assert!(text.contains("extents: 10 x 1 x 1"));
        assert!(text.contains("pixel pitch (mm): 0.35"));
        assert!(text.contains("(no junctions)"));
    }

    #[test]
    fn report_reports_na_length_stats_without_edges() {
        let raw = vec![0u8; 8];
        let volume = Volume::from_raw(&raw, 2, 2, 2).unwrap();
        let graph = GraphArena::new();
        let text = render("empty", &volume, &graph, 1.0);
        assert!(text.contains("mean trabecular length (mm): n/a"));
    }

    /// A dense 10x10x10 volume must report the §8.6 BV/TV sanity value
    /// (~190.99%) even though the graph passed in was extracted from the
    /// thinned, one-voxel-thick skeleton of that same volume — BV/TV has to
    /// come from the dense volume, not the skeleton.
    #[test]
    fn bv_tv_reflects_the_dense_volume_not_the_skeleton() {
        let raw = vec![1u8; 1000];
        let dense_volume = Volume::from_raw(&raw, 10, 10, 10).unwrap();
        let mut skeleton_volume = dense_volume.clone();
        tubular_core::skeletonize(&mut skeleton_volume);
        assert!(skeleton_volume.foreground_count() < dense_volume.foreground_count());

        let graph = GraphArena::new();
        let text = render("cube", &dense_volume, &graph, 1.0);
        assert!(text.contains("BV/TV (%): 190.99"), "report was:\n{text}");
    }
}
