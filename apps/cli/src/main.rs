// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # tubular
//!
//! Loads `<basename>.hdr`/`<basename>.img` (Analyze 7.5), skeletonizes the
//! volume, extracts the trabecular graph, and writes
//! `<basename>_skeleton.{hdr,img}` plus `<basename>_infos.txt`.
//!
//! Typed errors are owned by each library crate; this binary is the one
//! place they get chained into an `anyhow::Error` and mapped to a process
//! exit code, per the taxonomy in the design document: `InputShape`,
//! `EmptySkeleton`, and I/O failures each get a distinct code so a caller
//! scripting this tool can tell the failure modes apart without parsing
//! stderr.

mod report;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

/// Skeletonizes a trabecular volume and extracts its microstructure graph.
#[derive(Parser)]
#[command(name = "tubular")]
#[command(about = "Thins a trabecular Analyze 7.5 volume and extracts its skeleton graph")]
struct Cli {
    /// Basename of the `.hdr`/`.img` pair to process (no extension).
    basename: String,
}

const EXIT_INPUT_SHAPE: u8 = 2;
const EXIT_EMPTY_SKELETON: u8 = 3;
const EXIT_IO_FAILURE: u8 = 4;
const EXIT_GENERIC: u8 = 1;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match run(&cli.basename) {
        Ok(()) => ExitCode::from(0),
        Err(err) => {
            eprintln!("tubular: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    // `with_context` wraps the typed library error rather than replacing it,
    // so the cause we care about is somewhere in the chain, not necessarily
    // the outermost link.
    for cause in err.chain() {
        if cause.downcast_ref::<tubular_core::Error>().is_some() {
            return EXIT_INPUT_SHAPE;
        }
        if let Some(tubular_topology::Error::EmptySkeleton) = cause.downcast_ref::<tubular_topology::Error>() {
            return EXIT_EMPTY_SKELETON;
        }
        if cause.downcast_ref::<tubular_io::Error>().is_some() {
            return EXIT_IO_FAILURE;
        }
    }
    EXIT_GENERIC
}

fn run(basename: &str) -> anyhow::Result<()> {
    let (raw, (nx, ny, nz), voxel_spacing) =
        tubular_io::load(basename).with_context(|| format!("loading volume {basename}"))?;

    let mut volume = tubular_core::Volume::from_raw(&raw, nx, ny, nz)
        .with_context(|| format!("building padded volume from {basename}"))?;
    // BV/TV is a fraction of the original object, not of the one-voxel
    // skeleton thinning is about to carve out of it; keep a copy from
    // before thinning for the report.
    let original_volume = volume.clone();

    let rounds = tubular_core::skeletonize(&mut volume);
    tracing::info!(rounds, "thinning converged");

    let graph = tubular_topology::build(&mut volume).with_context(|| "extracting skeleton graph".to_string())?;

    tubular_io::write_skeleton(basename, &volume.to_raw(), volume.extents())
        .with_context(|| format!("writing skeleton for {basename}"))?;

    let report = report::render(basename, &original_volume, &graph, voxel_spacing as f64);
    let report_path = format!("{basename}_infos.txt");
    fs::write(&report_path, &report).with_context(|| format!("writing report {report_path}"))?;

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        report_path,
        "analysis complete"
    );
    Ok(())
}
