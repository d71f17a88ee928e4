// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Tubular Topology
//!
//! Graph extraction over a thinned trabecular skeleton: node clusters at
//! junctions, curvilinear edge chains between them, and the five passes
//! (initial extraction, node refinement, branch pruning, junction fusion,
//! adjacency emission) that turn a raw voxel skeleton into that graph.
//!
//! Nodes and edges live in two independent arenas and reference each other
//! only through generational [`keys::NodeKey`]/[`keys::EdgeKey`] handles —
//! never through owning pointers — so the cyclic node↔edge relationship
//! never needs unsafe code or leaks.

pub mod arena;
pub mod builder;
pub mod classification;
pub mod construction;
pub mod emission;
pub mod error;
pub mod fusion;
pub mod keys;
pub mod pruning;
pub mod refinement;
pub mod serialization;
pub mod traversal;

pub use arena::GraphArena;
pub use builder::build;
pub use error::{Error, Result};
pub use keys::{EdgeKey, GraphKey, NodeKey};

/// A branch shorter than this (in voxel-step length units) is pruned as
/// thinning noise rather than kept as a genuine dead-end trabecula.
pub const BRANCH_THRESHOLD: f64 = 5.0;

/// An internal edge shorter than this is fused away: its two endpoint nodes
/// are merged and the edge's own voxels fold into the surviving node.
pub const EDGE_THRESHOLD: f64 = 2.1;
