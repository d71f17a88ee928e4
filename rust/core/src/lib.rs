// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Tubular Core
//!
//! Padded volume indexing, 26-neighbourhood connectivity, and the
//! 6-subiteration topology-preserving thinning algorithm that reduces a
//! binary trabecular volume to a one-voxel-thick skeleton.
//!
//! This crate has no notion of nodes, edges, or a graph — it only knows how
//! to get from a raw voxel buffer to a thinned one. Graph extraction lives
//! in `tubular-topology`.

pub mod error;
pub mod neighbourhood;
pub mod thinner;
pub mod topology;
pub mod volume;

pub use error::{Error, Result};
pub use neighbourhood::Direction;
pub use thinner::skeletonize;
pub use volume::Volume;
