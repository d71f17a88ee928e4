// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for graph extraction.

use crate::keys::{EdgeKey, NodeKey};

/// Result type alias for graph-extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the skeleton graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Seed search found no voxel with exactly one lit neighbour. The
    /// skeleton is either empty or a pure cycle; either way an empty graph
    /// is the correct result, not a hard failure — callers that want to
    /// tell the two cases apart can match on this variant.
    #[error("no unambiguous tip voxel found; skeleton is empty or a pure cycle")]
    EmptySkeleton,

    /// A referenced node was not found in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// A referenced edge was not found in the arena.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
