// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for volume loading and thinning.

/// Result type alias for `tubular-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or thinning a [`crate::volume::Volume`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more extents were zero.
    #[error("input shape {nx}x{ny}x{nz} has a zero extent")]
    InputShape { nx: usize, ny: usize, nz: usize },

    /// The supplied voxel buffer did not match `nx * ny * nz`.
    #[error("voxel buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}
