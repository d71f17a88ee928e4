// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for Analyze 7.5 header and image I/O.

/// Result type alias for `tubular-io` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or writing an Analyze 7.5 volume.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying filesystem I/O failed. Never retried internally.
    #[error("I/O failure reading {path}: {source}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The `.hdr` file was shorter than the fixed 348-byte Analyze 7.5
    /// header, or `sizeof_hdr` did not match the expected value.
    #[error("malformed Analyze 7.5 header in {path}: {reason}")]
    MalformedHeader { path: String, reason: String },

    /// `dime.datatype`/`dime.bitpix` described something other than
    /// single-byte unsigned data; this system only reads binary/greyscale
    /// volumes where each voxel is one byte.
    #[error("unsupported Analyze datatype (datatype={datatype}, bitpix={bitpix}) in {path}; only single-byte unsigned data is supported")]
    UnsupportedDatatype { path: String, datatype: i16, bitpix: i16 },

    /// The `.img` file's length did not match `nx * ny * nz` bytes implied
    /// by the header's dimensions.
    #[error("image data length mismatch in {path}: header implies {expected} bytes, file has {actual}")]
    ImageLengthMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}
