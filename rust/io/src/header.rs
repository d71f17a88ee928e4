// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Analyze 7.5 `.hdr` layout: a fixed 348-byte little-endian struct —
//! `hk` (40 bytes), `dime` (108 bytes), `hist` (200 bytes) — with no
//! self-describing length prefix, so this module hand-walks byte offsets
//! the same way the original `analyze_loader.cpp` does, rather than reach
//! for a derive-based binary codec.
//!
//! Only the fields this system actually consumes (`dim[1..4]`, `datatype`,
//! `bitpix`, `pixdim[1]`, `glmax`/`glmin`) are exposed as typed accessors;
//! everything else in the 348 bytes is preserved verbatim across a
//! read-modify-write round trip so a skeleton output keeps its patient/scan
//! metadata intact.

use crate::error::{Error, Result};

/// Total on-disk size of an Analyze 7.5 header: `hk` (40) + `dime` (108) +
/// `hist` (200).
pub const HEADER_SIZE: usize = 348;

const DIME_OFFSET: usize = 40;
const DIM_OFFSET: usize = DIME_OFFSET; // short dim[8], index 1..4 are nx, ny, nz
const DATATYPE_OFFSET: usize = DIME_OFFSET + 30;
const BITPIX_OFFSET: usize = DIME_OFFSET + 32;
const PIXDIM_OFFSET: usize = DIME_OFFSET + 36; // float pixdim[8]
const GLMAX_OFFSET: usize = DIME_OFFSET + 100;
const GLMIN_OFFSET: usize = DIME_OFFSET + 104;

/// `dime.datatype` value for single-byte unsigned data — the only datatype
/// this system reads.
pub const DT_UNSIGNED_CHAR: i16 = 2;

/// A 348-byte Analyze 7.5 header, kept as its raw bytes plus the few fields
/// this system reads or rewrites.
#[derive(Debug, Clone)]
pub struct AnalyzeHeader {
    raw: [u8; HEADER_SIZE],
}

impl AnalyzeHeader {
    /// Parses a header from exactly 348 bytes, or returns
    /// [`Error::MalformedHeader`] if the buffer is short or `sizeof_hdr`
    /// does not match.
    pub fn parse(bytes: &[u8], path: &str) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::MalformedHeader {
                path: path.to_string(),
                reason: format!("expected {HEADER_SIZE} bytes, got {}", bytes.len()),
            });
        }
        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&bytes[..HEADER_SIZE]);

        let sizeof_hdr = i32::from_le_bytes(raw[0..4].try_into().unwrap());
        if sizeof_hdr != HEADER_SIZE as i32 {
            return Err(Error::MalformedHeader {
                path: path.to_string(),
                reason: format!("sizeof_hdr field was {sizeof_hdr}, expected {HEADER_SIZE}"),
            });
        }

        Ok(AnalyzeHeader { raw })
    }

    fn dim(&self, index: usize) -> i16 {
        let off = DIM_OFFSET + index * 2;
        i16::from_le_bytes(self.raw[off..off + 2].try_into().unwrap())
    }

    /// Original volume extents `(nx, ny, nz)` from `dime.dim[1..4]`.
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.dim(1) as usize, self.dim(2) as usize, self.dim(3) as usize)
    }

    /// `dime.datatype`.
    pub fn datatype(&self) -> i16 {
        i16::from_le_bytes(self.raw[DATATYPE_OFFSET..DATATYPE_OFFSET + 2].try_into().unwrap())
    }

    /// `dime.bitpix`.
    pub fn bitpix(&self) -> i16 {
        i16::from_le_bytes(self.raw[BITPIX_OFFSET..BITPIX_OFFSET + 2].try_into().unwrap())
    }

    /// `dime.pixdim[1]`, the isotropic voxel pitch used by trabecular length
    /// statistics.
    pub fn voxel_spacing(&self) -> f32 {
        let off = PIXDIM_OFFSET + 4; // pixdim[1], pixdim[0] is a qform flag convention this reader ignores
        f32::from_le_bytes(self.raw[off..off + 4].try_into().unwrap())
    }

    /// Builds a header for a binary skeleton output with the same extents
    /// and voxel spacing as `self`, `glmax = 1`, `glmin = 0`.
    pub fn for_skeleton_output(&self) -> Self {
        let mut raw = self.raw;
        raw[GLMAX_OFFSET..GLMAX_OFFSET + 4].copy_from_slice(&1i32.to_le_bytes());
        raw[GLMIN_OFFSET..GLMIN_OFFSET + 4].copy_from_slice(&0i32.to_le_bytes());
        AnalyzeHeader { raw }
    }

    /// The raw 348-byte on-disk representation.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(nx: i16, ny: i16, nz: i16, datatype: i16, bitpix: i16, pixdim1: f32) -> Vec<u8> {
        let mut raw = vec![0u8; HEADER_SIZE];
        raw[0..4].copy_from_slice(&(HEADER_SIZE as i32).to_le_bytes());
        raw[DIM_OFFSET + 2..DIM_OFFSET + 4].copy_from_slice(&nx.to_le_bytes());
        raw[DIM_OFFSET + 4..DIM_OFFSET + 6].copy_from_slice(&ny.to_le_bytes());
        raw[DIM_OFFSET + 6..DIM_OFFSET + 8].copy_from_slice(&nz.to_le_bytes());
        raw[DATATYPE_OFFSET..DATATYPE_OFFSET + 2].copy_from_slice(&datatype.to_le_bytes());
        raw[BITPIX_OFFSET..BITPIX_OFFSET + 2].copy_from_slice(&bitpix.to_le_bytes());
        raw[PIXDIM_OFFSET + 4..PIXDIM_OFFSET + 8].copy_from_slice(&pixdim1.to_le_bytes());
        raw
    }

    #[test]
    fn parses_extents_datatype_and_spacing() {
        let bytes = header_bytes(10, 20, 30, DT_UNSIGNED_CHAR, 8, 0.5);
        let header = AnalyzeHeader::parse(&bytes, "test.hdr").unwrap();
        assert_eq!(header.extents(), (10, 20, 30));
        assert_eq!(header.datatype(), DT_UNSIGNED_CHAR);
        assert_eq!(header.bitpix(), 8);
        assert!((header.voxel_spacing() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rejects_truncated_header() {
        let bytes = vec![0u8; 100];
        assert!(matches!(
            AnalyzeHeader::parse(&bytes, "short.hdr"),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn rejects_wrong_sizeof_hdr() {
        let mut bytes = header_bytes(1, 1, 1, DT_UNSIGNED_CHAR, 8, 1.0);
        bytes[0..4].copy_from_slice(&999i32.to_le_bytes());
        assert!(matches!(
            AnalyzeHeader::parse(&bytes, "bad.hdr"),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn for_skeleton_output_sets_glmax_glmin_and_preserves_extents() {
        let bytes = header_bytes(4, 4, 4, DT_UNSIGNED_CHAR, 8, 1.0);
        let header = AnalyzeHeader::parse(&bytes, "t.hdr").unwrap();
        let skeleton = header.for_skeleton_output();
        assert_eq!(skeleton.extents(), (4, 4, 4));
        let glmax = i32::from_le_bytes(skeleton.as_bytes()[GLMAX_OFFSET..GLMAX_OFFSET + 4].try_into().unwrap());
        let glmin = i32::from_le_bytes(skeleton.as_bytes()[GLMIN_OFFSET..GLMIN_OFFSET + 4].try_into().unwrap());
        assert_eq!(glmax, 1);
        assert_eq!(glmin, 0);
    }
}
