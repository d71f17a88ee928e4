// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Padded binary volume and linear indexing.
//!
//! Every operation in this crate works in padded coordinates: the volume is
//! bordered with a one-voxel margin of background so that neighbourhood
//! probes never need a bounds check. The border is established once, here,
//! and every later pass on the volume preserves it.

use crate::error::{Error, Result};

/// A dense binary volume, padded with a one-voxel background margin.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Vec<u8>,
    nx: usize,
    ny: usize,
    nz: usize,
    plane: usize,
    stride_y: usize,
}

impl Volume {
    /// Builds a padded volume from a raw, unpadded voxel buffer.
    ///
    /// `raw` must have exactly `nx * ny * nz` bytes; any non-zero byte is
    /// treated as foreground. The returned volume has extents
    /// `(nx + 2, ny + 2, nz + 2)` with every border voxel zeroed.
    pub fn from_raw(raw: &[u8], nx: usize, ny: usize, nz: usize) -> Result<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(Error::InputShape { nx, ny, nz });
        }
        let expected = nx * ny * nz;
        if raw.len() != expected {
            return Err(Error::BufferLengthMismatch {
                expected,
                actual: raw.len(),
            });
        }

        let (px, py, pz) = (nx + 2, ny + 2, nz + 2);
        let plane = px * py;
        let stride_y = px;
        let mut data = vec![0u8; plane * pz];

        for z in 0..nz {
            for y in 0..ny {
                let src_row = (z * ny + y) * nx;
                let dst_row = (z + 1) * plane + (y + 1) * stride_y + 1;
                for x in 0..nx {
                    data[dst_row + x] = (raw[src_row + x] != 0) as u8;
                }
            }
        }

        Ok(Volume {
            data,
            nx,
            ny,
            nz,
            plane,
            stride_y,
        })
    }

    /// Builds an already-padded volume directly, e.g. when restoring a
    /// previously serialized skeleton. `padded` must have exactly
    /// `(nx + 2) * (ny + 2) * (nz + 2)` bytes.
    pub fn from_padded(padded: Vec<u8>, nx: usize, ny: usize, nz: usize) -> Result<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(Error::InputShape { nx, ny, nz });
        }
        let plane = (nx + 2) * (ny + 2);
        let expected = plane * (nz + 2);
        if padded.len() != expected {
            return Err(Error::BufferLengthMismatch {
                expected,
                actual: padded.len(),
            });
        }
        Ok(Volume {
            data: padded,
            nx,
            ny,
            nz,
            plane,
            stride_y: nx + 2,
        })
    }

    /// Original (unpadded) extents.
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// `(nx + 2) * (ny + 2)`, the stride between consecutive z-planes.
    pub fn plane(&self) -> usize {
        self.plane
    }

    /// `nx + 2`, the stride between consecutive rows.
    pub fn stride_y(&self) -> usize {
        self.stride_y
    }

    /// Total number of padded voxels.
    pub fn padded_len(&self) -> usize {
        self.data.len()
    }

    /// Padded linear index of `(x, y, z)` in padded coordinates (i.e. already
    /// including the border offset).
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.plane + y * self.stride_y + x
    }

    /// Maps a padded linear index back to original (unpadded) `(x, y, z)`
    /// coordinates. Only meaningful for interior voxels.
    pub fn to_external(&self, padded_index: usize) -> (usize, usize, usize) {
        let z = padded_index / self.plane;
        let rem = padded_index % self.plane;
        let y = rem / self.stride_y;
        let x = rem % self.stride_y;
        (x.saturating_sub(1), y.saturating_sub(1), z.saturating_sub(1))
    }

    /// Decomposes a padded linear index into padded `(x, y, z)` coordinates
    /// (i.e. without the `to_external` unshift). Used by callers that need
    /// to compute adjacency between two arbitrary voxels rather than walk
    /// the fixed offset table.
    pub fn padded_coords(&self, padded_index: usize) -> (isize, isize, isize) {
        let z = padded_index / self.plane;
        let rem = padded_index % self.plane;
        let y = rem / self.stride_y;
        let x = rem % self.stride_y;
        (x as isize, y as isize, z as isize)
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.data[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: u8) {
        self.data[index] = value;
    }

    #[inline]
    pub fn is_foreground(&self, index: usize) -> bool {
        self.data[index] != 0
    }

    /// Raw padded byte buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copies the interior of the padded volume into an unpadded buffer of
    /// length `nx * ny * nz`, the inverse of [`Volume::from_raw`].
    pub fn to_raw(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.nx * self.ny * self.nz];
        for z in 0..self.nz {
            for y in 0..self.ny {
                let src_row = (z + 1) * self.plane + (y + 1) * self.stride_y + 1;
                let dst_row = (z * self.ny + y) * self.nx;
                out[dst_row..dst_row + self.nx]
                    .copy_from_slice(&self.data[src_row..src_row + self.nx]);
            }
        }
        out
    }

    /// Counts foreground voxels across the whole volume (border is always
    /// background, so this equals the count over the interior).
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Iterates over the padded indices of all interior voxels.
    pub fn interior_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let (px, py) = (self.stride_y, self.plane / self.stride_y);
        let nz = self.nz;
        let plane = self.plane;
        (1..=nz).flat_map(move |z| {
            (1..py - 1).flat_map(move |y| (1..px - 1).map(move |x| z * plane + y * px + x))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_always_background() {
        let raw = vec![1u8; 2 * 2 * 2];
        let v = Volume::from_raw(&raw, 2, 2, 2).unwrap();
        for z in 0..v.plane() / v.stride_y() {
            let _ = z;
        }
        // every voxel on the outermost shell is background
        let (nx, ny, nz) = (4usize, 4usize, 2usize); // padded extents
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let on_border = x == 0 || y == 0 || z == 0 || x == nx - 1 || y == ny - 1;
                    if on_border {
                        assert_eq!(v.get(v.index(x, y, z)), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn round_trip_raw() {
        let raw: Vec<u8> = (0..27).map(|i| (i % 3 == 0) as u8).collect();
        let v = Volume::from_raw(&raw, 3, 3, 3).unwrap();
        assert_eq!(v.to_raw(), raw);
    }

    #[test]
    fn rejects_zero_extent() {
        assert!(matches!(
            Volume::from_raw(&[], 0, 1, 1),
            Err(Error::InputShape { .. })
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(matches!(
            Volume::from_raw(&[1, 2, 3], 2, 2, 2),
            Err(Error::BufferLengthMismatch { .. })
        ));
    }
}
