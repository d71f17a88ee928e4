// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reading and writing an Analyze 7.5 `.hdr`/`.img` pair by basename.
//!
//! This is the `VolumeIo` collaborator the core pipeline depends on but
//! never implements itself: it only ever sees the `(Vec<u8>, (nx, ny, nz),
//! voxel_spacing)` triple this module produces, never the on-disk format.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::header::AnalyzeHeader;

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::IoFailure {
        path: path.display().to_string(),
        source,
    }
}

/// Reads `<basename>.hdr` and `<basename>.img`, returning the raw unpadded
/// voxel buffer, its extents, and the isotropic voxel pitch.
///
/// The original `Tubular_object::load_from_file` this mirrors forgets to
/// return a success code in at least one revision of the source; this
/// function always returns explicitly, `Ok` on success or a typed `Error`
/// otherwise.
pub fn load(basename: &str) -> Result<(Vec<u8>, (usize, usize, usize), f32)> {
    let hdr_path = format!("{basename}.hdr");
    let img_path = format!("{basename}.img");

    let hdr_bytes = fs::read(&hdr_path).map_err(|e| io_error(Path::new(&hdr_path), e))?;
    let header = AnalyzeHeader::parse(&hdr_bytes, &hdr_path)?;

    if header.bitpix() != 8 || header.datatype() != crate::header::DT_UNSIGNED_CHAR {
        return Err(Error::UnsupportedDatatype {
            path: hdr_path,
            datatype: header.datatype(),
            bitpix: header.bitpix(),
        });
    }

    let (nx, ny, nz) = header.extents();
    let expected = nx * ny * nz;

    let img_bytes = fs::read(&img_path).map_err(|e| io_error(Path::new(&img_path), e))?;
    if img_bytes.len() != expected {
        return Err(Error::ImageLengthMismatch {
            path: img_path,
            expected,
            actual: img_bytes.len(),
        });
    }

    tracing::debug!(basename, nx, ny, nz, "loaded Analyze 7.5 volume");
    Ok((img_bytes, (nx, ny, nz), header.voxel_spacing()))
}

/// Writes `<basename>_skeleton.hdr` and `<basename>_skeleton.img`: the
/// header cloned from the *source* basename's `.hdr` (dimensions unchanged,
/// `glmax = 1`/`glmin = 0`) alongside the raw skeleton voxel buffer.
pub fn write_skeleton(basename: &str, skeleton: &[u8], extents: (usize, usize, usize)) -> Result<()> {
    let (nx, ny, nz) = extents;
    let expected = nx * ny * nz;
    if skeleton.len() != expected {
        return Err(Error::ImageLengthMismatch {
            path: format!("{basename}_skeleton.img"),
            expected,
            actual: skeleton.len(),
        });
    }

    let source_hdr_path = format!("{basename}.hdr");
    let hdr_bytes = fs::read(&source_hdr_path).map_err(|e| io_error(Path::new(&source_hdr_path), e))?;
    let header = AnalyzeHeader::parse(&hdr_bytes, &source_hdr_path)?.for_skeleton_output();

    let out_hdr_path = format!("{basename}_skeleton.hdr");
    let out_img_path = format!("{basename}_skeleton.img");

    fs::write(&out_hdr_path, header.as_bytes()).map_err(|e| io_error(Path::new(&out_hdr_path), e))?;
    fs::write(&out_img_path, skeleton).map_err(|e| io_error(Path::new(&out_img_path), e))?;

    tracing::debug!(out_hdr_path, out_img_path, "wrote skeleton volume");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_SIZE;

    fn write_test_volume(dir: &Path, basename: &str, nx: i16, ny: i16, nz: i16, pixdim1: f32, data: &[u8]) {
        let mut raw = vec![0u8; HEADER_SIZE];
        raw[0..4].copy_from_slice(&(HEADER_SIZE as i32).to_le_bytes());
        raw[42..44].copy_from_slice(&nx.to_le_bytes());
        raw[44..46].copy_from_slice(&ny.to_le_bytes());
        raw[46..48].copy_from_slice(&nz.to_le_bytes());
        raw[70..72].copy_from_slice(&crate::header::DT_UNSIGNED_CHAR.to_le_bytes()); // datatype
        raw[72..74].copy_from_slice(&8i16.to_le_bytes()); // bitpix
        raw[80..84].copy_from_slice(&pixdim1.to_le_bytes()); // pixdim[1] (pixdim[0] is at 76-80)

        fs::write(dir.join(format!("{basename}.hdr")), &raw).unwrap();
        fs::write(dir.join(format!("{basename}.img")), data).unwrap();
    }

    #[test]
    fn loads_a_valid_pair() {
        let dir = tempfile::tempdir().unwrap();
        let basename = dir.path().join("sample");
        let data = vec![1u8; 2 * 3 * 4];
        write_test_volume(dir.path(), "sample", 2, 3, 4, 0.25, &data);

        let (loaded, extents, spacing) = load(basename.to_str().unwrap()).unwrap();
        assert_eq!(loaded, data);
        assert_eq!(extents, (2, 3, 4));
        assert!((spacing - 0.25).abs() < 1e-6);
    }

    #[test]
    fn missing_header_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let basename = dir.path().join("nope");
        assert!(matches!(load(basename.to_str().unwrap()), Err(Error::IoFailure { .. })));
    }

    #[test]
    fn mismatched_image_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let basename = dir.path().join("sample");
        write_test_volume(dir.path(), "sample", 2, 2, 2, 1.0, &[1u8; 3]); // wrong length
        assert!(matches!(
            load(basename.to_str().unwrap()),
            Err(Error::ImageLengthMismatch { .. })
        ));
    }

    #[test]
    fn write_skeleton_round_trips_extents_and_data() {
        let dir = tempfile::tempdir().unwrap();
        let basename = dir.path().join("sample");
        let data = vec![1u8; 2 * 2 * 2];
        write_test_volume(dir.path(), "sample", 2, 2, 2, 1.0, &data);

        let skeleton = vec![0u8, 1, 0, 1, 0, 1, 0, 1];
        write_skeleton(basename.to_str().unwrap(), &skeleton, (2, 2, 2)).unwrap();

        let (reloaded, extents, _) = load(&format!("{}_skeleton", basename.to_str().unwrap())).unwrap();
        assert_eq!(reloaded, skeleton);
        assert_eq!(extents, (2, 2, 2));
    }
}
