#![cfg(not(tarpaulin_include))]

use crate::error::CliError;
use basis_transcoder_api::TranscoderTextureFormat;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Converts a path to the string form the file handles expect.
#[inline(always)]
pub fn path_str(path: &Path) -> Result<&str, CliError> {
    path.to_str()
        .ok_or_else(|| CliError::InvalidPath(path.display().to_string()))
}

/// Memory maps `path` read-only and passes its contents to `f`.
///
/// Empty files are passed as an empty slice without mapping.
pub fn with_mapped_input<R>(
    path: &Path,
    f: impl FnOnce(&[u8]) -> Result<R, CliError>,
) -> Result<R, CliError> {
    let handle = ReadOnlyFileHandle::open(path_str(path)?)
        .map_err(|e| CliError::MmapError(e.to_string()))?;
    let size = handle
        .size()
        .map_err(|e| CliError::MmapError(e.to_string()))? as usize;
    if size == 0 {
        return f(&[]);
    }

    let mapping =
        ReadOnlyMmap::new(&handle, 0, size).map_err(|e| CliError::MmapError(e.to_string()))?;
    f(mapping.as_slice())
}

/// Creates a file of `len` bytes at `path` and passes its mapping to `f` for filling.
pub fn with_mapped_output<R>(
    path: &Path,
    len: usize,
    f: impl FnOnce(&mut [u8]) -> Result<R, CliError>,
) -> Result<R, CliError> {
    let handle = ReadWriteFileHandle::create_preallocated(path_str(path)?, len as i64)
        .map_err(|e| CliError::MmapError(e.to_string()))?;
    let mut mapping =
        ReadWriteMmap::new(&handle, 0, len).map_err(|e| CliError::MmapError(e.to_string()))?;
    f(mapping.as_mut_slice())
}

/// Writes tightly packed RGBA8 pixels as a PNG.
pub fn write_png(path: &Path, pixels: Vec<u8>, width: u32, height: u32) -> Result<(), CliError> {
    let len = pixels.len();
    let image = image::RgbaImage::from_raw(width, height, pixels).ok_or(CliError::ImageSize {
        len,
        width,
        height,
    })?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Parses an output format by its short name, e.g. `bc7` or `rgba32`.
pub fn parse_format(value: &str) -> Result<TranscoderTextureFormat, String> {
    let lower = value.to_lowercase();
    TranscoderTextureFormat::all_values()
        .iter()
        .copied()
        .find(|format| format.name() == lower)
        .ok_or_else(|| {
            let names: Vec<&str> = TranscoderTextureFormat::all_values()
                .iter()
                .map(|format| format.name())
                .collect();
            format!(
                "Unknown format: {value}. Valid formats are: {}",
                names.join(", ")
            )
        })
}

/// Canonicalizes a CLI directory argument, creating the directory if it doesn't exist.
pub fn canonicalize_cli_dir(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| format!("Failed to create directory: {e}"))?;
    }
    fs::canonicalize(path).map_err(|e| format!("Invalid path: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bc7", TranscoderTextureFormat::Bc7Rgba)]
    #[case("RGBA32", TranscoderTextureFormat::Rgba32)]
    #[case("pvrtc1_rgb", TranscoderTextureFormat::Pvrtc1_4Rgb)]
    #[case("eac_rg11", TranscoderTextureFormat::Etc2EacRg11)]
    fn parses_format_names(#[case] value: &str, #[case] expected: TranscoderTextureFormat) {
        assert_eq!(parse_format(value), Ok(expected));
    }

    #[test]
    fn unknown_format_lists_valid_names() {
        let error = parse_format("dxt1").unwrap_err();
        assert!(error.starts_with("Unknown format: dxt1."));
        assert!(error.contains("bc1"));
    }

    #[test]
    fn every_format_name_round_trips() {
        for &format in TranscoderTextureFormat::all_values() {
            assert_eq!(parse_format(format.name()), Ok(format));
        }
    }
}
