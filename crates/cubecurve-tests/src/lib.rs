//! Integration tests for cubecurve crates.
//!
//! This crate contains end-to-end tests that go from a `.cube` file on disk
//! through conversion to the reference host adapter, plus the fixtures
//! those tests share.

use cubecurve_lut::{LutGrid, cube};
use std::path::{Path, PathBuf};

/// A LUT applying a separate power curve to each channel.
///
/// Off-diagonal entries also mix in the other channels, so anything other
/// than the neutral diagonal would show up in the converted curves.
pub fn power_grid(size: usize, gamma: [f32; 3]) -> LutGrid {
    let scale = (size - 1) as f32;
    let mut entries: Vec<[f32; 3]> = Vec::with_capacity(size * size * size);
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let rgb = [r as f32 / scale, g as f32 / scale, b as f32 / scale];
                let mean = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
                let cross: [f32; 3] = std::array::from_fn(|c| 0.5 * (rgb[c] - mean));
                entries.push(std::array::from_fn(|c| rgb[c].powf(gamma[c]) + cross[c]));
            }
        }
    }
    LutGrid::from_entries(size, entries).expect("valid grid")
}

/// Writes `grid` as `<dir>/<name>` and returns the path.
pub fn write_fixture(dir: &Path, name: &str, grid: &LutGrid) -> PathBuf {
    let path = dir.join(name);
    cube::write_3d(&path, grid, Some(name)).expect("Failed to write fixture");
    path
}
