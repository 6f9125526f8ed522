//! Row-major elevation grids, terrain-RGB codecs, and hillshade.
//!
//! This crate has no knowledge of tiles, HTTP, or MVT: it is the numeric
//! core that everything else in the workspace samples, decodes into, and
//! shades.

mod codec;
mod error;
mod grid;
mod hillshade;

pub use codec::*;
pub use error::GridError;
pub use grid::*;
pub use hillshade::*;

/// Earth radius used for the Web Mercator ground-resolution formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const TILE_SIZE: u32 = 256;
pub const SOURCE_TILE_SIZE: u32 = 512;
pub const BUFFER_PX: u32 = 8;

pub const MIN_ELEVATION: f64 = -500.0;
pub const MAX_ELEVATION: f64 = 9000.0;
pub const MIN_LUMINANCE: f64 = 0.0;
pub const MAX_LUMINANCE: f64 = 256.0;

pub const DEFAULT_SUN_ALTITUDE: f64 = 45.0;
pub const DEFAULT_SUN_AZIMUTH: f64 = 315.0;

/// Meters per pixel at the given zoom level for a `tile_size`-px tile, Web Mercator.
pub fn get_resolution(z: u32, tile_size: u32) -> f64 {
	2.0 * std::f64::consts::PI * EARTH_RADIUS_M / (tile_size as f64 * 2f64.powi(z as i32))
}
