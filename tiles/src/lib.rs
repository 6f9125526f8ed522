//! Tile coordinate parsing, zoom-dependent interval tables, the in-process
//! response cache, environment configuration, and the per-request tile
//! handler orchestrator.

mod cache;
mod config;
mod coord;
mod error;
mod handler;
mod zoom;

pub use cache::Cache;
pub use config::{Config, ConfigError};
pub use coord::{parse_coord, strip_mvt_suffix, TileCoord, TileKind, MAX_ZOOM};
pub use error::TileError;
pub use handler::{TileHandler, TileResponse};
pub use mvt::{content_headers, MVT_CONTENT_TYPE};
pub use zoom::{baseline_luminance, contour_interval, generate_levels, hillshade_interval};
