//! Source tile fetching, decoding, and stitching into buffered elevation
//! grids.
//!
//! [`HttpGet`] and [`ImageDecode`] are the two seams that let [`stitch`]'s
//! algorithm be exercised without a network connection or an image
//! library: production code wires [`ReqwestHttpGet`] and
//! [`ImageCrateDecode`] behind them, tests wire stubs.

mod coord;
mod error;
mod production;
mod stitch;
mod traits;

pub use coord::TileCoord;
pub use error::FetchError;
pub use production::{ImageCrateDecode, ReqwestHttpGet};
pub use stitch::fetch_buffered_grid;
pub use traits::{HttpGet, ImageDecode};
