//! Mapbox Vector Tile v2 protobuf encoding.
//!
//! The wire format is produced by a small hand-rolled protobuf writer
//! ([`proto`]) rather than a code-generated client: the MVT message set is
//! small and fixed, so a generic codegen pipeline (and its build-time
//! `protoc` dependency) buys nothing here.

mod compress;
mod encode;
mod proto;

pub use compress::gzip;
pub use encode::{encode_tile, TileLayer};

pub const MVT_EXTENT: u32 = 4096;
pub const MVT_CONTENT_TYPE: &str = "application/vnd.mapbox-vector-tile";

/// The `Content-Type`/`Content-Encoding` pair a tile response should carry
/// for the given compression state.
pub fn content_headers(compressed: bool) -> &'static [(&'static str, &'static str)] {
	if compressed {
		&[("Content-Type", MVT_CONTENT_TYPE), ("Content-Encoding", "gzip")]
	} else {
		&[("Content-Type", MVT_CONTENT_TYPE)]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn content_headers_include_gzip_only_when_compressed() {
		assert_eq!(content_headers(false).len(), 1);
		assert_eq!(content_headers(true).len(), 2);
	}
}
