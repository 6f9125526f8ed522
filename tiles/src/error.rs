use std::fmt::{Debug, Display, Formatter};

use fetch::FetchError;
use grid::GridError;

/// Errors surfaced by the tile handler, following the `geo::LoadError`
/// idiom: plain enum, hand-written `Display`/`Debug`/`Error`, no
/// `thiserror`/`anyhow`.
pub enum TileError {
	/// `z`/`x`/`y` failed validation.
	BadCoordinates(String),
	/// Center-tile fetch failed or decoded to zero pixels.
	UpstreamUnavailable(String),
	/// The image decoder rejected the response body.
	DecodeError(String),
	/// A hillshade angle or grid validator rejected its input.
	InvalidInput(String),
	/// Encoding the response (MVT or gzip) failed.
	EncodingFailed(String),
}

impl Display for TileError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
		match self {
			Self::BadCoordinates(msg) => write!(f, "bad tile coordinates: {msg}"),
			Self::UpstreamUnavailable(msg) => write!(f, "upstream unavailable: {msg}"),
			Self::DecodeError(msg) => write!(f, "decode error: {msg}"),
			Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
			Self::EncodingFailed(msg) => write!(f, "encoding failed: {msg}"),
		}
	}
}

impl Debug for TileError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result { Display::fmt(self, f) }
}

impl std::error::Error for TileError {}

impl From<FetchError> for TileError {
	fn from(e: FetchError) -> Self {
		match e {
			FetchError::Http(msg) => Self::UpstreamUnavailable(msg),
			FetchError::Decode(msg) => Self::DecodeError(msg),
		}
	}
}

impl From<GridError> for TileError {
	fn from(e: GridError) -> Self {
		match e {
			GridError::InvalidSunAngle(msg) => Self::InvalidInput(msg),
		}
	}
}

impl TileError {
	/// HTTP status code the handler boundary maps this error to.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::BadCoordinates(_) => 400,
			Self::UpstreamUnavailable(_) | Self::DecodeError(_) | Self::InvalidInput(_) | Self::EncodingFailed(_) => 500,
		}
	}

	/// A lower-level cause string for the `details` field of a 500 response.
	/// `None` for `BadCoordinates`, whose 400 response carries no `details`.
	pub fn details(&self) -> Option<&str> {
		match self {
			Self::BadCoordinates(_) => None,
			Self::UpstreamUnavailable(msg) | Self::DecodeError(msg) | Self::InvalidInput(msg) | Self::EncodingFailed(msg) => Some(msg),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bad_coordinates_is_a_400_with_no_details() {
		let err = TileError::BadCoordinates("zoom 30 exceeds maximum".to_string());
		assert_eq!(err.status_code(), 400);
		assert_eq!(err.details(), None);
	}

	#[test]
	fn other_variants_are_500s_with_details() {
		for err in [
			TileError::UpstreamUnavailable("connection refused".to_string()),
			TileError::DecodeError("bad png".to_string()),
			TileError::InvalidInput("sun altitude out of range: 120".to_string()),
			TileError::EncodingFailed("gzip failed: io error".to_string()),
		] {
			assert_eq!(err.status_code(), 500);
			assert!(err.details().is_some());
		}
	}

	#[test]
	fn grid_error_converts_to_invalid_input() {
		let err = TileError::from(GridError::InvalidSunAngle("sun azimuth out of range: 400".to_string()));
		assert!(matches!(err, TileError::InvalidInput(_)));
	}
}
