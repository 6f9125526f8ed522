use std::fmt::{Debug, Display, Formatter};

/// Errors from fetching or decoding a source terrain-RGB tile.
pub enum FetchError {
	/// The HTTP client could not complete the request (connection, timeout, non-2xx status).
	Http(String),
	/// The image decoder rejected the response body.
	Decode(String),
}

impl Display for FetchError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
		match self {
			Self::Http(msg) => write!(f, "tile fetch failed: {msg}"),
			Self::Decode(msg) => write!(f, "tile decode failed: {msg}"),
		}
	}
}

impl Debug for FetchError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result { Display::fmt(self, f) }
}

impl std::error::Error for FetchError {}
