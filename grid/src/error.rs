use std::fmt::{Debug, Display, Formatter};

/// Errors from grid-level validation.
pub enum GridError {
	/// A sun altitude or azimuth outside the geographic range was passed to
	/// [`crate::hillshade`].
	InvalidSunAngle(String),
}

impl Display for GridError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidSunAngle(msg) => write!(f, "invalid sun angle: {msg}"),
		}
	}
}

impl Debug for GridError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result { Display::fmt(self, f) }
}

impl std::error::Error for GridError {}
