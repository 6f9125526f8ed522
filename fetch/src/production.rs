use std::time::Duration;

use crate::{FetchError, HttpGet, ImageDecode};

/// A blocking `reqwest` client behind [`HttpGet`].
pub struct ReqwestHttpGet {
	client: reqwest::blocking::Client,
}

impl ReqwestHttpGet {
	pub fn new(timeout: Duration) -> Result<Self, FetchError> {
		let client = reqwest::blocking::Client::builder().timeout(timeout).build().map_err(|e| FetchError::Http(e.to_string()))?;
		Ok(Self { client })
	}
}

impl HttpGet for ReqwestHttpGet {
	fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
		let response = self.client.get(url).send().map_err(|e| FetchError::Http(e.to_string()))?;
		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Http(format!("{url} returned status {status}")));
		}
		response.bytes().map(|b| b.to_vec()).map_err(|e| FetchError::Http(e.to_string()))
	}
}

/// The `image` crate behind [`ImageDecode`].
pub struct ImageCrateDecode;

impl ImageDecode for ImageCrateDecode {
	fn decode(&self, bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), FetchError> {
		let img = image::load_from_memory(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
		let rgba = img.to_rgba8();
		let (w, h) = (rgba.width(), rgba.height());
		Ok((rgba.into_raw(), w, h))
	}
}
