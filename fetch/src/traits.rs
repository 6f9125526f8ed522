use crate::FetchError;

/// Fetches the raw bytes of a source tile over whatever transport the
/// implementation chooses. The production implementation is a blocking
/// `reqwest` client; tests use an in-memory stub.
pub trait HttpGet: Send + Sync {
	fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Decodes an encoded image (PNG/WebP) into raw RGBA pixels plus dimensions.
pub trait ImageDecode: Send + Sync {
	fn decode(&self, bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), FetchError>;
}
