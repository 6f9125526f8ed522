use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Gzip-compress an encoded tile. The HTTP layer is responsible for setting
/// `Content-Encoding: gzip` alongside this.
pub fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(bytes)?;
	encoder.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gzip_output_starts_with_the_gzip_magic_bytes() {
		let compressed = gzip(b"hello world").unwrap();
		assert_eq!(&compressed[0..2], &[0x1f, 0x8b]);
	}

	#[test]
	fn gzip_shrinks_a_repetitive_payload() {
		let data = vec![0u8; 4096];
		let compressed = gzip(&data).unwrap();
		assert!(compressed.len() < data.len());
	}
}
