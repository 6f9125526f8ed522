use fetch::{FetchError, HttpGet, ImageDecode};
use grid::TerrainEncoding;
use tiles::{Config, TileHandler};

const SIZE: u32 = 512;

struct StubHttp;
impl HttpGet for StubHttp {
	fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> { Ok(vec![0u8]) }
}

/// Decodes every request to the same synthetic terrain, ignoring the
/// fetched bytes entirely: either a flat plane or a radial cone, both
/// encoded through the real terrain-RGB codec so the handler's decode step
/// is exercised end to end.
struct StubDecode {
	cone: bool,
}
impl ImageDecode for StubDecode {
	fn decode(&self, _bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), FetchError> {
		let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
		let center = SIZE as f64 / 2.0;
		for y in 0..SIZE {
			for x in 0..SIZE {
				let elevation = if self.cone {
					let (dx, dy) = (x as f64 - center, y as f64 - center);
					2000.0 - (dx * dx + dy * dy).sqrt() * 10.0
				} else {
					0.0
				};
				let (r, g, b, a) = TerrainEncoding::Terrarium.encode(elevation);
				rgba.extend_from_slice(&[r, g, b, a]);
			}
		}
		Ok((rgba, SIZE, SIZE))
	}
}

fn test_config() -> Config {
	Config {
		dem_tile_url: "https://example.com/{z}/{x}/{y}.png".to_string(),
		cache_enabled: false,
		cache_ttl_secs: 60,
		cache_capacity: 16,
		compression_enabled: false,
		bind_addr: "127.0.0.1:0".to_string(),
	}
}

#[test]
fn cone_grid_contour_tile_is_larger_than_a_flat_grid_tile() {
	let flat = TileHandler::with_fetcher(test_config(), Box::new(StubHttp), Box::new(StubDecode { cone: false })).unwrap();
	let cone = TileHandler::with_fetcher(test_config(), Box::new(StubHttp), Box::new(StubDecode { cone: true })).unwrap();

	let flat_tile = flat.handle("contour", "5", "3", "3").unwrap();
	let cone_tile = cone.handle("contour", "5", "3", "3").unwrap();

	// A perfectly flat grid traces no contour lines at all (every cell is
	// case 0 or 15), so its encoded layer carries no features.
	assert!(cone_tile.bytes.len() > flat_tile.bytes.len());
}

#[test]
fn terrain_kind_yields_both_layers_and_bad_coordinates_are_rejected() {
	let handler = TileHandler::with_fetcher(test_config(), Box::new(StubHttp), Box::new(StubDecode { cone: true })).unwrap();

	let terrain_tile = handler.handle("terrain", "5", "3", "3").unwrap();
	assert!(!terrain_tile.bytes.is_empty());

	let err = handler.handle("contour", "30", "0", "0").unwrap_err();
	assert_eq!(err.status_code(), 400);
}

#[test]
fn repeated_requests_are_served_from_cache() {
	let mut config = test_config();
	config.cache_enabled = true;
	let handler = TileHandler::with_fetcher(config, Box::new(StubHttp), Box::new(StubDecode { cone: true })).unwrap();

	let first = handler.handle("hillshade", "6", "1", "1").unwrap();
	let second = handler.handle("hillshade", "6", "1", "1").unwrap();
	assert_eq!(first.bytes, second.bytes);
}

#[test]
fn gzip_compression_produces_smaller_or_equal_output_with_the_gzip_header() {
	let mut config = test_config();
	config.compression_enabled = true;
	let handler = TileHandler::with_fetcher(config, Box::new(StubHttp), Box::new(StubDecode { cone: true })).unwrap();

	let tile = handler.handle("contour", "5", "3", "3").unwrap();
	assert!(tile.compressed);
	assert_eq!(&tile.bytes[0..2], &[0x1f, 0x8b]);
}

