//! The per-request tile handler: fetch → trace → smooth → transform/clip →
//! encode → cache, matching §4.8's eight-step orchestration.

use std::time::Duration;

use fetch::{fetch_buffered_grid, HttpGet, ImageCrateDecode, ImageDecode, ReqwestHttpGet};
use grid::{get_resolution, hillshade, invert, BufferedGrid, Grid, TerrainEncoding, DEFAULT_SUN_ALTITUDE, DEFAULT_SUN_AZIMUTH, MAX_ELEVATION, MAX_LUMINANCE, MIN_ELEVATION, TILE_SIZE};
use mvt::{encode_tile, gzip, TileLayer, MVT_EXTENT};
use tracer::{clip_line, clip_polygon, smooth_open, smooth_ring, transform_point, BBox, Feature, Geometry, Point, Properties};

use crate::cache::Cache;
use crate::config::Config;
use crate::coord::{parse_coord, TileKind};
use crate::error::TileError;
use crate::zoom::{baseline_luminance, contour_interval, generate_levels, hillshade_interval};

const BUFFER_PX: u32 = 8;

/// An encoded tile response, ready to be written out with the right headers.
pub struct TileResponse {
	pub bytes: Vec<u8>,
	pub compressed: bool,
}

pub struct TileHandler {
	config: Config,
	http: Box<dyn HttpGet>,
	decoder: Box<dyn ImageDecode>,
	cache: Cache,
	encoding: TerrainEncoding,
}

impl TileHandler {
	pub fn new(config: Config) -> Result<Self, TileError> {
		let http = ReqwestHttpGet::new(Duration::from_secs(10)).map_err(TileError::from)?;
		Self::with_fetcher(config, Box::new(http), Box::new(ImageCrateDecode))
	}

	pub fn with_fetcher(config: Config, http: Box<dyn HttpGet>, decoder: Box<dyn ImageDecode>) -> Result<Self, TileError> {
		let cache = Cache::new(Duration::from_secs(config.cache_ttl_secs), config.cache_capacity);
		Ok(Self { config, http, decoder, cache, encoding: TerrainEncoding::Terrarium })
	}

	/// Handle one `/tiles/{kind}/{z}/{x}/{y}[.mvt]` request.
	pub fn handle(&self, kind: &str, z: &str, x: &str, y: &str) -> Result<TileResponse, TileError> {
		let kind = TileKind::parse(kind)?;
		let coord = parse_coord(z, x, y)?;

		let cache_key = Cache::key(kind.as_str(), coord.z, coord.x, coord.y);
		if self.config.cache_enabled {
			if let Some(bytes) = self.cache.get(&cache_key) {
				return Ok(TileResponse { bytes, compressed: self.config.compression_enabled });
			}
		}

		let buffered = fetch_buffered_grid(coord, BUFFER_PX, &self.config.dem_tile_url, self.http.as_ref(), self.decoder.as_ref(), self.encoding, grid::SOURCE_TILE_SIZE).map_err(|e| {
			log::warn!("center tile fetch failed for {coord:?}: {e}");
			TileError::from(e)
		})?;

		let contour_feats = matches!(kind, TileKind::Contour | TileKind::Terrain).then(|| contour_features(&buffered, coord.z));
		let hillshade_feats = matches!(kind, TileKind::Hillshade | TileKind::Terrain).then(|| hillshade_features(&buffered, coord.z)).transpose()?;

		let mut layers = Vec::new();
		if let Some(features) = &contour_feats {
			layers.push(TileLayer { name: "contour", extent: MVT_EXTENT, features });
		}
		if let Some(features) = &hillshade_feats {
			layers.push(TileLayer { name: "hillshade", extent: MVT_EXTENT, features });
		}

		let mut bytes = encode_tile(&layers);
		let compressed = self.config.compression_enabled;
		if compressed {
			bytes = gzip(&bytes).map_err(|e| TileError::EncodingFailed(format!("gzip failed: {e}")))?;
		}

		if self.config.cache_enabled {
			self.cache.put(cache_key, bytes.clone());
		}

		Ok(TileResponse { bytes, compressed })
	}
}

fn transform_clip_line(points: &[Point], buffer_px: f64) -> Vec<Vec<Point>> {
	let transformed: Vec<Point> = points.iter().map(|&p| transform_point(p, buffer_px, TILE_SIZE as f64, MVT_EXTENT as f64)).collect();
	let bbox = BBox::new(0.0, 0.0, MVT_EXTENT as f64, MVT_EXTENT as f64);
	clip_line(&transformed, bbox).into_iter().filter(|l| l.len() >= 2).collect()
}

/// Transform and clip a shell+holes polygon. Returns `None` if the shell
/// clips away entirely; surviving holes are carried through even if some
/// holes are dropped (an empty-shell polygon is discarded per §4.6, but a
/// polygon missing some of its holes is still a valid, if slightly
/// over-inclusive, polygon).
fn transform_clip_polygon(shell: &[Point], holes: &[Vec<Point>], buffer_px: f64) -> Option<(Vec<Point>, Vec<Vec<Point>>)> {
	let bbox = BBox::new(0.0, 0.0, MVT_EXTENT as f64, MVT_EXTENT as f64);
	let transform_ring = |ring: &[Point]| -> Vec<Point> { ring.iter().map(|&p| transform_point(p, buffer_px, TILE_SIZE as f64, MVT_EXTENT as f64)).collect() };

	let shell = clip_polygon(&transform_ring(shell), bbox);
	if shell.is_empty() {
		return None;
	}
	let holes = holes.iter().map(|h| clip_polygon(&transform_ring(h), bbox)).filter(|h| !h.is_empty()).collect();
	Some((shell, holes))
}

fn contour_features(buffered: &BufferedGrid, z: u32) -> Vec<Feature> {
	let interval = contour_interval(z);
	let levels = generate_levels(MIN_ELEVATION, MAX_ELEVATION, interval);
	let buffer_px = buffered.buffer_px() as f64;
	let index_modulus = (5.0 * interval).round() as i64;

	let mut features = Vec::new();
	for level in levels {
		let index = (level.round() as i64).rem_euclid(index_modulus) == 0;
		for line in tracer::trace_lines(buffered.grid(), level) {
			if line.len() < 2 {
				continue;
			}
			let smoothed = smooth_open(&line);
			for piece in transform_clip_line(&smoothed, buffer_px) {
				let properties = Properties::new().with("level", level.round() as i64).with("index", index);
				features.push(Feature::new(Geometry::LineString(piece), properties));
			}
		}
	}
	features
}

/// Luminance-threshold-to-shade mapping. `255.0` (not [`MAX_LUMINANCE`]) is
/// the normalization divisor, a deliberate asymmetry carried verbatim: the
/// level range is exclusive of 256, but shade is normalized against 255.
fn shade_from_level(level: f64, baseline: f64, highlight: bool) -> f64 {
	let delta = (level - baseline) / (2.0 * 255.0);
	let shade = if highlight { 0.5 + delta } else { 0.5 - delta };
	shade.clamp(0.0, 1.0)
}

fn hillshade_features(buffered: &BufferedGrid, z: u32) -> Result<Vec<Feature>, TileError> {
	let cell_size = get_resolution(z, TILE_SIZE);
	let shaded = hillshade(buffered.grid(), cell_size, DEFAULT_SUN_ALTITUDE, DEFAULT_SUN_AZIMUTH)?;
	let inverted = shaded.map(invert);

	let baseline = baseline_luminance(DEFAULT_SUN_ALTITUDE);
	let interval = hillshade_interval(z);
	let levels = generate_levels(baseline, MAX_LUMINANCE, interval);
	let buffer_px = buffered.buffer_px() as f64;

	let mut features = Vec::new();
	for (shade_grid, highlight) in [(&shaded, true), (&inverted, false)] {
		for &level in &levels {
			for (shell, holes) in tracer::trace_polygons(shade_grid, level) {
				let Some((shell, holes)) = transform_clip_polygon(&shell, &holes, buffer_px) else { continue };
				let smoothed_shell = smooth_ring(&shell);
				let smoothed_holes: Vec<Vec<Point>> = holes.iter().map(|h| smooth_ring(h)).collect();
				let mut rings = Vec::with_capacity(smoothed_holes.len() + 1);
				rings.push(smoothed_shell);
				rings.extend(smoothed_holes);

				let shade = shade_from_level(level, baseline, highlight);
				let properties = Properties::new().with("level", level.round() as i64).with("shade", shade);
				features.push(Feature::new(Geometry::Polygon { rings }, properties));
			}
		}
	}
	Ok(features)
}
