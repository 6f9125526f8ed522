use crate::Point;

/// Map a point in grid space (including the halo) into MVT tile-extent
/// space: `(p - buffer_px) * extent / tile_size`.
pub fn transform_point(point: Point, buffer_px: f64, tile_size: f64, extent: f64) -> Point {
	let scale = extent / tile_size;
	((point.0 - buffer_px) * scale, (point.1 - buffer_px) * scale)
}
