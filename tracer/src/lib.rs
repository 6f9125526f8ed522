//! Marching Squares isoline/isoband tracing, Chaikin smoothing, coordinate
//! transform, and tile-boundary clipping.
//!
//! This is the vector half of the pipeline: it turns a [`grid::Grid`] plus
//! one or more threshold levels into [`Feature`]s in grid space, ready for
//! [`transform`] and [`clip`].

mod clip;
mod geometry;
mod marching_squares;
mod merge;
mod polygon;
mod smooth;
mod transform;

pub use clip::*;
pub use geometry::*;
pub use marching_squares::EPSILON;
pub use polygon::assemble_polygons;
pub use smooth::{smooth_open, smooth_ring};
pub use transform::transform_point;

use grid::Grid;

/// Trace isolines of `grid` at `level`, merged into maximal polylines.
///
/// Each returned polyline has at least 2 points; polylines are unordered and
/// may be open or (incidentally) closed.
pub fn trace_lines(grid: &Grid, level: f64) -> Vec<Vec<Point>> {
	let segments = marching_squares::collect_segments(grid, level, false);
	merge::merge_segments(segments)
}

/// Trace isobands of `grid` at `level` as a set of closed rings, not yet
/// nested into shells/holes. See [`assemble_polygons`] for that step.
pub fn trace_polygon_rings(grid: &Grid, level: f64) -> Vec<Vec<Point>> {
	let segments = marching_squares::collect_segments(grid, level, true);
	merge::merge_segments(segments)
		.into_iter()
		.filter_map(polygon::close_ring)
		.collect()
}

/// Trace isobands of `grid` at `level`, nested into shells with holes.
pub fn trace_polygons(grid: &Grid, level: f64) -> Vec<(Vec<Point>, Vec<Vec<Point>>)> {
	assemble_polygons(trace_polygon_rings(grid, level))
}

/// Trace isolines at every level in `levels`, returning one [`Feature`] per
/// merged polyline, tagged with a `level` property.
pub fn trace_line_features(grid: &Grid, levels: &[f64]) -> Vec<Feature> {
	levels
		.iter()
		.flat_map(|&level| {
			trace_lines(grid, level)
				.into_iter()
				.filter(|line| line.len() >= 2)
				.map(move |coords| Feature::new(Geometry::LineString(coords), Properties::new().with("level", level)))
		})
		.collect()
}

/// Trace isobands at every level in `levels`, returning one [`Feature`] per
/// shell+holes polygon, tagged with a `level` property.
pub fn trace_polygon_features(grid: &Grid, levels: &[f64]) -> Vec<Feature> {
	levels
		.iter()
		.flat_map(|&level| {
			trace_polygons(grid, level).into_iter().map(move |(shell, holes)| {
				let mut rings = Vec::with_capacity(holes.len() + 1);
				rings.push(shell);
				rings.extend(holes);
				Feature::new(Geometry::Polygon { rings }, Properties::new().with("level", level))
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn grid2x2(tl: f64, tr: f64, bl: f64, br: f64) -> Grid { Grid::new(2, 2, vec![tl, tr, bl, br]) }

	#[test]
	fn case_0_and_15_produce_no_lines() {
		let all_below = grid2x2(0.0, 0.0, 0.0, 0.0);
		assert!(trace_lines(&all_below, 0.5).is_empty());

		let all_above = grid2x2(1.0, 1.0, 1.0, 1.0);
		assert!(trace_lines(&all_above, 0.5).is_empty());
	}

	#[test]
	fn saddle_cases_emit_two_disjoint_line_segments() {
		// BL and TR above the level, TL and BR below: a saddle.
		let saddle = grid2x2(0.0, 1.0, 1.0, 0.0);
		let lines = trace_lines(&saddle, 0.5);
		assert_eq!(lines.len(), 2);
		for line in &lines {
			assert_eq!(line.len(), 2);
		}
	}

	#[test]
	fn case_15_polygon_mode_is_the_full_unit_square() {
		let all_above = grid2x2(1.0, 1.0, 1.0, 1.0);
		let rings = trace_polygon_rings(&all_above, 0.5);
		assert_eq!(rings.len(), 1);
		let ring = &rings[0];
		assert_eq!(ring.first(), ring.last());

		let mut unique = ring[..ring.len() - 1].to_vec();
		unique.sort_by(|a, b| a.partial_cmp(b).unwrap());
		let mut expected = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
		expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
		assert_eq!(unique, expected);
	}

	#[test]
	fn saddle_in_polygon_mode_closes_into_one_hexagonal_ring_per_boundary_cell() {
		// BL and TR above the level: the two ambiguous saddle diagonals. On a
		// single boundary cell, the tile-edge closing rule connects through
		// the two "inside" corners and carves the two "outside" corners away
		// as excluded triangles, producing one hexagon.
		let saddle = grid2x2(0.0, 1.0, 1.0, 0.0);
		let rings = trace_polygon_rings(&saddle, 0.5);
		assert_eq!(rings.len(), 1);
		let ring = &rings[0];
		assert_eq!(ring.first(), ring.last());
		assert_eq!(ring.len(), 7); // 6 distinct points, closed

		// The excluded corners (TL at (0,0), BR at (1,1)) must not appear.
		for &p in ring {
			assert!(p != (0.0, 0.0) && p != (1.0, 1.0));
		}
		// The kept corners (TR at (1,0), BL at (0,1)) must appear.
		assert!(ring.contains(&(1.0, 0.0)));
		assert!(ring.contains(&(0.0, 1.0)));
	}

	#[test]
	fn trace_line_features_carries_level_property() {
		let grid = Grid::new(
			5,
			5,
			vec![
				0.0, 0.0, 0.0, 0.0, 0.0, //
				0.0, 100.0, 100.0, 100.0, 0.0, //
				0.0, 100.0, 200.0, 100.0, 0.0, //
				0.0, 100.0, 100.0, 100.0, 0.0, //
				0.0, 0.0, 0.0, 0.0, 0.0,
			],
		);
		let features = trace_line_features(&grid, &[50.0, 150.0]);
		assert!(features.iter().any(|f| f.properties.get("level") == Some(&PropertyValue::Float(150.0))));
		for f in &features {
			match &f.geometry {
				Geometry::LineString(coords) => assert!(coords.len() >= 2),
				_ => panic!("expected line strings"),
			}
		}
	}
}
