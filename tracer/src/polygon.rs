use crate::{Point, EPSILON};

/// Close a merged chain into a ring, appending the start point if it isn't
/// already closed. Returns `None` for chains too short to bound any area.
pub fn close_ring(mut chain: Vec<Point>) -> Option<Vec<Point>> {
	if chain.len() < 3 {
		return None;
	}
	let first = chain[0];
	let last = *chain.last().unwrap();
	if (first.0 - last.0).abs() > EPSILON || (first.1 - last.1).abs() > EPSILON {
		chain.push(first);
	}
	if chain.len() < 4 {
		return None;
	}
	Some(chain)
}

/// Signed shoelace area of a closed ring (positive for counter-clockwise winding).
fn signed_area(ring: &[Point]) -> f64 {
	let n = ring.len();
	let mut sum = 0.0;
	for i in 0..n - 1 {
		let (x0, y0) = ring[i];
		let (x1, y1) = ring[i + 1];
		sum += x0 * y1 - x1 * y0;
	}
	sum / 2.0
}

/// Ray-casting point-in-polygon test against a closed ring.
pub fn point_in_ring(point: Point, ring: &[Point]) -> bool {
	let (px, py) = point;
	let mut inside = false;
	let n = ring.len();
	for i in 0..n - 1 {
		let (x0, y0) = ring[i];
		let (x1, y1) = ring[i + 1];
		let crosses = (y0 > py) != (y1 > py);
		if crosses {
			let x_at_py = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
			if px < x_at_py {
				inside = !inside;
			}
		}
	}
	inside
}

/// Nest a flat bag of closed rings into shells with holes: the largest
/// unclaimed ring by area becomes a shell, and any smaller unclaimed ring
/// whose first vertex lies inside it (and outside any hole already claimed)
/// becomes one of its holes. One level deep, matching how a single
/// isoband's marching-squares output can nest.
pub fn assemble_polygons(mut rings: Vec<Vec<Point>>) -> Vec<(Vec<Point>, Vec<Vec<Point>>)> {
	rings.sort_by(|a, b| signed_area(b).abs().partial_cmp(&signed_area(a).abs()).unwrap());

	let n = rings.len();
	let mut used = vec![false; n];
	let mut polygons = Vec::new();

	for i in 0..n {
		if used[i] {
			continue;
		}
		used[i] = true;
		let shell = rings[i].clone();
		let mut holes: Vec<Vec<Point>> = Vec::new();

		for j in (i + 1)..n {
			if used[j] {
				continue;
			}
			let candidate_point = rings[j][0];
			if point_in_ring(candidate_point, &shell) && !holes.iter().any(|h| point_in_ring(candidate_point, h)) {
				used[j] = true;
				holes.push(rings[j].clone());
			}
		}

		polygons.push((shell, holes));
	}
	polygons
}
