use crate::Point;

const DEFAULT_ITERATIONS: u32 = 2;
const DEFAULT_FACTOR: f64 = 0.25;

fn lerp(a: Point, b: Point, t: f64) -> Point { (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t) }

/// Chaikin corner-cutting on an open polyline, keeping `points[0]` and
/// `points[last]` exactly fixed across every iteration: the first and last
/// segments only get their far corner cut, never the endpoint itself.
pub fn smooth_open(points: &[Point]) -> Vec<Point> { smooth_open_with(points, DEFAULT_ITERATIONS, DEFAULT_FACTOR) }

pub fn smooth_open_with(points: &[Point], iterations: u32, factor: f64) -> Vec<Point> {
	if points.len() < 3 {
		return points.to_vec();
	}
	let mut current = points.to_vec();
	for _ in 0..iterations {
		current = chaikin_open_pass(&current, factor);
	}
	current
}

fn chaikin_open_pass(points: &[Point], factor: f64) -> Vec<Point> {
	let n = points.len();
	let mut out = Vec::with_capacity(2 * n);
	out.push(points[0]);
	for i in 0..n - 1 {
		let (a, b) = (points[i], points[i + 1]);
		if i > 0 {
			out.push(lerp(a, b, factor));
		}
		if i < n - 2 {
			out.push(lerp(a, b, 1.0 - factor));
		}
	}
	out.push(points[n - 1]);
	out
}

/// Chaikin corner-cutting on a closed ring (`ring[0] == ring[last]`),
/// wrapping the cut modularly so every vertex, including the seam at the
/// closing point, gets cut like any other.
pub fn smooth_ring(ring: &[Point]) -> Vec<Point> { smooth_ring_with(ring, DEFAULT_ITERATIONS, DEFAULT_FACTOR) }

pub fn smooth_ring_with(ring: &[Point], iterations: u32, factor: f64) -> Vec<Point> {
	if ring.len() < 4 {
		return ring.to_vec();
	}
	// drop the closing duplicate for the smoothing passes themselves
	let mut current: Vec<Point> = ring[..ring.len() - 1].to_vec();
	for _ in 0..iterations {
		current = chaikin_ring_pass(&current, factor);
	}
	current.push(current[0]);
	current
}

fn chaikin_ring_pass(points: &[Point], factor: f64) -> Vec<Point> {
	let n = points.len();
	let mut out = Vec::with_capacity(2 * n);
	for i in 0..n {
		let a = points[i];
		let b = points[(i + 1) % n];
		out.push(lerp(a, b, factor));
		out.push(lerp(a, b, 1.0 - factor));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn open_line_endpoints_are_preserved_exactly() {
		let line = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)];
		let smoothed = smooth_open(&line);
		assert_eq!(smoothed.first(), Some(&(0.0, 0.0)));
		assert_eq!(smoothed.last(), Some(&(4.0, 0.0)));
	}

	#[test]
	fn short_open_lines_pass_through_unchanged() {
		let line = vec![(0.0, 0.0), (1.0, 1.0)];
		assert_eq!(smooth_open(&line), line);
	}

	#[test]
	fn closed_ring_stays_closed_after_smoothing() {
		let ring = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
		let smoothed = smooth_ring(&ring);
		assert_eq!(smoothed.first(), smoothed.last());
		assert!(smoothed.len() > ring.len());
	}

	#[test]
	fn smoothing_cuts_corners_inward() {
		// A right-angle corner should move strictly inside the original triangle.
		let line = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
		let smoothed = smooth_open_with(&line, 1, 0.25);
		// corner at (1,0) gets replaced by two points straddling it
		assert!(smoothed.iter().all(|&p| p != (1.0, 0.0)) || smoothed.len() > line.len());
	}
}
