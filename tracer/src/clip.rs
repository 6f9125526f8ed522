use crate::Point;

/// Axis-aligned clip rectangle.
#[derive(Copy, Clone, Debug)]
pub struct BBox {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl BBox {
	pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self { Self { min_x, min_y, max_x, max_y } }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(p: Point, b: BBox) -> u8 {
	let mut code = INSIDE;
	if p.0 < b.min_x {
		code |= LEFT;
	} else if p.0 > b.max_x {
		code |= RIGHT;
	}
	if p.1 < b.min_y {
		code |= BOTTOM;
	} else if p.1 > b.max_y {
		code |= TOP;
	}
	code
}

/// Cohen-Sutherland clip of one segment against `bbox`. `None` if the whole
/// segment lies outside.
fn clip_segment(mut p0: Point, mut p1: Point, bbox: BBox) -> Option<(Point, Point)> {
	let mut code0 = outcode(p0, bbox);
	let mut code1 = outcode(p1, bbox);

	loop {
		if code0 == 0 && code1 == 0 {
			return Some((p0, p1));
		}
		if code0 & code1 != 0 {
			return None;
		}

		let code_out = if code0 != 0 { code0 } else { code1 };
		let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
		let clipped = if code_out & TOP != 0 {
			(p0.0 + dx * (bbox.max_y - p0.1) / dy, bbox.max_y)
		} else if code_out & BOTTOM != 0 {
			(p0.0 + dx * (bbox.min_y - p0.1) / dy, bbox.min_y)
		} else if code_out & RIGHT != 0 {
			(bbox.max_x, p0.1 + dy * (bbox.max_x - p0.0) / dx)
		} else {
			(bbox.min_x, p0.1 + dy * (bbox.min_x - p0.0) / dx)
		};

		if code_out == code0 {
			p0 = clipped;
			code0 = outcode(p0, bbox);
		} else {
			p1 = clipped;
			code1 = outcode(p1, bbox);
		}
	}
}

/// Clip an open polyline against `bbox`, splitting it wherever the line
/// leaves and re-enters the box. Segments that touch end-to-end are kept as
/// one continuous output line.
pub fn clip_line(points: &[Point], bbox: BBox) -> Vec<Vec<Point>> {
	let mut lines: Vec<Vec<Point>> = Vec::new();

	for window in points.windows(2) {
		let Some((a, b)) = clip_segment(window[0], window[1], bbox) else { continue };

		match lines.last_mut() {
			Some(last) if last.last() == Some(&a) => last.push(b),
			_ => lines.push(vec![a, b]),
		}
	}
	lines
}

#[derive(Copy, Clone)]
enum Edge {
	Left,
	Right,
	Top,
	Bottom,
}

fn inside(p: Point, edge: Edge, b: BBox) -> bool {
	match edge {
		Edge::Left => p.0 >= b.min_x,
		Edge::Right => p.0 <= b.max_x,
		Edge::Top => p.1 <= b.max_y,
		Edge::Bottom => p.1 >= b.min_y,
	}
}

fn intersect(a: Point, c: Point, edge: Edge, b: BBox) -> Point {
	let (dx, dy) = (c.0 - a.0, c.1 - a.1);
	match edge {
		Edge::Left => (b.min_x, a.1 + dy * (b.min_x - a.0) / dx),
		Edge::Right => (b.max_x, a.1 + dy * (b.max_x - a.0) / dx),
		Edge::Top => (a.0 + dx * (b.max_y - a.1) / dy, b.max_y),
		Edge::Bottom => (a.0 + dx * (b.min_y - a.1) / dy, b.min_y),
	}
}

fn clip_against_edge(points: &[Point], edge: Edge, bbox: BBox) -> Vec<Point> {
	if points.is_empty() {
		return Vec::new();
	}
	let n = points.len();
	let mut out = Vec::with_capacity(n);
	for i in 0..n {
		let curr = points[i];
		let prev = points[(i + n - 1) % n];
		let curr_in = inside(curr, edge, bbox);
		let prev_in = inside(prev, edge, bbox);

		if curr_in {
			if !prev_in {
				out.push(intersect(prev, curr, edge, bbox));
			}
			out.push(curr);
		} else if prev_in {
			out.push(intersect(prev, curr, edge, bbox));
		}
	}
	out
}

/// Sutherland-Hodgman clip of a closed ring (`ring[0] == ring[last]`)
/// against `bbox`, in left/right/top/bottom edge order. Returns an empty
/// ring if nothing survives.
pub fn clip_polygon(ring: &[Point], bbox: BBox) -> Vec<Point> {
	if ring.len() < 4 {
		return Vec::new();
	}
	let mut points = ring[..ring.len() - 1].to_vec();

	for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
		points = clip_against_edge(&points, edge, bbox);
		if points.is_empty() {
			return Vec::new();
		}
	}

	points.push(points[0]);
	points
}

#[cfg(test)]
mod tests {
	use super::*;

	fn box_0_10() -> BBox { BBox::new(0.0, 0.0, 10.0, 10.0) }

	#[test]
	fn line_fully_inside_is_unchanged() {
		let line = vec![(1.0, 1.0), (5.0, 5.0), (9.0, 1.0)];
		let clipped = clip_line(&line, box_0_10());
		assert_eq!(clipped, vec![line]);
	}

	#[test]
	fn line_crossing_an_edge_is_cut_at_the_boundary() {
		let line = vec![(5.0, 5.0), (15.0, 5.0)];
		let clipped = clip_line(&line, box_0_10());
		assert_eq!(clipped.len(), 1);
		assert_eq!(clipped[0], vec![(5.0, 5.0), (10.0, 5.0)]);
	}

	#[test]
	fn line_exiting_and_reentering_splits_into_two_pieces() {
		let line = vec![(5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0)];
		let clipped = clip_line(&line, box_0_10());
		assert_eq!(clipped.len(), 2);
	}

	#[test]
	fn polygon_fully_inside_is_unchanged_aside_from_closure() {
		let ring = vec![(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)];
		let clipped = clip_polygon(&ring, box_0_10());
		assert_eq!(clipped.first(), clipped.last());
		assert_eq!(clipped.len(), ring.len());
	}

	#[test]
	fn polygon_outside_the_box_clips_to_empty() {
		let ring = vec![(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)];
		assert!(clip_polygon(&ring, box_0_10()).is_empty());
	}

	#[test]
	fn polygon_straddling_an_edge_is_cut_flush_to_the_boundary() {
		let ring = vec![(5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0), (5.0, 5.0)];
		let clipped = clip_polygon(&ring, box_0_10());
		assert!(clipped.iter().all(|p| p.0 <= 10.0));
		assert_eq!(clipped.first(), clipped.last());
	}
}
