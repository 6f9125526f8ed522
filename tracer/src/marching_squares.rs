use grid::Grid;

use crate::Point;

/// Tolerance used for degenerate-edge detection and tie-breaking throughout tracing.
pub const EPSILON: f64 = 1e-10;

/// Names for the 8 points a marching-squares cell can emit a segment between:
/// the four corners and the four edge midpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CellPoint {
	Tl,
	Tr,
	Br,
	Bl,
	Tm,
	Lm,
	Rm,
	Bm,
}

/// Interior segments for every one of the 16 marching-squares cases.
///
/// Corner membership is weighted `tl=8, tr=4, br=2, bl=1` (ascending
/// clockwise from bottom-left) so that the case index lines up with this
/// table; cases 5 and 10 are the ambiguous saddles and always emit the two
/// segments that isolate the two "outside" corners, never a single
/// diagonal.
fn case_segments(case: u8) -> &'static [(CellPoint, CellPoint)] {
	use CellPoint::*;
	match case {
		0 => &[],
		1 => &[(Lm, Bm)],
		2 => &[(Bm, Rm)],
		3 => &[(Lm, Rm)],
		4 => &[(Rm, Tm)],
		5 => &[(Lm, Tm), (Rm, Bm)],
		6 => &[(Bm, Tm)],
		7 => &[(Lm, Tm)],
		8 => &[(Tm, Lm)],
		9 => &[(Tm, Bm)],
		10 => &[(Bm, Lm), (Tm, Rm)],
		11 => &[(Tm, Rm)],
		12 => &[(Rm, Lm)],
		13 => &[(Rm, Bm)],
		14 => &[(Bm, Lm)],
		15 => &[],
		_ => unreachable!("case index is always masked to 4 bits"),
	}
}

/// Parameter `t` along an edge at which it crosses `level`, linearly
/// interpolating between `v0` and `v1`. Degenerate (near-flat) edges snap to
/// the midpoint.
fn crossing_t(v0: f64, v1: f64, level: f64) -> f64 {
	let span = v1 - v0;
	if span.abs() < EPSILON {
		0.5
	} else {
		((level - v0) / span).clamp(0.0, 1.0)
	}
}

struct Cell {
	x: f64,
	y: f64,
	tl: f64,
	tr: f64,
	br: f64,
	bl: f64,
}

impl Cell {
	fn case(&self, level: f64) -> u8 {
		let mut case = 0u8;
		if self.tl >= level {
			case |= 8;
		}
		if self.tr >= level {
			case |= 4;
		}
		if self.br >= level {
			case |= 2;
		}
		if self.bl >= level {
			case |= 1;
		}
		case
	}

	fn resolve(&self, point: CellPoint, level: f64) -> Point {
		match point {
			CellPoint::Tl => (self.x, self.y),
			CellPoint::Tr => (self.x + 1.0, self.y),
			CellPoint::Br => (self.x + 1.0, self.y + 1.0),
			CellPoint::Bl => (self.x, self.y + 1.0),
			CellPoint::Tm => (self.x + crossing_t(self.tl, self.tr, level), self.y),
			CellPoint::Bm => (self.x + crossing_t(self.bl, self.br, level), self.y + 1.0),
			CellPoint::Lm => (self.x, self.y + crossing_t(self.tl, self.bl, level)),
			CellPoint::Rm => (self.x + 1.0, self.y + crossing_t(self.tr, self.br, level)),
		}
	}

	/// Boundary segment for one side of the cell, when that side lies on the
	/// grid's exterior: the full edge if both corners are inside, the
	/// corner-to-crossing segment if exactly one is, or nothing.
	fn boundary_segment(&self, a: CellPoint, a_in: bool, b: CellPoint, b_in: bool, mid: CellPoint, level: f64) -> Option<(Point, Point)> {
		match (a_in, b_in) {
			(true, true) => Some((self.resolve(a, level), self.resolve(b, level))),
			(true, false) => Some((self.resolve(a, level), self.resolve(mid, level))),
			(false, true) => Some((self.resolve(b, level), self.resolve(mid, level))),
			(false, false) => None,
		}
	}
}

/// Collect every line segment marching squares emits for `grid` at `level`.
///
/// In polygon mode, cells that touch the grid's outer edge additionally emit
/// boundary segments along that edge so isobands close at the tile
/// perimeter instead of leaving the curve dangling at the edge.
pub fn collect_segments(grid: &Grid, level: f64, polygon_mode: bool) -> Vec<(Point, Point)> {
	use CellPoint::*;

	let (width, height) = (grid.width(), grid.height());
	if width < 2 || height < 2 {
		return Vec::new();
	}

	let mut segments = Vec::new();
	for cy in 0..height - 1 {
		for cx in 0..width - 1 {
			let cell = Cell {
				x: cx as f64,
				y: cy as f64,
				tl: grid.get(cx, cy),
				tr: grid.get(cx + 1, cy),
				br: grid.get(cx + 1, cy + 1),
				bl: grid.get(cx, cy + 1),
			};
			let case = cell.case(level);
			for &(a, b) in case_segments(case) {
				segments.push((cell.resolve(a, level), cell.resolve(b, level)));
			}

			if !polygon_mode {
				continue;
			}

			let tl_in = cell.tl >= level;
			let tr_in = cell.tr >= level;
			let br_in = cell.br >= level;
			let bl_in = cell.bl >= level;

			if cy == 0 {
				if let Some(seg) = cell.boundary_segment(Tl, tl_in, Tr, tr_in, Tm, level) {
					segments.push(seg);
				}
			}
			if cy == height - 2 {
				if let Some(seg) = cell.boundary_segment(Bl, bl_in, Br, br_in, Bm, level) {
					segments.push(seg);
				}
			}
			if cx == 0 {
				if let Some(seg) = cell.boundary_segment(Tl, tl_in, Bl, bl_in, Lm, level) {
					segments.push(seg);
				}
			}
			if cx == width - 2 {
				if let Some(seg) = cell.boundary_segment(Tr, tr_in, Br, br_in, Rm, level) {
					segments.push(seg);
				}
			}
		}
	}
	segments
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn crossing_t_snaps_degenerate_edges_to_midpoint() {
		assert_eq!(crossing_t(5.0, 5.0, 5.0), 0.5);
	}

	#[test]
	fn crossing_t_interpolates_linearly() {
		assert_eq!(crossing_t(0.0, 10.0, 2.5), 0.25);
	}

	#[test]
	fn case_index_matches_corner_weights() {
		let cell = Cell { x: 0.0, y: 0.0, tl: 1.0, tr: 0.0, br: 0.0, bl: 0.0 };
		assert_eq!(cell.case(0.5), 8);
		let cell = Cell { x: 0.0, y: 0.0, tl: 0.0, tr: 0.0, br: 0.0, bl: 1.0 };
		assert_eq!(cell.case(0.5), 1);
	}
}
