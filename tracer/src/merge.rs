use std::collections::{HashMap, VecDeque};

use crate::{Point, EPSILON};

/// Quantize a coordinate to a hashable key, merging endpoints that agree to
/// within a micron at grid scale.
fn quantize(p: Point) -> (i64, i64) { ((p.0 * 1e6).round() as i64, (p.1 * 1e6).round() as i64) }

fn points_close(a: Point, b: Point) -> bool { (a.0 - b.0).abs() < EPSILON && (a.1 - b.1).abs() < EPSILON }

/// Merge a bag of disconnected line segments into maximal chains by
/// repeatedly extending a chain's head/tail wherever an unused segment
/// shares an endpoint.
pub fn merge_segments(segments: Vec<(Point, Point)>) -> Vec<Vec<Point>> {
	let mut index: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
	for (i, &(a, b)) in segments.iter().enumerate() {
		index.entry(quantize(a)).or_default().push(i);
		index.entry(quantize(b)).or_default().push(i);
	}

	let mut used = vec![false; segments.len()];
	let mut chains = Vec::new();

	for start in 0..segments.len() {
		if used[start] {
			continue;
		}
		used[start] = true;
		let (a, b) = segments[start];
		let mut chain: VecDeque<Point> = VecDeque::from([a, b]);

		extend(&mut chain, &segments, &mut used, &index, true);
		extend(&mut chain, &segments, &mut used, &index, false);

		chains.push(chain.into_iter().collect());
	}
	chains
}

fn extend(
	chain: &mut VecDeque<Point>,
	segments: &[(Point, Point)],
	used: &mut [bool],
	index: &HashMap<(i64, i64), Vec<usize>>,
	front: bool,
) {
	loop {
		let end = if front { *chain.front().unwrap() } else { *chain.back().unwrap() };
		let Some(candidates) = index.get(&quantize(end)) else { break };

		let next = candidates.iter().copied().find(|&i| !used[i]).and_then(|i| {
			let (a, b) = segments[i];
			if points_close(a, end) {
				Some((i, b))
			} else if points_close(b, end) {
				Some((i, a))
			} else {
				None
			}
		});

		match next {
			Some((i, other)) => {
				used[i] = true;
				if front {
					chain.push_front(other);
				} else {
					chain.push_back(other);
				}
			},
			None => break,
		}
	}
}
