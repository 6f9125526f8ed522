use tracer::{clip_line, transform_point, BBox};

/// `transformAndClipFeatures([line((0,132)->(132,132))], bufferPx=4)`: the
/// usable-region origin sits at grid x=4, so the line's start falls into the
/// halo and gets clipped flush to the tile's left edge.
#[test]
fn line_crossing_the_halo_clips_to_the_tile_edge() {
	let line = [(0.0, 132.0), (132.0, 132.0)];
	let transformed: Vec<_> = line.iter().map(|&p| transform_point(p, 4.0, 256.0, 4096.0)).collect();

	let bbox = BBox::new(0.0, 0.0, 4096.0, 4096.0);
	let clipped = clip_line(&transformed, bbox);

	assert_eq!(clipped.len(), 1);
	let piece = &clipped[0];
	assert_eq!(piece.first().unwrap().0, 0.0);
	assert_eq!(*piece.last().unwrap(), (2048.0, 2048.0));
}
