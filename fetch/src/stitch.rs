use std::sync::Mutex;

use grid::{BufferedGrid, Grid, TerrainEncoding};

use crate::{FetchError, HttpGet, ImageDecode, TileCoord};

/// Four cardinal neighbors, fetched as the second batch.
const CARDINAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
/// Four corner neighbors, fetched as the third batch.
const CORNERS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

type DecodedNeighbor = (i32, i32, Vec<u8>, u32, u32);

/// Fetch and decode a batch of neighbor offsets concurrently via
/// `rayon::scope`. A neighbor that's out of range, fails to fetch, or fails
/// to decode is silently dropped: missing neighbor tiles are zero-filled,
/// not errors.
fn fetch_batch(offsets: &[(i32, i32)], coord: TileCoord, template: &str, http: &dyn HttpGet, decoder: &dyn ImageDecode) -> Vec<DecodedNeighbor> {
	let slots: Vec<Mutex<Option<DecodedNeighbor>>> = offsets.iter().map(|_| Mutex::new(None)).collect();

	rayon::scope(|scope| {
		for (i, &(dx, dy)) in offsets.iter().enumerate() {
			let slots = &slots;
			scope.spawn(move |_| {
				let Some(neighbor) = coord.neighbor(dx, dy) else { return };
				let bytes = match http.get(&neighbor.url(template)) {
					Ok(bytes) => bytes,
					Err(e) => {
						log::debug!("neighbor tile {neighbor:?} unavailable, zero-filling: {e}");
						return;
					},
				};
				let Ok((rgba, w, h)) = decoder.decode(&bytes) else {
					log::debug!("neighbor tile {neighbor:?} failed to decode, zero-filling");
					return;
				};
				*slots[i].lock().unwrap() = Some((dx, dy, rgba, w, h));
			});
		}
	});

	slots.into_iter().filter_map(|slot| slot.into_inner().unwrap()).collect()
}

/// Copy a decoded tile's RGBA pixels into the stitched canvas at `(ox, oy)`,
/// clipping to the canvas bounds.
fn place(canvas: &mut [u8], canvas_size: u32, rgba: &[u8], w: u32, h: u32, ox: u32, oy: u32) {
	let rows = h.min(canvas_size.saturating_sub(oy));
	let cols = w.min(canvas_size.saturating_sub(ox));
	for ty in 0..rows {
		for tx in 0..cols {
			let src = ((ty * w + tx) * 4) as usize;
			let dst = (((oy + ty) * canvas_size + (ox + tx)) * 4) as usize;
			canvas[dst..dst + 4].copy_from_slice(&rgba[src..src + 4]);
		}
	}
}

/// Nearest-neighbor sample, with a half-pixel offset, from a stitched RGBA
/// canvas into an elevation grid of `out_size x out_size`, decoding each
/// pixel with `encoding`. `canvas_offset` is where tile-relative coordinate
/// 0 sits within the canvas (the center tile's origin).
fn sample_grid(canvas: &[u8], canvas_size: u32, canvas_offset: i64, out_size: u32, buffer_px: u32, source_tile_size: u32, encoding: TerrainEncoding) -> Grid {
	let scale = source_tile_size as f64 / 256.0;
	let map = |out_coord: u32| -> u32 {
		let tile_coord = out_coord as f64 - buffer_px as f64;
		(((tile_coord + 0.5) * scale).floor() as i64 + canvas_offset).clamp(0, canvas_size as i64 - 1) as u32
	};

	let mut data = Vec::with_capacity((out_size * out_size) as usize);
	for oy in 0..out_size {
		let src_y = map(oy);
		for ox in 0..out_size {
			let src_x = map(ox);
			let idx = ((src_y * canvas_size + src_x) * 4) as usize;
			data.push(encoding.decode(canvas[idx], canvas[idx + 1], canvas[idx + 2]));
		}
	}
	Grid::new(out_size as usize, out_size as usize, data)
}

/// Fetch and assemble a `(256+2*buffer_px) x (256+2*buffer_px)` buffered
/// elevation grid around `coord`.
///
/// With `buffer_px == 0` this fetches only the center tile. Otherwise it
/// fetches the center tile, then its 8 neighbors concurrently in two
/// batches (cardinal, then corner) to bound in-flight connections, and
/// stitches everything into a `3*source_tile_size` square canvas before
/// sampling.
pub fn fetch_buffered_grid(
	coord: TileCoord,
	buffer_px: u32,
	url_template: &str,
	http: &dyn HttpGet,
	decoder: &dyn ImageDecode,
	encoding: TerrainEncoding,
	source_tile_size: u32,
) -> Result<BufferedGrid, FetchError> {
	let out_size = grid::TILE_SIZE + 2 * buffer_px;

	let center_bytes = http.get(&coord.url(url_template))?;
	let (center_rgba, cw, ch) = decoder.decode(&center_bytes)?;
	if cw == 0 || ch == 0 {
		return Err(FetchError::Decode("center tile decoded to zero pixels".to_string()));
	}

	if buffer_px == 0 {
		let grid = sample_grid(&center_rgba, cw, 0, out_size, 0, source_tile_size, encoding);
		return Ok(BufferedGrid::new(grid, 0));
	}

	let canvas_size = source_tile_size * 3;
	let mut canvas = vec![0u8; (canvas_size as usize) * (canvas_size as usize) * 4];
	place(&mut canvas, canvas_size, &center_rgba, cw, ch, source_tile_size, source_tile_size);

	for batch in [&CARDINAL[..], &CORNERS[..]] {
		for (dx, dy, rgba, w, h) in fetch_batch(batch, coord, url_template, http, decoder) {
			let ox = (source_tile_size as i32 * (1 + dx)) as u32;
			let oy = (source_tile_size as i32 * (1 + dy)) as u32;
			place(&mut canvas, canvas_size, &rgba, w, h, ox, oy);
		}
	}

	let grid = sample_grid(&canvas, canvas_size, source_tile_size as i64, out_size, buffer_px, source_tile_size, encoding);
	Ok(BufferedGrid::new(grid, buffer_px as usize))
}
