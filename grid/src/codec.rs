/// Selects the RGB-to-elevation decoding applied to a terrain-RGB source tile.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TerrainEncoding {
	/// `h = (R*65536 + G*256 + B) / 10 - 10000`, round-trips to +-0.05m.
	MapBox,
	/// `h = R*256 + G + B/256 - 32768`, round-trips to +-0.004m.
	Terrarium,
}

impl TerrainEncoding {
	/// Decode one RGBA pixel to elevation in meters. Alpha is ignored.
	pub fn decode(self, r: u8, g: u8, b: u8) -> f64 {
		match self {
			TerrainEncoding::MapBox => (r as f64 * 65536.0 + g as f64 * 256.0 + b as f64) / 10.0 - 10000.0,
			TerrainEncoding::Terrarium => r as f64 * 256.0 + g as f64 + b as f64 / 256.0 - 32768.0,
		}
	}

	/// Encode an elevation in meters to RGB. Alpha is always set to 255.
	pub fn encode(self, h: f64) -> (u8, u8, u8, u8) {
		match self {
			TerrainEncoding::MapBox => {
				let v = ((h + 10000.0) * 10.0).round() as i64;
				(((v >> 16) & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, (v & 0xFF) as u8, 255)
			},
			TerrainEncoding::Terrarium => {
				let a = h + 32768.0;
				let r = (a / 256.0).floor();
				let g = (a.rem_euclid(256.0)).floor();
				let b = ((a - 256.0 * r - g) * 256.0).floor();
				(
					r.clamp(0.0, 255.0) as u8,
					g.clamp(0.0, 255.0) as u8,
					b.clamp(0.0, 255.0) as u8,
					255,
				)
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mapbox_round_trips_within_tolerance() {
		let mut h = MapBoxSampleRange::start();
		while h < MapBoxSampleRange::end() {
			let (r, g, b, _) = TerrainEncoding::MapBox.encode(h);
			let decoded = TerrainEncoding::MapBox.decode(r, g, b);
			assert!((decoded - h).abs() <= 0.05, "h={h} decoded={decoded}");
			h += 137.0;
		}
	}

	#[test]
	fn terrarium_round_trips_within_tolerance() {
		let mut h = -10000.0;
		while h < 10000.0 {
			let (r, g, b, _) = TerrainEncoding::Terrarium.encode(h);
			let decoded = TerrainEncoding::Terrarium.decode(r, g, b);
			assert!((decoded - h).abs() <= 0.004, "h={h} decoded={decoded}");
			h += 97.0;
		}
	}

	#[test]
	fn alpha_is_always_255_on_encode() {
		assert_eq!(TerrainEncoding::MapBox.encode(100.0).3, 255);
		assert_eq!(TerrainEncoding::Terrarium.encode(100.0).3, 255);
	}

	/// Small helper so the round-trip test's sweep bounds read as intent, not magic numbers.
	struct MapBoxSampleRange;
	impl MapBoxSampleRange {
		fn start() -> f64 { -10000.0 }

		fn end() -> f64 { 1_677_721.5 - 10000.0 }
	}
}
