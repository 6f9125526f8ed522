//! Zoom-dependent interval tables for contour and hillshade banding, plus
//! the level-generation helper shared by both.

/// Contour spacing in meters, by zoom band.
pub fn contour_interval(z: u32) -> f64 {
	match z {
		0..=2 => 2000.0,
		3..=7 => 1000.0,
		8..=9 => 500.0,
		10..=11 => 250.0,
		12..=13 => 100.0,
		14 => 50.0,
		_ => 10.0,
	}
}

/// Hillshade banding, by zoom band.
pub fn hillshade_interval(z: u32) -> f64 {
	match z {
		0..=7 => 32.0,
		8..=11 => 21.0,
		_ => 16.0,
	}
}

/// Half-open `[min, max)` stepped level list: `generate_levels(0, 256, 32)`
/// is `[0, 32, 64, 96, 128, 160, 192, 224]`.
pub fn generate_levels(min: f64, max: f64, step: f64) -> Vec<f64> {
	assert!(step > 0.0, "step must be positive");
	let mut levels = Vec::new();
	let mut v = min;
	while v < max {
		levels.push(v);
		v += step;
	}
	levels
}

/// Hillshade luminance at the sun's zenith: `round(cos(zenith) * 255)` with
/// `zenith = 90 - altitude`. This is the flat-ground baseline that splits
/// highlight bands (above) from shadow bands (below).
pub fn baseline_luminance(altitude: f64) -> f64 {
	let zenith = (90.0 - altitude).to_radians();
	(zenith.cos() * 255.0).round()
}
