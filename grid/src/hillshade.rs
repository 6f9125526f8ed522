use crate::{Grid, GridError};

/// `|dx|^2 + |dy|^2` below this threshold is treated as flat ground.
const FLAT_EPSILON: f64 = 1e-10;

/// Lambertian hillshade from an elevation grid via a Sobel gradient estimate.
///
/// `cell_size` is the ground size of one pixel in meters (see
/// [`crate::get_resolution`]). `altitude`/`azimuth` are the sun's position in
/// the usual geographic convention (degrees, azimuth clockwise from north).
///
/// Returns a grid of the same shape with every sample in `[0, 255]`, or
/// [`GridError::InvalidSunAngle`] if `altitude`/`azimuth` fall outside their
/// geographic range.
pub fn hillshade(elevation: &Grid, cell_size: f64, altitude: f64, azimuth: f64) -> Result<Grid, GridError> {
	if !(0.0..=90.0).contains(&altitude) {
		return Err(GridError::InvalidSunAngle(format!("sun altitude out of range: {altitude}")));
	}
	if !(0.0..=360.0).contains(&azimuth) {
		return Err(GridError::InvalidSunAngle(format!("sun azimuth out of range: {azimuth}")));
	}

	let azimuth_rad = (360.0 - azimuth + 90.0).to_radians();
	let zenith_rad = (90.0 - altitude).to_radians();

	let (sin_z, cos_z) = zenith_rad.sin_cos();
	let (sin_a, cos_a) = azimuth_rad.sin_cos();
	let sun = (sin_z * cos_a, sin_z * sin_a, cos_z);

	let grad_scale = 1.0 / (8.0 * cell_size);
	let flat = 255.0 * cos_z;

	let width = elevation.width();
	let height = elevation.height();
	let mut out = Vec::with_capacity(width * height);

	for y in 0..height {
		for x in 0..width {
			let (x, y) = (x as i64, y as i64);
			let a = elevation.sample(x - 1, y - 1);
			let b = elevation.sample(x, y - 1);
			let c = elevation.sample(x + 1, y - 1);
			let d = elevation.sample(x - 1, y);
			let f = elevation.sample(x + 1, y);
			let g = elevation.sample(x - 1, y + 1);
			let h = elevation.sample(x, y + 1);
			let i = elevation.sample(x + 1, y + 1);

			let dz_dx = (c + 2.0 * f + i - (a + 2.0 * d + g)) * grad_scale;
			let dz_dy = (g + 2.0 * h + i - (a + 2.0 * b + c)) * grad_scale;

			let value = if dz_dx * dz_dx + dz_dy * dz_dy < FLAT_EPSILON {
				flat
			} else {
				let n = (dz_dx * dz_dx + dz_dy * dz_dy + 1.0).sqrt();
				255.0 * (-sun.0 * dz_dx - sun.1 * dz_dy + sun.2) / n
			};

			out.push(value.clamp(0.0, 255.0));
		}
	}

	Ok(Grid::new(width, height, out))
}
