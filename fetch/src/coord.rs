/// A slippy-map tile address.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct TileCoord {
	pub z: u32,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	pub fn new(z: u32, x: u32, y: u32) -> Self { Self { z, x, y } }

	/// `true` if `x` and `y` are valid column/row indices at this zoom level.
	pub fn in_range(&self) -> bool {
		let n = 1u32 << self.z;
		self.x < n && self.y < n
	}

	/// The tile `(dx, dy)` away from this one, or `None` if it would fall
	/// outside `[0, 2^z)`.
	pub fn neighbor(&self, dx: i32, dy: i32) -> Option<Self> {
		let n = 1i64 << self.z;
		let x = self.x as i64 + dx as i64;
		let y = self.y as i64 + dy as i64;
		if x < 0 || x >= n || y < 0 || y >= n {
			return None;
		}
		Some(Self { z: self.z, x: x as u32, y: y as u32 })
	}

	/// Substitute `{z}`, `{x}`, `{y}` placeholders in a URL template.
	pub fn url(&self, template: &str) -> String {
		template.replace("{z}", &self.z.to_string()).replace("{x}", &self.x.to_string()).replace("{y}", &self.y.to_string())
	}
}
