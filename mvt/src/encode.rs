use std::collections::HashMap;

use tracer::{Feature, Geometry, Point, PropertyValue};

use crate::proto::{zigzag_encode, ProtoWriter};

const LAYER_VERSION: u32 = 2;

const GEOM_TYPE_LINESTRING: u32 = 2;
const GEOM_TYPE_POLYGON: u32 = 3;

const CMD_MOVE_TO: u32 = 1;
const CMD_LINE_TO: u32 = 2;
const CMD_CLOSE_PATH: u32 = 7;

fn command(id: u32, count: u32) -> u32 { (id & 0x7) | (count << 3) }

fn round_point(p: Point) -> (i32, i32) { (p.0.round() as i32, p.1.round() as i32) }

/// Emit a MoveTo(1) to `coords[0]` followed by a LineTo for every remaining
/// point, skipping points that round to the same pixel as the cursor.
fn encode_open_path(coords: &[Point], cursor: &mut (i32, i32), out: &mut Vec<u32>) {
	if coords.is_empty() {
		return;
	}
	let first = round_point(coords[0]);
	out.push(command(CMD_MOVE_TO, 1));
	out.push(zigzag_encode(first.0 - cursor.0));
	out.push(zigzag_encode(first.1 - cursor.1));
	*cursor = first;

	let mut deltas = Vec::new();
	for &p in &coords[1..] {
		let rounded = round_point(p);
		let delta = (rounded.0 - cursor.0, rounded.1 - cursor.1);
		if delta != (0, 0) {
			deltas.push(delta);
			*cursor = rounded;
		}
	}
	if !deltas.is_empty() {
		out.push(command(CMD_LINE_TO, deltas.len() as u32));
		for (dx, dy) in deltas {
			out.push(zigzag_encode(dx));
			out.push(zigzag_encode(dy));
		}
	}
}

/// Signed shoelace area. Positive means clockwise in this extent space
/// (y grows downward), which is what MVT wants for an exterior ring.
fn signed_area(ring: &[Point]) -> f64 {
	let n = ring.len();
	let mut sum = 0.0;
	for i in 0..n - 1 {
		let (x0, y0) = ring[i];
		let (x1, y1) = ring[i + 1];
		sum += x0 * y1 - x1 * y0;
	}
	sum
}

fn with_winding(mut ring: Vec<Point>, exterior: bool) -> Vec<Point> {
	let wrong_way = if exterior { signed_area(&ring) < 0.0 } else { signed_area(&ring) > 0.0 };
	if wrong_way {
		ring.reverse();
	}
	ring
}

fn encode_ring(ring: &[Point], cursor: &mut (i32, i32), out: &mut Vec<u32>) {
	if ring.len() < 4 {
		return;
	}
	encode_open_path(&ring[..ring.len() - 1], cursor, out);
	out.push(command(CMD_CLOSE_PATH, 1));
}

fn encode_geometry(geometry: &Geometry) -> (u32, Vec<u32>) {
	let mut cursor = (0, 0);
	let mut commands = Vec::new();
	match geometry {
		Geometry::LineString(coords) => {
			encode_open_path(coords, &mut cursor, &mut commands);
			(GEOM_TYPE_LINESTRING, commands)
		},
		Geometry::Polygon { rings } => {
			for (i, ring) in rings.iter().enumerate() {
				let ring = with_winding(ring.clone(), i == 0);
				encode_ring(&ring, &mut cursor, &mut commands);
			}
			(GEOM_TYPE_POLYGON, commands)
		},
	}
}

fn pack_varints(values: &[u32]) -> Vec<u8> {
	let mut w = ProtoWriter::new();
	for &v in values {
		w.write_varint(v as u64);
	}
	w.into_bytes()
}

/// Hashable projection of [`PropertyValue`] used to dedupe the per-layer
/// value dictionary; `f64` isn't `Eq`/`Hash`, so floats go in by bit pattern.
#[derive(PartialEq, Eq, Hash, Clone)]
enum ValueKey {
	Int(i64),
	Float(u64),
	Bool(bool),
	String(String),
}

impl From<&PropertyValue> for ValueKey {
	fn from(v: &PropertyValue) -> Self {
		match v {
			PropertyValue::Int(i) => ValueKey::Int(*i),
			PropertyValue::Float(f) => ValueKey::Float(f.to_bits()),
			PropertyValue::Bool(b) => ValueKey::Bool(*b),
			PropertyValue::String(s) => ValueKey::String(s.clone()),
		}
	}
}

fn encode_value(value: &PropertyValue) -> Vec<u8> {
	let mut w = ProtoWriter::new();
	match value {
		PropertyValue::String(s) => w.write_string_field(1, s),
		PropertyValue::Float(f) => w.write_double_field(3, *f),
		PropertyValue::Int(i) => w.write_sint64_field(6, *i),
		PropertyValue::Bool(b) => w.write_bool_field(7, *b),
	}
	w.into_bytes()
}

/// A named set of features to encode as one MVT layer.
pub struct TileLayer<'a> {
	pub name: &'a str,
	pub extent: u32,
	pub features: &'a [Feature],
}

/// Dictionary-building state shared across every feature in a layer.
#[derive(Default)]
struct Dictionary {
	keys: Vec<String>,
	key_index: HashMap<String, u32>,
	values: Vec<PropertyValue>,
	value_index: HashMap<ValueKey, u32>,
}

impl Dictionary {
	fn key(&mut self, key: &str) -> u32 {
		if let Some(&i) = self.key_index.get(key) {
			return i;
		}
		let i = self.keys.len() as u32;
		self.keys.push(key.to_string());
		self.key_index.insert(key.to_string(), i);
		i
	}

	fn value(&mut self, value: &PropertyValue) -> u32 {
		let vk = ValueKey::from(value);
		if let Some(&i) = self.value_index.get(&vk) {
			return i;
		}
		let i = self.values.len() as u32;
		self.values.push(value.clone());
		self.value_index.insert(vk, i);
		i
	}
}

fn encode_feature(feature: &Feature, dict: &mut Dictionary) -> Vec<u8> {
	let mut tags = Vec::with_capacity(feature.properties.len() * 2);
	for (key, value) in feature.properties.iter() {
		tags.push(dict.key(key));
		tags.push(dict.value(value));
	}

	let (geom_type, commands) = encode_geometry(&feature.geometry);

	let mut w = ProtoWriter::new();
	w.write_bytes_field(2, &pack_varints(&tags));
	w.write_uint32_field(3, geom_type);
	w.write_bytes_field(4, &pack_varints(&commands));
	w.into_bytes()
}

fn encode_layer(layer: &TileLayer) -> Vec<u8> {
	let mut dict = Dictionary::default();
	let mut feature_bytes = Vec::with_capacity(layer.features.len());
	for feature in layer.features {
		feature_bytes.push(encode_feature(feature, &mut dict));
	}

	let mut w = ProtoWriter::new();
	w.write_string_field(1, layer.name);
	for bytes in &feature_bytes {
		w.write_bytes_field(2, bytes);
	}
	for key in &dict.keys {
		w.write_string_field(3, key);
	}
	for value in &dict.values {
		w.write_bytes_field(4, &encode_value(value));
	}
	w.write_uint32_field(5, layer.extent);
	w.write_uint32_field(15, LAYER_VERSION);
	w.into_bytes()
}

/// Encode a full Mapbox Vector Tile v2 message from its layers.
pub fn encode_tile(layers: &[TileLayer]) -> Vec<u8> {
	let mut w = ProtoWriter::new();
	for layer in layers {
		w.write_bytes_field(3, &encode_layer(layer));
	}
	w.into_bytes()
}
