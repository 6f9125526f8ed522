use std::collections::BTreeMap;

/// A point in whatever coordinate space the caller is currently working in
/// (grid space before [`crate::transform_point`], tile-extent space after).
pub type Point = (f64, f64);

/// Geometry of a traced feature.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
	LineString(Vec<Point>),
	/// `rings[0]` is the shell, `rings[1..]` are holes. All rings are closed
	/// (first point equals last).
	Polygon { rings: Vec<Vec<Point>> },
}

/// A tag value attached to a feature, mirroring MVT's small value union.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
	Int(i64),
	Float(f64),
	Bool(bool),
	String(String),
}

/// Ordered tag set for a feature. Backed by a `BTreeMap` so encoding order
/// (and therefore the MVT key/value dictionary) is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
	pub fn new() -> Self { Self(BTreeMap::new()) }

	pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
		self.0.insert(key.to_string(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&PropertyValue> { self.0.get(key) }

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> { self.0.iter().map(|(k, v)| (k.as_str(), v)) }

	pub fn len(&self) -> usize { self.0.len() }

	pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<f64> for PropertyValue {
	fn from(v: f64) -> Self { PropertyValue::Float(v) }
}

impl From<i64> for PropertyValue {
	fn from(v: i64) -> Self { PropertyValue::Int(v) }
}

impl From<bool> for PropertyValue {
	fn from(v: bool) -> Self { PropertyValue::Bool(v) }
}

impl From<&str> for PropertyValue {
	fn from(v: &str) -> Self { PropertyValue::String(v.to_string()) }
}

/// A single traced feature: a geometry plus its tags.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub geometry: Geometry,
	pub properties: Properties,
}

impl Feature {
	pub fn new(geometry: Geometry, properties: Properties) -> Self { Self { geometry, properties } }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn properties_are_ordered_by_key() {
		let props = Properties::new().with("b", 2i64).with("a", 1i64);
		let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["a", "b"]);
	}

	#[test]
	fn with_overwrites_existing_key() {
		let props = Properties::new().with("level", 1i64).with("level", 2i64);
		assert_eq!(props.get("level"), Some(&PropertyValue::Int(2)));
		assert_eq!(props.len(), 1);
	}
}
