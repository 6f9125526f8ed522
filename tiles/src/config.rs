//! Startup configuration, read once from the environment with `std::env::var`
//! plus `.parse()` rather than a deserialization framework — the same
//! "parse exactly what a small problem needs" preference the teacher
//! applies to its own query-parameter handling.

use std::fmt::{Debug, Display, Formatter};

const DEFAULT_DEM_TILE_URL: &str = "https://elevation-tiles-prod.s3.amazonaws.com/terrarium/{z}/{x}/{y}.png";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub struct ConfigError(String);

impl Display for ConfigError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result { write!(f, "invalid configuration: {}", self.0) }
}

impl Debug for ConfigError {
	fn fmt(&self, f: &mut Formatter) -> std::fmt::Result { Display::fmt(self, f) }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
	pub dem_tile_url: String,
	pub cache_enabled: bool,
	pub cache_ttl_secs: u64,
	pub cache_capacity: usize,
	pub compression_enabled: bool,
	pub bind_addr: String,
}

impl Config {
	/// Read configuration from the process environment, defaulting any
	/// unset key and failing fast on a malformed value.
	pub fn from_env() -> Result<Self, ConfigError> {
		Ok(Self {
			dem_tile_url: env_or("DEM_TILE_URL", DEFAULT_DEM_TILE_URL.to_string()),
			cache_enabled: parse_env("CACHE_ENABLED", true)?,
			cache_ttl_secs: parse_env("CACHE_TTL", 86_400)?,
			cache_capacity: parse_env("CACHE_CAPACITY", crate::cache::DEFAULT_CAPACITY)?,
			compression_enabled: parse_env("COMPRESSION_ENABLED", true)?,
			bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR.to_string()),
		})
	}
}

fn env_or(key: &str, default: String) -> String { std::env::var(key).unwrap_or(default) }

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
	match std::env::var(key) {
		Ok(raw) => raw.parse::<T>().map_err(|_| ConfigError(format!("{key}='{raw}' is not valid"))),
		Err(_) => Ok(default),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_apply_when_unset() {
		std::env::remove_var("CACHE_TTL_TEST_UNUSED");
		let value: Result<u64, ConfigError> = parse_env("CACHE_TTL_TEST_UNUSED", 86_400);
		assert_eq!(value.unwrap(), 86_400);
	}

	#[test]
	fn malformed_numeric_value_fails_fast() {
		std::env::set_var("TILES_CONFIG_TEST_BAD", "not-a-number");
		let value: Result<u64, ConfigError> = parse_env("TILES_CONFIG_TEST_BAD", 1);
		assert!(value.is_err());
		std::env::remove_var("TILES_CONFIG_TEST_BAD");
	}

	#[test]
	fn env_value_overrides_default() {
		std::env::set_var("TILES_CONFIG_TEST_GOOD", "42");
		let value: Result<u64, ConfigError> = parse_env("TILES_CONFIG_TEST_GOOD", 1);
		assert_eq!(value.unwrap(), 42);
		std::env::remove_var("TILES_CONFIG_TEST_GOOD");
	}
}
