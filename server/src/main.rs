use std::num::NonZeroUsize;

use rouille::{Request, Response};
use tiles::{Config, TileError, TileHandler};
use url::Url;

/// Escape a string for embedding as a JSON string literal. Hand-rolled
/// rather than pulling in `serde_json` for two fields.
fn json_escape(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			_ => out.push(c),
		}
	}
	out
}

/// `400 {error}` for bad coordinates, `500 {error,details}` for everything
/// else: the `details` key carries the lower-level cause string.
fn error_response(err: &TileError) -> Response {
	let body = match err.details() {
		Some(details) => format!("{{\"error\":\"{}\",\"details\":\"{}\"}}", json_escape(&err.to_string()), json_escape(details)),
		None => format!("{{\"error\":\"{}\"}}", json_escape(&err.to_string())),
	};
	Response::from_data("application/json", body.into_bytes()).with_status_code(err.status_code())
}

/// Parse `/tiles/{kind}/{z}/{x}/{y}[.mvt]` into its four path segments.
fn parse_tile_path(path: &str) -> Option<(&str, &str, &str, &str)> {
	let rest = path.strip_prefix("/tiles/")?;
	let mut segments = rest.split('/');
	let kind = segments.next()?;
	let z = segments.next()?;
	let x = segments.next()?;
	let y = segments.next()?;
	if segments.next().is_some() {
		return None;
	}
	Some((kind, z, x, tiles::strip_mvt_suffix(y)))
}

fn handle_request(handler: &TileHandler, config: &Config, req: &Request) -> Response {
	let url = match Url::parse(&format!("http://127.0.0.1{}", req.raw_url())) {
		Ok(url) => url,
		Err(e) => return error_response(&TileError::BadCoordinates(e.to_string())),
	};

	if url.path() == "/healthz" {
		return Response::text("ok");
	}

	let Some((kind, z, x, y)) = parse_tile_path(url.path()) else {
		return Response::empty_404();
	};

	match handler.handle(kind, z, x, y) {
		Ok(tile) => {
			let mut response = Response::from_data(tiles::MVT_CONTENT_TYPE, tile.bytes);
			if tile.compressed {
				response = response.with_additional_header("Content-Encoding", "gzip");
			}
			response.with_additional_header("Cache-Control", format!("public, max-age={}", config.cache_ttl_secs))
		},
		Err(e) => {
			log::error!("tile request failed: {e}");
			error_response(&e)
		},
	}
}

fn main() {
	env_logger::init();

	let config = Config::from_env().unwrap_or_else(|e| {
		eprintln!("{e}");
		std::process::exit(1);
	});
	let handler = TileHandler::new(config.clone()).unwrap_or_else(|e| {
		eprintln!("failed to start: {e}");
		std::process::exit(1);
	});

	log::info!("listening on {}", config.bind_addr);
	rouille::start_server_with_pool(config.bind_addr.clone(), std::thread::available_parallelism().ok().map(NonZeroUsize::get), move |req| handle_request(&handler, &config, req));
}
