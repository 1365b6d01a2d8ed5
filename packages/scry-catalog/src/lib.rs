pub mod control;
pub mod data;

use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use scry_config::{Upstream, UpstreamEndpoint};
use scry_domain::resource::{Level, Resource};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};
		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}
	Ok(headers)
}

/// HTTP client for the upstream catalog. The control plane serves the memory
/// inventory; the data plane serves actors, sessions, and events.
///
/// Construction validates credentials and builds both clients once; a missing
/// key or base URL fails here so callers can surface the catalog as
/// unavailable instead of failing every request later.
#[derive(Debug)]
pub struct HttpCatalog {
	pub(crate) control: Endpoint,
	pub(crate) data: Endpoint,
}
impl HttpCatalog {
	pub fn new(cfg: &Upstream) -> Result<Self> {
		Ok(Self {
			control: Endpoint::new("control", &cfg.control)?,
			data: Endpoint::new("data", &cfg.data)?,
		})
	}
}

#[derive(Debug)]
pub(crate) struct Endpoint {
	pub(crate) client: Client,
	pub(crate) base: String,
}
impl Endpoint {
	fn new(label: &str, cfg: &UpstreamEndpoint) -> Result<Self> {
		if cfg.api_key.trim().is_empty() {
			return Err(eyre::eyre!("Upstream {label} api_key is missing."));
		}

		let base = cfg.api_base.trim().trim_end_matches('/').to_string();

		if base.is_empty() {
			return Err(eyre::eyre!("Upstream {label} api_base is missing."));
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.build()?;

		Ok(Self { client, base })
	}
}

pub(crate) fn parse_listing(json: Value, envelope: &str, level: Level) -> Result<Vec<Resource>> {
	let items = json
		.get(envelope)
		.and_then(|value| value.as_array())
		.ok_or_else(|| eyre::eyre!("Catalog response is missing the {envelope} array."))?;

	// Items that are not objects or lack an identifier are dropped rather
	// than failing the page.
	Ok(items.iter().cloned().filter_map(|item| Resource::from_value(level, item)).collect())
}

pub(crate) fn parse_detail(json: Value, envelope: &str, level: Level) -> Result<Resource> {
	let item = json
		.get(envelope)
		.cloned()
		.ok_or_else(|| eyre::eyre!("Catalog response is missing the {envelope} object."))?;

	Resource::from_value(level, item)
		.ok_or_else(|| eyre::eyre!("Catalog {level} detail is missing an identifier."))
}
