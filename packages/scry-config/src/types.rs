use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub upstream: Upstream,
	#[serde(default)]
	pub view: View,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// The two upstream planes: the control plane owns the memory inventory, the
/// data plane owns actors, sessions, and events.
#[derive(Debug, Deserialize)]
pub struct Upstream {
	pub control: UpstreamEndpoint,
	pub data: UpstreamEndpoint,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamEndpoint {
	pub api_base: String,
	/// Missing credentials are not a config error; the catalog client reports
	/// them as unavailable so the process can start degraded.
	#[serde(default)]
	pub api_key: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct View {
	pub page_size: u32,
	pub event_page_size: u32,
	pub max_page_size: u32,
	pub derive_scan_limit: u32,
}
impl Default for View {
	fn default() -> Self {
		Self { page_size: 50, event_page_size: 100, max_page_size: 100, derive_scan_limit: 100 }
	}
}

fn default_timeout_ms() -> u64 {
	10_000
}
