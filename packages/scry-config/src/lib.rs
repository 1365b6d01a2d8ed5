mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Service, Upstream, UpstreamEndpoint, View};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.view.max_page_size == 0 {
		return Err(Error::Validation {
			message: "view.max_page_size must be greater than zero.".to_string(),
		});
	}
	// The upstream rejects page sizes above 100.
	if cfg.view.max_page_size > 100 {
		return Err(Error::Validation {
			message: "view.max_page_size must not exceed 100.".to_string(),
		});
	}
	if cfg.view.page_size == 0 {
		return Err(Error::Validation {
			message: "view.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.view.page_size > cfg.view.max_page_size {
		return Err(Error::Validation {
			message: "view.page_size must not exceed view.max_page_size.".to_string(),
		});
	}
	if cfg.view.event_page_size == 0 {
		return Err(Error::Validation {
			message: "view.event_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.view.event_page_size > cfg.view.max_page_size {
		return Err(Error::Validation {
			message: "view.event_page_size must not exceed view.max_page_size.".to_string(),
		});
	}
	if cfg.view.derive_scan_limit == 0 {
		return Err(Error::Validation {
			message: "view.derive_scan_limit must be greater than zero.".to_string(),
		});
	}

	for (label, endpoint) in
		[("upstream.control", &cfg.upstream.control), ("upstream.data", &cfg.upstream.data)]
	{
		if endpoint.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("{label}.api_base must be non-empty."),
			});
		}
		if endpoint.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for endpoint in [&mut cfg.upstream.control, &mut cfg.upstream.data] {
		endpoint.api_base = endpoint.api_base.trim().to_string();
		endpoint.api_key = endpoint.api_key.trim().to_string();
	}
}
