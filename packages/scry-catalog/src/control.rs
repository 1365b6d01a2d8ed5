use color_eyre::Result;
use serde_json::Value;

use scry_domain::resource::{Level, Resource};

use crate::{HttpCatalog, parse_detail, parse_listing};

impl HttpCatalog {
	pub async fn list_memories(&self, max_results: u32) -> Result<Vec<Resource>> {
		let url = format!("{}/memories", self.control.base);
		let res = self
			.control
			.client
			.get(url)
			.query(&[("maxResults", max_results)])
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_listing(json, "memories", Level::Memory)
	}

	pub async fn get_memory(&self, memory_id: &str) -> Result<Resource> {
		let url = format!("{}/memories/{memory_id}", self.control.base);
		let res = self.control.client.get(url).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_detail(json, "memory", Level::Memory)
	}
}
