use color_eyre::Result;
use serde_json::Value;

use scry_domain::resource::{Level, Resource};

use crate::{HttpCatalog, parse_detail, parse_listing};

impl HttpCatalog {
	pub async fn list_actors(&self, memory_id: &str, max_results: u32) -> Result<Vec<Resource>> {
		let url = format!("{}/memories/{memory_id}/actors", self.data.base);
		let res =
			self.data.client.get(url).query(&[("maxResults", max_results)]).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_listing(json, "actorSummaries", Level::Actor)
	}

	pub async fn list_sessions(
		&self,
		memory_id: &str,
		actor_id: &str,
		max_results: u32,
	) -> Result<Vec<Resource>> {
		let url = format!("{}/memories/{memory_id}/actors/{actor_id}/sessions", self.data.base);
		let res =
			self.data.client.get(url).query(&[("maxResults", max_results)]).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_listing(json, "sessionSummaries", Level::Session)
	}

	pub async fn list_events(
		&self,
		memory_id: &str,
		actor_id: &str,
		session_id: &str,
		include_payloads: bool,
		max_results: u32,
	) -> Result<Vec<Resource>> {
		let url = format!(
			"{}/memories/{memory_id}/actors/{actor_id}/sessions/{session_id}/events",
			self.data.base
		);
		let res = self
			.data
			.client
			.get(url)
			.query(&[("includePayloads", include_payloads)])
			.query(&[("maxResults", max_results)])
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_listing(json, "events", Level::Event)
	}

	pub async fn get_event(
		&self,
		memory_id: &str,
		actor_id: &str,
		session_id: &str,
		event_id: &str,
	) -> Result<Resource> {
		let url = format!(
			"{}/memories/{memory_id}/actors/{actor_id}/sessions/{session_id}/events/{event_id}",
			self.data.base
		);
		let res = self.data.client.get(url).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_detail(json, "event", Level::Event)
	}
}
