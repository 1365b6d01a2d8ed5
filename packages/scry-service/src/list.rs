use std::sync::Arc;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::task::JoinSet;

use scry_domain::{
	ordering,
	resource::{Level, Resource},
};

use crate::{Catalog, Error, Result, ScryService, derive, required};

impl ScryService {
	pub async fn list_memories(&self, max_results: Option<u32>) -> Result<Vec<Resource>> {
		let catalog = self.catalog()?;
		let mut memories = catalog
			.list_memories(self.page_size(max_results))
			.await
			.map_err(|err| Error::BaseListing { level: Level::Memory, message: err.to_string() })?;

		ordering::sort_descending_by_timestamp(&mut memories, Level::Memory.timestamp_field());
		tracing::info!(count = memories.len(), "Retrieved memories.");

		Ok(memories)
	}

	pub async fn list_actors(
		&self,
		memory_id: &str,
		max_results: Option<u32>,
	) -> Result<Vec<Resource>> {
		let memory_id = required(memory_id, "memory_id")?;
		let catalog = self.catalog()?;
		let mut actors = catalog
			.list_actors(memory_id, self.page_size(max_results))
			.await
			.map_err(|err| Error::BaseListing { level: Level::Actor, message: err.to_string() })?;

		// Actor summaries usually carry no timestamp; the stable sort then
		// preserves the upstream order.
		ordering::sort_descending_by_timestamp(&mut actors, Level::Actor.timestamp_field());
		tracing::info!(memory_id, count = actors.len(), "Retrieved actors.");

		Ok(actors)
	}

	pub async fn list_sessions(
		&self,
		memory_id: &str,
		actor_id: &str,
		max_results: Option<u32>,
	) -> Result<Vec<Resource>> {
		let memory_id = required(memory_id, "memory_id")?;
		let actor_id = required(actor_id, "actor_id")?;
		let catalog = self.catalog()?;
		let mut sessions = catalog
			.list_sessions(memory_id, actor_id, self.page_size(max_results))
			.await
			.map_err(|err| Error::BaseListing {
				level: Level::Session,
				message: err.to_string(),
			})?;
		let derived =
			self.derive_session_timestamps(catalog.clone(), memory_id, actor_id, &sessions).await;

		for (session, timestamp) in sessions.iter_mut().zip(derived) {
			let Some(timestamp) = timestamp else {
				continue;
			};
			let Ok(formatted) = timestamp.format(&Rfc3339) else {
				continue;
			};

			session.set_field(Level::Session.timestamp_field(), formatted.into());
		}

		ordering::sort_descending_by_timestamp(&mut sessions, Level::Session.timestamp_field());
		tracing::info!(memory_id, actor_id, count = sessions.len(), "Retrieved sessions.");

		Ok(sessions)
	}

	pub async fn list_events(
		&self,
		memory_id: &str,
		actor_id: &str,
		session_id: &str,
		max_results: Option<u32>,
	) -> Result<Vec<Resource>> {
		let memory_id = required(memory_id, "memory_id")?;
		let actor_id = required(actor_id, "actor_id")?;
		let session_id = required(session_id, "session_id")?;
		let catalog = self.catalog()?;
		let mut events = catalog
			.list_events(memory_id, actor_id, session_id, true, self.event_page_size(max_results))
			.await
			.map_err(|err| Error::BaseListing { level: Level::Event, message: err.to_string() })?;

		ordering::sort_descending_by_timestamp(&mut events, Level::Event.timestamp_field());
		tracing::info!(memory_id, actor_id, session_id, count = events.len(), "Retrieved events.");

		Ok(events)
	}

	/// One derivation task per listed session, reassembled by index so the
	/// upstream order is preserved. Each task fails independently: a fetch
	/// error or panic leaves only its own slot absent.
	async fn derive_session_timestamps(
		&self,
		catalog: Arc<dyn Catalog>,
		memory_id: &str,
		actor_id: &str,
		sessions: &[Resource],
	) -> Vec<Option<OffsetDateTime>> {
		let scan_limit = self.cfg.view.derive_scan_limit;
		let mut derived = vec![None; sessions.len()];
		let mut tasks = JoinSet::new();

		for (index, session) in sessions.iter().enumerate() {
			let catalog = catalog.clone();
			let memory_id = memory_id.to_string();
			let actor_id = actor_id.to_string();
			let session_id = session.id.clone();

			tasks.spawn(async move {
				let timestamp = derive::derive_earliest_event_timestamp(
					catalog.as_ref(),
					&memory_id,
					&actor_id,
					&session_id,
					scan_limit,
				)
				.await;

				(index, timestamp)
			});
		}

		while let Some(joined) = tasks.join_next().await {
			let Ok((index, timestamp)) = joined else {
				continue;
			};

			derived[index] = timestamp;
		}

		derived
	}
}
