use scry_domain::resource::{Level, Resource};

use crate::{Error, Result, ScryService, required};

impl ScryService {
	pub async fn get_memory(&self, memory_id: &str) -> Result<Resource> {
		let memory_id = required(memory_id, "memory_id")?;
		let catalog = self.catalog()?;

		catalog
			.get_memory(memory_id)
			.await
			.map_err(|err| Error::BaseListing { level: Level::Memory, message: err.to_string() })
	}

	pub async fn get_event(
		&self,
		memory_id: &str,
		actor_id: &str,
		session_id: &str,
		event_id: &str,
	) -> Result<Resource> {
		let memory_id = required(memory_id, "memory_id")?;
		let actor_id = required(actor_id, "actor_id")?;
		let session_id = required(session_id, "session_id")?;
		let event_id = required(event_id, "event_id")?;
		let catalog = self.catalog()?;

		catalog
			.get_event(memory_id, actor_id, session_id, event_id)
			.await
			.map_err(|err| Error::BaseListing { level: Level::Event, message: err.to_string() })
	}
}
