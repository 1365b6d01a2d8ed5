use std::{collections::HashMap, sync::Mutex};

use color_eyre::eyre;
use serde_json::Value;

use scry_domain::resource::{Level, Resource};
use scry_service::{BoxFuture, Catalog};

/// Builds a test resource from a JSON object literal.
pub fn resource(level: Level, value: Value) -> Resource {
	Resource::from_value(level, value).expect("Test resource must be an object with an identifier.")
}

/// Arguments of one recorded `list_events` call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventListCall {
	pub session_id: String,
	pub include_payloads: bool,
	pub max_results: u32,
}

/// In-memory catalog with scripted responses.
///
/// Listings return the scripted items regardless of ancestor ids; failure
/// injection is per level (base listings) or per session (event fetches used
/// by timestamp derivation). Every `list_events` call is recorded so tests
/// can assert on the scan bound and payload flag.
#[derive(Default)]
pub struct FakeCatalog {
	memories: Vec<Resource>,
	actors: Vec<Resource>,
	sessions: Vec<Resource>,
	events: HashMap<String, Vec<Resource>>,
	failing_levels: Vec<Level>,
	failing_event_sessions: Vec<String>,
	event_calls: Mutex<Vec<EventListCall>>,
}
impl FakeCatalog {
	pub fn with_memories(mut self, memories: Vec<Resource>) -> Self {
		self.memories = memories;

		self
	}

	pub fn with_actors(mut self, actors: Vec<Resource>) -> Self {
		self.actors = actors;

		self
	}

	pub fn with_sessions(mut self, sessions: Vec<Resource>) -> Self {
		self.sessions = sessions;

		self
	}

	pub fn with_events(mut self, session_id: &str, events: Vec<Resource>) -> Self {
		self.events.insert(session_id.to_string(), events);

		self
	}

	/// Makes the base listing/detail calls of `level` fail.
	pub fn failing_level(mut self, level: Level) -> Self {
		self.failing_levels.push(level);

		self
	}

	/// Makes `list_events` fail for one session only, simulating a network
	/// error during timestamp derivation.
	pub fn failing_events_for(mut self, session_id: &str) -> Self {
		self.failing_event_sessions.push(session_id.to_string());

		self
	}

	pub fn event_calls(&self) -> Vec<EventListCall> {
		self.event_calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn fail_if_marked(&self, level: Level) -> color_eyre::Result<()> {
		if self.failing_levels.contains(&level) {
			return Err(eyre::eyre!("Simulated {level} listing failure."));
		}

		Ok(())
	}
}
impl Catalog for FakeCatalog {
	fn list_memories<'a>(
		&'a self,
		_max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(async move {
			self.fail_if_marked(Level::Memory)?;

			Ok(self.memories.clone())
		})
	}

	fn list_actors<'a>(
		&'a self,
		_memory_id: &'a str,
		_max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(async move {
			self.fail_if_marked(Level::Actor)?;

			Ok(self.actors.clone())
		})
	}

	fn list_sessions<'a>(
		&'a self,
		_memory_id: &'a str,
		_actor_id: &'a str,
		_max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(async move {
			self.fail_if_marked(Level::Session)?;

			Ok(self.sessions.clone())
		})
	}

	fn list_events<'a>(
		&'a self,
		_memory_id: &'a str,
		_actor_id: &'a str,
		session_id: &'a str,
		include_payloads: bool,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(async move {
			self.event_calls.lock().unwrap_or_else(|err| err.into_inner()).push(EventListCall {
				session_id: session_id.to_string(),
				include_payloads,
				max_results,
			});

			if self.failing_event_sessions.iter().any(|value| value == session_id) {
				return Err(eyre::eyre!("Simulated network failure listing events."));
			}

			self.fail_if_marked(Level::Event)?;

			Ok(self.events.get(session_id).cloned().unwrap_or_default())
		})
	}

	fn get_memory<'a>(
		&'a self,
		memory_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>> {
		Box::pin(async move {
			self.fail_if_marked(Level::Memory)?;

			self.memories
				.iter()
				.find(|memory| memory.id == memory_id)
				.cloned()
				.ok_or_else(|| eyre::eyre!("Memory {memory_id} is not in the fake catalog."))
		})
	}

	fn get_event<'a>(
		&'a self,
		_memory_id: &'a str,
		_actor_id: &'a str,
		session_id: &'a str,
		event_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>> {
		Box::pin(async move {
			self.fail_if_marked(Level::Event)?;

			self.events
				.get(session_id)
				.and_then(|events| events.iter().find(|event| event.id == event_id))
				.cloned()
				.ok_or_else(|| eyre::eyre!("Event {event_id} is not in the fake catalog."))
		})
	}
}
