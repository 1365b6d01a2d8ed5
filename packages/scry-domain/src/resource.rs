use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One level of the upstream hierarchy: memory → actor → session → event.
///
/// Each level knows which upstream field identifies an item and which field
/// carries its timestamp. Sessions arrive without `createdAt`; the service
/// writes a derived value into that field before ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
	Memory,
	Actor,
	Session,
	Event,
}
impl Level {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Memory => "memory",
			Self::Actor => "actor",
			Self::Session => "session",
			Self::Event => "event",
		}
	}

	pub fn id_field(&self) -> &'static str {
		match self {
			Self::Memory => "id",
			Self::Actor => "actorId",
			Self::Session => "sessionId",
			Self::Event => "eventId",
		}
	}

	pub fn timestamp_field(&self) -> &'static str {
		match self {
			Self::Memory | Self::Actor | Self::Session => "createdAt",
			Self::Event => "eventTimestamp",
		}
	}
}
impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single item fetched from the upstream catalog, kept as the raw field map
/// it arrived with. Owned by the request that fetched it; nothing is cached.
#[derive(Clone, Debug)]
pub struct Resource {
	pub id: String,
	pub fields: Map<String, Value>,
}
impl Resource {
	/// Requires a JSON object carrying the level's id field as a non-empty
	/// string; anything else is rejected.
	pub fn from_value(level: Level, value: Value) -> Option<Self> {
		let Value::Object(fields) = value else {
			return None;
		};
		let id = fields.get(level.id_field())?.as_str()?.trim();

		if id.is_empty() {
			return None;
		}

		Some(Self { id: id.to_string(), fields })
	}

	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	pub fn set_field(&mut self, name: &str, value: Value) {
		self.fields.insert(name.to_string(), value);
	}
}
impl Serialize for Resource {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.fields.serialize(serializer)
	}
}
