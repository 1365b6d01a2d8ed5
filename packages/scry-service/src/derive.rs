use time::OffsetDateTime;

use scry_domain::{
	resource::{Level, Resource},
	timestamp::{self, TimestampKey},
};

use crate::Catalog;

/// Stand-in timestamp for a session, taken from its earliest event.
///
/// Scans at most `scan_limit` events (metadata only, no payloads); if the
/// true earliest event lies beyond the bound the derived value is knowingly
/// approximate. Any fetch failure downgrades to `None` so one session's
/// failure never aborts the page it belongs to.
pub async fn derive_earliest_event_timestamp(
	catalog: &dyn Catalog,
	memory_id: &str,
	actor_id: &str,
	session_id: &str,
	scan_limit: u32,
) -> Option<OffsetDateTime> {
	let events =
		match catalog.list_events(memory_id, actor_id, session_id, false, scan_limit).await {
			Ok(events) => events,
			Err(err) => {
				tracing::debug!(
					session_id,
					error = %err,
					"Failed to fetch events for session; timestamp stays absent."
				);

				return None;
			},
		};

	earliest_event_timestamp(&events)
}

/// Minimum of the parseable event timestamps. Events without a parseable
/// timestamp are excluded from the minimum, not defaulted; an empty or fully
/// unparseable set yields `None`.
pub fn earliest_event_timestamp(events: &[Resource]) -> Option<OffsetDateTime> {
	events
		.iter()
		.filter_map(|event| {
			match timestamp::normalize(event.field(Level::Event.timestamp_field())) {
				TimestampKey::Present(instant) => Some(instant),
				TimestampKey::Sentinel => None,
			}
		})
		.min()
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn event(timestamp: serde_json::Value) -> Resource {
		Resource::from_value(Level::Event, json!({ "eventId": "e", "eventTimestamp": timestamp }))
			.expect("Expected a resource.")
	}

	#[test]
	fn picks_the_earliest_parseable_timestamp() {
		let events = vec![
			event(json!("2024-03-02T10:00:00Z")),
			event(json!("2024-03-01T09:00:00Z")),
			event(json!("2024-03-03T11:00:00Z")),
		];
		let earliest = earliest_event_timestamp(&events).expect("Expected a timestamp.");

		assert_eq!(
			timestamp::normalize(Some(&json!("2024-03-01T09:00:00Z"))).instant(),
			Some(earliest)
		);
	}

	#[test]
	fn excludes_unparseable_events_from_the_minimum() {
		// A garbled event must not become a bogus minimum.
		let events = vec![event(json!("not-a-date")), event(json!("2024-03-02T10:00:00Z"))];
		let earliest = earliest_event_timestamp(&events).expect("Expected a timestamp.");

		assert_eq!(
			timestamp::normalize(Some(&json!("2024-03-02T10:00:00Z"))).instant(),
			Some(earliest)
		);
	}

	#[test]
	fn yields_absent_when_nothing_is_usable() {
		assert_eq!(earliest_event_timestamp(&[]), None);
		assert_eq!(
			earliest_event_timestamp(&[event(json!(null)), event(json!("garbage"))]),
			None
		);
	}
}
