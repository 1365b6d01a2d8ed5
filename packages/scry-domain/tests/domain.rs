use serde_json::json;

use scry_domain::{
	ordering,
	resource::{Level, Resource},
	timestamp::{self, TimestampKey},
};

fn memory(id: &str, created_at: serde_json::Value) -> Resource {
	Resource::from_value(Level::Memory, json!({ "id": id, "createdAt": created_at }))
		.expect("Expected a resource.")
}

#[test]
fn level_metadata_matches_the_upstream_schema() {
	assert_eq!(Level::Memory.id_field(), "id");
	assert_eq!(Level::Actor.id_field(), "actorId");
	assert_eq!(Level::Session.id_field(), "sessionId");
	assert_eq!(Level::Event.id_field(), "eventId");

	assert_eq!(Level::Memory.timestamp_field(), "createdAt");
	assert_eq!(Level::Session.timestamp_field(), "createdAt");
	assert_eq!(Level::Event.timestamp_field(), "eventTimestamp");
}

#[test]
fn sorting_is_a_permutation_ordered_descending() {
	let mut memories = vec![
		memory("m-2022", json!("2022-05-01T12:00:00Z")),
		memory("m-2024", json!("2024-05-01T12:00:00Z")),
		memory("m-2023", json!("2023-05-01T12:00:00Z")),
	];

	ordering::sort_descending_by_timestamp(&mut memories, Level::Memory.timestamp_field());

	let ids = memories.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, ["m-2024", "m-2023", "m-2022"]);

	for pair in memories.windows(2) {
		let first = timestamp::normalize(pair[0].field("createdAt"));
		let second = timestamp::normalize(pair[1].field("createdAt"));

		assert!(first >= second);
	}
}

#[test]
fn every_dated_item_precedes_every_undated_one() {
	let mut memories = vec![
		memory("undated-a", json!(null)),
		memory("dated-a", json!("2021-01-01T00:00:00Z")),
		memory("garbled", json!("yesterday-ish")),
		memory("dated-b", json!("2024-01-01T00:00:00Z")),
	];

	ordering::sort_descending_by_timestamp(&mut memories, Level::Memory.timestamp_field());

	let sentinel_start = memories
		.iter()
		.position(|item| !timestamp::normalize(item.field("createdAt")).is_present())
		.expect("Expected sentinel items.");

	assert_eq!(sentinel_start, 2);
	assert_eq!(memories[0].id, "dated-b");
	assert_eq!(memories[1].id, "dated-a");
	// Sentinel items keep their fetch order.
	assert_eq!(memories[2].id, "undated-a");
	assert_eq!(memories[3].id, "garbled");
}

#[test]
fn normalize_is_format_independent_across_levels() {
	let from_string = timestamp::normalize(Some(&json!("2024-03-01T09:00:00Z")));
	let from_epoch = timestamp::normalize(Some(&json!(1_709_283_600)));

	assert!(from_string.is_present());
	assert_eq!(from_string, from_epoch);
	assert_eq!(from_string.instant(), from_epoch.instant());
	assert_eq!(timestamp::normalize(None), TimestampKey::MIN);
}
