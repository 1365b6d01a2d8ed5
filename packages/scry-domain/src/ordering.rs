use crate::{resource::Resource, timestamp};

/// Sorts a fetched collection most-recent-first by the named timestamp field.
///
/// The sort is stable, so items with equal keys (including the sentinel for
/// absent/unparseable values) keep their fetch order, and the sentinel being
/// the minimum key puts timestamp-less items at the end. Total: malformed
/// input degrades ordering quality, never the operation.
pub fn sort_descending_by_timestamp(resources: &mut [Resource], field: &str) {
	resources.sort_by(|a, b| {
		let a_key = timestamp::normalize(a.field(field));
		let b_key = timestamp::normalize(b.field(field));

		b_key.cmp(&a_key)
	});
}
