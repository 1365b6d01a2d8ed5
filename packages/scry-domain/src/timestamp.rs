use serde_json::{Number, Value};
use time::{
	Date, OffsetDateTime, PrimitiveDateTime,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};

/// Totally ordered "when did this happen" key. `Sentinel` is the minimum, so
/// items without a usable timestamp sort last in a descending view.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum TimestampKey {
	Sentinel,
	Present(OffsetDateTime),
}
impl TimestampKey {
	pub const MIN: Self = Self::Sentinel;

	pub fn is_present(&self) -> bool {
		matches!(self, Self::Present(_))
	}

	pub fn instant(&self) -> Option<OffsetDateTime> {
		match self {
			Self::Present(instant) => Some(*instant),
			Self::Sentinel => None,
		}
	}
}

// Offset-free shapes the upstream has been seen emitting; all assumed UTC.
const NAIVE_DATETIME_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];
const DATE_ONLY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Collapses an arbitrary timestamp-shaped value into a [`TimestampKey`].
///
/// Absent values, unrecognized formats, and unexpected JSON types all map to
/// the sentinel; this function never fails and is deterministic for a given
/// input.
pub fn normalize(value: Option<&Value>) -> TimestampKey {
	match value {
		None | Some(Value::Null) => TimestampKey::Sentinel,
		Some(Value::String(raw)) =>
			parse_datetime(raw).map(TimestampKey::Present).unwrap_or(TimestampKey::Sentinel),
		Some(Value::Number(raw)) =>
			from_epoch(raw).map(TimestampKey::Present).unwrap_or(TimestampKey::Sentinel),
		Some(_) => TimestampKey::Sentinel,
	}
}

/// Permissive, locale-agnostic date/time parse: RFC 3339, ISO-8601 without an
/// offset (assumed UTC), `YYYY-MM-DD HH:MM:SS`, and bare dates.
pub fn parse_datetime(raw: &str) -> Option<OffsetDateTime> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}
	if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
		return Some(parsed);
	}

	for format in NAIVE_DATETIME_FORMATS {
		if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, format) {
			return Some(parsed.assume_utc());
		}
	}

	Date::parse(trimmed, DATE_ONLY_FORMAT).ok().map(|date| date.midnight().assume_utc())
}

// The upstream serializes native temporal values as Unix epoch seconds.
fn from_epoch(raw: &Number) -> Option<OffsetDateTime> {
	if let Some(seconds) = raw.as_i64() {
		return OffsetDateTime::from_unix_timestamp(seconds).ok();
	}

	let seconds = raw.as_f64()?;

	if !seconds.is_finite() {
		return None;
	}

	OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128).ok()
}
