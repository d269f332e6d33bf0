use std::collections::BTreeSet;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::{
	criteria::{
		DateOption, DateRange, FilterState, FormState, Guests, MonthMode, StayDuration,
	},
	viewport::Viewport,
};

/// Location sent when the user searched by dates or guests alone.
pub const ANY_LOCATION: &str = "anywhere";

const QUERY_KEY_SCHEMA_VERSION: i32 = 1;

/// Comparison-stable union of the search criteria, the settled viewport and the trigger
/// generation. The generation never takes part in the cache key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryDescriptor {
	pub location: Option<String>,
	pub dates: Option<DateRange>,
	pub month_mode: Option<MonthMode>,
	pub flexible_months: BTreeSet<u8>,
	pub stay_duration: Option<StayDuration>,
	pub date_option: DateOption,
	pub guests: Guests,
	pub filters: FilterState,
	pub viewport: Option<Viewport>,
	#[serde(skip)]
	pub generation: u64,
}
impl QueryDescriptor {
	/// True when anything besides the generation would narrow the search.
	pub fn has_criteria(&self) -> bool {
		self.location.is_some() || self.viewport.is_some() || self.filters.is_active()
	}

	/// Key shared by every descriptor that would return the same listings.
	pub fn cache_key(&self) -> String {
		hash_key("query", self)
	}

	/// Like [`Self::cache_key`] but blind to the viewport; a change here means the user
	/// changed what they are looking for, not where they are looking.
	pub fn criteria_key(&self) -> String {
		let without_viewport = Self { viewport: None, ..self.clone() };

		hash_key("criteria", &without_viewport)
	}
}

pub fn build_query_descriptor(
	form: &FormState,
	filters: &FilterState,
	viewport: Option<&Viewport>,
	generation: u64,
) -> QueryDescriptor {
	let guests = form.guests.normalized();
	let month_mode = form
		.month_mode
		.filter(|mode| mode.months > 0)
		.map(|mode| MonthMode { months: mode.months.min(MonthMode::MAX_MONTHS), ..mode });
	let flexible_months: BTreeSet<u8> =
		form.flexible_months.iter().copied().filter(|month| *month < 12).collect();
	let location = normalize_destination(form).or_else(|| {
		let has_other_criteria = form.dates.is_some()
			|| !guests.is_empty()
			|| !flexible_months.is_empty()
			|| form.stay_duration.is_some()
			|| month_mode.is_some();

		has_other_criteria.then(|| ANY_LOCATION.to_string())
	});

	QueryDescriptor {
		location,
		dates: form.dates,
		month_mode,
		flexible_months,
		stay_duration: form.stay_duration,
		date_option: form.date_option,
		guests,
		filters: normalize_filters(filters),
		viewport: viewport.copied(),
		generation,
	}
}

fn normalize_destination(form: &FormState) -> Option<String> {
	let label = form.destination.as_ref()?.label();
	let normalized: String = label.nfkc().collect();
	let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

	if collapsed.is_empty() { None } else { Some(collapsed) }
}

fn normalize_filters(filters: &FilterState) -> FilterState {
	let amenities = filters
		.amenities
		.iter()
		.map(|amenity| amenity.trim().to_string())
		.filter(|amenity| !amenity.is_empty())
		.collect();
	let room_type = filters
		.room_type
		.as_deref()
		.map(str::trim)
		.filter(|room_type| !room_type.is_empty() && !room_type.eq_ignore_ascii_case("any"))
		.map(str::to_string);

	FilterState {
		bedrooms: filters.bedrooms.filter(|count| *count > 0),
		bathrooms: filters.bathrooms.filter(|count| *count > 0),
		amenities,
		price: filters.price,
		room_type,
	}
}

fn hash_key(kind: &str, descriptor: &QueryDescriptor) -> String {
	let payload = serde_json::json!({
		"kind": kind,
		"schema_version": QUERY_KEY_SCHEMA_VERSION,
		"descriptor": descriptor,
	});
	// Every field is a plain value; encoding cannot fail.
	let raw = serde_json::to_vec(&payload).unwrap_or_default();

	blake3::hash(&raw).to_hex().to_string()
}
