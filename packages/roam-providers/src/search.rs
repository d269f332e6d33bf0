use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use time::Date;

use roam_config::Endpoint;
use roam_domain::{listing::ListingRecord, query::QueryDescriptor};

use crate::{Error, Result};

/// HTTP client for the listing search endpoint.
#[derive(Clone, Debug)]
pub struct SearchClient {
	client: Client,
	url: String,
}
impl SearchClient {
	pub fn new(cfg: &Endpoint) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
			.build()?;

		Ok(Self { client, url: format!("{}{}", cfg.api_base, cfg.path) })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub async fn search(&self, descriptor: &QueryDescriptor) -> Result<Vec<ListingRecord>> {
		let res = self.client.get(&self.url).query(&query_pairs(descriptor)).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_search_response(json)
	}
}

/// Encode a descriptor into the endpoint's query parameters. Absent criteria are omitted.
pub fn query_pairs(descriptor: &QueryDescriptor) -> Vec<(&'static str, String)> {
	let mut pairs = Vec::new();

	if let Some(location) = &descriptor.location {
		pairs.push(("location", location.clone()));
	}
	if let Some(dates) = &descriptor.dates {
		pairs.push(("check_in", format_date(dates.start.date)));
		pairs.push(("check_out", format_date(dates.end.date)));
		pairs.push(("start_date_flexibility", dates.start.flexibility.as_param()));
		pairs.push(("end_date_flexibility", dates.end.flexibility.as_param()));
	}
	if let Some(mode) = &descriptor.month_mode {
		pairs.push(("month_duration", mode.months.to_string()));
		pairs.push(("start_duration_date", format_date(mode.start)));
		pairs.push(("date_flexibility", mode.flexibility.as_param()));
	}

	for month in &descriptor.flexible_months {
		pairs.push(("flexible_months", month.to_string()));
	}

	if let Some(duration) = descriptor.stay_duration {
		pairs.push(("stay_duration", duration.as_str().to_string()));
	}
	if descriptor.dates.is_some()
		|| descriptor.month_mode.is_some()
		|| !descriptor.flexible_months.is_empty()
		|| descriptor.stay_duration.is_some()
	{
		pairs.push(("date_option", descriptor.date_option.as_str().to_string()));
	}

	let guests = &descriptor.guests;

	if !guests.is_empty() {
		pairs.push(("guests", guests.occupancy().to_string()));
		pairs.push(("adults", guests.adults.to_string()));
		pairs.push(("children", guests.children.to_string()));
		pairs.push(("infants", guests.infants.to_string()));
		pairs.push(("pets", guests.pets.to_string()));
	}

	let filters = &descriptor.filters;

	if let Some(bedrooms) = filters.bedrooms {
		pairs.push(("bedrooms", bedrooms.to_string()));
	}
	if let Some(bathrooms) = filters.bathrooms {
		pairs.push(("bathrooms", bathrooms.to_string()));
	}

	for amenity in &filters.amenities {
		pairs.push(("amenities", amenity.clone()));
	}

	if let Some(min) = filters.price.min {
		pairs.push(("min_price", min.to_string()));
	}
	if let Some(max) = filters.price.max {
		pairs.push(("max_price", max.to_string()));
	}
	if let Some(room_type) = &filters.room_type {
		pairs.push(("room_type", room_type.clone()));
	}
	if let Some(viewport) = &descriptor.viewport {
		pairs.push(("ne_lat", viewport.north().to_string()));
		pairs.push(("ne_lng", viewport.east().to_string()));
		pairs.push(("sw_lat", viewport.south().to_string()));
		pairs.push(("sw_lng", viewport.west().to_string()));
		pairs.push(("search_by_map", "true".to_string()));
	}

	// The client paginates; ask for everything.
	pairs.push(("limit", "0".to_string()));

	pairs
}

/// Accepts either a bare array of listings or an object wrapping one under `items`.
/// Entries that fail to decode are skipped.
pub fn parse_search_response(json: Value) -> Result<Vec<ListingRecord>> {
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut obj) => match obj.remove("items") {
			Some(Value::Array(items)) => items,
			_ =>
				return Err(Error::InvalidResponse {
					message: "Search response is missing an items array.".to_string(),
				}),
		},
		_ =>
			return Err(Error::InvalidResponse {
				message: "Search response must be an array or an object.".to_string(),
			}),
	};
	let mut records = Vec::with_capacity(items.len());

	for (index, item) in items.into_iter().enumerate() {
		match serde_json::from_value::<ListingRecord>(item) {
			Ok(record) => records.push(record),
			Err(err) => {
				tracing::warn!(index, error = %err, "Skipping undecodable listing.");
			},
		}
	}

	Ok(records)
}

fn format_date(date: Date) -> String {
	format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}
