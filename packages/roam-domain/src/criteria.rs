use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::Date;

/// Tolerance attached to one end of a date range.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFlexibility {
	#[default]
	Exact,
	/// Signed day window, e.g. `Days(-2)` or `Days(3)`.
	Days(i32),
}
impl DateFlexibility {
	/// Wire form: `"exact"` or the signed day count.
	pub fn as_param(&self) -> String {
		match self {
			Self::Exact => "exact".to_string(),
			Self::Days(0) => "exact".to_string(),
			Self::Days(days) => days.to_string(),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DateEndpoint {
	pub date: Date,
	#[serde(default)]
	pub flexibility: DateFlexibility,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DateRange {
	pub start: DateEndpoint,
	pub end: DateEndpoint,
}

/// Month-mode search: stay of `months` months starting around `start`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MonthMode {
	/// Stay length in months, 1 to [`MonthMode::MAX_MONTHS`].
	pub months: u8,
	pub start: Date,
	#[serde(default)]
	pub flexibility: DateFlexibility,
}
impl MonthMode {
	pub const MAX_MONTHS: u8 = 12;
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StayDuration {
	Weekend,
	Week,
	Month,
}
impl StayDuration {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Weekend => "weekend",
			Self::Week => "week",
			Self::Month => "month",
		}
	}
}

/// Which tab of the date picker produced the selection.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOption {
	#[default]
	Dates,
	#[serde(alias = "months")]
	Month,
	Flexible,
}
impl DateOption {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Dates => "dates",
			Self::Month => "month",
			Self::Flexible => "flexible",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Guests {
	pub adults: u32,
	pub children: u32,
	pub infants: u32,
	pub pets: u32,
}
impl Guests {
	/// Any child, infant or pet implies at least one adult.
	pub fn normalized(self) -> Self {
		let secondary = self.children.saturating_add(self.infants).saturating_add(self.pets);

		if secondary > 0 && self.adults == 0 { Self { adults: 1, ..self } } else { self }
	}

	/// Heads that count toward a listing's capacity; infants and pets do not.
	pub fn occupancy(&self) -> u32 {
		self.adults.saturating_add(self.children)
	}

	pub fn is_empty(&self) -> bool {
		self.adults == 0 && self.children == 0 && self.infants == 0 && self.pets == 0
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
	Text(String),
	/// A suggestion picked from the location typeahead.
	Region { city: String, state: Option<String>, country: String },
}
impl Destination {
	pub fn label(&self) -> String {
		match self {
			Self::Text(text) => text.clone(),
			Self::Region { city, state, country } =>
				[Some(city.as_str()), state.as_deref(), Some(country.as_str())]
					.into_iter()
					.flatten()
					.map(str::trim)
					.filter(|part| !part.is_empty())
					.collect::<Vec<_>>()
					.join(", "),
		}
	}
}

/// Form values owned by the search bar.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FormState {
	pub destination: Option<Destination>,
	pub dates: Option<DateRange>,
	pub month_mode: Option<MonthMode>,
	/// Month indices 0-11 picked in flexible mode.
	#[serde(default)]
	pub flexible_months: BTreeSet<u8>,
	pub stay_duration: Option<StayDuration>,
	#[serde(default)]
	pub date_option: DateOption,
	#[serde(default)]
	pub guests: Guests,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PriceRange {
	pub min: Option<u32>,
	pub max: Option<u32>,
}
impl PriceRange {
	pub fn is_empty(&self) -> bool {
		self.min.is_none() && self.max.is_none()
	}

	pub fn contains(&self, price: f64) -> bool {
		self.min.map(|min| price >= f64::from(min)).unwrap_or(true)
			&& self.max.map(|max| price <= f64::from(max)).unwrap_or(true)
	}
}

/// Structured filters from the filter modal.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterState {
	pub bedrooms: Option<u32>,
	pub bathrooms: Option<u32>,
	#[serde(default)]
	pub amenities: BTreeSet<String>,
	#[serde(default)]
	pub price: PriceRange,
	pub room_type: Option<String>,
}
impl FilterState {
	pub fn is_active(&self) -> bool {
		self.bedrooms.is_some()
			|| self.bathrooms.is_some()
			|| !self.amenities.is_empty()
			|| !self.price.is_empty()
			|| self.room_type.is_some()
	}
}

/// Read-only snapshot of everything the host application store knows about the search.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct InboundState {
	pub form: FormState,
	pub filters: FilterState,
	/// Bumped by the host each time the user presses search.
	pub submitted: u64,
}
