use serde::{Deserialize, Serialize};

use crate::viewport::GeoPoint;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ListingId(pub u64);
impl std::fmt::Display for ListingId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A listing as returned by the search endpoint. Field names follow the endpoint's room
/// listing shape; absent optional fields decode to their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ListingRecord {
	pub id: ListingId,
	#[serde(default)]
	pub title: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	/// Nightly price.
	#[serde(alias = "price", default)]
	pub base_price: f64,
	#[serde(default)]
	pub rating: f32,
	#[serde(default)]
	pub total_reviews: u32,
	#[serde(default)]
	pub images: Vec<String>,
	#[serde(default)]
	pub max_guests: u32,
	#[serde(default)]
	pub bedrooms: u32,
	#[serde(default)]
	pub bathrooms: f32,
	#[serde(default)]
	pub amenities: Vec<String>,
	#[serde(default)]
	pub room_type: String,
	#[serde(default)]
	pub city: String,
	#[serde(default)]
	pub country: String,
}
impl ListingRecord {
	/// `None` for listings the endpoint could not geocode; those appear in the list only.
	pub fn position(&self) -> Option<GeoPoint> {
		match (self.latitude, self.longitude) {
			(Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() =>
				Some(GeoPoint::new(lat, lng)),
			_ => None,
		}
	}

	pub fn has_amenity(&self, wanted: &str) -> bool {
		self.amenities.iter().any(|amenity| amenity.trim().eq_ignore_ascii_case(wanted.trim()))
	}
}
