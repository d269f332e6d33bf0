use serde::Serialize;

use roam_domain::{
	criteria::FilterState,
	listing::{ListingId, ListingRecord},
	query::QueryDescriptor,
};

const NIGHTS_PER_MONTH: f64 = 30.0;

/// A listing ready for the list pane and the map label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingCard {
	pub record: ListingRecord,
	pub price_label: String,
	pub monthly_price: f64,
	pub is_guest_favorite: bool,
}
impl ListingCard {
	pub fn id(&self) -> ListingId {
		self.record.id
	}
}

#[derive(Clone, Debug)]
pub struct ResultTransformer {
	default_country: String,
	favorite_min_rating: f32,
	favorite_min_reviews: u32,
}
impl ResultTransformer {
	pub fn new(cfg: &roam_config::Results) -> Self {
		Self {
			default_country: cfg.default_country.clone(),
			favorite_min_rating: cfg.guest_favorite_min_rating,
			favorite_min_reviews: cfg.guest_favorite_min_reviews,
		}
	}

	/// Decorate and refine `records` for the query that produced them. Order is preserved.
	pub fn transform(
		&self,
		records: &[ListingRecord],
		descriptor: &QueryDescriptor,
	) -> Vec<ListingCard> {
		let default_refinement = !descriptor.has_criteria() && !self.default_country.is_empty();
		let occupancy = descriptor.guests.occupancy();

		records
			.iter()
			.filter(|record| {
				!default_refinement
					|| record.country.trim().eq_ignore_ascii_case(&self.default_country)
			})
			.filter(|record| matches_filters(record, &descriptor.filters))
			.filter(|record| {
				occupancy == 0 || record.max_guests == 0 || occupancy <= record.max_guests
			})
			.map(|record| self.card(record))
			.collect()
	}

	fn card(&self, record: &ListingRecord) -> ListingCard {
		let nightly = record.base_price.max(0.0);

		ListingCard {
			record: record.clone(),
			price_label: format!("${}", nightly.round() as u64),
			monthly_price: nightly * NIGHTS_PER_MONTH,
			is_guest_favorite: record.rating >= self.favorite_min_rating
				&& record.total_reviews > self.favorite_min_reviews,
		}
	}
}

fn matches_filters(record: &ListingRecord, filters: &FilterState) -> bool {
	if !filters.is_active() {
		return true;
	}
	if filters.bedrooms.is_some_and(|min| record.bedrooms < min) {
		return false;
	}
	if filters.bathrooms.is_some_and(|min| record.bathrooms < min as f32) {
		return false;
	}
	if !filters.amenities.iter().all(|amenity| record.has_amenity(amenity)) {
		return false;
	}
	if !filters.price.contains(record.base_price) {
		return false;
	}
	if let Some(room_type) = &filters.room_type
		&& !record.room_type.trim().eq_ignore_ascii_case(room_type)
	{
		return false;
	}

	true
}
