use time::Duration;

use roam_domain::listing::ListingId;
use roam_service::{MarkerVariant, SearchSummary};
use roam_testkit::{MapEvent, ScriptedSearch};

use super::T0;

#[tokio::test]
async fn identical_results_cause_no_marker_churn() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 5));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	super::settle_fades(&mut session);
	session.map().clear_events();
	session.map_moved(roam_testkit::austin_bounds(0.0), T0);
	session.tick(T0 + Duration::seconds(1));
	session.search(&provider).await;

	assert_eq!(provider.call_count(), 2);

	let log = session.map().log();
	let log = log.borrow();

	assert_eq!(log.count(|event| !matches!(event, MapEvent::Opacity { .. })), 0);
	assert_eq!(log.live.len(), 5);
}

#[tokio::test]
async fn stale_markers_fade_out_and_new_ones_fade_in() {
	let provider = ScriptedSearch::new()
		.respond("Austin", roam_testkit::austin_listings(1, 4))
		.respond("Round Rock", roam_testkit::austin_listings(3, 4));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	super::settle_fades(&mut session);
	session.update_state(super::submitted("Round Rock", 2));
	session.search(&provider).await;

	// 1 and 2 fade out, 5 and 6 fade in, 3 and 4 move in place.
	assert_eq!(session.map().live_count(), 6);
	assert_eq!(session.markers().live_ids().len(), 4);

	super::settle_fades(&mut session);

	assert_eq!(session.map().live_count(), 4);
	assert_eq!(session.map().added(), 6);
	assert_eq!(session.map().removed(), 2);

	let log = session.map().log();

	assert!(log.borrow().live.values().all(|marker| marker.opacity == 1.0));
}

#[tokio::test]
async fn listings_without_coordinates_are_listed_but_not_pinned() {
	let mut listings = roam_testkit::austin_listings(1, 2);
	let unplaced = roam_testkit::listing_from(serde_json::json!({ "id": 77, "base_price": 60.0 }))
		.expect("Failed to decode listing.");

	listings.push(unplaced);

	let provider = ScriptedSearch::new().fallback(listings);
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(3));
	assert_eq!(session.map().live_count(), 2);
	assert!(session.click_marker(ListingId(77)).is_none());
}

#[tokio::test]
async fn hover_and_selection_restyle_markers() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 3));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	session.hover(Some(ListingId(2)));
	session.click_marker(ListingId(3));

	let variant = |id: ListingId| session.markers().get(id).map(|marker| marker.label.variant);

	assert_eq!(variant(ListingId(1)), Some(MarkerVariant::Default));
	assert_eq!(variant(ListingId(2)), Some(MarkerVariant::Hovered));
	assert_eq!(variant(ListingId(3)), Some(MarkerVariant::Selected));

	session.hover(None);
	session.click_map();

	let variant = |id: ListingId| session.markers().get(id).map(|marker| marker.label.variant);

	assert!(
		[1, 2, 3]
			.into_iter()
			.all(|id| variant(ListingId(id)) == Some(MarkerVariant::Default))
	);
}

#[tokio::test]
async fn dropping_the_session_clears_the_map() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 3));
	let mut session = super::session();
	let log = session.map().log();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	drop(session);

	assert!(log.borrow().live.is_empty());
}
