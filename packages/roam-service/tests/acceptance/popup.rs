use time::Duration;

use roam_domain::{
	listing::ListingId,
	placement::{ContainerSize, PopupEdge},
	viewport::GeoPoint,
};
use roam_service::SearchSession;
use roam_testkit::{FakeMap, ScriptedSearch};

use super::T0;

// Projects to (590, 760) in the 600x800 Austin fixture map.
const BOTTOM_RIGHT: GeoPoint = GeoPoint { lat: 30.1772, lng: -97.646_433 };

fn provider() -> ScriptedSearch {
	let mut listings = roam_testkit::austin_listings(1, 2);

	listings.push(roam_testkit::listing(9, BOTTOM_RIGHT, 250.0));

	ScriptedSearch::new().fallback(listings)
}

#[tokio::test]
async fn marker_near_bottom_right_opens_above_and_clamps() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	let popup = session.click_marker(ListingId(9)).expect("Expected a popup.");

	assert_eq!(popup.edge, PopupEdge::Above);
	assert_eq!(popup.x, 600.0 - 16.0 - 280.0);
	assert!((popup.y - (760.0 - 12.0 - 320.0)).abs() < 0.5);
	assert_eq!(session.selected_id(), Some(ListingId(9)));
	assert_eq!(session.popup(), Some(popup));
}

#[tokio::test]
async fn unmeasured_container_retries_on_next_settle() {
	let provider = provider();
	let mut session = SearchSession::new(&super::test_config(), FakeMap::unmeasured());

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	assert!(session.click_marker(ListingId(9)).is_none());
	assert_eq!(session.selected_id(), Some(ListingId(9)));

	session.map_mut().set_size(Some(ContainerSize { width: 600.0, height: 800.0 }));
	session.map_moved(roam_testkit::austin_bounds(0.0), T0);
	session.tick(T0 + Duration::seconds(1));

	assert_eq!(session.popup().map(|popup| popup.edge), Some(PopupEdge::Above));
}

#[tokio::test]
async fn selection_clears_on_background_click_close_and_result_change() {
	let provider = ScriptedSearch::new()
		.respond("Austin", roam_testkit::austin_listings(1, 3))
		.respond("Denver", roam_testkit::austin_listings(10, 3));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	session.click_marker(ListingId(1));
	session.click_map();

	assert!(session.selected_id().is_none());

	session.click_marker(ListingId(2));
	session.close_popup();

	assert!(session.popup().is_none());

	session.click_marker(ListingId(3));
	session.update_state(super::submitted("Denver", 2));
	session.search(&provider).await;

	assert!(session.selected_id().is_none());
	assert!(session.popup().is_none());
}

#[tokio::test]
async fn popup_follows_the_marker_after_a_pan() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	let before = session.click_marker(ListingId(1)).expect("Expected a popup.");

	session.map_mut().set_bounds(roam_testkit::austin_bounds(0.05));
	session.map_moved(roam_testkit::austin_bounds(0.05), T0);
	session.tick(T0 + Duration::seconds(1));

	let after = session.popup().expect("Expected the popup to survive the pan.");

	assert_eq!(before.edge, PopupEdge::Below);
	assert_eq!(after.edge, PopupEdge::Above);
	assert_eq!(session.selected_id(), Some(ListingId(1)));
}

#[tokio::test]
async fn popup_tracks_the_marker_before_the_pan_settles() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	let before = session.click_marker(ListingId(1)).expect("Expected a popup.");

	session.map_mut().set_bounds(roam_testkit::austin_bounds(0.05));
	session.map_moved(roam_testkit::austin_bounds(0.05), T0);

	let report = session.tick(T0 + Duration::milliseconds(100));
	let moving = session.popup().expect("Expected the popup to stay open while panning.");

	assert!(report.settled.is_none());
	assert_ne!(moving, before);
	assert_eq!(moving.edge, PopupEdge::Above);
}
