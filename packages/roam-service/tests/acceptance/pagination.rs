use time::Duration;

use roam_domain::criteria::InboundState;
use roam_service::SearchSummary;
use roam_testkit::ScriptedSearch;

#[tokio::test]
async fn twenty_five_results_make_three_pages() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(1, 25));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(25));
	assert_eq!(session.page().total_pages, 3);

	session.go_to_page(3);

	let last = session.page();

	assert_eq!(last.page_number, 3);
	assert_eq!(last.items.len(), 1);

	// Every listing with coordinates is on the map regardless of the page shown.
	assert_eq!(session.map().live_count(), 25);

	session.go_to_page(40);

	assert_eq!(session.page().page_number, 3);
}

#[tokio::test]
async fn new_criteria_reset_to_first_page() {
	let provider = ScriptedSearch::new()
		.respond("Austin", roam_testkit::austin_listings(1, 25))
		.respond("Denver", roam_testkit::austin_listings(100, 30));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	session.go_to_page(2);
	session.update_state(super::submitted("Denver", 2));
	session.search(&provider).await;

	assert_eq!(session.page().page_number, 1);
	assert_eq!(session.page().total_pages, 3);
}

#[tokio::test]
async fn viewport_only_change_keeps_the_page() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(1, 30));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	session.go_to_page(2);
	session.map_moved(roam_testkit::austin_bounds(0.01), super::T0);
	session.tick(super::T0 + Duration::seconds(1));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(30));
	assert_eq!(provider.call_count(), 2);
	assert!(provider.calls()[1].viewport.is_some());
	assert_eq!(session.page().page_number, 2);
}

#[test]
fn empty_session_has_one_empty_page() {
	let mut session = super::session();

	session.update_state(InboundState::default());

	let page = session.page();

	assert_eq!(page.total_pages, 1);
	assert!(page.items.is_empty());
}

#[test]
fn list_scroll_is_released_at_the_edges() {
	use roam_domain::scroll::{ScrollDecision, ScrollMetrics};

	let session = super::session();
	let middle = ScrollMetrics { scroll_top: 300.0, scroll_height: 2_400.0, client_height: 700.0 };
	let bottom = ScrollMetrics { scroll_top: 1_700.0, ..middle };

	assert_eq!(session.scroll(middle, 120.0, false), ScrollDecision::Consume);
	assert_eq!(session.scroll(bottom, 120.0, false), ScrollDecision::Bubble);
	assert_eq!(session.scroll(middle, -120.0, true), ScrollDecision::Bubble);
}
