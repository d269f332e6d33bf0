use roam_domain::{criteria::InboundState, listing::ListingId};
use roam_service::{BeginFetch, SearchSummary, run_fetch};
use roam_testkit::{AUSTIN, ScriptedSearch};

#[tokio::test]
async fn unsubmitted_destination_never_fetches() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(1, 7));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 0));

	assert!(matches!(session.begin_fetch(), BeginFetch::Gated));
	assert_eq!(session.search(&provider).await, SearchSummary::StartYourSearch);
	assert_eq!(provider.call_count(), 0);
	assert_eq!(session.map().live_count(), 0);
}

#[tokio::test]
async fn submitted_destination_fetches_once_and_fills_both_panes() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(1, 7));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(7));

	let calls = provider.calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].location.as_deref(), Some("Austin"));
	assert!(calls[0].viewport.is_none());
	assert_eq!(session.map().live_count(), 7);
	assert_eq!(session.page().items.len(), 7);
	assert_eq!(session.page().page_number, 1);
	assert_eq!(session.result_count(), 7);

	// Re-running with nothing changed is answered from what is displayed.
	assert_eq!(session.search(&provider).await, SearchSummary::Results(7));
	assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn failed_fetch_shows_no_results_and_retries_next_time() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(1, 3));
	let mut session = super::session();

	provider.set_failing(true);
	session.update_state(super::submitted("Austin", 1));

	assert_eq!(session.search(&provider).await, SearchSummary::NoResults);

	provider.set_failing(false);
	session.update_state(super::submitted("Austin", 2));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(3));
	assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn loading_is_reported_until_the_first_response() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 2));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	let ticket = super::expect_started(session.begin_fetch());

	assert_eq!(session.summary(), SearchSummary::Loading);

	let outcome = run_fetch(&provider, ticket).await;

	session.complete(outcome);

	assert_eq!(session.summary(), SearchSummary::Results(2));
}

#[test]
fn first_paint_keeps_the_default_country_until_a_search() {
	let mut session = super::session();
	let mut listings = roam_testkit::austin_listings(1, 3);
	let abroad = roam_testkit::listing_from(serde_json::json!({
		"id": 99,
		"latitude": AUSTIN.lat,
		"longitude": AUSTIN.lng,
		"base_price": 80.0,
		"country": "Portugal"
	}))
	.expect("Failed to decode listing.");

	listings.push(abroad);
	session.load_initial(listings);

	assert_eq!(session.result_count(), 3);
	assert!(!session.cards().iter().any(|card| card.id() == ListingId(99)));
	assert_eq!(session.summary(), SearchSummary::StartYourSearch);
}

#[tokio::test]
async fn dates_without_destination_search_anywhere() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 2));
	let mut session = super::session();
	let mut state = InboundState { submitted: 1, ..InboundState::default() };

	state.form.guests.children = 1;
	session.update_state(state);
	session.search(&provider).await;

	let calls = provider.calls();

	assert_eq!(calls[0].location.as_deref(), Some(roam_domain::query::ANY_LOCATION));
	assert_eq!(calls[0].guests.adults, 1);
}

#[tokio::test]
async fn clearing_every_criterion_restores_first_paint() {
	let provider = ScriptedSearch::new().respond("Austin", roam_testkit::austin_listings(10, 5));
	let mut session = super::session();

	session.load_initial(roam_testkit::austin_listings(1, 2));
	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;

	assert_eq!(session.result_count(), 5);

	session.update_state(InboundState { submitted: 2, ..InboundState::default() });

	assert!(matches!(session.begin_fetch(), BeginFetch::Blank));
	assert_eq!(session.result_count(), 2);
	assert_eq!(provider.call_count(), 1);
}
