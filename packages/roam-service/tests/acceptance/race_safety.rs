use roam_domain::listing::ListingId;
use roam_service::{Settlement, run_fetch};
use roam_testkit::ScriptedSearch;

fn provider() -> ScriptedSearch {
	ScriptedSearch::new()
		.respond("Austin", roam_testkit::austin_listings(1, 3))
		.respond("Denver", roam_testkit::austin_listings(50, 2))
}

fn ids(session: &roam_service::SearchSession<roam_testkit::FakeMap>) -> Vec<ListingId> {
	session.cards().iter().map(|card| card.id()).collect()
}

#[tokio::test]
async fn older_response_arriving_last_is_discarded() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	let first = super::expect_started(session.begin_fetch());

	session.update_state(super::submitted("Denver", 2));

	let second = super::expect_started(session.begin_fetch());
	let first = run_fetch(&provider, first).await;
	let second = run_fetch(&provider, second).await;

	assert_eq!(session.complete(second), Settlement::Applied);
	assert_eq!(session.complete(first), Settlement::Stale);
	assert_eq!(ids(&session), vec![ListingId(50), ListingId(51)]);
	assert_eq!(session.map().live_count(), 2);
}

#[tokio::test]
async fn older_response_arriving_first_is_discarded() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));

	let first = super::expect_started(session.begin_fetch());

	session.update_state(super::submitted("Denver", 2));

	let second = super::expect_started(session.begin_fetch());

	assert_eq!(session.complete(run_fetch(&provider, first).await), Settlement::Stale);
	assert!(session.is_loading());
	assert_eq!(session.complete(run_fetch(&provider, second).await), Settlement::Applied);
	assert_eq!(ids(&session), vec![ListingId(50), ListingId(51)]);
	assert!(!session.is_loading());
}

#[tokio::test]
async fn previous_results_stay_visible_while_the_next_request_runs() {
	let provider = provider();
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.search(&provider).await;
	session.update_state(super::submitted("Denver", 2));

	let pending = super::expect_started(session.begin_fetch());

	assert_eq!(ids(&session), vec![ListingId(1), ListingId(2), ListingId(3)]);
	assert_eq!(session.summary(), roam_service::SearchSummary::Results(3));

	session.complete(run_fetch(&provider, pending).await);

	assert_eq!(ids(&session), vec![ListingId(50), ListingId(51)]);
}
