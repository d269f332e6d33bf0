use time::Duration;

use roam_domain::viewport::RawBounds;
use roam_service::{BeginFetch, SearchSummary};
use roam_testkit::ScriptedSearch;

use super::T0;

#[test]
fn two_quick_pans_settle_once() {
	let mut session = super::session();
	let mut settled = 0;

	session.map_moved(roam_testkit::austin_bounds(0.5), T0);

	if session.tick(T0 + Duration::milliseconds(150)).settled.is_some() {
		settled += 1;
	}

	session.map_moved(roam_testkit::austin_bounds(-0.5), T0 + Duration::milliseconds(300));

	for step in 1..=10 {
		if session.tick(T0 + Duration::milliseconds(300 + step * 100)).settled.is_some() {
			settled += 1;
		}
	}

	assert_eq!(settled, 1);
	assert_eq!(session.generation(), 1);
	assert_eq!(
		session.descriptor().viewport.map(|viewport| viewport.north()),
		Some(roam_testkit::austin_bounds(-0.5).north)
	);
}

#[tokio::test]
async fn map_interaction_alone_opens_the_gate() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 4));
	let mut session = super::session();

	assert!(matches!(session.begin_fetch(), BeginFetch::Gated));

	session.map_moved(roam_testkit::austin_bounds(0.0), T0);

	// Still pending: the raw event alone is not an interaction yet.
	assert!(matches!(session.begin_fetch(), BeginFetch::Gated));

	session.tick(T0 + Duration::milliseconds(400));

	assert_eq!(session.search(&provider).await, SearchSummary::Results(4));
	assert!(provider.calls()[0].viewport.is_some());
	assert!(provider.calls()[0].location.is_none());
}

#[test]
fn invalid_bounds_are_dropped() {
	let mut session = super::session();
	let inverted = RawBounds { north: 10.0, south: 20.0, east: 5.0, west: 1.0 };
	let nan = RawBounds { north: f64::NAN, south: 20.0, east: 5.0, west: 1.0 };

	assert!(!session.map_moved(inverted, T0));
	assert!(!session.map_moved(nan, T0));
	assert!(session.tick(T0 + Duration::seconds(1)).settled.is_none());
	assert_eq!(session.generation(), 0);
}

#[tokio::test]
async fn new_submit_searches_the_destination_not_the_old_viewport() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 2));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.map_moved(roam_testkit::austin_bounds(0.0), T0);
	session.tick(T0 + Duration::seconds(1));
	session.search(&provider).await;

	assert!(provider.calls()[0].viewport.is_some());

	session.update_state(super::submitted("Denver", 2));
	session.search(&provider).await;

	let calls = provider.calls();

	assert_eq!(calls[1].location.as_deref(), Some("Denver"));
	assert!(calls[1].viewport.is_none());
}

#[tokio::test]
async fn panning_back_is_served_from_cache() {
	let provider = ScriptedSearch::new().fallback(roam_testkit::austin_listings(1, 3));
	let mut session = super::session();

	session.update_state(super::submitted("Austin", 1));
	session.map_moved(roam_testkit::austin_bounds(0.0), T0);
	session.tick(T0 + Duration::seconds(1));
	session.search(&provider).await;
	session.map_moved(roam_testkit::austin_bounds(0.2), T0 + Duration::seconds(2));
	session.tick(T0 + Duration::seconds(3));
	session.search(&provider).await;
	session.map_moved(roam_testkit::austin_bounds(0.0), T0 + Duration::seconds(4));
	session.tick(T0 + Duration::seconds(5));

	assert!(matches!(session.begin_fetch(), BeginFetch::Cached));
	assert_eq!(provider.call_count(), 2);
	assert_eq!(session.generation(), 4);
}
