use serde::Serialize;
use time::OffsetDateTime;

use roam_config::Config;
use roam_domain::{
	criteria::{FilterState, FormState, InboundState},
	listing::{ListingId, ListingRecord},
	paginate::{self, Page, PageCursor},
	placement::PopupPosition,
	query::{self, QueryDescriptor},
	scroll::{self, ScrollDecision, ScrollMetrics},
	viewport::{RawBounds, Viewport},
};

use crate::{
	BeginFetch, FetchOutcome, ListingCard, MapHandle, MarkerReconciler, ResultTransformer,
	SearchFetcher, SearchProvider, SelectionController, Settlement, ViewportDebouncer,
};

/// What the results header shows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "count")]
pub enum SearchSummary {
	StartYourSearch,
	Loading,
	NoResults,
	Results(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
	/// Set when a pan/zoom burst settled during this tick.
	pub settled: Option<Viewport>,
	/// `true` while any marker fade still needs frames.
	pub animating: bool,
}

/// One search results screen: list pane, map pane and the state between them.
pub struct SearchSession<M>
where
	M: MapHandle,
{
	map: M,
	inbound: InboundState,
	debouncer: ViewportDebouncer,
	fetcher: SearchFetcher,
	transformer: ResultTransformer,
	markers: MarkerReconciler<M>,
	selection: SelectionController,
	cursor: PageCursor,
	page_size: usize,
	cards: Vec<ListingCard>,
	map_interactions: u64,
	hovered: Option<ListingId>,
}
impl<M> SearchSession<M>
where
	M: MapHandle,
{
	pub fn new(cfg: &Config, map: M) -> Self {
		Self {
			map,
			inbound: InboundState::default(),
			debouncer: ViewportDebouncer::new(&cfg.viewport),
			fetcher: SearchFetcher::new(&cfg.results),
			transformer: ResultTransformer::new(&cfg.results),
			markers: MarkerReconciler::new(&cfg.markers),
			selection: SelectionController::new(&cfg.popup),
			cursor: PageCursor::default(),
			page_size: cfg.results.page_size,
			cards: Vec::new(),
			map_interactions: 0,
			hovered: None,
		}
	}

	pub fn map(&self) -> &M {
		&self.map
	}

	pub fn map_mut(&mut self) -> &mut M {
		&mut self.map
	}

	/// Take a fresh snapshot of the host store. A new submit searches the destination, not
	/// the area the map was last left at.
	pub fn update_state(&mut self, snapshot: InboundState) {
		if snapshot.submitted > self.inbound.submitted {
			self.debouncer.clear();
		}

		self.inbound = snapshot;
	}

	/// Feed a raw pan/zoom event. Returns `false` when the bounds were rejected. An open popup
	/// follows its marker right away; only the query waits for the quiet period.
	pub fn map_moved(&mut self, bounds: RawBounds, now: OffsetDateTime) -> bool {
		let accepted = self.debouncer.push(bounds, now);

		if accepted {
			self.refresh_popup();
		}

		accepted
	}

	/// Advance virtual time: settle the viewport if its quiet period elapsed and run one
	/// marker fade frame.
	pub fn tick(&mut self, now: OffsetDateTime) -> TickReport {
		let settled = self.debouncer.poll(now);

		if let Some(viewport) = settled {
			self.map_interactions += 1;

			tracing::debug!(
				north = viewport.north(),
				south = viewport.south(),
				east = viewport.east(),
				west = viewport.west(),
				"Viewport settled."
			);

			self.refresh_popup();
		}

		TickReport { settled, animating: self.markers.tick() }
	}

	/// Trigger generation: one per submit plus one per settled map interaction.
	pub fn generation(&self) -> u64 {
		self.inbound.submitted + self.map_interactions
	}

	pub fn descriptor(&self) -> QueryDescriptor {
		query::build_query_descriptor(
			&self.inbound.form,
			&self.inbound.filters,
			self.debouncer.settled().as_ref(),
			self.generation(),
		)
	}

	/// Decide whether the current descriptor needs a request. Anything that does not need
	/// the network is applied before this returns.
	pub fn begin_fetch(&mut self) -> BeginFetch {
		let begin = self.fetcher.begin(self.descriptor(), self.gate_open());

		match &begin {
			BeginFetch::Blank | BeginFetch::Cached | BeginFetch::Unchanged => self.apply_results(),
			BeginFetch::Gated | BeginFetch::Started(_) => {},
		}

		begin
	}

	pub fn complete(&mut self, outcome: FetchOutcome) -> Settlement {
		let settlement = self.fetcher.settle(outcome);

		if settlement == Settlement::Applied {
			self.apply_results();
		}

		settlement
	}

	/// Show first-paint listings before any search ran. They go through the default
	/// refinement like any blank query.
	pub fn load_initial(&mut self, listings: Vec<ListingRecord>) {
		let blank =
			query::build_query_descriptor(&FormState::default(), &FilterState::default(), None, 0);

		self.fetcher.seed(blank, listings);
		self.apply_results();
	}

	/// Headless convenience: begin, run and complete one fetch.
	pub async fn search(&mut self, provider: &dyn SearchProvider) -> SearchSummary {
		if let BeginFetch::Started(ticket) = self.begin_fetch() {
			let outcome = crate::run_fetch(provider, ticket).await;

			self.complete(outcome);
		}

		self.summary()
	}

	pub fn click_marker(&mut self, id: ListingId) -> Option<PopupPosition> {
		let position = self.markers.position_of(id)?;
		let popup = self.selection.select(id, position, &self.map);

		self.markers.set_emphasis(self.selection.selected(), self.hovered);

		popup
	}

	/// A click on the map background.
	pub fn click_map(&mut self) {
		self.close_popup();
	}

	pub fn close_popup(&mut self) {
		self.selection.clear();
		self.markers.set_emphasis(None, self.hovered);
	}

	pub fn hover(&mut self, id: Option<ListingId>) {
		self.hovered = id;
		self.markers.set_emphasis(self.selection.selected(), id);
	}

	pub fn go_to_page(&mut self, page_number: usize) {
		let total = paginate::total_pages(self.cards.len(), self.page_size);

		self.cursor.go_to(page_number.clamp(1, total));
	}

	pub fn page(&self) -> Page<ListingCard> {
		paginate::page(&self.cards, self.cursor.page_number(), self.page_size)
	}

	pub fn summary(&self) -> SearchSummary {
		if !self.gate_open() {
			return SearchSummary::StartYourSearch;
		}

		let searched = self.fetcher.current().is_some_and(|set| set.descriptor.has_criteria());

		if self.fetcher.is_loading() && !searched {
			return SearchSummary::Loading;
		}
		if self.fetcher.current().is_none() {
			return SearchSummary::StartYourSearch;
		}
		if self.cards.is_empty() {
			return SearchSummary::NoResults;
		}

		SearchSummary::Results(self.cards.len())
	}

	pub fn result_count(&self) -> usize {
		self.cards.len()
	}

	pub fn cards(&self) -> &[ListingCard] {
		&self.cards
	}

	pub fn selected_id(&self) -> Option<ListingId> {
		self.selection.selected()
	}

	pub fn popup(&self) -> Option<PopupPosition> {
		self.selection.state().popup
	}

	pub fn markers(&self) -> &MarkerReconciler<M> {
		&self.markers
	}

	pub fn is_loading(&self) -> bool {
		self.fetcher.is_loading()
	}

	pub fn scroll(
		&self,
		metrics: ScrollMetrics,
		delta_y: f64,
		footer_visible: bool,
	) -> ScrollDecision {
		scroll::arbitrate_scroll(metrics, delta_y, footer_visible)
	}

	fn refresh_popup(&mut self) {
		if let Some(selected) = self.selection.selected() {
			self.selection.refresh(self.markers.position_of(selected), &self.map);
			self.markers.set_emphasis(self.selection.selected(), self.hovered);
		}
	}

	fn gate_open(&self) -> bool {
		self.inbound.submitted > 0 || self.map_interactions > 0
	}

	fn apply_results(&mut self) {
		let Some(current) = self.fetcher.current() else {
			return;
		};

		self.cards = self.transformer.transform(&current.listings, &current.descriptor);

		if self.cursor.sync(&current.descriptor.criteria_key()) {
			tracing::debug!("Criteria changed; back to page 1.");
		}

		self.markers.reconcile(&mut self.map, &self.cards);

		let cards = &self.cards;

		self.selection.retain(|id| cards.iter().any(|card| card.id() == id));

		if self.hovered.is_some_and(|id| !cards.iter().any(|card| card.id() == id)) {
			self.hovered = None;
		}

		self.markers.set_emphasis(self.selection.selected(), self.hovered);

		tracing::debug!(count = self.cards.len(), "Applied search results.");
	}
}

impl<M> Drop for SearchSession<M>
where
	M: MapHandle,
{
	fn drop(&mut self) {
		self.markers.clear();
	}
}
