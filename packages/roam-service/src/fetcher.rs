use std::collections::VecDeque;

use ahash::AHashMap;

use roam_domain::{listing::ListingRecord, query::QueryDescriptor};

use crate::SearchProvider;

/// Listings tagged with the descriptor that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet {
	pub descriptor: QueryDescriptor,
	pub listings: Vec<ListingRecord>,
	/// Empty stand-in for a request that failed; never counts as displayed.
	pub failed: bool,
}

/// A request the host should run with [`run_fetch`] and hand back to
/// [`SearchFetcher::settle`].
#[derive(Clone, Debug)]
pub struct FetchTicket {
	pub seq: u64,
	pub cache_key: String,
	pub descriptor: QueryDescriptor,
}

#[derive(Clone, Debug)]
pub struct FetchOutcome {
	pub seq: u64,
	pub cache_key: String,
	pub descriptor: QueryDescriptor,
	pub listings: Vec<ListingRecord>,
	pub failed: bool,
}

#[derive(Debug)]
pub enum BeginFetch {
	/// Nothing submitted and the map never moved.
	Gated,
	/// No criteria at all; the first-paint listings are shown instead.
	Blank,
	/// Already displayed or already in flight.
	Unchanged,
	/// Served from the result cache without a request.
	Cached,
	Started(FetchTicket),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settlement {
	Applied,
	Stale,
}

/// Bounded map from cache key to listings, evicting in insertion order.
#[derive(Clone, Debug)]
pub struct ResultCache {
	capacity: usize,
	entries: AHashMap<String, Vec<ListingRecord>>,
	order: VecDeque<String>,
}
impl ResultCache {
	pub fn new(capacity: usize) -> Self {
		Self { capacity, entries: AHashMap::new(), order: VecDeque::new() }
	}

	pub fn get(&self, key: &str) -> Option<&Vec<ListingRecord>> {
		self.entries.get(key)
	}

	pub fn insert(&mut self, key: String, listings: Vec<ListingRecord>) {
		if self.capacity == 0 {
			return;
		}
		if self.entries.insert(key.clone(), listings).is_some() {
			return;
		}

		self.order.push_back(key);

		while self.order.len() > self.capacity {
			if let Some(evicted) = self.order.pop_front() {
				self.entries.remove(&evicted);
			}
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Decides which descriptors hit the network and which responses are still wanted.
#[derive(Clone, Debug)]
pub struct SearchFetcher {
	seq: u64,
	in_flight: Option<(u64, String)>,
	current: Option<ResultSet>,
	seed: Option<ResultSet>,
	cache: ResultCache,
}
impl SearchFetcher {
	pub fn new(cfg: &roam_config::Results) -> Self {
		Self::with_capacity(cfg.cache_entries)
	}

	pub fn with_capacity(cache_entries: usize) -> Self {
		Self {
			seq: 0,
			in_flight: None,
			current: None,
			seed: None,
			cache: ResultCache::new(cache_entries),
		}
	}

	/// Listings to show before anything has been searched.
	pub fn seed(&mut self, descriptor: QueryDescriptor, listings: Vec<ListingRecord>) {
		let seeded = ResultSet { descriptor, listings, failed: false };

		if self.current.as_ref().is_none_or(|current| !current.descriptor.has_criteria()) {
			self.current = Some(seeded.clone());
		}

		self.seed = Some(seeded);
	}

	pub fn begin(&mut self, descriptor: QueryDescriptor, gate_open: bool) -> BeginFetch {
		if !gate_open {
			return BeginFetch::Gated;
		}
		if !descriptor.has_criteria() {
			self.supersede();

			self.current = self.seed.clone();

			return BeginFetch::Blank;
		}

		let cache_key = descriptor.cache_key();

		if self.in_flight.as_ref().is_some_and(|(_, key)| *key == cache_key) {
			return BeginFetch::Unchanged;
		}
		if let Some(current) = self.current.as_mut()
			&& !current.failed
			&& current.descriptor.has_criteria()
			&& current.descriptor.cache_key() == cache_key
		{
			current.descriptor = descriptor;

			self.supersede();

			return BeginFetch::Unchanged;
		}
		if let Some(listings) = self.cache.get(&cache_key) {
			tracing::debug!(
				cache_key = cache_key_prefix(&cache_key),
				count = listings.len(),
				"Result cache hit."
			);

			self.current =
				Some(ResultSet { descriptor, listings: listings.clone(), failed: false });

			self.supersede();

			return BeginFetch::Cached;
		}

		self.seq += 1;
		self.in_flight = Some((self.seq, cache_key.clone()));

		tracing::debug!(
			seq = self.seq,
			cache_key = cache_key_prefix(&cache_key),
			"Issuing search request."
		);

		BeginFetch::Started(FetchTicket { seq: self.seq, cache_key, descriptor })
	}

	/// Apply a finished request unless a newer one has been issued since.
	pub fn settle(&mut self, outcome: FetchOutcome) -> Settlement {
		let wanted = self.in_flight.as_ref().is_some_and(|(seq, _)| *seq == outcome.seq);

		if !wanted {
			tracing::debug!(
				seq = outcome.seq,
				latest = self.seq,
				"Discarding stale search response."
			);

			return Settlement::Stale;
		}

		self.in_flight = None;

		if !outcome.failed {
			self.cache.insert(outcome.cache_key, outcome.listings.clone());
		}

		self.current = Some(ResultSet {
			descriptor: outcome.descriptor,
			listings: outcome.listings,
			failed: outcome.failed,
		});

		Settlement::Applied
	}

	pub fn current(&self) -> Option<&ResultSet> {
		self.current.as_ref()
	}

	pub fn is_loading(&self) -> bool {
		self.in_flight.is_some()
	}

	pub fn cache(&self) -> &ResultCache {
		&self.cache
	}

	// Bumping the sequence makes any outstanding response stale.
	fn supersede(&mut self) {
		if self.in_flight.take().is_some() {
			self.seq += 1;
		}
	}
}

/// Run one request. Failures become an empty, uncached outcome.
pub async fn run_fetch(provider: &dyn SearchProvider, ticket: FetchTicket) -> FetchOutcome {
	let FetchTicket { seq, cache_key, descriptor } = ticket;
	let (listings, failed) = match provider.search(&descriptor).await {
		Ok(listings) => {
			tracing::debug!(seq, count = listings.len(), "Search request succeeded.");

			(listings, false)
		},
		Err(err) => {
			tracing::warn!(
				seq,
				cache_key = cache_key_prefix(&cache_key),
				error = %err,
				"Search request failed."
			);

			(Vec::new(), true)
		},
	};

	FetchOutcome { seq, cache_key, descriptor, listings, failed }
}

fn cache_key_prefix(key: &str) -> &str {
	&key[..key.len().min(12)]
}
