pub mod debounce;
pub mod fetcher;
pub mod markers;
pub mod selection;
pub mod session;
pub mod transform;

mod error;

use std::{future::Future, pin::Pin};

pub use debounce::{DebounceState, ViewportDebouncer};
pub use error::{Error, Result};
pub use fetcher::{
	BeginFetch, FetchOutcome, FetchTicket, ResultCache, ResultSet, SearchFetcher, Settlement,
	run_fetch,
};
pub use markers::{
	MarkerLabel, MarkerPhase, MarkerReconciler, MarkerState, MarkerVariant, ReconcileReport,
};
pub use selection::{SelectionController, SelectionState};
pub use session::{SearchSession, SearchSummary, TickReport};
pub use transform::{ListingCard, ResultTransformer};

use roam_config::Endpoint;
use roam_domain::{
	listing::ListingRecord,
	placement::{ContainerSize, PixelPoint},
	query::QueryDescriptor,
	viewport::{GeoPoint, RawBounds},
};
use roam_providers::SearchClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The search endpoint as the fetcher sees it.
pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, descriptor: &'a QueryDescriptor)
	-> BoxFuture<'a, Result<Vec<ListingRecord>>>;
}

/// One marker placed on the map. Handles are owned by [`MarkerReconciler`].
pub trait MarkerHandle {
	fn set_position(&mut self, position: GeoPoint);

	fn set_label(&mut self, label: &MarkerLabel);

	fn set_opacity(&mut self, opacity: f32);

	fn remove(self);
}

/// The slice of the map library the engine is allowed to touch.
pub trait MapHandle {
	type Marker: MarkerHandle;

	fn add_marker(&mut self, position: GeoPoint, label: &MarkerLabel) -> Self::Marker;

	/// Container-relative pixel position, or `None` before the container is laid out.
	fn project(&self, position: GeoPoint) -> Option<PixelPoint>;

	fn bounds(&self) -> Option<RawBounds>;

	fn container_size(&self) -> Option<ContainerSize>;
}

/// [`SearchProvider`] backed by the HTTP search endpoint.
pub struct HttpSearchProvider {
	client: SearchClient,
}
impl HttpSearchProvider {
	pub fn new(cfg: &Endpoint) -> Result<Self> {
		Ok(Self { client: SearchClient::new(cfg)? })
	}
}

impl SearchProvider for HttpSearchProvider {
	fn search<'a>(
		&'a self,
		descriptor: &'a QueryDescriptor,
	) -> BoxFuture<'a, Result<Vec<ListingRecord>>> {
		Box::pin(async move { Ok(self.client.search(descriptor).await?) })
	}
}
