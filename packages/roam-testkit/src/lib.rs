mod error;

pub use error::{Error, Result};

use std::{
	cell::RefCell,
	collections::{BTreeMap, HashMap},
	rc::Rc,
	sync::{
		Mutex,
		atomic::{AtomicBool, Ordering},
	},
};

use roam_domain::{
	listing::ListingRecord,
	placement::{ContainerSize, PixelPoint},
	query::QueryDescriptor,
	viewport::{GeoPoint, RawBounds},
};
use roam_service::{BoxFuture, MapHandle, MarkerHandle, MarkerLabel, SearchProvider};

/// Downtown Austin, used as the centre of the generated fixtures.
pub const AUSTIN: GeoPoint = GeoPoint { lat: 30.2672, lng: -97.7431 };

#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
	Added { marker: u64, position: GeoPoint, label: MarkerLabel },
	Moved { marker: u64, position: GeoPoint },
	Relabeled { marker: u64, label: MarkerLabel },
	Opacity { marker: u64, opacity: f32 },
	Removed { marker: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiveMarker {
	pub position: GeoPoint,
	pub label: MarkerLabel,
	pub opacity: f32,
}

/// Everything the fake map was asked to do, shared with its marker handles.
#[derive(Debug, Default)]
pub struct MapLog {
	pub events: Vec<MapEvent>,
	pub live: BTreeMap<u64, LiveMarker>,
}
impl MapLog {
	pub fn count(&self, pred: impl Fn(&MapEvent) -> bool) -> usize {
		self.events.iter().filter(|event| pred(event)).count()
	}
}

/// A map that records calls and projects with a plain linear mapping of its bounds onto
/// its container.
pub struct FakeMap {
	log: Rc<RefCell<MapLog>>,
	bounds: Option<RawBounds>,
	size: Option<ContainerSize>,
	next_marker: u64,
}
impl FakeMap {
	pub fn new(bounds: Option<RawBounds>, size: Option<ContainerSize>) -> Self {
		Self { log: Rc::default(), bounds, size, next_marker: 0 }
	}

	/// A 600x800 container looking at central Austin.
	pub fn austin() -> Self {
		Self::new(Some(austin_bounds(0.0)), Some(ContainerSize { width: 600.0, height: 800.0 }))
	}

	/// Map whose container has not been laid out.
	pub fn unmeasured() -> Self {
		Self::new(Some(austin_bounds(0.0)), None)
	}

	pub fn log(&self) -> Rc<RefCell<MapLog>> {
		self.log.clone()
	}

	pub fn set_bounds(&mut self, bounds: RawBounds) {
		self.bounds = Some(bounds);
	}

	pub fn set_size(&mut self, size: Option<ContainerSize>) {
		self.size = size;
	}

	pub fn live_count(&self) -> usize {
		self.log.borrow().live.len()
	}

	pub fn added(&self) -> usize {
		self.log.borrow().count(|event| matches!(event, MapEvent::Added { .. }))
	}

	pub fn removed(&self) -> usize {
		self.log.borrow().count(|event| matches!(event, MapEvent::Removed { .. }))
	}

	pub fn clear_events(&self) {
		self.log.borrow_mut().events.clear();
	}
}

impl MapHandle for FakeMap {
	type Marker = FakeMarker;

	fn add_marker(&mut self, position: GeoPoint, label: &MarkerLabel) -> Self::Marker {
		self.next_marker += 1;

		let marker = self.next_marker;
		let mut log = self.log.borrow_mut();

		log.events.push(MapEvent::Added { marker, position, label: label.clone() });
		log.live.insert(marker, LiveMarker { position, label: label.clone(), opacity: 1.0 });

		FakeMarker { id: marker, log: self.log.clone() }
	}

	fn project(&self, position: GeoPoint) -> Option<PixelPoint> {
		let bounds = self.bounds?;
		let size = self.size.filter(ContainerSize::is_measured)?;
		let x = (position.lng - bounds.west) / (bounds.east - bounds.west) * size.width;
		let y = (bounds.north - position.lat) / (bounds.north - bounds.south) * size.height;

		Some(PixelPoint { x, y })
	}

	fn bounds(&self) -> Option<RawBounds> {
		self.bounds
	}

	fn container_size(&self) -> Option<ContainerSize> {
		self.size
	}
}

#[derive(Debug)]
pub struct FakeMarker {
	id: u64,
	log: Rc<RefCell<MapLog>>,
}
impl FakeMarker {
	pub fn id(&self) -> u64 {
		self.id
	}
}

impl MarkerHandle for FakeMarker {
	fn set_position(&mut self, position: GeoPoint) {
		let mut log = self.log.borrow_mut();

		log.events.push(MapEvent::Moved { marker: self.id, position });

		if let Some(live) = log.live.get_mut(&self.id) {
			live.position = position;
		}
	}

	fn set_label(&mut self, label: &MarkerLabel) {
		let mut log = self.log.borrow_mut();

		log.events.push(MapEvent::Relabeled { marker: self.id, label: label.clone() });

		if let Some(live) = log.live.get_mut(&self.id) {
			live.label = label.clone();
		}
	}

	fn set_opacity(&mut self, opacity: f32) {
		let mut log = self.log.borrow_mut();

		log.events.push(MapEvent::Opacity { marker: self.id, opacity });

		if let Some(live) = log.live.get_mut(&self.id) {
			live.opacity = opacity;
		}
	}

	fn remove(self) {
		let mut log = self.log.borrow_mut();

		log.events.push(MapEvent::Removed { marker: self.id });
		log.live.remove(&self.id);
	}
}

#[derive(Default)]
struct Script {
	by_location: HashMap<String, Vec<ListingRecord>>,
	fallback: Vec<ListingRecord>,
	calls: Vec<QueryDescriptor>,
}

/// Search provider that answers from canned listings keyed by location.
#[derive(Default)]
pub struct ScriptedSearch {
	script: Mutex<Script>,
	failing: AtomicBool,
}
impl ScriptedSearch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn respond(self, location: &str, listings: Vec<ListingRecord>) -> Self {
		self.lock().by_location.insert(location.to_string(), listings);

		self
	}

	/// Listings returned for locations without their own script.
	pub fn fallback(self, listings: Vec<ListingRecord>) -> Self {
		self.lock().fallback = listings;

		self
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	pub fn calls(&self) -> Vec<QueryDescriptor> {
		self.lock().calls.clone()
	}

	pub fn call_count(&self) -> usize {
		self.lock().calls.len()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
		self.script.lock().unwrap_or_else(|err| err.into_inner())
	}
}

impl SearchProvider for ScriptedSearch {
	fn search<'a>(
		&'a self,
		descriptor: &'a QueryDescriptor,
	) -> BoxFuture<'a, roam_service::Result<Vec<ListingRecord>>> {
		Box::pin(async move {
			let mut script = self.lock();

			script.calls.push(descriptor.clone());

			if self.failing.load(Ordering::SeqCst) {
				return Err(roam_service::Error::Provider {
					message: "Scripted search failure.".to_string(),
				});
			}

			let listings = descriptor
				.location
				.as_ref()
				.and_then(|location| script.by_location.get(location))
				.unwrap_or(&script.fallback)
				.clone();

			Ok(listings)
		})
	}
}

/// Bounds of a box around central Austin, shifted north by `shift` degrees.
pub fn austin_bounds(shift: f64) -> RawBounds {
	RawBounds {
		north: AUSTIN.lat + 0.1 + shift,
		south: AUSTIN.lat - 0.1 + shift,
		east: AUSTIN.lng + 0.1,
		west: AUSTIN.lng - 0.1,
	}
}

pub fn listing(id: u64, position: GeoPoint, price: f64) -> ListingRecord {
	listing_from(serde_json::json!({
		"id": id,
		"title": format!("Listing {id}"),
		"latitude": position.lat,
		"longitude": position.lng,
		"base_price": price,
		"rating": 4.5,
		"total_reviews": 3,
		"max_guests": 4,
		"bedrooms": 2,
		"bathrooms": 1.0,
		"city": "Austin",
		"country": "United States"
	}))
	.unwrap_or_else(|err| panic!("Listing fixture {id} must decode: {err}."))
}

pub fn listing_from(value: serde_json::Value) -> Result<ListingRecord> {
	Ok(serde_json::from_value(value)?)
}

/// `count` listings spread on a small grid around [`AUSTIN`], ids starting at `first_id`.
pub fn austin_listings(first_id: u64, count: usize) -> Vec<ListingRecord> {
	(0..count)
		.map(|index| {
			let offset = index as f64 * 0.005;
			let position = GeoPoint::new(AUSTIN.lat + offset, AUSTIN.lng - offset);

			listing(first_id + index as u64, position, 100.0 + index as f64 * 10.0)
		})
		.collect()
}

/// Decode a JSON array of listings, failing on the first bad entry.
pub fn listings_from_json(raw: &str) -> Result<Vec<ListingRecord>> {
	let listings: Vec<ListingRecord> = serde_json::from_str(raw)?;

	if listings.is_empty() {
		return Err(Error::Message("Listing fixture is empty.".to_string()));
	}

	Ok(listings)
}
