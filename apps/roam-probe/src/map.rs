use roam_domain::{
	placement::{ContainerSize, PixelPoint},
	viewport::{GeoPoint, RawBounds},
};
use roam_service::{MapHandle, MarkerHandle, MarkerLabel};

/// Map stand-in for terminal runs: markers only exist as trace events.
pub struct HeadlessMap {
	bounds: Option<RawBounds>,
	size: ContainerSize,
	placed: u64,
}
impl HeadlessMap {
	pub fn new(bounds: Option<RawBounds>, size: ContainerSize) -> Self {
		Self { bounds, size, placed: 0 }
	}

	pub fn placed(&self) -> u64 {
		self.placed
	}
}

impl MapHandle for HeadlessMap {
	type Marker = HeadlessMarker;

	fn add_marker(&mut self, position: GeoPoint, label: &MarkerLabel) -> Self::Marker {
		self.placed += 1;

		tracing::trace!(
			marker = self.placed,
			lat = position.lat,
			lng = position.lng,
			label = %label.text,
			"Marker added."
		);

		HeadlessMarker { id: self.placed }
	}

	fn project(&self, position: GeoPoint) -> Option<PixelPoint> {
		let bounds = self.bounds?;

		if !self.size.is_measured() {
			return None;
		}

		Some(PixelPoint {
			x: (position.lng - bounds.west) / (bounds.east - bounds.west) * self.size.width,
			y: (bounds.north - position.lat) / (bounds.north - bounds.south) * self.size.height,
		})
	}

	fn bounds(&self) -> Option<RawBounds> {
		self.bounds
	}

	fn container_size(&self) -> Option<ContainerSize> {
		Some(self.size)
	}
}

pub struct HeadlessMarker {
	id: u64,
}

impl MarkerHandle for HeadlessMarker {
	fn set_position(&mut self, position: GeoPoint) {
		tracing::trace!(marker = self.id, lat = position.lat, lng = position.lng, "Marker moved.");
	}

	fn set_label(&mut self, label: &MarkerLabel) {
		tracing::trace!(
			marker = self.id,
			label = %label.text,
			variant = ?label.variant,
			"Marker relabeled."
		);
	}

	fn set_opacity(&mut self, _: f32) {}

	fn remove(self) {
		tracing::trace!(marker = self.id, "Marker removed.");
	}
}
