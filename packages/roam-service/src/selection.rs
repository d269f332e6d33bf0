use serde::Serialize;

use roam_domain::{
	listing::ListingId,
	placement::{PopupGeometry, PopupPosition},
	viewport::GeoPoint,
};

use crate::MapHandle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SelectionState {
	pub selected: Option<ListingId>,
	pub popup: Option<PopupPosition>,
}

/// At most one selected listing and where its popup sits.
#[derive(Clone, Debug)]
pub struct SelectionController {
	geometry: PopupGeometry,
	state: SelectionState,
	retry: bool,
}
impl SelectionController {
	pub fn new(cfg: &roam_config::Popup) -> Self {
		Self { geometry: PopupGeometry::from(cfg), state: SelectionState::default(), retry: false }
	}

	pub fn state(&self) -> SelectionState {
		self.state
	}

	pub fn selected(&self) -> Option<ListingId> {
		self.state.selected
	}

	/// Set when the last placement found no measured container.
	pub fn needs_retry(&self) -> bool {
		self.retry
	}

	pub fn select<M>(&mut self, id: ListingId, position: GeoPoint, map: &M) -> Option<PopupPosition>
	where
		M: MapHandle,
	{
		self.state.selected = Some(id);

		self.place(position, map)
	}

	/// Re-place the popup after the viewport settled. A selection whose marker is gone is
	/// cleared.
	pub fn refresh<M>(&mut self, position: Option<GeoPoint>, map: &M) -> Option<PopupPosition>
	where
		M: MapHandle,
	{
		self.state.selected?;

		match position {
			Some(position) => self.place(position, map),
			None => {
				self.clear();

				None
			},
		}
	}

	/// Clear the selection when its id is no longer in the result set.
	pub fn retain<F>(&mut self, keep: F) -> bool
	where
		F: Fn(ListingId) -> bool,
	{
		match self.state.selected {
			Some(id) if !keep(id) => {
				self.clear();

				false
			},
			_ => true,
		}
	}

	pub fn clear(&mut self) {
		self.state = SelectionState::default();
		self.retry = false;
	}

	fn place<M>(&mut self, position: GeoPoint, map: &M) -> Option<PopupPosition>
	where
		M: MapHandle,
	{
		let popup = map.project(position).zip(map.container_size()).and_then(|(anchor, container)| {
			roam_domain::placement::place_popup(anchor, container, self.geometry)
		});

		self.retry = popup.is_none();
		self.state.popup = popup;

		if self.retry {
			tracing::debug!(
				selected = ?self.state.selected,
				"Popup suppressed until the map is measured."
			);
		}

		popup
	}
}
