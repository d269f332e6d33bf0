use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use roam_domain::{listing::ListingId, viewport::GeoPoint};

use crate::{ListingCard, MapHandle, MarkerHandle};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVariant {
	#[default]
	Default,
	Hovered,
	Selected,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerLabel {
	pub text: String,
	pub variant: MarkerVariant,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkerPhase {
	FadingIn,
	Steady,
	FadingOut,
}

#[derive(Debug)]
pub struct MarkerState<H> {
	pub position: GeoPoint,
	pub opacity: f32,
	pub phase: MarkerPhase,
	pub label: MarkerLabel,
	pub card: ListingCard,
	handle: H,
}

/// Counts of what one reconcile pass changed on the map.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReconcileReport {
	pub added: usize,
	pub moved: usize,
	pub relabeled: usize,
	pub removed: usize,
	pub revived: usize,
}
impl ReconcileReport {
	pub fn is_noop(&self) -> bool {
		*self == Self::default()
	}
}

/// Owns every marker on the map and keeps them in step with the current cards.
pub struct MarkerReconciler<M>
where
	M: MapHandle,
{
	markers: BTreeMap<ListingId, MarkerState<M::Marker>>,
	step: f32,
	epsilon: f64,
	selected: Option<ListingId>,
	hovered: Option<ListingId>,
}
impl<M> MarkerReconciler<M>
where
	M: MapHandle,
{
	pub fn new(cfg: &roam_config::Markers) -> Self {
		let step = if cfg.fade_frames == 0 { 1.0 } else { 1.0 / cfg.fade_frames as f32 };

		Self {
			markers: BTreeMap::new(),
			step,
			epsilon: cfg.position_epsilon,
			selected: None,
			hovered: None,
		}
	}

	/// Diff the tracked markers against `cards`. Cards without coordinates get no marker and
	/// repeated ids keep their first occurrence.
	pub fn reconcile(&mut self, map: &mut M, cards: &[ListingCard]) -> ReconcileReport {
		let mut report = ReconcileReport::default();
		let mut wanted = BTreeSet::new();

		for card in cards {
			let Some(position) = card.record.position() else {
				continue;
			};

			if !wanted.insert(card.id()) {
				continue;
			}

			let variant = self.variant_for(card.id());
			let label = MarkerLabel { text: card.price_label.clone(), variant };

			match self.markers.get_mut(&card.id()) {
				Some(marker) => {
					if marker.phase == MarkerPhase::FadingOut {
						marker.phase = MarkerPhase::FadingIn;
						report.revived += 1;
					}
					if !marker.position.approx_eq(&position, self.epsilon) {
						marker.handle.set_position(position);
						marker.position = position;
						report.moved += 1;
					}
					if marker.label != label {
						marker.handle.set_label(&label);
						marker.label = label;
						report.relabeled += 1;
					}

					marker.card = card.clone();
				},
				None => {
					let mut handle = map.add_marker(position, &label);

					handle.set_opacity(0.0);

					self.markers.insert(
						card.id(),
						MarkerState {
							position,
							opacity: 0.0,
							phase: MarkerPhase::FadingIn,
							label,
							card: card.clone(),
							handle,
						},
					);

					report.added += 1;
				},
			}
		}

		for (id, marker) in self.markers.iter_mut() {
			if !wanted.contains(id) && marker.phase != MarkerPhase::FadingOut {
				marker.phase = MarkerPhase::FadingOut;
				report.removed += 1;
			}
		}

		if !report.is_noop() {
			tracing::debug!(
				added = report.added,
				moved = report.moved,
				relabeled = report.relabeled,
				removed = report.removed,
				revived = report.revived,
				"Reconciled markers."
			);
		}

		report
	}

	/// Advance every fade by one frame. Returns `true` while any fade is still running.
	pub fn tick(&mut self) -> bool {
		let mut finished = Vec::new();

		for (id, marker) in self.markers.iter_mut() {
			match marker.phase {
				MarkerPhase::Steady => continue,
				MarkerPhase::FadingIn => {
					marker.opacity = (marker.opacity + self.step).min(1.0);

					if marker.opacity >= 1.0 {
						marker.phase = MarkerPhase::Steady;
					}
				},
				MarkerPhase::FadingOut => {
					marker.opacity = (marker.opacity - self.step).max(0.0);

					if marker.opacity <= 0.0 {
						finished.push(*id);

						continue;
					}
				},
			}

			marker.handle.set_opacity(marker.opacity);
		}

		for id in finished {
			if let Some(marker) = self.markers.remove(&id) {
				marker.handle.remove();
			}
		}

		self.is_animating()
	}

	pub fn is_animating(&self) -> bool {
		self.markers.values().any(|marker| marker.phase != MarkerPhase::Steady)
	}

	/// Restyle markers whose variant changed. Returns how many were touched.
	pub fn set_emphasis(
		&mut self,
		selected: Option<ListingId>,
		hovered: Option<ListingId>,
	) -> usize {
		self.selected = selected;
		self.hovered = hovered;

		let mut touched = 0;
		let variants: Vec<(ListingId, MarkerVariant)> =
			self.markers.keys().map(|id| (*id, self.variant_for(*id))).collect();

		for (id, variant) in variants {
			let Some(marker) = self.markers.get_mut(&id) else {
				continue;
			};

			if marker.label.variant != variant {
				marker.label.variant = variant;
				marker.handle.set_label(&marker.label);
				touched += 1;
			}
		}

		touched
	}

	/// Ids whose markers are visible or fading in.
	pub fn live_ids(&self) -> Vec<ListingId> {
		self.markers
			.iter()
			.filter(|(_, marker)| marker.phase != MarkerPhase::FadingOut)
			.map(|(id, _)| *id)
			.collect()
	}

	/// Every id that still has a handle on the map, including those fading out.
	pub fn tracked_ids(&self) -> Vec<ListingId> {
		self.markers.keys().copied().collect()
	}

	pub fn get(&self, id: ListingId) -> Option<&MarkerState<M::Marker>> {
		self.markers.get(&id)
	}

	pub fn position_of(&self, id: ListingId) -> Option<GeoPoint> {
		self.markers
			.get(&id)
			.filter(|marker| marker.phase != MarkerPhase::FadingOut)
			.map(|marker| marker.position)
	}

	/// Drop every marker from the map immediately.
	pub fn clear(&mut self) {
		for (_, marker) in std::mem::take(&mut self.markers) {
			marker.handle.remove();
		}
	}

	fn variant_for(&self, id: ListingId) -> MarkerVariant {
		if self.selected == Some(id) {
			MarkerVariant::Selected
		} else if self.hovered == Some(id) {
			MarkerVariant::Hovered
		} else {
			MarkerVariant::Default
		}
	}
}
