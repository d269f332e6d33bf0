use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelPoint {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContainerSize {
	pub width: f64,
	pub height: f64,
}
impl ContainerSize {
	/// Zero-sized or non-finite containers have not been laid out yet.
	pub fn is_measured(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupEdge {
	Above,
	Below,
}

/// Top-left corner of the popup in container pixels, plus the side of the marker it sits on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PopupPosition {
	pub x: f64,
	pub y: f64,
	pub edge: PopupEdge,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupGeometry {
	pub width: f64,
	pub height: f64,
	pub margin: f64,
	/// Distance kept between the marker anchor and the popup.
	pub gap: f64,
}
impl From<&roam_config::Popup> for PopupGeometry {
	fn from(cfg: &roam_config::Popup) -> Self {
		Self { width: cfg.width, height: cfg.height, margin: cfg.margin, gap: cfg.gap }
	}
}

/// Place the popup for a marker at `anchor`. Returns `None` when the container is not
/// measured or the anchor is not a finite point.
pub fn place_popup(
	anchor: PixelPoint,
	container: ContainerSize,
	geometry: PopupGeometry,
) -> Option<PopupPosition> {
	if !container.is_measured() || !anchor.x.is_finite() || !anchor.y.is_finite() {
		return None;
	}

	let PopupGeometry { width, height, margin, gap } = geometry;
	let space_below = container.height - margin - (anchor.y + gap);
	let space_above = (anchor.y - gap) - margin;
	let (y, edge) = if space_below >= height {
		(anchor.y + gap, PopupEdge::Below)
	} else if space_above >= height {
		(anchor.y - gap - height, PopupEdge::Above)
	} else if space_below >= space_above {
		let top = anchor.y + gap;

		(top + (space_below - height) / 2.0, PopupEdge::Below)
	} else {
		let top = margin;

		(top + (space_above - height) / 2.0, PopupEdge::Above)
	};
	let y = clamp_axis(y, height, container.height, margin);
	let x = clamp_axis(anchor.x - width / 2.0, width, container.width, margin);

	Some(PopupPosition { x, y, edge })
}

/// Keep `[start, start + extent]` inside `[margin, limit - margin]`, pinning to the leading
/// margin when the popup is wider than the room available.
fn clamp_axis(start: f64, extent: f64, limit: f64, margin: f64) -> f64 {
	let max_start = limit - margin - extent;

	if max_start < margin { margin } else { start.clamp(margin, max_start) }
}
