/// Pixel tolerance when deciding whether the list sits at an extremity.
const EDGE_TOLERANCE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
	pub scroll_top: f64,
	pub scroll_height: f64,
	pub client_height: f64,
}
impl ScrollMetrics {
	pub fn overflows(&self) -> bool {
		self.scroll_height > self.client_height + EDGE_TOLERANCE
	}

	pub fn at_top(&self) -> bool {
		self.scroll_top <= EDGE_TOLERANCE
	}

	pub fn at_bottom(&self) -> bool {
		self.scroll_top + self.client_height >= self.scroll_height - EDGE_TOLERANCE
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScrollDecision {
	/// The list scrolls and the page must not.
	Consume,
	/// Let the event reach the page (and the sticky map with it).
	Bubble,
}

/// Decide who owns a wheel event that started inside the result list. Negative `delta_y`
/// scrolls up.
pub fn arbitrate_scroll(
	metrics: ScrollMetrics,
	delta_y: f64,
	footer_visible: bool,
) -> ScrollDecision {
	if !metrics.overflows() || delta_y == 0.0 || !delta_y.is_finite() {
		return ScrollDecision::Bubble;
	}

	let upward = delta_y < 0.0;

	if upward && footer_visible {
		return ScrollDecision::Bubble;
	}

	let can_scroll = if upward { !metrics.at_top() } else { !metrics.at_bottom() };

	if can_scroll { ScrollDecision::Consume } else { ScrollDecision::Bubble }
}
