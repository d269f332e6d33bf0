use time::{Duration, OffsetDateTime};

use roam_domain::viewport::{RawBounds, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebounceState {
	Idle,
	Pending { viewport: Viewport, deadline: OffsetDateTime },
	Settled(Viewport),
}

/// Coalesces bursts of pan/zoom events into one settled viewport per quiet period.
///
/// Time is passed in on every call; the debouncer never reads a clock.
#[derive(Clone, Debug)]
pub struct ViewportDebouncer {
	quiet_period: Duration,
	state: DebounceState,
	last_settled: Option<Viewport>,
}
impl ViewportDebouncer {
	pub fn new(cfg: &roam_config::Viewport) -> Self {
		Self::with_quiet_period(Duration::milliseconds(cfg.debounce_ms as i64))
	}

	pub fn with_quiet_period(quiet_period: Duration) -> Self {
		Self { quiet_period, state: DebounceState::Idle, last_settled: None }
	}

	pub fn state(&self) -> DebounceState {
		self.state
	}

	/// Accept a raw viewport event. Returns `false` when the bounds were rejected; the
	/// machine is left untouched in that case.
	pub fn push(&mut self, raw: RawBounds, now: OffsetDateTime) -> bool {
		let viewport = match Viewport::try_from_raw(raw) {
			Ok(viewport) => viewport,
			Err(err) => {
				tracing::debug!(error = %err, ?raw, "Dropping invalid viewport.");

				return false;
			},
		};

		self.state = DebounceState::Pending { viewport, deadline: now + self.quiet_period };

		true
	}

	/// Settle the pending viewport once its deadline has passed.
	pub fn poll(&mut self, now: OffsetDateTime) -> Option<Viewport> {
		let DebounceState::Pending { viewport, deadline } = self.state else {
			return None;
		};

		if now < deadline {
			return None;
		}

		self.state = DebounceState::Settled(viewport);
		self.last_settled = Some(viewport);

		Some(viewport)
	}

	pub fn deadline(&self) -> Option<OffsetDateTime> {
		match self.state {
			DebounceState::Pending { deadline, .. } => Some(deadline),
			_ => None,
		}
	}

	pub fn is_pending(&self) -> bool {
		matches!(self.state, DebounceState::Pending { .. })
	}

	/// Most recent settled viewport, kept while a newer burst is pending.
	pub fn settled(&self) -> Option<Viewport> {
		self.last_settled
	}

	/// Forget the settled viewport, e.g. after a new destination was submitted.
	pub fn clear(&mut self) {
		self.state = DebounceState::Idle;
		self.last_settled = None;
	}
}
