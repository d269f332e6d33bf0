use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
	pub lat: f64,
	pub lng: f64,
}
impl GeoPoint {
	pub fn new(lat: f64, lng: f64) -> Self {
		Self { lat, lng }
	}

	/// True when both axes differ by no more than `epsilon` degrees.
	pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
		(self.lat - other.lat).abs() <= epsilon && (self.lng - other.lng).abs() <= epsilon
	}
}

/// Bounds exactly as the map collaborator reported them; not yet trusted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawBounds {
	pub north: f64,
	pub south: f64,
	pub east: f64,
	pub west: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportError {
	NonFinite,
	OutOfRange,
	Inverted,
}
impl std::fmt::Display for ViewportError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NonFinite => write!(f, "viewport bounds must be finite"),
			Self::OutOfRange => write!(f, "viewport bounds exceed latitude/longitude range"),
			Self::Inverted => write!(f, "viewport requires north > south and east > west"),
		}
	}
}

impl std::error::Error for ViewportError {}

/// A validated geographic bounding box. Construct through [`Viewport::try_from_raw`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
	north: f64,
	south: f64,
	east: f64,
	west: f64,
}
impl Viewport {
	pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, ViewportError> {
		Self::try_from_raw(RawBounds { north, south, east, west })
	}

	pub fn try_from_raw(raw: RawBounds) -> Result<Self, ViewportError> {
		let RawBounds { north, south, east, west } = raw;

		if ![north, south, east, west].iter().all(|value| value.is_finite()) {
			return Err(ViewportError::NonFinite);
		}
		if !(-90.0..=90.0).contains(&north)
			|| !(-90.0..=90.0).contains(&south)
			|| !(-180.0..=180.0).contains(&east)
			|| !(-180.0..=180.0).contains(&west)
		{
			return Err(ViewportError::OutOfRange);
		}
		if north <= south || east <= west {
			return Err(ViewportError::Inverted);
		}

		Ok(Self { north, south, east, west })
	}

	pub fn north(&self) -> f64 {
		self.north
	}

	pub fn south(&self) -> f64 {
		self.south
	}

	pub fn east(&self) -> f64 {
		self.east
	}

	pub fn west(&self) -> f64 {
		self.west
	}

	pub fn center(&self) -> GeoPoint {
		GeoPoint::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
	}

	pub fn contains(&self, point: GeoPoint) -> bool {
		(self.south..=self.north).contains(&point.lat)
			&& (self.west..=self.east).contains(&point.lng)
	}
}
