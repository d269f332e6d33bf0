use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	pub endpoint: Endpoint,
	#[serde(default)]
	pub viewport: Viewport,
	#[serde(default)]
	pub results: Results,
	#[serde(default)]
	pub markers: Markers,
	#[serde(default)]
	pub popup: Popup,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

/// Search endpoint the fetcher talks to.
#[derive(Clone, Debug, Deserialize)]
pub struct Endpoint {
	pub api_base: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Optional bearer token; blank values are normalized away.
	pub api_key: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Viewport {
	/// Quiet period a pan/zoom burst must observe before it becomes a query input.
	pub debounce_ms: u64,
}
impl Default for Viewport {
	fn default() -> Self {
		Self { debounce_ms: 400 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Results {
	pub page_size: usize,
	/// Country kept by the first-paint refinement when nothing has been searched yet.
	pub default_country: String,
	pub guest_favorite_min_rating: f32,
	pub guest_favorite_min_reviews: u32,
	pub cache_entries: usize,
}
impl Default for Results {
	fn default() -> Self {
		Self {
			page_size: 12,
			default_country: "United States".to_string(),
			guest_favorite_min_rating: 4.8,
			guest_favorite_min_reviews: 10,
			cache_entries: 16,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Markers {
	pub fade_frames: u32,
	/// Degrees; smaller moves keep the marker where it is.
	pub position_epsilon: f64,
}
impl Default for Markers {
	fn default() -> Self {
		Self { fade_frames: 8, position_epsilon: 0.000_001 }
	}
}

/// Popup card geometry in container pixels.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Popup {
	pub width: f64,
	pub height: f64,
	pub margin: f64,
	pub gap: f64,
}
impl Default for Popup {
	fn default() -> Self {
		Self { width: 280.0, height: 320.0, margin: 16.0, gap: 12.0 }
	}
}
