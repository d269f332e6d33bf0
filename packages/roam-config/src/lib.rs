mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Endpoint, Markers, Popup, Results, Service, Viewport};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	from_toml_str(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn from_toml_str(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let api_base = cfg.endpoint.api_base.as_str();

	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "endpoint.api_base must start with http:// or https://.".to_string(),
		});
	}
	if !cfg.endpoint.path.starts_with('/') {
		return Err(Error::Validation {
			message: "endpoint.path must start with '/'.".to_string(),
		});
	}
	if cfg.endpoint.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "endpoint.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.endpoint.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("endpoint.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.viewport.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "viewport.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.results.page_size == 0 {
		return Err(Error::Validation {
			message: "results.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.results.default_country.trim().is_empty() {
		return Err(Error::Validation {
			message: "results.default_country must be non-empty.".to_string(),
		});
	}
	if !cfg.results.guest_favorite_min_rating.is_finite() {
		return Err(Error::Validation {
			message: "results.guest_favorite_min_rating must be a finite number.".to_string(),
		});
	}
	if !(0.0..=5.0).contains(&cfg.results.guest_favorite_min_rating) {
		return Err(Error::Validation {
			message: "results.guest_favorite_min_rating must be in the range 0.0-5.0.".to_string(),
		});
	}
	if cfg.results.cache_entries == 0 {
		return Err(Error::Validation {
			message: "results.cache_entries must be greater than zero.".to_string(),
		});
	}
	if cfg.markers.fade_frames == 0 {
		return Err(Error::Validation {
			message: "markers.fade_frames must be greater than zero.".to_string(),
		});
	}
	if !cfg.markers.position_epsilon.is_finite() || cfg.markers.position_epsilon < 0.0 {
		return Err(Error::Validation {
			message: "markers.position_epsilon must be a finite number, zero or greater."
				.to_string(),
		});
	}

	for (label, value) in [
		("popup.width", cfg.popup.width),
		("popup.height", cfg.popup.height),
		("popup.margin", cfg.popup.margin),
		("popup.gap", cfg.popup.gap),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if value < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	if cfg.popup.width == 0.0 || cfg.popup.height == 0.0 {
		return Err(Error::Validation {
			message: "popup.width and popup.height must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.endpoint.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.endpoint.api_key = None;
	}

	cfg.endpoint.api_base = cfg.endpoint.api_base.trim().trim_end_matches('/').to_string();
	cfg.results.default_country = cfg.results.default_country.trim().to_string();
}
