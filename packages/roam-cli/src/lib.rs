use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

use roam_domain::viewport::{RawBounds, Viewport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default() | Effects::BOLD)
		.usage(AnsiColor::Green.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Value parser for `N,S,E,W` bounding boxes given on the command line.
pub fn parse_bounds(raw: &str) -> Result<RawBounds, String> {
	let parts = raw
		.split(',')
		.map(|part| {
			part.trim().parse::<f64>().map_err(|err| format!("Invalid coordinate {part:?}: {err}."))
		})
		.collect::<Result<Vec<_>, _>>()?;
	let &[north, south, east, west] = parts.as_slice() else {
		return Err(format!("Expected 4 comma-separated values (N,S,E,W), got {}.", parts.len()));
	};
	let bounds = RawBounds { north, south, east, west };

	Viewport::try_from_raw(bounds).map_err(|err| format!("Invalid bounds: {err}."))?;

	Ok(bounds)
}
