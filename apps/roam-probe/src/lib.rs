pub mod map;

mod error;

pub use error::{Error, Result};

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing_subscriber::EnvFilter;

use roam_config::Config;
use roam_domain::{
	criteria::{Destination, FormState, Guests, InboundState},
	paginate::Page,
	placement::ContainerSize,
	viewport::RawBounds,
};
use roam_service::{HttpSearchProvider, ListingCard, SearchSession, SearchSummary};

use crate::map::HeadlessMap;

#[derive(Debug, Parser)]
#[command(
	version = roam_cli::VERSION,
	rename_all = "kebab",
	styles = roam_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'd', value_name = "TEXT")]
	pub destination: Option<String>,
	#[arg(long, value_name = "N", default_value_t = 0)]
	pub adults: u32,
	#[arg(long, short = 'p', value_name = "N", default_value_t = 1)]
	pub page: usize,
	/// Search inside this box instead of by destination alone.
	#[arg(
		long,
		value_name = "N,S,E,W",
		value_parser = roam_cli::parse_bounds,
		allow_hyphen_values = true
	)]
	pub bounds: Option<RawBounds>,
}

#[derive(Debug, Serialize)]
pub struct ProbeReport {
	pub summary: SearchSummary,
	pub markers: u64,
	pub page: Page<ListingCard>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = roam_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let report = probe(&config, &args).await?;

	println!("{}", serde_json::to_string_pretty(&report)?);

	Ok(())
}

/// Run one search through a headless session and report what a screen would show.
pub async fn probe(config: &Config, args: &Args) -> Result<ProbeReport> {
	let provider = HttpSearchProvider::new(&config.endpoint)?;
	let size = ContainerSize { width: 1_280.0, height: 800.0 };
	let mut session = SearchSession::new(config, HeadlessMap::new(args.bounds, size));
	let form = FormState {
		destination: args.destination.clone().map(Destination::Text),
		guests: Guests { adults: args.adults, ..Guests::default() },
		..FormState::default()
	};

	session.update_state(InboundState { form, submitted: 1, ..InboundState::default() });

	if let Some(bounds) = args.bounds {
		let now = OffsetDateTime::now_utc();
		let quiet = Duration::milliseconds(config.viewport.debounce_ms as i64);

		session.map_moved(bounds, now);
		session.tick(now + quiet);
	}

	let summary = session.search(&provider).await;

	tracing::info!(?summary, url = %config.endpoint.api_base, "Probe search finished.");

	session.go_to_page(args.page);

	Ok(ProbeReport { summary, markers: session.map().placed(), page: session.page() })
}
