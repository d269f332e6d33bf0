use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = roam_probe::Args::parse();

	roam_probe::run(args).await
}
