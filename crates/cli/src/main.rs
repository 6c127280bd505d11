use clap::Parser;
use seace_cli::{cli::Cli, config::ScrapeConfig, logging, run};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	let config = ScrapeConfig::resolve(&cli);

	let debug_log = config.as_ref().ok().filter(|c| c.debug).map(|c| c.log_file.as_path());
	if let Err(err) = logging::init_logging(cli.verbose, debug_log) {
		eprintln!("seace: {err}");
		std::process::exit(1);
	}

	let result = match config {
		Ok(config) => run::run(&config, cli.format).await,
		Err(err) => Err(err),
	};

	if let Err(err) = result {
		error!(target = "seace", error = %err, "scrape failed");
		std::process::exit(1);
	}
}
