use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "seace")]
#[command(about = "Scrape procurement notices from the SEACE public search portal into CSV")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace)
	#[arg(short, long, action = ArgAction::Count)]
	pub verbose: u8,

	/// JSON configuration file; flags override its values
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Search portal URL
	#[arg(long, value_name = "URL")]
	pub url: Option<String>,

	/// First publication date to search (dd/mm/yyyy)
	#[arg(long, value_name = "DD/MM/YYYY")]
	pub start: Option<String>,

	/// Last publication date to search (dd/mm/yyyy)
	#[arg(long, value_name = "DD/MM/YYYY")]
	pub end: Option<String>,

	/// Show the browser window
	#[arg(long)]
	pub headed: bool,

	/// Also write a debug log file
	#[arg(long)]
	pub debug: bool,

	/// CSV output path
	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,

	/// Debug log path, used with --debug
	#[arg(long, value_name = "FILE")]
	pub log_file: Option<PathBuf>,

	/// How long to wait for the portal after each step (ms)
	#[arg(long, value_name = "N")]
	pub timeout_ms: Option<u64>,

	/// Delay between readiness checks (ms)
	#[arg(long, value_name = "N")]
	pub poll_ms: Option<u64>,

	/// Format of the final run summary
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}
