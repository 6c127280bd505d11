//! Run configuration.
//!
//! Values come from three layers: built-in defaults, an optional camelCase
//! JSON file and command-line flags. Flags override the file, which overrides
//! the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex_lite::Regex;
use seace::{DateRange, WaitPolicy};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub const DEFAULT_PORTAL_URL: &str = "https://prod2.seace.gob.pe/seacebus-uiwd-pub/buscadorPublico/buscadorPublico.xhtml";
pub const DEFAULT_START_DATE: &str = "01/01/2024";
pub const DEFAULT_END_DATE: &str = "01/10/2024";
pub const DEFAULT_OUTPUT: &str = "entries.csv";
pub const DEFAULT_LOG_FILE: &str = "log.txt";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("DATE_RE should compile"));

/// Shape of the optional JSON configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub start_date: Option<String>,
	#[serde(default)]
	pub end_date: Option<String>,
	#[serde(default)]
	pub headless: Option<bool>,
	#[serde(default)]
	pub debug: Option<bool>,
	#[serde(default)]
	pub output: Option<PathBuf>,
	#[serde(default)]
	pub log_file: Option<PathBuf>,
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	#[serde(default)]
	pub poll_ms: Option<u64>,
}

impl FileConfig {
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
		serde_json::from_str(&text).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
	}
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
	pub url: String,
	pub range: DateRange,
	pub headless: bool,
	pub debug: bool,
	pub output: PathBuf,
	pub log_file: PathBuf,
	pub wait: WaitPolicy,
}

impl ScrapeConfig {
	pub fn resolve(cli: &Cli) -> Result<Self> {
		let file = match &cli.config {
			Some(path) => FileConfig::load(path)?,
			None => FileConfig::default(),
		};
		Self::merge(cli, file)
	}

	pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
		let start = cli.start.clone().or(file.start_date).unwrap_or_else(|| DEFAULT_START_DATE.to_string());
		let end = cli.end.clone().or(file.end_date).unwrap_or_else(|| DEFAULT_END_DATE.to_string());
		let range = validate_range(start, end)?;

		let url = cli.url.clone().or(file.url).unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string());
		if !(url.starts_with("https://") || url.starts_with("http://")) {
			return Err(CliError::Config(format!("portal url must be http(s): {url}")));
		}

		let defaults = WaitPolicy::default();
		let timeout = cli.timeout_ms.or(file.timeout_ms).map(Duration::from_millis).unwrap_or(defaults.timeout);
		let poll = cli.poll_ms.or(file.poll_ms).map(Duration::from_millis).unwrap_or(defaults.poll_interval);
		if poll.is_zero() {
			return Err(CliError::Config("poll interval must be positive".into()));
		}

		Ok(Self {
			url,
			range,
			headless: if cli.headed { false } else { file.headless.unwrap_or(true) },
			debug: cli.debug || file.debug.unwrap_or(false),
			output: cli.output.clone().or(file.output).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
			log_file: cli.log_file.clone().or(file.log_file).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
			wait: WaitPolicy::new(timeout, poll),
		})
	}
}

/// Parses a `dd/mm/yyyy` date into `(year, month, day)` for ordering.
fn parse_date(field: &str, value: &str) -> Result<(u32, u32, u32)> {
	let invalid = || CliError::Config(format!("{field} date must be dd/mm/yyyy, got {value:?}"));
	let caps = DATE_RE.captures(value).ok_or_else(invalid)?;
	let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok()).ok_or_else(invalid);

	let (day, month, year) = (part(1)?, part(2)?, part(3)?);
	if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
		return Err(invalid());
	}
	Ok((year, month, day))
}

fn validate_range(start: String, end: String) -> Result<DateRange> {
	if parse_date("start", &start)? > parse_date("end", &end)? {
		return Err(CliError::Config(format!("start date {start} is after end date {end}")));
	}
	Ok(DateRange::new(start, end))
}
