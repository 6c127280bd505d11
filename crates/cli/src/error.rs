use std::io;
use std::path::PathBuf;

use seace::ScrapeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("failed to launch browser: {0}")]
	BrowserLaunch(String),

	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Scrape(#[from] ScrapeError),
}

impl CliError {
	pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

pub type Result<T> = std::result::Result<T, CliError>;
