//! CSV destination and the end-of-run summary.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use seace::{CsvSink, RunSummary};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

pub type FileSink = CsvSink<BufWriter<File>>;

/// Creates (or truncates) `path` and writes the CSV header.
pub fn open_sink(path: &Path) -> Result<FileSink> {
	let file = File::create(path).map_err(|e| CliError::io(path, e))?;
	CsvSink::with_header(BufWriter::new(file)).map_err(CliError::from)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
	#[serde(flatten)]
	summary: &'a RunSummary,
	output: &'a Path,
}

/// Renders the summary in the requested format.
pub fn render_summary(summary: &RunSummary, output: &Path, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => Ok(serde_json::to_string_pretty(&Report { summary, output })?),
		OutputFormat::Text => {
			let pages = match summary.total_pages {
				Some(total) => format!("{}/{total}", summary.pages_visited),
				None => summary.pages_visited.to_string(),
			};
			Ok(format!(
				"state: {}\npages: {pages}\nrecords: {}\noutput: {}",
				summary.state,
				summary.records_written,
				output.display()
			))
		}
	}
}

/// Absolute form of `path` for reporting, falling back to the path as given.
pub fn display_path(path: &Path) -> PathBuf {
	std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
