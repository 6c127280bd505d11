//! One complete scrape: browser, search, traversal, summary.

use seace::{PageIterator, RunSummary, SearchForm};
use tracing::{info, warn};

use crate::browser::{BrowserSession, PwPage};
use crate::cli::OutputFormat;
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::output::{self, FileSink};

/// Runs the scrape described by `config` and prints the summary.
///
/// The summary is printed even when the run fails, so partial progress in
/// the CSV file can be accounted for.
pub async fn run(config: &ScrapeConfig, format: OutputFormat) -> Result<RunSummary> {
	let mut sink = output::open_sink(&config.output)?;
	info!(
		target = "seace",
		output = %output::display_path(&config.output).display(),
		start = %config.range.start,
		end = %config.range.end,
		"starting scrape"
	);

	let session = BrowserSession::launch(config.headless).await?;
	let mut pager = PageIterator::default();
	let outcome = scrape(session.page(), config, &mut pager, &mut sink).await;

	if let Err(err) = session.close().await {
		warn!(target = "seace.browser", error = %err, "browser did not close cleanly");
	}

	let summary = pager.summary();
	println!("{}", output::render_summary(&summary, &config.output, format)?);
	outcome?;
	Ok(summary)
}

async fn scrape(page: &PwPage, config: &ScrapeConfig, pager: &mut PageIterator, sink: &mut FileSink) -> Result<()> {
	let form = SearchForm::open(page, &config.url, config.wait).await?;
	pager.run_search(form, &config.range, sink).await?;
	Ok(())
}
