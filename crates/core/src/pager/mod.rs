//! Page-by-page traversal of the result list.
//!
//! The portal renders batches of [`ROWS_PER_BATCH`] rows. After the last row
//! of a batch the next page label is clicked and the iterator waits until it
//! becomes active; on the final page the loop ends without advancing.

use tracing::{error, info, warn};

use crate::error::Result;
use crate::layout::ROWS_PER_BATCH;
use crate::page::Page;
use crate::pagination::PaginationState;
use crate::row::RowProcessor;
use crate::sink::RecordSink;
use crate::state::{RunState, RunSummary, RunTracker};
use crate::view::{DateRange, ListView, SearchForm};


#[derive(Debug, Default)]
pub struct PageIterator {
	rows: RowProcessor,
	tracker: RunTracker,
}

impl PageIterator {
	pub fn new(rows: RowProcessor) -> Self {
		Self {
			rows,
			tracker: RunTracker::new(),
		}
	}

	/// Progress so far; after a failed run this is the partial count.
	pub fn summary(&self) -> RunSummary {
		self.tracker.summary()
	}

	pub fn state(&self) -> RunState {
		self.tracker.state()
	}

	/// Submits the search for `range`, then walks every result page.
	pub async fn run_search<P, S>(&mut self, form: SearchForm<'_, P>, range: &DateRange, sink: &mut S) -> Result<RunSummary>
	where
		P: Page,
		S: RecordSink + ?Sized,
	{
		let outcome = async {
			self.tracker.enter(RunState::Searching)?;
			let list = form.submit(range).await?;
			self.tracker.enter(RunState::PagedListing)?;
			self.walk(list, sink).await
		}
		.await;
		self.finish(outcome)
	}

	/// Walks every result page, starting from page 1 as currently displayed.
	pub async fn run<P, S>(&mut self, list: ListView<'_, P>, sink: &mut S) -> Result<RunSummary>
	where
		P: Page,
		S: RecordSink + ?Sized,
	{
		let outcome = async {
			self.tracker.enter(RunState::PagedListing)?;
			self.walk(list, sink).await
		}
		.await;
		self.finish(outcome)
	}

	fn finish(&mut self, outcome: Result<()>) -> Result<RunSummary> {
		match outcome {
			Ok(()) => {
				let summary = self.tracker.summary();
				info!(
					target = "seace.pager",
					pages = summary.pages_visited,
					records = summary.records_written,
					"run complete"
				);
				Ok(summary)
			}
			Err(err) => {
				let at = self.tracker.state();
				self.tracker.fail();
				error!(
					target = "seace.pager",
					state = %at,
					records = self.tracker.summary().records_written,
					error = %err,
					"run aborted"
				);
				Err(err)
			}
		}
	}

	async fn walk<P, S>(&mut self, list: ListView<'_, P>, sink: &mut S) -> Result<()>
	where
		P: Page,
		S: RecordSink + ?Sized,
	{
		let total = list.total_pages().await?;
		self.tracker.set_total_pages(total);
		info!(target = "seace.pager", total, "result pages found");

		let mut pages = PaginationState::new(total);
		let mut list = list;

		loop {
			let current = pages.current();
			self.tracker.page_visited();

			let rows = list.rows().await?;
			info!(target = "seace.pager", page = current, rendered = rows.len(), "processing page");

			let mut processed = 0;
			for (position, row) in rows.iter().take(ROWS_PER_BATCH).enumerate() {
				list = self.rows.process(list, row, position, sink, &mut self.tracker).await?;
				processed += 1;
			}

			let Some(next) = pages.next_page() else {
				break;
			};

			if processed < ROWS_PER_BATCH {
				warn!(target = "seace.pager", page = current, processed, "short page before the last one");
			}

			self.tracker.enter(RunState::Advancing)?;
			list.go_to_page(next).await?;
			self.tracker.enter(RunState::PagedListing)?;
			pages.advance();
		}

		self.tracker.enter(RunState::Done)
	}
}
