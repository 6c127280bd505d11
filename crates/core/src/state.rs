//! Linear run state machine and progress counters.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ScrapeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
	Idle,
	Searching,
	PagedListing,
	RowDetail,
	Returning,
	Advancing,
	Done,
	Failed,
}

impl RunState {
	pub fn is_terminal(self) -> bool {
		matches!(self, RunState::Done | RunState::Failed)
	}

	fn allows(self, next: RunState) -> bool {
		use RunState::*;

		if next == Failed {
			return !self.is_terminal();
		}

		matches!(
			(self, next),
			(Idle, Searching)
				| (Idle, PagedListing)
				| (Searching, PagedListing)
				| (PagedListing, RowDetail)
				| (RowDetail, Returning)
				| (Returning, PagedListing)
				| (PagedListing, Advancing)
				| (Advancing, PagedListing)
				| (PagedListing, Done)
		)
	}
}

impl fmt::Display for RunState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RunState::Idle => "idle",
			RunState::Searching => "searching",
			RunState::PagedListing => "paged_listing",
			RunState::RowDetail => "row_detail",
			RunState::Returning => "returning",
			RunState::Advancing => "advancing",
			RunState::Done => "done",
			RunState::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Progress reported at the end of a run, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
	pub state: RunState,
	pub total_pages: Option<u32>,
	pub pages_visited: u32,
	pub records_written: u64,
}

/// Owns the current [`RunState`] and counts progress as the run moves.
#[derive(Debug)]
pub struct RunTracker {
	state: RunState,
	total_pages: Option<u32>,
	pages_visited: u32,
	records_written: u64,
}

impl Default for RunTracker {
	fn default() -> Self {
		Self::new()
	}
}

impl RunTracker {
	pub fn new() -> Self {
		Self {
			state: RunState::Idle,
			total_pages: None,
			pages_visited: 0,
			records_written: 0,
		}
	}

	pub fn state(&self) -> RunState {
		self.state
	}

	pub fn enter(&mut self, next: RunState) -> Result<()> {
		if !self.state.allows(next) {
			return Err(ScrapeError::InvalidTransition { from: self.state, to: next });
		}
		debug!(target = "seace.state", from = %self.state, to = %next, "transition");
		self.state = next;
		Ok(())
	}

	/// Moves to [`RunState::Failed`] unless the run already ended.
	pub fn fail(&mut self) {
		if !self.state.is_terminal() {
			debug!(target = "seace.state", from = %self.state, "run failed");
			self.state = RunState::Failed;
		}
	}

	pub fn set_total_pages(&mut self, total: u32) {
		self.total_pages = Some(total);
	}

	pub fn page_visited(&mut self) {
		self.pages_visited += 1;
	}

	pub fn record_written(&mut self) {
		self.records_written += 1;
	}

	pub fn summary(&self) -> RunSummary {
		RunSummary {
			state: self.state,
			total_pages: self.total_pages,
			pages_visited: self.pages_visited,
			records_written: self.records_written,
		}
	}
}
