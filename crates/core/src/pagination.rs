//! Page-count discovery and the pagination cursor.

use crate::error::{Result, ScrapeError};
use crate::layout::PAGINATION_MARKER;

/// Reads the total page count from one status label.
///
/// Labels look like `"[ Mostrando de 1 a 15 de 20:2/8]"`. Returns `Ok(None)`
/// when the label lacks the first-page marker, so callers can keep scanning
/// other candidates.
pub fn parse_total_pages(status: &str) -> Result<Option<u32>> {
	if !status.to_lowercase().contains(&PAGINATION_MARKER.to_lowercase()) {
		return Ok(None);
	}

	let tail = status
		.rsplit_once('/')
		.map(|(_, tail)| tail)
		.ok_or_else(|| ScrapeError::parse("total page count", status))?;

	let digits = tail.trim().trim_end_matches(']').trim();
	match digits.parse::<u32>() {
		Ok(total) if total >= 1 => Ok(Some(total)),
		_ => Err(ScrapeError::parse("total page count", status)),
	}
}

/// Scans candidate status labels and returns the first page count found.
pub fn total_pages_from<I, S>(candidates: I) -> Result<u32>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut seen = Vec::new();
	for candidate in candidates {
		let text = candidate.as_ref();
		if let Some(total) = parse_total_pages(text)? {
			return Ok(total);
		}
		seen.push(text.to_string());
	}
	Err(ScrapeError::parse("pagination status", seen.join(" | ")))
}

/// Cursor over result pages, owned by the page iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
	current: u32,
	total: u32,
}

impl PaginationState {
	pub fn new(total: u32) -> Self {
		Self {
			current: 1,
			total: total.max(1),
		}
	}

	pub fn current(&self) -> u32 {
		self.current
	}

	pub fn total(&self) -> u32 {
		self.total
	}

	pub fn is_done(&self) -> bool {
		self.current > self.total
	}

	/// Page to request next, or `None` when the current page is the last.
	pub fn next_page(&self) -> Option<u32> {
		(self.current < self.total).then_some(self.current + 1)
	}

	pub fn advance(&mut self) {
		self.current += 1;
	}
}
