//! Typed contexts over the single browser session.
//!
//! The portal renders the search form, the result list and the detail view in
//! the same session. Each context is a separate type and the transitions
//! between them consume `self`, so list operations cannot be issued while a
//! detail view is showing.

use tracing::{debug, info};

use crate::error::{Result, ScrapeError};
use crate::layout::selectors;
use crate::page::{Element, Page};
use crate::pagination::total_pages_from;
use crate::wait::WaitPolicy;

/// Inclusive publication-date filter, in the portal's `dd/mm/yyyy` format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
	pub start: String,
	pub end: String,
}

impl DateRange {
	pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			start: start.into(),
			end: end.into(),
		}
	}
}

/// The portal's search form, before any results are shown.
pub struct SearchForm<'p, P: Page> {
	page: &'p P,
	wait: WaitPolicy,
}

impl<'p, P: Page> SearchForm<'p, P> {
	pub fn new(page: &'p P, wait: WaitPolicy) -> Self {
		Self { page, wait }
	}

	/// Opens the portal at `url` and waits for the search form.
	pub async fn open(page: &'p P, url: &str, wait: WaitPolicy) -> Result<Self> {
		info!(target = "seace.search", %url, "opening portal");
		page.navigate(url).await?;
		wait.until("search form", || page.is_present(selectors::SEARCH_BUTTON)).await?;
		Ok(Self::new(page, wait))
	}

	/// Fills the date range, runs the search and waits for the first result page.
	pub async fn submit(self, range: &DateRange) -> Result<ListView<'p, P>> {
		info!(target = "seace.search", start = %range.start, end = %range.end, "submitting search");

		click(self.page, selectors::ADVANCED_SEARCH_LEGEND, "opening advanced search").await?;
		fill(self.page, selectors::START_DATE_INPUT, &range.start, "filling start date").await?;
		fill(self.page, selectors::END_DATE_INPUT, &range.end, "filling end date").await?;
		click(self.page, selectors::SEARCH_BUTTON, "clicking search").await?;

		ListView::attach(self.page, self.wait).await
	}
}

/// The paged result list.
pub struct ListView<'p, P: Page> {
	page: &'p P,
	wait: WaitPolicy,
}

impl<'p, P: Page> ListView<'p, P> {
	/// Waits until the result list is rendered and wraps it.
	pub async fn attach(page: &'p P, wait: WaitPolicy) -> Result<Self> {
		wait.until("result list", || page.is_present(selectors::PAGINATION_STATUS)).await?;
		Ok(Self { page, wait })
	}

	pub fn wait_policy(&self) -> WaitPolicy {
		self.wait
	}

	/// Total result pages, read from the pagination status labels.
	pub async fn total_pages(&self) -> Result<u32> {
		let labels = self.page.read_all(selectors::PAGINATION_STATUS).await?;
		total_pages_from(&labels)
	}

	/// Rows currently rendered in the results table.
	pub async fn rows(&self) -> Result<Vec<P::Element>> {
		let table = self.page.locate(selectors::RESULTS_TABLE).await?;
		table.find_all(selectors::ROW).await
	}

	/// Activates `link` and waits for the detail view it opens.
	pub async fn open_detail(self, link: &P::Element) -> Result<DetailView<'p, P>> {
		link.click()
			.await
			.map_err(|e| ScrapeError::navigation("opening detail view", e))?;

		let page = self.page;
		self.wait.until("detail view", || page.is_present(selectors::BACK_BUTTON)).await?;
		Ok(DetailView { page, wait: self.wait })
	}

	/// Clicks the pagination label for `target` and waits until it is active.
	///
	/// A label that does not show up within the wait policy is an error: carrying
	/// on would reprocess the page that is still displayed.
	pub async fn go_to_page(&self, target: u32) -> Result<()> {
		let owned = target.to_string();
		let wanted = owned.as_str();
		let this = self;

		match this
			.wait
			.until("pagination label", || async move { Ok(this.page_label(wanted).await?.is_some()) })
			.await
		{
			Ok(()) => {}
			Err(ScrapeError::Timeout { .. }) => return Err(ScrapeError::PageNotFound { page: target }),
			Err(other) => return Err(other),
		}

		let label = this.page_label(wanted).await?.ok_or(ScrapeError::PageNotFound { page: target })?;
		debug!(target = "seace.pager", page = target, "clicking page label");
		label.click()
			.await
			.map_err(|e| ScrapeError::navigation(format!("clicking page {target}"), e))?;

		this.wait
			.until(&format!("page {target} to become active"), || async move {
				Ok(this.active_page().await?.as_deref() == Some(wanted))
			})
			.await
	}

	async fn page_label(&self, wanted: &str) -> Result<Option<P::Element>> {
		let nav = self.page.locate(selectors::PAGINATOR_BOTTOM).await?;
		for label in nav.find_all(selectors::PAGE_LABEL).await? {
			if label.text().await?.trim() == wanted {
				return Ok(Some(label));
			}
		}
		Ok(None)
	}

	async fn active_page(&self) -> Result<Option<String>> {
		let nav = self.page.locate(selectors::PAGINATOR_BOTTOM).await?;
		match nav.find_all(selectors::ACTIVE_PAGE_LABEL).await?.first() {
			Some(active) => Ok(Some(active.text().await?.trim().to_string())),
			None => Ok(None),
		}
	}
}

/// The per-row detail view (ficha de selección).
pub struct DetailView<'p, P: Page> {
	page: &'p P,
	wait: WaitPolicy,
}

impl<'p, P: Page> DetailView<'p, P> {
	/// Rows of the nested entity information table.
	pub async fn contact_rows(&self) -> Result<Vec<P::Element>> {
		let general = self.page.locate(selectors::GENERAL_TABLE).await?;
		let info = general.find(selectors::ENTITY_INFO_TABLE).await?;
		info.find_all(selectors::ROW).await
	}

	/// Rows of the schedule (cronograma) table.
	pub async fn schedule_rows(&self) -> Result<Vec<P::Element>> {
		let panel = self.page.locate(selectors::SCHEDULE_PANEL).await?;
		let table = panel.find(selectors::SCHEDULE_TABLE).await?;
		table.find_all(selectors::ROW).await
	}

	/// Grid cells of the contracting-entity table.
	pub async fn entity_cells(&self) -> Result<Vec<P::Element>> {
		let table = self.page.locate(selectors::CONTRACTING_ENTITY_TABLE).await?;
		table.find_all(selectors::GRID_CELL).await
	}

	/// Leaves the detail view and waits for the result list.
	pub async fn back(self) -> Result<ListView<'p, P>> {
		click(self.page, selectors::BACK_BUTTON, "returning to result list").await?;
		let page = self.page;
		self.wait.until("result list after return", || page.is_present(selectors::RESULTS_TABLE)).await?;
		Ok(ListView { page, wait: self.wait })
	}
}

async fn click<P: Page>(page: &P, selector: &str, step: &str) -> Result<()> {
	page.locate(selector)
		.await?
		.click()
		.await
		.map_err(|e| ScrapeError::navigation(step, e))
}

async fn fill<P: Page>(page: &P, selector: &str, value: &str, step: &str) -> Result<()> {
	page.locate(selector)
		.await?
		.fill(value)
		.await
		.map_err(|e| ScrapeError::navigation(step, e))
}
