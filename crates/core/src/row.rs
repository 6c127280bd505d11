//! Per-row processing: summary columns, detail round trip, record output.

use tracing::{debug, info};

use crate::detail::DetailExtractor;
use crate::error::{ExtractionContext, FieldGroup, Result, ScrapeError};
use crate::layout::{DETAIL_LINK, SummaryColumn, selectors};
use crate::page::{Element, Page};
use crate::record::{Record, SummaryFields};
use crate::sink::RecordSink;
use crate::state::{RunState, RunTracker};
use crate::view::ListView;

#[derive(Debug, Clone, Copy, Default)]
pub struct RowProcessor {
	extractor: DetailExtractor,
}

impl RowProcessor {
	pub fn new(extractor: DetailExtractor) -> Self {
		Self { extractor }
	}

	/// Turns one rendered row into one record and hands it to `sink`.
	///
	/// Consumes the list view for the detail round trip and returns it once
	/// the results table is back. Any failure aborts the row; nothing is
	/// written for it.
	pub async fn process<'p, P, S>(
		&self,
		list: ListView<'p, P>,
		row: &P::Element,
		position: usize,
		sink: &mut S,
		tracker: &mut RunTracker,
	) -> Result<ListView<'p, P>>
	where
		P: Page,
		S: RecordSink + ?Sized,
	{
		let cells = row
			.find_all(selectors::CELL)
			.await
			.in_group(FieldGroup::Summary, &format!("reading cells of row {position}"))?;
		let summary = read_summary(&cells).await?;
		debug!(target = "seace.row", position, nomenclature = %summary.nomenclature.trim(), "summary read");

		let links = SummaryColumn::Actions
			.pick(&cells)?
			.find_all(selectors::LINK)
			.await
			.in_group(FieldGroup::Summary, "reading action links")?;
		let link = links.get(DETAIL_LINK).ok_or_else(|| {
			ScrapeError::extraction(
				FieldGroup::Summary,
				format!("actions column has {} links; detail link is at index {DETAIL_LINK}", links.len()),
			)
		})?;

		tracker.enter(RunState::RowDetail)?;
		let detail = list.open_detail(link).await?;
		let fields = self.extractor.extract(&detail).await?;

		let record = Record::assemble(summary, fields);
		sink.write(&record)?;
		tracker.record_written();
		info!(target = "seace.row", position, nomenclature = %record.nomenclature, "record written");

		tracker.enter(RunState::Returning)?;
		let list = detail.back().await?;
		tracker.enter(RunState::PagedListing)?;
		Ok(list)
	}
}

async fn read_summary<E: Element>(cells: &[E]) -> Result<SummaryFields> {
	Ok(SummaryFields {
		entity_name: column_text(cells, SummaryColumn::EntityName).await?,
		published: column_text(cells, SummaryColumn::Published).await?,
		nomenclature: column_text(cells, SummaryColumn::Nomenclature).await?,
		category: column_text(cells, SummaryColumn::Category).await?,
		description: column_text(cells, SummaryColumn::Description).await?,
		reference_value: column_text(cells, SummaryColumn::ReferenceValue).await?,
	})
}

async fn column_text<E: Element>(cells: &[E], column: SummaryColumn) -> Result<String> {
	column
		.pick(cells)?
		.text()
		.await
		.in_group(FieldGroup::Summary, &format!("reading {}", column.name()))
}
