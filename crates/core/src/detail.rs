//! Field extraction from a loaded detail view.
//!
//! Three independent groups are read: contact info, the schedule and the
//! contracting entity's RUC. Values are returned as rendered; normalization
//! happens when the record is assembled.

use tracing::debug;

use crate::error::{ExtractionContext, FieldGroup, Result, ScrapeError};
use crate::layout::{
	CONTACT_VALUE_CELL, CONVOCATION_MARKER, CONVOCATION_ROW, PHONE_ROW, REGISTRATION_MARKERS, REGISTRATION_ROW, STAGE_END_CELL, STAGE_LABEL_CELL,
	STAGE_START_CELL, WEBSITE_ROW, selectors,
};
use crate::page::{Element, Page};
use crate::record::{ContactInfo, DetailFields, Schedule, ScheduleEntry};
use crate::view::DetailView;

#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtractor;

impl DetailExtractor {
	pub fn new() -> Self {
		Self
	}

	pub async fn extract<P: Page>(&self, view: &DetailView<'_, P>) -> Result<DetailFields> {
		let contact = self.contact_info(view).await?;
		let schedule = self.schedule(view).await?;
		let tax_id = self.tax_id(view).await?;
		debug!(target = "seace.detail", ruc = %tax_id.trim(), "detail view read");

		Ok(DetailFields { contact, schedule, tax_id })
	}

	/// Website and phone from rows 2 and 3 of the entity information table.
	pub async fn contact_info<P: Page>(&self, view: &DetailView<'_, P>) -> Result<ContactInfo> {
		let group = FieldGroup::Contact;
		let rows = view.contact_rows().await.in_group(group, "locating entity information table")?;

		let website = cell_text(&rows, WEBSITE_ROW, CONTACT_VALUE_CELL, group, "website").await?;
		let phone = cell_text(&rows, PHONE_ROW, CONTACT_VALUE_CELL, group, "phone").await?;

		Ok(ContactInfo { website, phone })
	}

	pub async fn schedule<P: Page>(&self, view: &DetailView<'_, P>) -> Result<Schedule> {
		let rows = view.schedule_rows().await.in_group(FieldGroup::Schedule, "locating schedule table")?;

		let convocation = stage(&rows, CONVOCATION_ROW, &[CONVOCATION_MARKER], "convocation").await?;
		let registration = stage(&rows, REGISTRATION_ROW, &REGISTRATION_MARKERS, "registration").await?;

		Ok(Schedule { convocation, registration })
	}

	/// RUC: text of the first grid cell of the contracting-entity table.
	pub async fn tax_id<P: Page>(&self, view: &DetailView<'_, P>) -> Result<String> {
		let group = FieldGroup::TaxId;
		let cells = view.entity_cells().await.in_group(group, "locating contracting entity table")?;
		let first = cells
			.first()
			.ok_or_else(|| ScrapeError::extraction(group, format!("`{}` has no grid cells", selectors::CONTRACTING_ENTITY_TABLE)))?;
		first.text().await.in_group(group, "reading RUC cell")
	}
}

/// Reads one schedule stage by position.
///
/// When the label cell lacks every marker the stage is reported as not
/// specified and the date cells are left untouched.
async fn stage<E: Element>(rows: &[E], index: usize, markers: &[&str], name: &str) -> Result<ScheduleEntry> {
	let group = FieldGroup::Schedule;
	let row = rows
		.get(index)
		.ok_or_else(|| ScrapeError::extraction(group, format!("{name} row {index} missing; table has {} rows", rows.len())))?;
	let cells = row.find_all(selectors::CELL).await.in_group(group, &format!("reading {name} cells"))?;

	let label = nth_text(&cells, STAGE_LABEL_CELL, group, &format!("{name} label")).await?;
	if !markers.iter().any(|marker| label.contains(marker)) {
		debug!(target = "seace.detail", stage = name, %label, "stage not present");
		return Ok(ScheduleEntry::not_specified());
	}

	let start = nth_text(&cells, STAGE_START_CELL, group, &format!("{name} start date")).await?;
	let end = nth_text(&cells, STAGE_END_CELL, group, &format!("{name} end date")).await?;

	Ok(ScheduleEntry { label, start, end })
}

async fn cell_text<E: Element>(rows: &[E], row: usize, cell: usize, group: FieldGroup, field: &str) -> Result<String> {
	let row_el = rows
		.get(row)
		.ok_or_else(|| ScrapeError::extraction(group, format!("{field} row {row} missing; table has {} rows", rows.len())))?;
	let cells = row_el.find_all(selectors::CELL).await.in_group(group, &format!("reading {field} cells"))?;
	nth_text(&cells, cell, group, field).await
}

async fn nth_text<E: Element>(cells: &[E], index: usize, group: FieldGroup, field: &str) -> Result<String> {
	let cell = cells
		.get(index)
		.ok_or_else(|| ScrapeError::extraction(group, format!("{field} cell {index} missing; row has {} cells", cells.len())))?;
	cell.text().await.in_group(group, &format!("reading {field}"))
}
