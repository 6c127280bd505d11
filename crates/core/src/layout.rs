//! Structural contract with the portal markup.
//!
//! All selectors and positional indices the engine relies on live here, so a
//! change on the remote side is fixed (or fails) in one place.

use crate::error::{FieldGroup, Result, ScrapeError};

/// Rows rendered per result page by the portal. Not configurable.
pub const ROWS_PER_BATCH: usize = 15;

pub mod selectors {
	//! PrimeFaces identifiers; colons are escaped for CSS.

	pub const ADVANCED_SEARCH_LEGEND: &str = "legend.ui-fieldset-legend.ui-corner-all.ui-state-default";
	pub const START_DATE_INPUT: &str = r"#tbBuscador\:idFormBuscarProceso\:dfechaInicio_input";
	pub const END_DATE_INPUT: &str = r"#tbBuscador\:idFormBuscarProceso\:dfechaFin_input";
	pub const SEARCH_BUTTON: &str = r"#tbBuscador\:idFormBuscarProceso\:btnBuscarSelToken";

	pub const RESULTS_TABLE: &str = r"#tbBuscador\:idFormBuscarProceso\:dtProcesos_data";
	pub const PAGINATION_STATUS: &str = "span.ui-paginator-current";
	pub const PAGINATOR_BOTTOM: &str = r"#tbBuscador\:idFormBuscarProceso\:dtProcesos_paginator_bottom";
	pub const PAGE_LABEL: &str = "span.ui-paginator-page.ui-state-default.ui-corner-all";
	pub const ACTIVE_PAGE_LABEL: &str = "span.ui-paginator-page.ui-state-active";

	pub const ROW: &str = "tr";
	pub const CELL: &str = "td";
	pub const LINK: &str = "a";

	pub const BACK_BUTTON: &str = r"#tbFicha\:j_idt19";
	pub const GENERAL_TABLE: &str = r"#tbFicha\:j_idt23";
	pub const ENTITY_INFO_TABLE: &str = r"#tbFicha\:j_idt68";
	pub const SCHEDULE_PANEL: &str = r"#tbFicha\:pnlContenedorFicha2";
	pub const SCHEDULE_TABLE: &str = r"#tbFicha\:dtCronograma_data";
	pub const CONTRACTING_ENTITY_TABLE: &str = r"#tbFicha\:dtEntidadContrata_data";
	pub const GRID_CELL: &str = "td[role=gridcell]";
}

/// Marker identifying the status label that carries the total page count.
pub const PAGINATION_MARKER: &str = "Mostrando de 1 a 15";

/// First schedule row must contain this to count as the convocation stage.
pub const CONVOCATION_MARKER: &str = "Convocatoria";

/// Second schedule row must contain one of these (manual or electronic).
pub const REGISTRATION_MARKERS: [&str; 2] = ["Registro de Participantes", "Registro de participantes(Electronica)"];

/// Positions inside the entity information table.
pub const WEBSITE_ROW: usize = 2;
pub const PHONE_ROW: usize = 3;
pub const CONTACT_VALUE_CELL: usize = 1;

/// Positions inside the schedule table.
pub const CONVOCATION_ROW: usize = 0;
pub const REGISTRATION_ROW: usize = 1;
pub const STAGE_LABEL_CELL: usize = 0;
pub const STAGE_START_CELL: usize = 1;
pub const STAGE_END_CELL: usize = 2;

/// Action link that opens the detail view, within the actions column.
pub const DETAIL_LINK: usize = 1;

/// Named columns of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryColumn {
	EntityName,
	Published,
	Nomenclature,
	Category,
	Description,
	ReferenceValue,
	Actions,
}

impl SummaryColumn {
	pub const ALL: [SummaryColumn; 7] = [
		SummaryColumn::EntityName,
		SummaryColumn::Published,
		SummaryColumn::Nomenclature,
		SummaryColumn::Category,
		SummaryColumn::Description,
		SummaryColumn::ReferenceValue,
		SummaryColumn::Actions,
	];

	pub fn index(self) -> usize {
		match self {
			SummaryColumn::EntityName => 1,
			SummaryColumn::Published => 2,
			SummaryColumn::Nomenclature => 3,
			SummaryColumn::Category => 5,
			SummaryColumn::Description => 6,
			SummaryColumn::ReferenceValue => 9,
			SummaryColumn::Actions => 12,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			SummaryColumn::EntityName => "entity name",
			SummaryColumn::Published => "publication date",
			SummaryColumn::Nomenclature => "nomenclature",
			SummaryColumn::Category => "procurement category",
			SummaryColumn::Description => "description",
			SummaryColumn::ReferenceValue => "reference value",
			SummaryColumn::Actions => "actions",
		}
	}

	/// Returns the cell for this column, failing loudly when the row is too short.
	pub fn pick<T>(self, cells: &[T]) -> Result<&T> {
		cells.get(self.index()).ok_or_else(|| {
			ScrapeError::extraction(
				FieldGroup::Summary,
				format!("row has {} cells but column `{}` is at index {}", cells.len(), self.name(), self.index()),
			)
		})
	}
}

/// Smallest cell count a result row must have to be read.
pub fn min_row_cells() -> usize {
	SummaryColumn::ALL.iter().map(|c| c.index()).max().unwrap_or(0) + 1
}
