//! Output record and the intermediate field groups it is assembled from.

use serde::Serialize;

use crate::normalize::{NOT_SPECIFIED, normalize};

/// CSV header, in record column order.
pub const HEADER: [&str; 15] = [
	"nomenclatura",
	"entidad_convocante",
	"pagina_web",
	"telefono_entidad",
	"objeto_contratacion",
	"descripcion_objeto",
	"valor_referencial",
	"fecha_publicacion",
	"etapa_1",
	"etapa_1_fecha_inicio",
	"etapa_1_fecha_termino",
	"etapa_2",
	"etapa_2_fecha_inicio",
	"etapa_2_fecha_fin",
	"ruc_entidad_contratante",
];

/// Raw text of the six summary columns of a result row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFields {
	pub entity_name: String,
	pub published: String,
	pub nomenclature: String,
	pub category: String,
	pub description: String,
	pub reference_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
	pub website: String,
	pub phone: String,
}

/// One stage of the procurement schedule (cronograma).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
	pub label: String,
	pub start: String,
	pub end: String,
}

impl ScheduleEntry {
	pub fn new(label: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			start: start.into(),
			end: end.into(),
		}
	}

	/// Entry used when the portal does not show the stage at its expected row.
	pub fn not_specified() -> Self {
		Self::new(NOT_SPECIFIED, NOT_SPECIFIED, NOT_SPECIFIED)
	}

	pub fn is_specified(&self) -> bool {
		self.label != NOT_SPECIFIED
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
	pub convocation: ScheduleEntry,
	pub registration: ScheduleEntry,
}

/// Everything read from one detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
	pub contact: ContactInfo,
	pub schedule: Schedule,
	pub tax_id: String,
}

/// One procurement notice, ready for the sink.
///
/// Built only through [`Record::assemble`], which normalizes every field, so a
/// record never carries delimiters, quotes, tabs or line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
	pub nomenclature: String,
	pub entity_name: String,
	pub website: String,
	pub phone: String,
	pub category: String,
	pub description: String,
	pub reference_value: String,
	pub published: String,
	pub convocation_label: String,
	pub convocation_start: String,
	pub convocation_end: String,
	pub registration_label: String,
	pub registration_start: String,
	pub registration_end: String,
	pub tax_id: String,
}

impl Record {
	pub fn assemble(summary: SummaryFields, detail: DetailFields) -> Self {
		let DetailFields { contact, schedule, tax_id } = detail;
		let Schedule { convocation, registration } = schedule;

		Self {
			nomenclature: normalize(&summary.nomenclature),
			entity_name: normalize(&summary.entity_name),
			website: normalize(&contact.website),
			phone: normalize(&contact.phone),
			category: normalize(&summary.category),
			description: normalize(&summary.description),
			reference_value: normalize(&summary.reference_value),
			published: normalize(&summary.published),
			convocation_label: normalize(&convocation.label),
			convocation_start: normalize(&convocation.start),
			convocation_end: normalize(&convocation.end),
			registration_label: normalize(&registration.label),
			registration_start: normalize(&registration.start),
			registration_end: normalize(&registration.end),
			tax_id: normalize(&tax_id),
		}
	}

	/// Field values in [`HEADER`] order.
	pub fn fields(&self) -> [&str; 15] {
		[
			&self.nomenclature,
			&self.entity_name,
			&self.website,
			&self.phone,
			&self.category,
			&self.description,
			&self.reference_value,
			&self.published,
			&self.convocation_label,
			&self.convocation_start,
			&self.convocation_end,
			&self.registration_label,
			&self.registration_start,
			&self.registration_end,
			&self.tax_id,
		]
	}
}
