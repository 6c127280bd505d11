//! Error types for the traversal engine.
//!
//! Every variant is fatal for the run. Messages name the step that failed so a
//! broken selector contract can be traced back to the portal markup.

use std::fmt;
use std::time::Duration;

use crate::state::RunState;

/// Field group a detail or summary extraction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
	Summary,
	Contact,
	Schedule,
	TaxId,
}

impl fmt::Display for FieldGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldGroup::Summary => write!(f, "summary"),
			FieldGroup::Contact => write!(f, "contact info"),
			FieldGroup::Schedule => write!(f, "schedule"),
			FieldGroup::TaxId => write!(f, "tax id"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
	/// Selector not found, or a click/fill/navigation rejected by the page.
	#[error("navigation failed while {step}: {message}")]
	Navigation { step: String, message: String },

	/// Expected text absent or not in the expected numeric/marker format.
	#[error("could not parse {what} from {input:?}")]
	Parse { what: &'static str, input: String },

	/// A detail or summary field group could not be read completely.
	#[error("{group} extraction failed: {detail}")]
	Extraction { group: FieldGroup, detail: String },

	#[error("timed out after {waited:?} waiting for {condition}")]
	Timeout { condition: String, waited: Duration },

	#[error("page {page} not found among pagination controls")]
	PageNotFound { page: u32 },

	#[error("invalid run state transition from {from} to {to}")]
	InvalidTransition { from: RunState, to: RunState },

	#[error("failed to write record: {0}")]
	Sink(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
	pub fn navigation(step: impl Into<String>, message: impl fmt::Display) -> Self {
		Self::Navigation {
			step: step.into(),
			message: message.to_string(),
		}
	}

	pub fn not_found(selector: &str) -> Self {
		Self::navigation(format!("locating `{selector}`"), "selector matched no elements")
	}

	pub fn parse(what: &'static str, input: impl Into<String>) -> Self {
		Self::Parse { what, input: input.into() }
	}

	pub fn extraction(group: FieldGroup, detail: impl Into<String>) -> Self {
		Self::Extraction {
			group,
			detail: detail.into(),
		}
	}
}

/// Attaches a field group and step description to lower-level failures.
pub trait ExtractionContext<T> {
	fn in_group(self, group: FieldGroup, step: &str) -> Result<T>;
}

impl<T> ExtractionContext<T> for Result<T> {
	fn in_group(self, group: FieldGroup, step: &str) -> Result<T> {
		self.map_err(|err| match err {
			already @ ScrapeError::Extraction { .. } => already,
			other => ScrapeError::extraction(group, format!("{step}: {other}")),
		})
	}
}
