//! Traversal and extraction engine for the SEACE procurement search portal.
//!
//! The engine drives a [`Page`] through the search form, every page of the
//! result list and each row's detail view, and emits one normalized [`Record`]
//! per row to a [`RecordSink`]. Browser access is abstract; the `seace-cli`
//! crate provides the Playwright-backed implementation.

pub mod detail;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod page;
pub mod pager;
pub mod pagination;
pub mod record;
pub mod row;
pub mod sink;
pub mod state;
pub mod view;
pub mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use detail::DetailExtractor;
pub use error::{FieldGroup, Result, ScrapeError};
pub use normalize::{NOT_SPECIFIED, normalize};
pub use page::{Element, Page};
pub use pager::PageIterator;
pub use pagination::PaginationState;
pub use record::{HEADER, Record, ScheduleEntry};
pub use row::RowProcessor;
pub use sink::{CsvSink, RecordSink};
pub use state::{RunState, RunSummary, RunTracker};
pub use view::{DateRange, DetailView, ListView, SearchForm};
pub use wait::WaitPolicy;
