//! Playwright-backed implementation of the page-access traits.

mod page;
mod session;

pub use page::{PwElement, PwPage};
pub use session::BrowserSession;
