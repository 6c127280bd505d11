//! Page-access capability consumed by the engine.
//!
//! Implemented over a live browser by the CLI crate and over an in-memory
//! portal in tests. Element handles behave like lazy locators: they are
//! re-resolved against whatever the session currently renders, so a row handle
//! taken before opening a detail view is valid again once the list is back.

use async_trait::async_trait;

use crate::error::{Result, ScrapeError};

#[async_trait]
pub trait Element: Send + Sync + Sized {
	/// Rendered text of the element.
	async fn text(&self) -> Result<String>;

	async fn click(&self) -> Result<()>;

	async fn fill(&self, value: &str) -> Result<()>;

	/// All descendants matching `selector`, in document order.
	async fn find_all(&self, selector: &str) -> Result<Vec<Self>>;

	/// First descendant matching `selector`.
	async fn find(&self, selector: &str) -> Result<Self> {
		self.find_all(selector)
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| ScrapeError::not_found(selector))
	}
}

#[async_trait]
pub trait Page: Send + Sync {
	type Element: Element;

	async fn navigate(&self, url: &str) -> Result<()>;

	/// First element matching `selector`; errors when nothing matches.
	async fn locate(&self, selector: &str) -> Result<Self::Element>;

	/// All elements matching `selector`, possibly none.
	async fn locate_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

	async fn is_present(&self, selector: &str) -> Result<bool>;

	/// Text of every element matching `selector`.
	async fn read_all(&self, selector: &str) -> Result<Vec<String>> {
		let mut texts = Vec::new();
		for element in self.locate_all(selector).await? {
			texts.push(element.text().await?);
		}
		Ok(texts)
	}
}
