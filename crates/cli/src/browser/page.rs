use async_trait::async_trait;
use pw::{Locator, Page as Tab};
use seace::{Element, Page, Result, ScrapeError};
use tracing::trace;

/// The live portal page.
pub struct PwPage {
	tab: Tab,
}

/// A lazily resolved locator; re-queried on every call.
#[derive(Clone)]
pub struct PwElement {
	locator: Locator,
}

impl PwPage {
	pub fn new(tab: Tab) -> Self {
		Self { tab }
	}
}

async fn count(locator: &Locator, selector: &str) -> Result<usize> {
	locator
		.count()
		.await
		.map_err(|e| ScrapeError::navigation(format!("counting `{selector}`"), e))
}

fn expand(all: &Locator, n: usize) -> Vec<PwElement> {
	(0..n)
		.map(|i| PwElement {
			locator: all.nth(i as i32),
		})
		.collect()
}

#[async_trait]
impl Page for PwPage {
	type Element = PwElement;

	async fn navigate(&self, url: &str) -> Result<()> {
		trace!(target = "seace.browser", %url, "goto");
		self.tab
			.goto(url, None)
			.await
			.map(|_| ())
			.map_err(|e| ScrapeError::navigation(format!("loading {url}"), e))
	}

	async fn locate(&self, selector: &str) -> Result<PwElement> {
		let all = self.tab.locator(selector).await;
		if count(&all, selector).await? == 0 {
			return Err(ScrapeError::not_found(selector));
		}
		Ok(PwElement { locator: all.first() })
	}

	async fn locate_all(&self, selector: &str) -> Result<Vec<PwElement>> {
		let all = self.tab.locator(selector).await;
		let n = count(&all, selector).await?;
		Ok(expand(&all, n))
	}

	async fn is_present(&self, selector: &str) -> Result<bool> {
		let all = self.tab.locator(selector).await;
		Ok(count(&all, selector).await? > 0)
	}
}

#[async_trait]
impl Element for PwElement {
	async fn text(&self) -> Result<String> {
		self.locator
			.inner_text()
			.await
			.map_err(|e| ScrapeError::navigation(format!("reading text of `{}`", self.locator.selector()), e))
	}

	async fn click(&self) -> Result<()> {
		self.locator
			.click(None)
			.await
			.map_err(|e| ScrapeError::navigation(format!("clicking `{}`", self.locator.selector()), e))
	}

	async fn fill(&self, value: &str) -> Result<()> {
		self.locator
			.fill(value, None)
			.await
			.map_err(|e| ScrapeError::navigation(format!("filling `{}`", self.locator.selector()), e))
	}

	async fn find_all(&self, selector: &str) -> Result<Vec<PwElement>> {
		let all = self.locator.locator(selector);
		let n = count(&all, selector).await?;
		Ok(expand(&all, n))
	}
}
