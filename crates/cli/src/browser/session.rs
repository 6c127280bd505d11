use pw::Browser;
use pw::{LaunchOptions, Playwright};
use tracing::debug;

use super::page::PwPage;
use crate::error::{CliError, Result};

/// One Chromium instance with a single page, kept for the whole run.
pub struct BrowserSession {
	_playwright: Playwright,
	browser: Browser,
	page: PwPage,
}

impl BrowserSession {
	pub async fn launch(headless: bool) -> Result<Self> {
		debug!(target = "seace.browser", headless, "starting Playwright");
		let playwright = Playwright::launch().await.map_err(|e| CliError::BrowserLaunch(e.to_string()))?;

		let options = LaunchOptions {
			headless: Some(headless),
			..Default::default()
		};
		let browser = playwright
			.chromium()
			.launch_with_options(options)
			.await
			.map_err(|e| CliError::BrowserLaunch(e.to_string()))?;
		let page = browser.new_page().await.map_err(|e| CliError::BrowserLaunch(e.to_string()))?;
		debug!(target = "seace.browser", "browser ready");

		Ok(Self {
			_playwright: playwright,
			browser,
			page: PwPage::new(page),
		})
	}

	pub fn page(&self) -> &PwPage {
		&self.page
	}

	pub async fn close(self) -> Result<()> {
		self.browser.close().await.map_err(|e| CliError::BrowserLaunch(format!("closing browser: {e}")))
	}
}
