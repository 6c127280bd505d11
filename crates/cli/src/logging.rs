use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{CliError, Result};

/// Directive used when `RUST_LOG` is unset.
fn default_directive(verbose: u8) -> &'static str {
	match verbose {
		0 => "seace=info",
		1 => "seace=debug",
		_ => "seace=trace",
	}
}

/// Installs the global subscriber.
///
/// Console output goes to stderr. With `debug_log` set, every event at debug
/// level or above is also written, without colours, to that file.
pub fn init_logging(verbose: u8, debug_log: Option<&Path>) -> Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
	let console = fmt::layer().with_writer(std::io::stderr).with_target(verbose > 0).with_filter(filter);

	let file = match debug_log {
		Some(path) => {
			let file = File::create(path).map_err(|e| CliError::io(path, e))?;
			Some(
				fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(EnvFilter::new("seace=debug")),
			)
		}
		None => None,
	};

	tracing_subscriber::registry().with(console).with(file).init();
	Ok(())
}
