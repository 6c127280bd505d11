pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod run;
