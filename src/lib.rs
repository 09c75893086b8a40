//! check_nextcloud - Nextcloud serverinfo monitoring plugin
//!
//! This library exposes the check pipeline: argument resolution, the HTTP
//! fetcher, metrics extraction, status evaluation and output formatting.

pub mod check;
pub mod cli;
pub mod config;
pub mod constants;
pub mod evaluate;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod output;
