//! Report open pull requests and issues across GitHub organizations.
//!
//! The pipeline runs strictly forward: resolved options route requests
//! through the host adapter, the fetcher lists repositories and their items
//! with bounded concurrency, the aggregator normalizes and filters, and the
//! assembled per-organization reports are rendered through a Handlebars
//! template.

pub mod config;
pub mod display;
pub mod error;
pub mod fetch;
pub mod github;
pub mod host;
pub mod options;
pub mod render;
pub mod report;

pub use error::{PrReportError, Result};
