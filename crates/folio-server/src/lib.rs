//! Site server for the folio portfolio.
//!
//! Renders the skill list pages per request and serves the static build
//! output for everything else.

pub mod server;

pub use server::{ServerConfig, ServerError, SiteServer};
