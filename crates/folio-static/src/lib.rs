//! Static site generator for the folio portfolio.
//!
//! Enumerates portfolio routes from the content store, resolves each route's
//! data and renders every page of the site to HTML.

pub mod assets;
pub mod builder;
pub mod render;
pub mod routes;
pub mod templates;
pub mod views;

#[cfg(test)]
mod testing;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use render::{PageRenderer, SiteConfig};
pub use routes::{enumerate_portfolio_paths, resolve_portfolio_props, PortfolioProps, PortfolioRoute};
