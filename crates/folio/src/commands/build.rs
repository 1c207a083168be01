//! Static site build command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use folio_client::GraphqlClient;
use folio_static::{BuildConfig, StaticBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = ConfigFile::load(config_path)?;
    let client = GraphqlClient::new(file_config.content_config());

    let config = BuildConfig {
        output_dir: output.unwrap_or_else(|| file_config.output_dir()),
        public_dir: Some(file_config.public_dir()),
        minify: minify.unwrap_or(file_config.build.minify),
        site: file_config.site_config(),
    };

    let result = StaticBuilder::new(config, Arc::new(client))
        .build()
        .await
        .context("Build failed")?;

    tracing::info!(
        "Built {} pages ({} portfolio projects) in {}ms",
        result.pages,
        result.portfolio_pages,
        result.duration_ms
    );

    if !result.skipped.is_empty() {
        tracing::warn!(
            "Skipped {} listed projects with no detail: {}",
            result.skipped.len(),
            result.skipped.join(", ")
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
