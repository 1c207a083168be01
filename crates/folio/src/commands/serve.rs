//! Site server command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use folio_client::GraphqlClient;
use folio_server::{ServerConfig, SiteServer};

use crate::config::ConfigFile;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;
    let client = GraphqlClient::new(file_config.content_config());

    let config = ServerConfig {
        dist_dir: dir.unwrap_or_else(|| file_config.output_dir()),
        port: port.unwrap_or(file_config.server.port),
        host: file_config.server.host.clone(),
        open,
    };

    SiteServer::new(config, Arc::new(client), file_config.site_config())
        .start()
        .await?;

    Ok(())
}
