//! Initialize a portfolio project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    // Create public directory next to the config
    let root = config_path.parent().unwrap_or_else(|| Path::new(""));
    let public_dir = root.join("public");
    if !public_dir.exists() {
        fs::create_dir_all(&public_dir).context("Failed to create public directory")?;
        tracing::info!("Created public/");
    }

    let keep_path = public_dir.join(".gitkeep");
    if !keep_path.exists() {
        fs::write(&keep_path, "").context("Failed to write public/.gitkeep")?;
    }

    tracing::info!("Initialization complete!");
    tracing::info!(
        "Set CONTENTFUL_SPACE_ID and CONTENTFUL_ACCESS_TOKEN, then run 'folio build'."
    );

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# Folio Configuration

[site]
# Your name, shown in the navigation drawer and on the home page
title = "Your Name"

# Meta description
description = "Personal portfolio"

# Home page introduction (markdown)
bio = """
I build things for the web. Have a look at my experience and projects.
"""

# Base URL (for deployment)
base_url = "/"

# Output directory for built site
output = "dist"

# Files copied verbatim into the output (favicon, images)
public_dir = "public"

[content]
# GraphQL endpoint prefix; the space id is appended
graphql_url = "https://graphql.contentful.com/content/v1/spaces"

# Environment variables holding the credentials
space_id_env = "CONTENTFUL_SPACE_ID"
access_token_env = "CONTENTFUL_ACCESS_TOKEN"

[build]
# Enable minification
minify = true

[server]
host = "127.0.0.1"
port = 3000
"#;
