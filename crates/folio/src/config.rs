//! Configuration file (folio.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_client::{ContentConfig, DEFAULT_GRAPHQL_URL};
use folio_static::SiteConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub description: String,
    /// Home page introduction (markdown)
    pub bio: String,
    pub base_url: String,
    pub output: String,
    pub public_dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            title: site.title,
            description: site.description,
            bio: site.bio,
            base_url: site.base_url,
            output: "dist".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub graphql_url: String,
    /// Environment variable holding the space id
    pub space_id_env: String,
    /// Environment variable holding the delivery token
    pub access_token_env: String,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            space_id_env: "CONTENTFUL_SPACE_ID".to_string(),
            access_token_env: "CONTENTFUL_ACCESS_TOKEN".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    pub fn site_config(&self) -> SiteConfig {
        let mut base_url = self.site.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        SiteConfig {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            bio: self.site.bio.clone(),
            base_url,
        }
    }

    /// Read credentials from the configured environment variables.
    pub fn content_config(&self) -> ContentConfig {
        ContentConfig::from_env(&self.content.space_id_env, &self.content.access_token_env)
            .with_graphql_url(&self.content.graphql_url)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.output)
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.public_dir)
    }
}
