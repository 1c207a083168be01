//! Records read from the content store.
//!
//! Field names follow the GraphQL schema (camelCase on the wire). Anything the
//! store may leave unset is an `Option` or an empty collection, so a partially
//! filled entry still deserializes and the renderer decides what to show.

use serde::{Deserialize, Deserializer, Serialize};

use crate::rich_text::RichTextDocument;

/// A file uploaded to the content store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Public URL of the file
    pub url: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub file_name: Option<String>,

    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

impl Asset {
    /// Asset pointing at `url` with no metadata.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// A GraphQL `...Collection { items }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    /// Entries in store order. Unresolvable links arrive as `null` and are dropped.
    #[serde(default = "Vec::new", deserialize_with = "skip_nulls")]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

fn skip_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// A skill tile on the home page and on project pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub slug: String,
    pub name: String,

    /// How the skill has been used (list query only)
    #[serde(default)]
    pub usage: Option<String>,

    #[serde(default)]
    pub image: Option<Asset>,
}

/// A past role or engagement a project is linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub image: Option<Asset>,
}

/// One image from a project's gallery.
///
/// `title` is a caption, not an identity: two images may share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub file_name: Option<String>,

    pub url: String,
}

/// Wrapper the store uses for rich-text fields (`description { json }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    pub json: RichTextDocument,
}

/// Portfolio entry as returned by the list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default)]
    pub order: Option<i64>,

    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub image: Option<Asset>,
}

/// Full portfolio entry as returned by the detail query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(default)]
    pub order: Option<i64>,

    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<RichText>,

    #[serde(default)]
    pub image: Option<Asset>,

    #[serde(default)]
    pub live_url: Option<String>,

    #[serde(default)]
    pub github_url: Option<String>,

    #[serde(default)]
    pub related_skills_collection: Collection<Skill>,

    #[serde(default)]
    pub gallery_collection: Collection<GalleryImage>,

    #[serde(default)]
    pub related_experience: Option<Experience>,
}

impl PortfolioItem {
    /// Source-code link, if set to something non-empty.
    pub fn github_link(&self) -> Option<&str> {
        non_empty(self.github_url.as_deref())
    }

    /// Live-deployment link, if set to something non-empty.
    pub fn live_link(&self) -> Option<&str> {
        non_empty(self.live_url.as_deref())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|a| a.url.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Result of looking an entity up by slug.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// `data` of the skills list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsData {
    #[serde(default)]
    pub skills_collection: Collection<Skill>,
}

/// `data` of the portfolio list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioListData {
    #[serde(default)]
    pub portfolio_collection: Collection<PortfolioSummary>,
}

/// `data` of the portfolio detail query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetailData {
    #[serde(default)]
    pub portfolio_collection: Collection<PortfolioItem>,
}

impl PortfolioDetailData {
    /// Take the entry whose slug matches `slug`.
    ///
    /// The query already filters by slug, so this normally sees zero or one item.
    pub fn into_lookup(self, slug: &str) -> Lookup<PortfolioItem> {
        self.portfolio_collection
            .items
            .into_iter()
            .find(|item| item.slug == slug)
            .map_or(Lookup::NotFound, Lookup::Found)
    }
}
