//! Static site builder.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use folio_client::{fetch_skills, ClientError, ContentSource, FetchOutcome};
use folio_content::{Lookup, PortfolioItem, PortfolioSummary, SkillsData};

use crate::assets::AssetPipeline;
use crate::render::{PageRenderer, SiteConfig};
use crate::routes::{enumerate_portfolio_paths, resolve_portfolio_props};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Directory copied verbatim into the output (favicon, images)
    pub public_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Site-wide settings
    pub site: SiteConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            public_dir: None,
            minify: true,
            site: SiteConfig::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of project detail pages generated
    pub portfolio_pages: usize,

    /// Enumerated slugs whose detail query came back empty
    pub skipped: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Content API rejected the {query} query: {messages}")]
    ContentError {
        query: &'static str,
        messages: String,
    },

    #[error("Failed to fetch {query}: {source}")]
    TransportError {
        query: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Content for {0} was never fetched")]
    Unresolved(&'static str),

    #[error("Invalid portfolio slug: '{0}'")]
    InvalidSlug(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// What a page shows.
#[derive(Debug)]
enum PageKind<'a> {
    Home(&'a FetchOutcome<SkillsData>),
    Backend(&'a FetchOutcome<SkillsData>),
    Heading {
        heading: &'static str,
        current: &'static str,
    },
    PortfolioIndex(&'a [PortfolioSummary]),
    Portfolio(&'a PortfolioItem),
    NotFound,
}

/// A page to be built.
#[derive(Debug)]
struct PageJob<'a> {
    /// Output path
    output_path: PathBuf,

    /// URL listed in the sitemap, if any
    url: Option<String>,

    kind: PageKind<'a>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    source: Arc<dyn ContentSource>,
    renderer: PageRenderer,
}

impl StaticBuilder {
    /// Create a new static builder reading from `source`.
    pub fn new(config: BuildConfig, source: Arc<dyn ContentSource>) -> Self {
        let renderer = PageRenderer::new(config.site.clone());
        Self {
            config,
            source,
            renderer,
        }
    }

    /// Build the static site.
    ///
    /// Fails on the first fetch that does not succeed, except that a skills
    /// query rejected by the content API is rendered into the list pages
    /// the way the server would show it.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let routes = enumerate_portfolio_paths(self.source.as_ref()).await?;
        tracing::info!("Found {} portfolio routes", routes.len());

        let mut projects = Vec::with_capacity(routes.len());
        let mut listed = Vec::with_capacity(routes.len());
        let mut skipped = Vec::new();

        for route in &routes {
            let props = resolve_portfolio_props(self.source.as_ref(), &route.slug).await?;
            match props.item {
                Lookup::Found(item) => {
                    projects.push(item);
                    listed.push(route.summary.clone());
                }
                Lookup::NotFound => {
                    tracing::warn!(
                        "Portfolio '{}' was listed but its detail query returned nothing; skipping {}",
                        route.slug,
                        route.path
                    );
                    skipped.push(route.slug.clone());
                }
            }
        }

        let skills = match fetch_skills(self.source.as_ref()).await {
            FetchOutcome::TransportError(source) => {
                return Err(BuildError::TransportError {
                    query: "skills",
                    source,
                })
            }
            outcome => outcome,
        };

        // Every fetch succeeded; only now replace the previous output.
        self.prepare_output_dir()?;

        let jobs = self.plan_pages(&skills, &listed, &projects);

        // Render pages in parallel
        let results: Vec<Result<(), BuildError>> =
            jobs.par_iter().map(|job| self.build_page(job)).collect();

        for result in results {
            result?;
        }

        self.generate_assets()?;
        self.copy_public_dir()?;
        self.generate_sitemap(&jobs)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: jobs.len(),
            portfolio_pages: projects.len(),
            skipped,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Empty the output directory so routes from earlier builds disappear.
    fn prepare_output_dir(&self) -> Result<(), BuildError> {
        let output = &self.config.output_dir;

        if let Some(public_dir) = &self.config.public_dir {
            if public_dir.starts_with(output) {
                return Err(BuildError::WriteError(format!(
                    "output directory {} contains the public directory {}",
                    output.display(),
                    public_dir.display()
                )));
            }
        }

        if output.exists() {
            fs::remove_dir_all(output).map_err(|e| {
                BuildError::WriteError(format!(
                    "Failed to clear output directory {}: {}",
                    output.display(),
                    e
                ))
            })?;
            tracing::debug!("Cleared {}", output.display());
        }

        fs::create_dir_all(output).map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Lay out every page of the site.
    fn plan_pages<'a>(
        &self,
        skills: &'a FetchOutcome<SkillsData>,
        listed: &'a [PortfolioSummary],
        projects: &'a [PortfolioItem],
    ) -> Vec<PageJob<'a>> {
        let mut jobs = vec![
            self.page("", PageKind::Home(skills)),
            self.page("backend", PageKind::Backend(skills)),
            self.page(
                "experience",
                PageKind::Heading {
                    heading: "Experience",
                    current: "experience/",
                },
            ),
            self.page(
                "tags",
                PageKind::Heading {
                    heading: "Tags",
                    current: "tags/",
                },
            ),
            self.page("portfolio", PageKind::PortfolioIndex(listed)),
        ];

        for item in projects {
            jobs.push(self.page(
                &format!("portfolio/{}", item.slug),
                PageKind::Portfolio(item),
            ));
        }

        jobs.push(PageJob {
            output_path: self.config.output_dir.join("404.html"),
            url: None,
            kind: PageKind::NotFound,
        });

        jobs
    }

    /// A page written to `<dir>/index.html` and listed in the sitemap.
    fn page<'a>(&self, dir: &str, kind: PageKind<'a>) -> PageJob<'a> {
        let url = if dir.is_empty() {
            self.config.site.base_url.clone()
        } else {
            format!("{}{}/", self.config.site.base_url, dir)
        };

        PageJob {
            output_path: page_path(&self.config.output_dir, dir),
            url: Some(url),
            kind,
        }
    }

    /// Build a single page.
    fn build_page(&self, page: &PageJob<'_>) -> Result<(), BuildError> {
        let rendered = match &page.kind {
            PageKind::Home(skills) => self.renderer.render_home(skills),
            PageKind::Backend(skills) => self.renderer.render_backend(skills),
            PageKind::Heading { heading, current } => {
                self.renderer.render_heading_page(heading, current)
            }
            PageKind::PortfolioIndex(listed) => self.renderer.render_portfolio_index(listed),
            PageKind::Portfolio(item) => self.renderer.render_portfolio_item(item),
            PageKind::NotFound => self.renderer.render_not_found(),
        };

        let html = rendered.map_err(|e: minijinja::Error| {
            BuildError::TemplateError(format!("{}: {}", page.output_path.display(), e))
        })?;

        // Ensure output directory exists
        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Wrote {}", page.output_path.display());

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Serving unminified CSS: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("gallery.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory into the output.
    fn copy_public_dir(&self) -> Result<(), BuildError> {
        let Some(public_dir) = &self.config.public_dir else {
            return Ok(());
        };

        if !public_dir.exists() {
            tracing::warn!("Public directory not found: {}", public_dir.display());
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir).unwrap_or(path);
            let target = self.config.output_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }

            fs::copy(path, &target)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;
            copied += 1;
        }

        tracing::info!("Copied {} files from {}", copied, public_dir.display());
        Ok(())
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, pages: &[PageJob<'_>]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .filter_map(|page| page.url.as_deref())
            .map(|url| format!("  <url>\n    <loc>{}</loc>\n  </url>", escape_xml(url)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Also generate robots.txt
        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.site.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Output path of the page for a site-relative URL path.
fn page_path(output_dir: &Path, url_path: &str) -> PathBuf {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::normalize;
    use crate::testing::StubSource;
    use folio_client::{ContentConfig, GraphqlClient};
    use serde_json::json;
    use tempfile::tempdir;

    fn config(out: &Path) -> BuildConfig {
        BuildConfig {
            output_dir: out.to_path_buf(),
            site: SiteConfig {
                title: "Jane Doe".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn read(out: &Path, url_path: &str) -> String {
        normalize(&fs::read_to_string(page_path(out, url_path)).unwrap())
    }

    #[tokio::test]
    async fn builds_every_route() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let source = StubSource::new()
            .project("alpha", Some(1))
            .project("beta", Some(2))
            .skills(json!([{ "slug": "rust", "name": "Rust", "usage": "Services" }]));

        let result = StaticBuilder::new(config(&out), Arc::new(source))
            .build()
            .await
            .unwrap();

        assert_eq!(result.portfolio_pages, 2);
        assert_eq!(result.pages, 8);
        assert!(result.skipped.is_empty());

        for slug in ["alpha", "beta"] {
            let html = read(&out, &format!("/portfolio/{slug}/"));
            let heading = format!("<h1 class=\"page-title\">Portfolio Project: Project {slug}</h1>");
            assert_eq!(html.matches(&heading).count(), 1);
            assert!(html.contains(&format!("<p>About {slug}</p>")));
            assert!(html.contains("View Github"));
            assert!(!html.contains("View Live"));
        }

        assert!(read(&out, "/").contains("href=\"/skill/rust\""));
        assert!(read(&out, "/backend/").contains("<span class=\"tile-label\">Rust</span>"));
        assert!(read(&out, "/experience/").contains("<h1 class=\"title\">Experience</h1>"));
        assert!(read(&out, "/tags/").contains("<h1 class=\"title\">Tags</h1>"));
        assert!(out.join("404.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/gallery.js").exists());
    }

    #[tokio::test]
    async fn portfolio_index_follows_order() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let source = StubSource::new()
            .project("second", Some(2))
            .project("first", Some(1));

        StaticBuilder::new(config(&out), Arc::new(source))
            .build()
            .await
            .unwrap();

        let index = read(&out, "/portfolio/");
        let first = index.find("href=\"/portfolio/first/\"").unwrap();
        let second = index.find("href=\"/portfolio/second/\"").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn skips_listed_slug_without_detail() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let source = StubSource::new().project("real", Some(1)).phantom("ghost");

        let result = StaticBuilder::new(config(&out), Arc::new(source))
            .build()
            .await
            .unwrap();

        assert_eq!(result.skipped, vec!["ghost".to_string()]);
        assert!(!out.join("portfolio/ghost").exists());
        assert!(!read(&out, "/portfolio/").contains("ghost"));
    }

    #[tokio::test]
    async fn enumeration_failure_aborts_build() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let source = StubSource::new().list_response(json!({
            "errors": [{ "message": "Unknown space" }]
        }));

        let err = StaticBuilder::new(config(&out), Arc::new(source))
            .build()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Unknown space"));
        assert!(!out.join("index.html").exists());
    }

    #[tokio::test]
    async fn offline_store_aborts_build() {
        let temp = tempdir().unwrap();

        let err = StaticBuilder::new(config(temp.path()), Arc::new(StubSource::new().offline()))
            .build()
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::TransportError { .. }));
    }

    #[tokio::test]
    async fn rejected_skills_query_renders_in_page() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let source = StubSource::new().skills_response(json!({
            "errors": [{ "message": "Rate limited" }, { "message": "Try later" }]
        }));

        StaticBuilder::new(config(&out), Arc::new(source))
            .build()
            .await
            .unwrap();

        assert_eq!(
            read(&out, "/"),
            "<span class=\"fetch-error\" style=\"color:red\">Rate limited,Try later</span>"
        );
    }

    #[tokio::test]
    async fn copies_public_files_and_writes_sitemap() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let public = temp.path().join("public");
        fs::create_dir_all(public.join("images")).unwrap();
        fs::write(public.join("favicon.ico"), b"icon").unwrap();
        fs::write(public.join("images/me.png"), b"png").unwrap();

        let config = BuildConfig {
            public_dir: Some(public),
            minify: false,
            ..config(&out)
        };

        StaticBuilder::new(config, Arc::new(StubSource::new().project("alpha", None)))
            .build()
            .await
            .unwrap();

        assert_eq!(fs::read(out.join("favicon.ico")).unwrap(), b"icon");
        assert_eq!(fs::read(out.join("images/me.png")).unwrap(), b"png");

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>/portfolio/alpha/</loc>"));
        assert!(!sitemap.contains("404"));
        assert!(fs::read_to_string(out.join("robots.txt"))
            .unwrap()
            .contains("Sitemap: /sitemap.xml"));
    }

    #[tokio::test]
    async fn builds_against_http_endpoint() {
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/space")
                    .body_contains("portfolioCollection {");
                then.status(200).json_body(json!({
                    "data": { "portfolioCollection": { "items": [
                        { "order": 1, "slug": "tracker", "name": "Tracker" }
                    ] } }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/space")
                    .body_contains("GetPortfolioItem");
                then.status(200).json_body(json!({
                    "data": { "portfolioCollection": { "items": [{
                        "slug": "tracker",
                        "name": "Tracker",
                        "liveUrl": "https://tracker.example",
                        "galleryCollection": { "items": [] }
                    }] } }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/space").body_contains("skillsCollection");
                then.status(200)
                    .json_body(json!({ "data": { "skillsCollection": { "items": [] } } }));
            })
            .await;

        let client = GraphqlClient::new(
            ContentConfig::new("space", "token").with_graphql_url(server.base_url()),
        );

        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let result = StaticBuilder::new(config(&out), Arc::new(client))
            .build()
            .await
            .unwrap();

        assert_eq!(result.portfolio_pages, 1);
        let html = read(&out, "/portfolio/tracker/");
        assert!(html.contains("href=\"https://tracker.example\""));
        assert!(html.contains("View All 0 Images"));
    }

    #[tokio::test]
    async fn rebuild_drops_routes_no_longer_listed() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let both = StubSource::new()
            .project("alpha", Some(1))
            .project("beta", Some(2));
        StaticBuilder::new(config(&out), Arc::new(both))
            .build()
            .await
            .unwrap();
        assert!(page_path(&out, "/portfolio/beta/").exists());

        let alpha_only = StubSource::new().project("alpha", Some(1));
        StaticBuilder::new(config(&out), Arc::new(alpha_only))
            .build()
            .await
            .unwrap();

        assert!(page_path(&out, "/portfolio/alpha/").exists());
        assert!(!out.join("portfolio/beta").exists());
        assert!(!read(&out, "/portfolio/").contains("/portfolio/beta/"));
    }

    #[tokio::test]
    async fn failed_rebuild_keeps_previous_output() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(config(&out), Arc::new(StubSource::new().project("alpha", Some(1))))
            .build()
            .await
            .unwrap();

        StaticBuilder::new(config(&out), Arc::new(StubSource::new().offline()))
            .build()
            .await
            .unwrap_err();

        assert!(page_path(&out, "/portfolio/alpha/").exists());
    }

    #[tokio::test]
    async fn refuses_to_clear_output_holding_public_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("site");
        let public = out.join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("favicon.ico"), b"icon").unwrap();

        let config = BuildConfig {
            public_dir: Some(public.clone()),
            ..config(&out)
        };

        let err = StaticBuilder::new(config, Arc::new(StubSource::new()))
            .build()
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::WriteError(_)));
        assert!(public.join("favicon.ico").exists());
    }

    #[tokio::test]
    async fn sitemap_escapes_urls() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let config = BuildConfig {
            site: SiteConfig {
                base_url: "https://example.com/?a=1&b=2/".to_string(),
                ..Default::default()
            },
            ..config(&out)
        };

        StaticBuilder::new(config, Arc::new(StubSource::new()))
            .build()
            .await
            .unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/?a=1&amp;b=2/</loc>"));
        assert!(!sitemap.contains("a=1&b"));
    }

    #[test]
    fn escapes_xml() {
        assert!(matches!(escape_xml("/portfolio/a/"), Cow::Borrowed(_)));
        assert_eq!(escape_xml("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
    }

    #[test]
    fn page_paths() {
        let out = Path::new("dist");
        assert_eq!(page_path(out, "/"), Path::new("dist/index.html"));
        assert_eq!(
            page_path(out, "/portfolio/a/"),
            Path::new("dist/portfolio/a/index.html")
        );
    }
}
