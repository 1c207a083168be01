//! Page rendering: fetched data in, HTML out.
//!
//! Every page that depends on a fetch takes a [`FetchOutcome`] and handles
//! each state: `Pending` shows a skeleton, `Failed` and `TransportError`
//! show the error fragment, `Succeeded` shows the page.

use folio_client::{join_messages, FetchOutcome};
use folio_content::{Lookup, PortfolioItem, PortfolioSummary, SkillsData};
use minijinja::context;

use crate::templates::{Context, NavItem, TemplateEngine};
use crate::views::{skill_tiles, PortfolioView, Tile};

/// Site-wide settings the pages are rendered with.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site owner's name, used as the site title
    pub title: String,

    /// Meta description
    pub description: String,

    /// Home page introduction (markdown)
    pub bio: String,

    /// Base URL the site is served under, with trailing slash
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: "Personal portfolio".to_string(),
            bio: String::new(),
            base_url: "/".to_string(),
        }
    }
}

/// Fixed navigation entries: (title, path relative to the base URL).
const NAV: [(&str, &str); 4] = [
    ("Home", ""),
    ("Experience", "experience/"),
    ("Portfolio", "portfolio/"),
    ("Tags", "tags/"),
];

/// Renders every page of the site.
pub struct PageRenderer {
    site: SiteConfig,
    bio_html: String,
    templates: TemplateEngine,
}

impl PageRenderer {
    pub fn new(site: SiteConfig) -> Self {
        let bio_html = render_markdown(&site.bio);
        Self {
            site,
            bio_html,
            templates: TemplateEngine::new(),
        }
    }

    fn context(&self, title: String, current: &str) -> Context {
        let nav = NAV
            .iter()
            .map(|(name, path)| NavItem {
                title: name.to_string(),
                path: format!("{}{}", self.site.base_url, path),
                active: *path == current,
            })
            .collect();

        Context {
            title,
            site_title: self.site.title.clone(),
            description: self.site.description.clone(),
            nav,
            base_url: self.site.base_url.clone(),
        }
    }

    /// Handle the states shared by every fetched page.
    fn render_outcome<T>(
        &self,
        outcome: &FetchOutcome<T>,
        loading_title: &str,
        ready: impl FnOnce(&T) -> Result<String, minijinja::Error>,
    ) -> Result<String, minijinja::Error> {
        match outcome {
            FetchOutcome::Pending => self.render_loading(loading_title),
            FetchOutcome::Failed(errors) => self.templates.render_fetch_error(&join_messages(errors)),
            FetchOutcome::TransportError(e) => self.templates.render_fetch_error(&e.to_string()),
            FetchOutcome::Succeeded(data) => ready(data),
        }
    }

    /// Home page with the skill set.
    pub fn render_home(&self, outcome: &FetchOutcome<SkillsData>) -> Result<String, minijinja::Error> {
        let title = format!("Home - {}", self.site.title);
        self.render_outcome(outcome, &title, |data| {
            let tiles = skill_tiles(&data.skills_collection.items, &self.site.base_url);
            self.templates.render_page(
                "home.html",
                &self.context(title.clone(), ""),
                context! { bio => &self.bio_html, tiles => tiles },
            )
        })
    }

    /// The backend skills panel.
    pub fn render_backend(
        &self,
        outcome: &FetchOutcome<SkillsData>,
    ) -> Result<String, minijinja::Error> {
        self.render_outcome(outcome, "Backend", |data| {
            let tiles = skill_tiles(&data.skills_collection.items, &self.site.base_url);
            self.templates.render_page(
                "skills.html",
                &self.context("Backend".to_string(), "backend/"),
                context! { heading => "Backend", tiles => tiles },
            )
        })
    }

    /// A project detail page.
    pub fn render_portfolio(
        &self,
        outcome: &FetchOutcome<Lookup<PortfolioItem>>,
    ) -> Result<String, minijinja::Error> {
        self.render_outcome(outcome, "Portfolio", |lookup| match lookup {
            Lookup::Found(item) => self.render_portfolio_item(item),
            Lookup::NotFound => self.render_not_found(),
        })
    }

    /// A project detail page for an item that is already resolved.
    pub fn render_portfolio_item(&self, item: &PortfolioItem) -> Result<String, minijinja::Error> {
        let view = PortfolioView::new(item, &self.site.base_url);
        self.templates.render_page(
            "portfolio.html",
            &self.context(item.name.clone(), "portfolio/"),
            view,
        )
    }

    /// Index of every project, in the order given.
    pub fn render_portfolio_index(
        &self,
        projects: &[PortfolioSummary],
    ) -> Result<String, minijinja::Error> {
        let tiles: Vec<Tile> = projects
            .iter()
            .map(|p| Tile::portfolio(p, &self.site.base_url))
            .collect();

        self.templates.render_page(
            "portfolio_index.html",
            &self.context("Portfolio".to_string(), "portfolio/"),
            context! { tiles => tiles },
        )
    }

    /// A page with only a heading (experience, tags).
    pub fn render_heading_page(
        &self,
        heading: &str,
        current: &str,
    ) -> Result<String, minijinja::Error> {
        self.templates.render_page(
            "page.html",
            &self.context(heading.to_string(), current),
            context! { heading => heading },
        )
    }

    pub fn render_not_found(&self) -> Result<String, minijinja::Error> {
        self.templates
            .render_page("not_found.html", &self.context("Not Found".to_string(), "-"), ())
    }

    pub fn render_loading(&self, title: &str) -> Result<String, minijinja::Error> {
        self.templates
            .render_page("loading.html", &self.context(title.to_string(), "-"), ())
    }
}

/// Render markdown to HTML.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
