//! View models: the shapes page templates consume.
//!
//! Everything that decides what appears on a page (which links exist, how
//! many gallery images show inline, where tiles point) lives here so the
//! templates only lay things out.

use folio_content::{
    render_document, Experience, GalleryImage, PortfolioItem, PortfolioSummary, Skill,
};
use serde::Serialize;

/// Gallery images shown inline on a project page; the rest open in the lightbox.
pub const GALLERY_INLINE_LIMIT: usize = 4;

/// A clickable square linking to an entity's own page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub label: String,
    pub href: String,
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

impl Tile {
    pub fn skill(skill: &Skill, base_url: &str) -> Self {
        Self {
            label: skill.name.clone(),
            href: format!("{}skill/{}", base_url, skill.slug),
            image_url: skill.image.as_ref().map(|i| i.url.clone()),
            caption: skill.usage.clone().filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn experience(experience: &Experience, base_url: &str) -> Self {
        Self {
            label: experience.name.clone(),
            href: format!("{}experience/{}", base_url, experience.slug),
            image_url: experience.image.as_ref().map(|i| i.url.clone()),
            caption: None,
        }
    }

    pub fn portfolio(summary: &PortfolioSummary, base_url: &str) -> Self {
        Self {
            label: summary.name.clone(),
            href: format!("{}portfolio/{}/", base_url, summary.slug),
            image_url: summary.image.as_ref().map(|i| i.url.clone()),
            caption: None,
        }
    }
}

/// Tiles for a list of skills, in store order.
pub fn skill_tiles(skills: &[Skill], base_url: &str) -> Vec<Tile> {
    skills.iter().map(|s| Tile::skill(s, base_url)).collect()
}

/// One gallery image as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryTile {
    pub url: String,
    pub caption: String,
    pub alt: String,
}

impl From<&GalleryImage> for GalleryTile {
    fn from(image: &GalleryImage) -> Self {
        let caption = image.title.clone().unwrap_or_default();
        let alt = image
            .file_name
            .clone()
            .unwrap_or_else(|| caption.clone());

        Self {
            url: image.url.clone(),
            caption,
            alt,
        }
    }
}

/// A project gallery split into the inline grid and the full lightbox set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    /// First [`GALLERY_INLINE_LIMIT`] images in source order
    pub inline: Vec<GalleryTile>,
    /// Every image, for the lightbox
    pub all: Vec<GalleryTile>,
    /// Number of images in the gallery
    pub total: usize,
}

impl GalleryView {
    pub fn new(images: &[GalleryImage]) -> Self {
        let all: Vec<GalleryTile> = images.iter().map(GalleryTile::from).collect();
        let inline = all.iter().take(GALLERY_INLINE_LIMIT).cloned().collect();

        Self {
            inline,
            total: all.len(),
            all,
        }
    }
}

/// An external link button on a project page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLink {
    /// `github` or `live`
    pub kind: &'static str,
    pub label: &'static str,
    pub href: String,
}

/// Everything the project detail template shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioView {
    pub name: String,
    pub image_url: Option<String>,
    pub gallery: GalleryView,
    pub actions: Vec<ActionLink>,
    pub skills: Vec<Tile>,
    pub experience: Option<Tile>,
    pub description_html: Option<String>,
}

impl PortfolioView {
    pub fn new(item: &PortfolioItem, base_url: &str) -> Self {
        let mut actions = Vec::new();
        if let Some(href) = item.github_link() {
            actions.push(ActionLink {
                kind: "github",
                label: "View Github",
                href: href.to_string(),
            });
        }
        if let Some(href) = item.live_link() {
            actions.push(ActionLink {
                kind: "live",
                label: "View Live",
                href: href.to_string(),
            });
        }

        let description_html = item.description.as_ref().and_then(|d| {
            render_document(&d.json)
                .map_err(|e| tracing::warn!("Skipping description of '{}': {}", item.slug, e))
                .ok()
        });

        Self {
            name: item.name.clone(),
            image_url: item.image_url().map(str::to_string),
            gallery: GalleryView::new(&item.gallery_collection.items),
            actions,
            skills: skill_tiles(&item.related_skills_collection.items, base_url),
            experience: item
                .related_experience
                .as_ref()
                .map(|e| Tile::experience(e, base_url)),
            description_html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::{Asset, Collection};
    use pretty_assertions::assert_eq;

    fn gallery(n: usize) -> Vec<GalleryImage> {
        (1..=n)
            .map(|i| GalleryImage {
                title: Some(format!("Shot {i}")),
                file_name: Some(format!("shot-{i}.png")),
                url: format!("https://img/shot-{i}.png"),
            })
            .collect()
    }

    fn item() -> PortfolioItem {
        PortfolioItem {
            order: Some(1),
            slug: "tracker".to_string(),
            name: "Tracker".to_string(),
            description: None,
            image: Some(Asset::from_url("https://img/cover.png")),
            live_url: None,
            github_url: None,
            related_skills_collection: Collection::default(),
            gallery_collection: Collection::default(),
            related_experience: None,
        }
    }

    #[test]
    fn truncates_gallery_to_four() {
        let view = GalleryView::new(&gallery(7));

        assert_eq!(view.total, 7);
        assert_eq!(view.all.len(), 7);
        let inline: Vec<&str> = view.inline.iter().map(|t| t.caption.as_str()).collect();
        assert_eq!(inline, vec!["Shot 1", "Shot 2", "Shot 3", "Shot 4"]);
    }

    #[test]
    fn empty_gallery() {
        let view = GalleryView::new(&[]);
        assert_eq!(view.total, 0);
        assert!(view.inline.is_empty());
    }

    #[test]
    fn short_gallery_shows_everything() {
        let view = GalleryView::new(&gallery(2));
        assert_eq!(view.inline.len(), 2);
        assert_eq!(view.total, 2);
    }

    #[test]
    fn duplicate_titles_are_kept() {
        let mut images = gallery(2);
        images[1].title = images[0].title.clone();

        let view = GalleryView::new(&images);
        assert_eq!(view.inline.len(), 2);
        assert_eq!(view.inline[0].caption, view.inline[1].caption);
        assert_ne!(view.inline[0].url, view.inline[1].url);
    }

    #[test]
    fn only_present_links_become_actions() {
        let mut project = item();
        project.live_url = Some("https://tracker.example".to_string());

        let view = PortfolioView::new(&project, "/");
        assert_eq!(
            view.actions,
            vec![ActionLink {
                kind: "live",
                label: "View Live",
                href: "https://tracker.example".to_string(),
            }]
        );

        project.github_url = Some("https://github.com/me/tracker".to_string());
        project.live_url = Some("   ".to_string());
        let view = PortfolioView::new(&project, "/");
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].kind, "github");
    }

    #[test]
    fn relations_link_to_their_pages() {
        let mut project = item();
        project.related_skills_collection = Collection::new(vec![Skill {
            slug: "rust".to_string(),
            name: "Rust".to_string(),
            usage: None,
            image: Some(Asset::from_url("https://img/rust.png")),
        }]);
        project.related_experience = Some(Experience {
            slug: "acme".to_string(),
            name: "Acme".to_string(),
            image: None,
        });

        let view = PortfolioView::new(&project, "/");

        assert_eq!(view.skills[0].href, "/skill/rust");
        assert_eq!(view.skills[0].image_url.as_deref(), Some("https://img/rust.png"));
        let experience = view.experience.unwrap();
        assert_eq!(experience.href, "/experience/acme");
        assert_eq!(experience.label, "Acme");
        assert!(experience.image_url.is_none());
    }

    #[test]
    fn renders_description() {
        let mut project = item();
        project.description = Some(folio_content::model::RichText {
            json: serde_json::from_value(serde_json::json!({
                "nodeType": "document",
                "content": [{ "nodeType": "paragraph", "content": [
                    { "nodeType": "text", "value": "Hello", "marks": [] }
                ] }]
            }))
            .unwrap(),
        });

        let view = PortfolioView::new(&project, "/");
        assert_eq!(view.description_html.as_deref(), Some("<p>Hello</p>"));
    }

    #[test]
    fn bad_description_is_skipped() {
        let mut project = item();
        project.description = Some(folio_content::model::RichText {
            json: folio_content::RichTextNode::block("paragraph", vec![]),
        });

        assert!(PortfolioView::new(&project, "/").description_html.is_none());
    }

    #[test]
    fn skill_tiles_use_base_url() {
        let skills = vec![Skill {
            slug: "go".to_string(),
            name: "Go".to_string(),
            usage: Some("CLIs".to_string()),
            image: None,
        }];

        let tiles = skill_tiles(&skills, "/site/");
        assert_eq!(tiles[0].href, "/site/skill/go");
        assert_eq!(tiles[0].caption.as_deref(), Some("CLIs"));
    }
}
