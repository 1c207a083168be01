//! Template engine for rendering site pages.

use minijinja::{context, Environment};
use serde::Serialize;

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the active page
    pub active: bool,
}

/// Layout context shared by every page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Document title
    pub title: String,
    /// Site owner / site title
    pub site_title: String,
    /// Meta description
    pub description: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Base URL
    pub base_url: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .unwrap_or_else(|e| panic!("Failed to add {} template: {}", name, e));
        }

        Self { env }
    }

    /// Render a page template inside the site layout.
    ///
    /// `view` is exposed to the template as `view`.
    pub fn render_page<V: Serialize>(
        &self,
        template: &str,
        context: &Context,
        view: V,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            nav => &context.nav,
            base_url => &context.base_url,
            view => view,
        })
    }

    /// Render the bare error fragment shown when a list query fails.
    pub fn render_fetch_error(&self, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template("fetch_error.html")?
            .render(context! { message => message })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: [(&str, &str); 10] = [
    ("base.html", BASE_TEMPLATE),
    ("macros.html", MACROS_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("skills.html", SKILLS_TEMPLATE),
    ("portfolio.html", PORTFOLIO_TEMPLATE),
    ("portfolio_index.html", PORTFOLIO_INDEX_TEMPLATE),
    ("page.html", PAGE_TEMPLATE),
    ("loading.html", LOADING_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
    ("fetch_error.html", FETCH_ERROR_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ description }}">
  <link rel="icon" href="{{ base_url }}favicon.ico">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="drawer">
      <div class="drawer-header">
        <a href="{{ base_url }}" class="drawer-logo">{{ site_title }}</a>
      </div>
      <ul class="nav-list">
      {% for item in nav %}
        <li class="nav-item{% if item.active %} active{% endif %}"><a href="{{ item.path }}">{{ item.title }}</a></li>
      {% endfor %}
      </ul>
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/gallery.js" defer></script>
</body>
</html>"##;

const MACROS_TEMPLATE: &str = r##"{% macro tile_grid(tiles) %}
<div class="tile-grid">
{% for tile in tiles %}
  <a class="tile" href="{{ tile.href }}"{% if tile.image_url %} style="background-image: url('{{ tile.image_url }}')"{% endif %}>
    <span class="tile-label">{{ tile.label }}</span>
    {% if tile.caption %}<span class="tile-caption">{{ tile.caption }}</span>{% endif %}
  </a>
{% endfor %}
</div>
{% endmacro %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "macros.html" import tile_grid %}
<section class="hero">
  <h1 class="hero-title">{{ site_title }}</h1>
  <div class="hero-bio">{{ view.bio | safe }}</div>
  <div class="hero-links">
    <h4>Check out my:</h4>
    <a href="{{ base_url }}experience/">Experience</a>
    <a href="{{ base_url }}portfolio/">Portfolio</a>
  </div>
</section>
<hr class="divider">
<h2 class="section-title">My Skill Set</h2>
{{ tile_grid(view.tiles) }}
{% endblock %}"##;

const SKILLS_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "macros.html" import tile_grid %}
<section class="panel">
  <h2 class="panel-title">{{ view.heading }}</h2>
  <hr class="divider">
  {{ tile_grid(view.tiles) }}
</section>
{% endblock %}"##;

const PORTFOLIO_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "macros.html" import tile_grid %}
<article class="project">
  <h1 class="page-title">Portfolio Project: {{ view.name }}</h1>
  <hr class="divider">

  <section class="project-gallery">
    {% if view.image_url %}<img class="project-cover" src="{{ view.image_url }}" alt="{{ view.name }}">{% endif %}
    <div class="gallery-grid">
    {% for image in view.gallery.inline %}
      <a class="gallery-tile" href="{{ image.url }}" data-gallery="inline" data-caption="{{ image.caption }}">
        <img src="{{ image.url }}" alt="{{ image.alt }}" loading="lazy">
        <span class="gallery-caption">{{ image.caption }}</span>
      </a>
    {% endfor %}
    </div>
  </section>

  <div class="actions">
  {% for action in view.actions %}
    <a class="button button-{{ action.kind }}" href="{{ action.href }}" target="_blank" rel="noopener">{{ action.label }}</a>
  {% endfor %}
    <button class="button gallery-open" type="button" data-gallery-count="{{ view.gallery.total }}">View All {{ view.gallery.total }} Images</button>
  </div>
  <div class="gallery-all" hidden>
  {% for image in view.gallery.all %}
    <a href="{{ image.url }}" data-gallery="all" data-caption="{{ image.caption }}"></a>
  {% endfor %}
  </div>
  <hr class="divider">

  <section class="project-skills">
    <h2 class="section-title">Skills Used:</h2>
    {{ tile_grid(view.skills) }}
  </section>
  <hr class="divider">

  {% if view.description_html %}
  <section class="project-description">
    {{ view.description_html | safe }}
  </section>
  <hr class="divider">
  {% endif %}

  {% if view.experience %}
  <section class="project-experience">
    <h2 class="section-title">Related Experience:</h2>
    {{ tile_grid([view.experience]) }}
  </section>
  {% endif %}
</article>
{% endblock %}"##;

const PORTFOLIO_INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "macros.html" import tile_grid %}
<h1 class="title">Portfolio</h1>
{% if view.tiles %}
{{ tile_grid(view.tiles) }}
{% else %}
<p class="empty">No projects yet.</p>
{% endif %}
{% endblock %}"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1 class="title">{{ view.heading }}</h1>
{% endblock %}"##;

const LOADING_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="skeleton" aria-busy="true">
  <div class="skeleton-line skeleton-title"></div>
  <div class="skeleton-line"></div>
  <div class="skeleton-line"></div>
  <div class="skeleton-grid">
    {% for _ in range(6) %}<div class="skeleton-tile"></div>{% endfor %}
  </div>
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="not-found">
  <h1 class="title">404</h1>
  <p>This page could not be found.</p>
</div>
{% endblock %}"##;

const FETCH_ERROR_TEMPLATE: &str =
    r##"<span class="fetch-error" style="color:red">{{ message }}</span>"##;
