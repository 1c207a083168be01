//! Asset pipeline for the site stylesheet and the gallery script.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the gallery lightbox script.
    pub fn generate_js() -> String {
        GALLERY_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* folio theme */

:root {
  --drawer-width: 240px;
  --background: #fafafa;
  --foreground: #1f2933;
  --muted: #f0f2f5;
  --border: #d9dde3;
  --primary: #1976d2;
  --primary-foreground: #ffffff;
  --error: #d32f2f;
  --radius: 5px;
  --tile-size: 128px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--drawer-width) 1fr;
  min-height: 100vh;
}

/* Drawer */
.drawer {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
}

.drawer-logo {
  display: block;
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
  margin-bottom: 1.5rem;
}

.nav-list {
  list-style: none;
}

.nav-item a {
  display: block;
  padding: 0.5rem 0.75rem;
  color: var(--foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  background: var(--border);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

/* Main content */
.main {
  padding: 1.5rem;
  min-width: 0;
}

.title,
.page-title,
.hero-title {
  text-align: center;
  margin-bottom: 1rem;
}

.hero-title {
  font-size: 3.5rem;
}

.hero-bio {
  max-width: 60rem;
  margin: 0 auto;
  text-align: center;
}

.hero-links {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  align-items: baseline;
  gap: 1rem;
  margin: 2.5rem;
  font-size: 1.5rem;
}

.hero-links a {
  color: inherit;
  text-decoration: none;
}

.hero-links a:hover {
  text-decoration: underline;
}

.divider {
  border: 0;
  border-top: 1px solid var(--border);
  margin: 1rem 0;
}

.section-title {
  font-weight: 700;
  margin: 1rem 0;
}

.panel {
  max-width: 48rem;
  margin: 2.5rem auto;
  padding: 1rem;
  border-radius: var(--radius);
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
}

.panel-title {
  text-align: center;
}

/* Tiles */
.tile-grid {
  display: flex;
  flex-wrap: wrap;
  justify-content: flex-start;
  gap: 10px;
}

.tile {
  position: relative;
  display: flex;
  flex-direction: column;
  justify-content: center;
  align-items: center;
  width: var(--tile-size);
  height: var(--tile-size);
  margin: 0.5rem;
  background-color: var(--muted);
  background-size: cover;
  background-position: center;
  border-radius: var(--radius);
  color: var(--foreground);
  text-decoration: none;
  overflow: hidden;
}

.tile-label,
.tile-caption {
  opacity: 0;
  background: rgba(255, 255, 255, 0.9);
  padding: 0 0.25rem;
  text-align: center;
  transition: opacity 0.15s;
}

.tile:hover .tile-label,
.tile:hover .tile-caption {
  opacity: 1;
}

.tile-caption {
  font-size: 0.75rem;
}

/* Project page */
.project-gallery {
  display: flex;
  justify-content: space-evenly;
  align-items: center;
  gap: 5px;
}

.project-cover {
  width: 15%;
  max-width: 40%;
}

.gallery-grid {
  display: grid;
  grid-template-columns: repeat(2, 1fr);
  gap: 15px;
  width: 60%;
  padding: 1rem;
}

.gallery-tile {
  display: block;
  color: inherit;
  text-decoration: none;
  box-shadow: 2px 0 10px rgba(0, 0, 0, 0.3);
  border-radius: var(--radius);
  overflow: hidden;
  padding: 0.5rem;
}

.gallery-tile img {
  width: 100%;
  height: 300px;
  object-fit: cover;
}

.gallery-caption {
  display: block;
  margin-top: 1rem;
  text-align: center;
  font-weight: 700;
}

.actions {
  display: flex;
  justify-content: center;
  gap: 1rem;
  margin: 1.5rem;
}

.button {
  display: inline-block;
  padding: 0.4rem 1rem;
  border: 1px solid var(--primary);
  border-radius: var(--radius);
  background: transparent;
  color: var(--primary);
  font: inherit;
  text-decoration: none;
  cursor: pointer;
}

.button:hover {
  background: rgba(25, 118, 210, 0.08);
}

.project-description,
.project-skills,
.project-experience {
  padding: 1.5rem;
}

.project-description p {
  margin-bottom: 1rem;
}

/* Lightbox */
.lightbox {
  position: fixed;
  inset: 0;
  display: flex;
  flex-direction: column;
  justify-content: center;
  align-items: center;
  background: rgba(0, 0, 0, 0.85);
  color: #ffffff;
  z-index: 1000;
}

.lightbox img {
  max-width: 90vw;
  max-height: 80vh;
}

.lightbox-caption {
  margin-top: 1rem;
}

.lightbox button {
  position: absolute;
  background: none;
  border: 0;
  color: inherit;
  font-size: 2rem;
  cursor: pointer;
}

.lightbox-close { top: 1rem; right: 1.5rem; }
.lightbox-prev { left: 1.5rem; }
.lightbox-next { right: 1.5rem; }

/* Loading and errors */
.skeleton-line,
.skeleton-tile {
  background: var(--muted);
  border-radius: var(--radius);
  animation: pulse 1.5s ease-in-out infinite;
}

.skeleton-line {
  height: 1rem;
  margin: 0.75rem auto;
  max-width: 60rem;
}

.skeleton-title {
  height: 3rem;
  max-width: 30rem;
}

.skeleton-grid {
  display: flex;
  flex-wrap: wrap;
  gap: 10px;
  margin-top: 2rem;
}

.skeleton-tile {
  width: var(--tile-size);
  height: var(--tile-size);
}

@keyframes pulse {
  50% {
    opacity: 0.5;
  }
}

.fetch-error {
  color: var(--error);
}

.not-found {
  text-align: center;
  margin-top: 20vh;
}

@media (max-width: 1024px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .drawer {
    position: static;
    height: auto;
  }

  .project-gallery {
    flex-direction: column;
  }

  .project-cover {
    width: 40%;
  }

  .gallery-grid {
    width: 100%;
  }
}
"#;

// Opens `a[data-gallery]` links in an overlay. Inline tiles open the inline
// set; the "View All" button opens every image listed under `.gallery-all`.
const GALLERY_JS: &str = r#"// folio gallery lightbox
(function() {
  'use strict';

  function collect(selector) {
    return Array.from(document.querySelectorAll(selector)).map(link => ({
      src: link.getAttribute('href'),
      caption: link.dataset.caption || ''
    }));
  }

  function open(items, start) {
    if (!items.length) return;
    let index = start || 0;

    const overlay = document.createElement('div');
    overlay.className = 'lightbox';
    overlay.innerHTML =
      '<button type="button" class="lightbox-close" aria-label="Close">&times;</button>' +
      '<button type="button" class="lightbox-prev" aria-label="Previous">&lsaquo;</button>' +
      '<img alt="">' +
      '<div class="lightbox-caption"></div>' +
      '<button type="button" class="lightbox-next" aria-label="Next">&rsaquo;</button>';

    const img = overlay.querySelector('img');
    const caption = overlay.querySelector('.lightbox-caption');

    function show() {
      img.src = items[index].src;
      img.alt = items[index].caption;
      caption.textContent = items[index].caption;
    }

    // Looping navigation
    function step(delta) {
      index = (index + delta + items.length) % items.length;
      show();
    }

    function close() {
      document.removeEventListener('keydown', onKey);
      overlay.remove();
    }

    function onKey(event) {
      if (event.key === 'Escape') close();
      if (event.key === 'ArrowLeft') step(-1);
      if (event.key === 'ArrowRight') step(1);
    }

    overlay.querySelector('.lightbox-close').addEventListener('click', close);
    overlay.querySelector('.lightbox-prev').addEventListener('click', () => step(-1));
    overlay.querySelector('.lightbox-next').addEventListener('click', () => step(1));
    overlay.addEventListener('click', event => {
      if (event.target === overlay) close();
    });
    document.addEventListener('keydown', onKey);

    show();
    document.body.appendChild(overlay);
  }

  document.querySelectorAll('a[data-gallery="inline"]').forEach((link, i) => {
    link.addEventListener('click', event => {
      event.preventDefault();
      open(collect('a[data-gallery="inline"]'), i);
    });
  });

  document.querySelectorAll('.gallery-open').forEach(button => {
    button.addEventListener('click', () => open(collect('a[data-gallery="all"]'), 0));
  });
})();
"#;
