//! Site server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use folio_client::{fetch_skills, ContentSource};
use folio_static::{PageRenderer, SiteConfig};

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing the built site
    pub dist_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("dist"),
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Output directory not found: {0}. Run 'folio build' first.")]
    MissingOutput(PathBuf),

    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// Shared server state.
struct AppState {
    source: Arc<dyn ContentSource>,
    renderer: PageRenderer,
}

/// Pages rendered per request.
#[derive(Debug, Clone, Copy)]
enum ListPage {
    Home,
    Backend,
}

/// Site server.
pub struct SiteServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl SiteServer {
    /// Create a new site server reading from `source`.
    pub fn new(config: ServerConfig, source: Arc<dyn ContentSource>, site: SiteConfig) -> Self {
        let state = Arc::new(AppState {
            source,
            renderer: PageRenderer::new(site),
        });
        Self { config, state }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let dist = &self.config.dist_dir;
        let static_files =
            ServeDir::new(dist).not_found_service(ServeFile::new(dist.join("404.html")));

        Router::new()
            .route("/", get(home_handler))
            .route("/backend", get(backend_handler))
            .route("/backend/", get(backend_handler))
            .fallback_service(static_files)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state))
    }

    /// Start the site server.
    pub async fn start(self) -> Result<(), ServerError> {
        if !self.config.dist_dir.is_dir() {
            return Err(ServerError::MissingOutput(self.config.dist_dir.clone()));
        }

        let addr = resolve_addr(&self.config.host, self.config.port).await?;

        let app = self.router();

        tracing::info!("Serving {} at http://{}", self.config.dist_dir.display(), addr);

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Could not open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Resolve `host:port`, accepting IP literals and hostnames such as `localhost`.
async fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let raw = format!("{}:{}", host, port);
    let mut addrs = tokio::net::lookup_host(raw.clone())
        .await
        .map_err(|e| ServerError::InvalidAddress(format!("{}: {}", raw, e)))?;

    addrs.next().ok_or(ServerError::InvalidAddress(raw))
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    render_list(&state, ListPage::Home).await
}

async fn backend_handler(State(state): State<Arc<AppState>>) -> Response {
    render_list(&state, ListPage::Backend).await
}

/// Fetch skills and render a list page.
async fn render_list(state: &AppState, page: ListPage) -> Response {
    // Fetch failures render in the page; the response itself stays 200.
    let outcome = fetch_skills(state.source.as_ref()).await;

    let rendered = match page {
        ListPage::Home => state.renderer.render_home(&outcome),
        ListPage::Backend => state.renderer.render_backend(&outcome),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {:?}: {}", page, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
