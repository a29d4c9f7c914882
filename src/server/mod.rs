//! Live server - renders every page from fresh CMS data on each request

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::StrapiClient;
use crate::generator::Generator;
use crate::Press;

/// Server state
pub struct ServerState {
    generator: Generator,
    client: StrapiClient,
}

impl ServerState {
    pub fn new(press: &Press) -> Result<Self> {
        Ok(Self {
            generator: Generator::new(press)?,
            client: press.client()?,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/articles/:slug", get(article_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(press: &Press, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(press)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Content source: {}", press.config.api_base());
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let site = state.generator.load_site(&state.client).await;

    let articles = match state.client.get_articles().await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!("Failed to load articles: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "Failed to load articles");
        }
    };

    match state.generator.index_page(&site, &articles) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

/// Article page; unknown slugs and fetch failures show the not-found page
async fn article_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let site = state.generator.load_site(&state.client).await;

    let article = match state.client.get_article(&slug).await {
        Ok(Some(article)) => article,
        Ok(None) => return not_found(&state, &site),
        Err(e) => {
            tracing::error!("Error fetching article {}: {}", slug, e);
            return not_found(&state, &site);
        }
    };

    match state.generator.article_page(&site, &article) {
        Ok(page) => {
            if !page.diagnostics.is_empty() {
                tracing::debug!(
                    "Rendered {} with {} block diagnostics",
                    slug,
                    page.diagnostics.len()
                );
            }
            Html(page.html).into_response()
        }
        Err(e) => render_failure(e),
    }
}

async fn not_found_handler(State(state): State<Arc<ServerState>>) -> Response {
    let site = state.generator.site_data(None);
    not_found(&state, &site)
}

fn not_found(state: &ServerState, site: &crate::templates::SiteData) -> Response {
    match state.generator.not_found_page(site) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: anyhow::Error) -> Response {
    tracing::error!("Template rendering failed: {:#}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, message.to_string()).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
