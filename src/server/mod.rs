//! Local server rendering blog pages on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::highlight::SyntectHighlighter;
use crate::page::PageController;
use crate::templates::{PageKind, PageShell};
use crate::transport::SiteTransport;
use crate::Nlob;

/// Server state
struct ServerState {
    controller: PageController<SiteTransport>,
    list_shell: PageShell,
    post_shell: PageShell,
    highlight_css: String,
    site_dir: PathBuf,
}

/// Start the server
pub async fn start(nlob: &Nlob, ip: &str, port: u16, open: bool) -> Result<()> {
    let highlight_css = if nlob.config.highlight.enable {
        SyntectHighlighter::new(&nlob.config.highlight.theme)
            .css()
            .unwrap_or_else(|e| {
                tracing::warn!("No highlight stylesheet: {}", e);
                String::new()
            })
    } else {
        String::new()
    };

    let state = Arc::new(ServerState {
        controller: nlob.controller(),
        list_shell: nlob.page_shell(PageKind::List)?,
        post_shell: nlob.page_shell(PageKind::Post)?,
        highlight_css,
        site_dir: nlob.base_dir.clone(),
    });

    let post_route = format!("/{}", nlob.config.post_page_name());
    let app = Router::new()
        .route("/", get(list_handler))
        .route("/index.html", get(list_handler))
        .route(&post_route, get(post_handler))
        .route("/highlight.css", get(highlight_css_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let page = state.controller.render(state.list_shell.clone(), None).await;
    Html(page.into_html())
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let post_id = params.get("post").map(String::as_str);
    let page = state
        .controller
        .render(state.post_shell.clone(), post_id)
        .await;
    Html(page.into_html())
}

async fn highlight_css_handler(State(state): State<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.highlight_css.clone(),
    )
        .into_response()
}

/// Everything else comes straight from the site directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.site_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
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
