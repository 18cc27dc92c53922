//! Site server rendering pages on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::ContentApi;
use crate::generator::Generator;
use crate::Folio;

/// Server state
pub struct ServerState {
    generator: Generator,
    api: ContentApi,
    public_dir: PathBuf,
}

impl ServerState {
    pub fn new(generator: Generator, api: ContentApi, public_dir: PathBuf) -> Self {
        Self {
            generator,
            api,
            public_dir,
        }
    }
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let api = folio.api()?;
    if !api.is_configured() {
        tracing::warn!(
            "No content API configured; blog and project listings will be empty"
        );
    }

    let state = Arc::new(ServerState::new(
        Generator::new(&folio.config)?,
        api,
        folio.public_dir.clone(),
    ));
    let app = router(state);

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

/// Routes for every page; anything else is looked up in the public directory
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/about/", get(about_handler))
        .route("/blogs", get(blogs_handler))
        .route("/blogs/", get(blogs_handler))
        .route("/blogs/:id", get(blog_handler))
        .route("/blogs/:id/", get(blog_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let (blogs, projects) = tokio::join!(state.api.list_blogs(), state.api.list_projects());
    page(state.generator.render_home(&blogs, &projects))
}

async fn about_handler(State(state): State<Arc<ServerState>>) -> Response {
    page(state.generator.render_about())
}

async fn blogs_handler(State(state): State<Arc<ServerState>>) -> Response {
    let blogs = state.api.list_blogs().await;
    page(state.generator.render_blog_list(&blogs))
}

async fn blog_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match state.api.get_blog(&id).await {
        Some(blog) => page(state.generator.render_blog(&blog)),
        None => {
            tracing::debug!("Blog not found: {}", id);
            match state.generator.render_not_found() {
                Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                Err(e) => render_error(e),
            }
        }
    }
}

/// Static files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

fn page(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_error(e),
    }
}

fn render_error(e: anyhow::Error) -> Response {
    tracing::error!("Failed to render page: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, SiteConfig};
    use axum::Json;
    use serde_json::json;
    use tempfile::TempDir;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn mock_api() -> String {
        let app = Router::new()
            .route(
                "/api/v1/blogs",
                get(|| async {
                    Json(json!({"data": [
                        {"id": "hello", "title": "Hello World", "content": "<p>Hi &amp; bye</p>", "tags": ["intro"]}
                    ]}))
                }),
            )
            .route(
                "/api/v1/blogs/:id",
                get(|Path(id): Path<String>| async move {
                    if id == "hello" {
                        (
                            StatusCode::OK,
                            Json(json!({"data": {"id": "hello", "title": "Hello World", "content": "<p>Hi &amp; bye</p>"}})),
                        )
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"message": "Blog not found"})))
                    }
                }),
            )
            .route(
                "/api/v1/projects",
                get(|| async { Json(json!({"data": []})) }),
            );
        serve(app).await
    }

    async fn spawn_site(public_dir: PathBuf) -> String {
        let api_base = mock_api().await;
        let config = SiteConfig::default();
        let api = ContentApi::new(&ApiConfig {
            base_url: api_base,
            ..Default::default()
        })
        .unwrap();
        let state = Arc::new(ServerState::new(
            Generator::new(&config).unwrap(),
            api,
            public_dir,
        ));
        serve(router(state)).await
    }

    #[tokio::test]
    async fn test_pages() {
        let dir = TempDir::new().unwrap();
        let site = spawn_site(dir.path().to_path_buf()).await;

        let home = reqwest::get(&site).await.unwrap();
        assert_eq!(home.status(), 200);
        assert!(home.text().await.unwrap().contains("Hello World"));

        let about = reqwest::get(format!("{}/about", site)).await.unwrap();
        assert_eq!(about.status(), 200);

        let blogs = reqwest::get(format!("{}/blogs/", site)).await.unwrap();
        let body = blogs.text().await.unwrap();
        assert!(body.contains("/blogs/hello/"));
        assert!(body.contains("intro"));
    }

    #[tokio::test]
    async fn test_blog_detail() {
        let dir = TempDir::new().unwrap();
        let site = spawn_site(dir.path().to_path_buf()).await;

        let response = reqwest::get(format!("{}/blogs/hello", site)).await.unwrap();
        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains("<p>Hi &amp; bye</p>"));
        assert!(body.contains("<title>Hello World | Jeevan KC</title>"));

        let missing = reqwest::get(format!("{}/blogs/nope", site)).await.unwrap();
        assert_eq!(missing.status(), 404);
        assert!(missing.text().await.unwrap().contains("Blog Post Not Found"));
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("robots.txt"), "User-agent: *").unwrap();
        let site = spawn_site(dir.path().to_path_buf()).await;

        let robots = reqwest::get(format!("{}/robots.txt", site)).await.unwrap();
        assert_eq!(robots.status(), 200);
        assert_eq!(robots.text().await.unwrap(), "User-agent: *");

        let missing = reqwest::get(format!("{}/nothing.css", site)).await.unwrap();
        assert_eq!(missing.status(), 404);
    }
}
