//! Generate a static snapshot of the site from the content API

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Fetch blogs and projects, then write every page; returns the file count
pub async fn run(folio: &Folio) -> Result<usize> {
    let start = std::time::Instant::now();

    let api = folio.api()?;
    if !api.is_configured() {
        tracing::warn!(
            "No content API configured (set api.base_url or {}); generating empty listings",
            crate::config::API_BASE_URL_ENV
        );
    }

    let (blogs, projects) = tokio::join!(api.list_blogs(), api.list_projects());
    tracing::info!("Fetched {} blogs and {} projects", blogs.len(), projects.len());

    let generator = Generator::new(&folio.config)?;
    let written = generator.write_site(&folio.public_dir, &blogs, &projects)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use tempfile::TempDir;

    async fn spawn_api() -> String {
        let app = Router::new()
            .route(
                "/api/v1/blogs",
                get(|| async {
                    Json(json!({"data": [
                        {"id": "first", "title": "First", "content": "<p>One</p>"},
                        {"id": "second", "title": "Second", "content": "Two"}
                    ]}))
                }),
            )
            .route(
                "/api/v1/projects",
                get(|| async { Json(json!({"data": [{"id": "p", "title": "Folio"}]})) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_generate() {
        let base = spawn_api().await;
        let dir = TempDir::new().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.config.api.base_url = base;

        assert_eq!(run(&folio).await.unwrap(), 6);
        let home = std::fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(home.contains("Featured Projects"));
        assert!(home.contains("/blogs/second/"));
        assert!(folio.public_dir.join("blogs/first/index.html").exists());
    }

    #[tokio::test]
    async fn test_generate_without_api() {
        let dir = TempDir::new().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.config.api.base_url = String::new();

        assert_eq!(run(&folio).await.unwrap(), 4);
        let list = std::fs::read_to_string(folio.public_dir.join("blogs/index.html")).unwrap();
        assert!(list.contains("No blog posts yet."));
    }
}
