//! Content API client
//!
//! Blogs and projects live in an external service exposing
//! `/api/v1/blogs`, `/api/v1/blogs/{id}` and `/api/v1/projects`, each
//! wrapping its payload in `{"data": ...}`. Responses are kept for a
//! revalidation window so page renders do not hit the API every time.
//!
//! Pages never fail because of the API: the plain accessors log the error
//! and fall back to an empty list or `None`. The `try_*` variants return
//! the underlying [`ApiError`].

mod error;

pub use error::{ApiError, Result};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::ApiConfig;
use crate::content::{Blog, Envelope, Project};

/// Characters escaped in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

struct CachedBody {
    body: String,
    fetched_at: Instant,
}

/// Client for the content API
pub struct ContentApi {
    client: reqwest::Client,
    base_url: String,
    blog_ttl: Duration,
    project_ttl: Duration,
    cache: Mutex<HashMap<String, CachedBody>>,
}

impl ContentApi {
    /// Create a client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            blog_ttl: Duration::from_secs(config.revalidate_secs),
            project_ttl: Duration::from_secs(config.projects_revalidate_secs),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Whether a base URL is set
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// All blogs, or an empty list when the API is unavailable
    pub async fn list_blogs(&self) -> Vec<Blog> {
        self.try_list_blogs().await.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch blogs: {}", e);
            Vec::new()
        })
    }

    /// One blog, or `None` when it is missing or the API is unavailable
    pub async fn get_blog(&self, id: &str) -> Option<Blog> {
        self.try_get_blog(id).await.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch blog with ID {}: {}", id, e);
            None
        })
    }

    /// All projects, or an empty list when the API is unavailable
    pub async fn list_projects(&self) -> Vec<Project> {
        self.try_list_projects().await.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch projects: {}", e);
            Vec::new()
        })
    }

    pub async fn try_list_blogs(&self) -> Result<Vec<Blog>> {
        let blogs: Option<Vec<Blog>> = self.fetch_data("/api/v1/blogs", self.blog_ttl).await?;
        Ok(blogs.unwrap_or_default())
    }

    /// A 404 or a `null` payload is reported as `Ok(None)`
    pub async fn try_get_blog(&self, id: &str) -> Result<Option<Blog>> {
        let path = format!("/api/v1/blogs/{}", utf8_percent_encode(id, SEGMENT));
        match self.fetch_data(&path, self.blog_ttl).await {
            Ok(blog) => Ok(blog),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn try_list_projects(&self) -> Result<Vec<Project>> {
        let projects: Option<Vec<Project>> =
            self.fetch_data("/api/v1/projects", self.project_ttl).await?;
        Ok(projects.unwrap_or_default())
    }

    /// Drop every cached response
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    async fn fetch_data<T: DeserializeOwned>(&self, path: &str, ttl: Duration) -> Result<T> {
        if !self.is_configured() {
            return Err(ApiError::NotConfigured);
        }
        let url = format!("{}{}", self.base_url, path);

        let (body, fresh) = match self.cached(&url, ttl) {
            Some(body) => {
                tracing::debug!("Cache hit: {}", url);
                (body, false)
            }
            None => {
                tracing::debug!("GET {}", url);
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ApiError::Status {
                        url,
                        status: status.as_u16(),
                    });
                }
                (response.text().await?, true)
            }
        };

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| ApiError::Decode {
                url: url.clone(),
                source,
            })?;
        if fresh {
            self.store(url, body, ttl);
        }

        Ok(envelope.data)
    }

    fn cached(&self, url: &str, ttl: Duration) -> Option<String> {
        if ttl.is_zero() {
            return None;
        }
        let cache = self.cache.lock().ok()?;
        cache
            .get(url)
            .filter(|entry| entry.fetched_at.elapsed() < ttl)
            .map(|entry| entry.body.clone())
    }

    fn store(&self, url: String, body: String, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(
                url,
                CachedBody {
                    body,
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}
