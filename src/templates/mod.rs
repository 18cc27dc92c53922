//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is off: the generator
//! escapes every API-supplied field before it reaches a context.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{MenuItem, ProfileConfig};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("blogs.html", include_str!("site/blogs.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            (
                "partials/blog_card.html",
                include_str!("site/partials/blog_card.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub language: String,
}

/// Per-page `<head>` data
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Pre-rendered Open Graph and Twitter tags
    pub meta_tags: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub path: String,
    pub thumbnail: Option<String>,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub read_time: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    pub date_iso: Option<String>,
    pub read_time: u32,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    /// Rendered body
    pub content: String,
}

/// Values shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteData<'a> {
    pub config: ConfigData,
    pub menu: &'a [MenuItem],
    pub profile: &'a ProfileConfig,
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }
}
