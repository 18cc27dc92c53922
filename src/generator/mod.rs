//! Generator module - renders site pages with the built-in Tera templates

use anyhow::Result;
use chrono::Datelike;
use std::fs;
use std::path::Path;

use tera::Context;

use crate::config::SiteConfig;
use crate::content::{Blog, MarkdownRenderer, Project, EXCERPT_LEN};
use crate::helpers::{
    blog_path, date_xml, full_url_for, html_escape, meta_generator, open_graph, truncate,
    twitter_card, OpenGraph,
};
use crate::templates::{
    BlogCard, BlogDetail, ConfigData, PageMeta, ProjectCard, SiteData, TemplateRenderer,
};

/// Title used when a blog cannot be found
pub const NOT_FOUND_TITLE: &str = "Blog Post Not Found";

const PROJECT_SUMMARY_LEN: usize = 120;

/// Page renderer for the portfolio and blog
pub struct Generator {
    config: SiteConfig,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            markdown: MarkdownRenderer::from_config(&config.highlight),
            templates: TemplateRenderer::new()?,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Home page with featured projects and latest blogs
    pub fn render_home(&self, blogs: &[Blog], projects: &[Project]) -> Result<String> {
        let count = self.config.latest_count;
        let blogs: Vec<BlogCard> = blogs.iter().take(count).map(|b| self.blog_card(b)).collect();
        let projects: Vec<ProjectCard> = projects.iter().take(count).map(project_card).collect();

        let meta = self.page_meta(None, &self.config.description, "", None, None);
        let mut context = self.base_context(&meta);
        context.insert("blogs", &blogs);
        context.insert("projects", &projects);
        self.templates.render("home.html", &context)
    }

    /// About page built from the profile configuration
    pub fn render_about(&self) -> Result<String> {
        let description = self.config.profile.tagline.clone();
        let meta = self.page_meta(Some("About Me"), &description, "about/", None, None);
        let context = self.base_context(&meta);
        self.templates.render("about.html", &context)
    }

    /// Listing of every blog
    pub fn render_blog_list(&self, blogs: &[Blog]) -> Result<String> {
        let cards: Vec<BlogCard> = blogs.iter().map(|b| self.blog_card(b)).collect();
        let meta = self.page_meta(Some("Blogs"), &self.config.description, "blogs/", None, None);
        let mut context = self.base_context(&meta);
        context.insert("blogs", &cards);
        self.templates.render("blogs.html", &context)
    }

    /// Blog detail page: normalizes the body, renders it and fills metadata
    pub fn render_blog(&self, blog: &Blog) -> Result<String> {
        let normalized = blog.normalized_content();
        let content = self.markdown.render(&normalized)?;
        let description = blog.meta_description();
        let date_iso = blog.created().map(|d| date_xml(&d));

        let meta = self.page_meta(
            Some(&blog.title),
            &description,
            &format!("blogs/{}/", blog.id),
            blog.thumbnail.as_deref(),
            date_iso.as_deref(),
        );

        let detail = BlogDetail {
            id: html_escape(&blog.id),
            title: html_escape(&blog.title),
            date: html_escape(&blog.published_on()),
            date_iso,
            read_time: blog.read_time(self.config.words_per_minute),
            thumbnail: blog.thumbnail.as_deref().map(html_escape),
            tags: escape_all(&blog.tags),
            content,
        };

        let mut context = self.base_context(&meta);
        context.insert("blog", &detail);
        self.templates.render("blog.html", &context)
    }

    /// Page shown for an unknown blog id
    pub fn render_not_found(&self) -> Result<String> {
        let meta = PageMeta {
            title: NOT_FOUND_TITLE.to_string(),
            description: String::new(),
            canonical: full_url_for(&self.config, "blogs/"),
            meta_tags: String::new(),
        };
        let mut context = self.base_context(&meta);
        context.insert("heading", NOT_FOUND_TITLE);
        self.templates.render("not_found.html", &context)
    }

    /// Write every page into `public_dir`; returns the number of files written
    ///
    /// A blog that fails to render is logged and skipped.
    pub fn write_site(
        &self,
        public_dir: &Path,
        blogs: &[Blog],
        projects: &[Project],
    ) -> Result<usize> {
        fs::create_dir_all(public_dir)?;
        let mut written = 0;

        write_page(public_dir, "", &self.render_home(blogs, projects)?)?;
        write_page(public_dir, "about", &self.render_about()?)?;
        write_page(public_dir, "blogs", &self.render_blog_list(blogs)?)?;
        fs::write(public_dir.join("404.html"), self.render_not_found()?)?;
        written += 4;

        for blog in blogs {
            if blog.id.is_empty() || blog.id.contains(['/', '\\']) || blog.id.starts_with('.') {
                tracing::warn!("Skipping blog with unusable id {:?}", blog.id);
                continue;
            }
            let html = match self.render_blog(blog) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Failed to render blog {}: {}", blog.id, e);
                    continue;
                }
            };
            write_page(public_dir, &format!("blogs/{}", blog.id), &html)?;
            tracing::debug!("Generated: blogs/{}/index.html", blog.id);
            written += 1;
        }

        Ok(written)
    }

    fn blog_card(&self, blog: &Blog) -> BlogCard {
        BlogCard {
            id: html_escape(&blog.id),
            title: html_escape(&blog.title),
            path: html_escape(&blog_path(&self.config, &blog.id)),
            thumbnail: blog.thumbnail.as_deref().map(html_escape),
            date: html_escape(&blog.published_on()),
            excerpt: html_escape(&blog.excerpt(EXCERPT_LEN)),
            tags: escape_all(&blog.tags),
            read_time: blog.read_time(self.config.words_per_minute),
        }
    }

    fn page_meta(
        &self,
        title: Option<&str>,
        description: &str,
        path: &str,
        image: Option<&str>,
        published_time: Option<&str>,
    ) -> PageMeta {
        let canonical = full_url_for(&self.config, path);
        let og_title = title.unwrap_or(&self.config.title);
        let og = open_graph(&OpenGraph {
            title: og_title,
            description,
            url: &canonical,
            image,
            site_name: &self.config.title,
            published_time,
        });
        let twitter = twitter_card(og_title, description, image);

        PageMeta {
            title: html_escape(&self.config.page_title(title)),
            description: html_escape(description),
            canonical: html_escape(&canonical),
            meta_tags: format!("{}\n{}", og, twitter),
        }
    }

    fn base_context(&self, meta: &PageMeta) -> Context {
        let config = ConfigData {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            author: self.config.author.clone(),
            url: self.config.url.clone(),
            root: self.config.root.clone(),
            language: self.config.language.clone(),
        };
        let site = SiteData {
            config,
            menu: &self.config.menu,
            profile: &self.config.profile,
            year: chrono::Utc::now().year(),
        };

        let mut context = Context::new();
        context.insert("config", &site.config);
        context.insert("menu", site.menu);
        context.insert("profile", site.profile);
        context.insert("year", &site.year);
        context.insert("generator", &meta_generator());
        context.insert("page", meta);
        context
    }
}

fn project_card(project: &Project) -> ProjectCard {
    let description = project.description.as_deref().unwrap_or_default();
    ProjectCard {
        id: html_escape(&project.id),
        title: html_escape(&project.title),
        description: html_escape(&truncate(description, PROJECT_SUMMARY_LEN, None)),
        thumbnail: project.thumbnail.as_deref().map(html_escape),
        technologies: escape_all(&project.technologies),
        live_url: project.live_url.as_deref().map(html_escape),
        github_url: project.github_url.as_deref().map(html_escape),
    }
}

fn escape_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| html_escape(v)).collect()
}

/// Write `html` to `<dir>/<route>/index.html`
fn write_page(public_dir: &Path, route: &str, html: &str) -> Result<()> {
    let dir = if route.is_empty() {
        public_dir.to_path_buf()
    } else {
        public_dir.join(route)
    };
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_blog() -> Blog {
        Blog {
            id: "b1".to_string(),
            title: "Rust & Me".to_string(),
            content: "<h1>Title</h1><p>Line one.</p><p>Line two with <code>code</code>.</p>"
                .to_string(),
            created_at: Some("2025-01-05T10:00:00.000Z".to_string()),
            tags: vec!["rust".to_string()],
            thumbnail: Some("https://img.example.com/b1.png".to_string()),
            ..Default::default()
        }
    }

    fn generator() -> Generator {
        Generator::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_render_blog() {
        let html = generator().render_blog(&sample_blog()).unwrap();
        assert!(html.contains("<title>Rust &amp; Me | Jeevan KC</title>"));
        assert!(html.contains("<h1>Rust &amp; Me</h1>"));
        assert!(html.contains("<p>Title</p>"));
        assert!(html.contains("<p>Line one.</p>"));
        assert!(html.contains("<p>Line two with code.</p>"));
        assert!(html.contains("January 5, 2025"));
        assert!(html.contains("1 min read"));
        assert!(html.contains("summary_large_image"));
        assert!(html.contains(r#"content="article""#));
        assert!(html.contains(r#"<meta name="description" content="Title Line one."#));
    }

    #[test]
    fn test_render_blog_without_date() {
        let blog = Blog {
            id: "b2".to_string(),
            title: "Undated".to_string(),
            content: "Hello".to_string(),
            read_time: Some(9),
            ..Default::default()
        };
        let html = generator().render_blog(&blog).unwrap();
        assert!(html.contains("9 min read"));
        assert!(!html.contains("Published on"));
        assert!(html.contains(r#"content="website""#));
    }

    #[test]
    fn test_render_home_limits_cards() {
        let blogs: Vec<Blog> = (0..5)
            .map(|i| Blog {
                id: format!("b{}", i),
                title: format!("Post {}", i),
                content: "x".to_string(),
                ..Default::default()
            })
            .collect();
        let projects = vec![Project {
            id: "p".to_string(),
            title: "Folio".to_string(),
            technologies: vec!["Rust".to_string()],
            ..Default::default()
        }];
        let html = generator().render_home(&blogs, &projects).unwrap();
        assert!(html.contains("Post 2"));
        assert!(!html.contains("Post 3"));
        assert!(html.contains("Featured Projects"));
        assert!(html.contains("/blogs/b0/"));
    }

    #[test]
    fn test_render_home_empty() {
        let html = generator().render_home(&[], &[]).unwrap();
        assert!(html.contains("Hey, I'm Jeevan KC"));
        assert!(!html.contains("Latest Blogs"));
        assert!(!html.contains("Featured Projects"));
    }

    #[test]
    fn test_render_blog_list() {
        let html = generator().render_blog_list(&[sample_blog()]).unwrap();
        assert!(html.contains("Rust &amp; Me"));
        assert!(html.contains("Title Line one. Line two with code."));

        let empty = generator().render_blog_list(&[]).unwrap();
        assert!(empty.contains("No blog posts yet."));
    }

    #[test]
    fn test_render_about() {
        let html = generator().render_about().unwrap();
        assert!(html.contains("About Me | Jeevan KC"));
        assert!(html.contains("My Skills"));
        assert!(html.contains(r#"<span class="tag">Distributed Systems</span>"#));
        assert!(html.contains("Work Experience"));
        assert!(html.contains("ERP Implementation Specialist"));
        assert!(html.contains("2020 - Present"));
    }

    #[test]
    fn test_render_about_without_skills() {
        let mut config = SiteConfig::default();
        config.profile.skills.clear();
        config.profile.experience.clear();
        let html = Generator::new(&config).unwrap().render_about().unwrap();
        assert!(!html.contains("My Skills"));
        assert!(!html.contains("Work Experience"));
    }

    #[test]
    fn test_render_home_contact() {
        let html = generator().render_home(&[], &[]).unwrap();
        assert!(html.contains("Let's Work Together"));
        assert!(html.contains(r#"<a class="button" href="mailto:jkc5186@gmail.com">"#));

        let mut config = SiteConfig::default();
        config.profile.email.clear();
        let html = Generator::new(&config).unwrap().render_home(&[], &[]).unwrap();
        assert!(!html.contains("Let's Work Together"));
    }

    #[test]
    fn test_render_not_found() {
        let html = generator().render_not_found().unwrap();
        assert!(html.contains(NOT_FOUND_TITLE));
    }

    #[test]
    fn test_write_site() {
        let dir = TempDir::new().unwrap();
        let mut bad = sample_blog();
        bad.id = "../escape".to_string();
        let written = generator()
            .write_site(dir.path(), &[sample_blog(), bad], &[])
            .unwrap();
        assert_eq!(written, 5);
        assert!(dir.path().join("index.html").exists());
        assert!(dir.path().join("about/index.html").exists());
        assert!(dir.path().join("blogs/index.html").exists());
        assert!(dir.path().join("blogs/b1/index.html").exists());
        assert!(dir.path().join("404.html").exists());
    }
}
