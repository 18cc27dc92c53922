//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `api.base_url`
pub const API_BASE_URL_ENV: &str = "FOLIO_API_BASE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Writing
    pub words_per_minute: usize,
    pub latest_count: usize,
    pub highlight: HighlightConfig,

    // Content API
    pub api: ApiConfig,

    // Pages
    pub menu: Vec<MenuItem>,
    pub profile: ProfileConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Jeevan KC's Portfolio".to_string(),
            description: "A personal portfolio website showcasing projects and skills by \
                          Jeevan KC, a computer engineer, IT entrepreneur, and software \
                          developer from Nepal."
                .to_string(),
            author: "Jeevan KC".to_string(),
            language: "en".to_string(),

            url: "https://jeevan-kc.com.np".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            words_per_minute: 200,
            latest_count: 3,
            highlight: HighlightConfig::default(),

            api: ApiConfig::default(),

            menu: vec![
                MenuItem::new("Home", "/"),
                MenuItem::new("About", "/about/"),
                MenuItem::new("Blogs", "/blogs/"),
            ],
            profile: ProfileConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(API_BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                tracing::debug!("API base URL overridden by {}", API_BASE_URL_ENV);
                self.api.base_url = base_url.trim().to_string();
            }
        }
    }

    /// Full page title for a page-specific title ("%s | author")
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(t) if !t.is_empty() => format!("{} | {}", t, self.author),
            _ => self.title.clone(),
        }
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://api.example.com`; endpoints live under `/api/v1`
    pub base_url: String,
    /// Seconds a blog response stays fresh; 0 disables caching
    pub revalidate_secs: u64,
    /// Seconds a project response stays fresh; 0 disables caching
    pub projects_revalidate_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            revalidate_secs: 60,
            projects_revalidate_secs: 3600,
            timeout_secs: 10,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

impl MenuItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Author profile shown on the home and about pages and under each post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub badge: String,
    pub tagline: String,
    pub avatar: String,
    pub email: String,
    /// Short bio shown under blog posts
    pub bio: String,
    /// Paragraphs of the about page
    pub about: Vec<String>,
    pub links: Vec<ProfileLink>,
    pub services: Vec<ServiceCard>,
    /// Badges on the about page
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Jeevan KC".to_string(),
            badge: "Computer Engineer & IT Entrepreneur".to_string(),
            tagline: "A framework agnostic, principle first software engineer & IT \
                      entrepreneur from Nepal with over half a decade of hands on \
                      experience in building software and shaping businesses."
                .to_string(),
            avatar: "https://res.cloudinary.com/jeevankc17/image/upload/v1770027122/\
                     innovatorshome/jeevan_ohyigv.jpg"
                .to_string(),
            email: "jkc5186@gmail.com".to_string(),
            bio: "Software developer and blogger passionate about web technologies, \
                  databases, and system design."
                .to_string(),
            about: Vec::new(),
            links: Vec::new(),
            services: vec![
                ServiceCard::new(
                    "Principles-First Software Engineer",
                    "Building software grounded in core computer science, correctness, \
                     performance, and long-term maintainability.",
                ),
                ServiceCard::new(
                    "System Design & Architecture",
                    "Designing scalable systems with clear boundaries, efficient data \
                     flow, and real-world operational awareness.",
                ),
                ServiceCard::new(
                    "Databases, AI & Automation",
                    "Leveraging strong data foundations, intelligent systems, and \
                     automation to reduce complexity and drive business impact.",
                ),
            ],
            skills: [
                "API Development",
                "System Architecture",
                "DevOps Pipelines",
                "AI Integration",
                "Workflow Automation",
                "Databases",
                "Networking",
                "Distributed Systems",
                "Operating Systems",
                "Data Structures & Algorithms",
                "ERP Implementation",
                "Business Analysis",
                "Full-Stack Development",
                "Cloud Computing",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            experience: vec![
                Experience::new(
                    "IT Entrepreneur & Software Developer",
                    "Independent",
                    "2020 - Present",
                    "Building software solutions and shaping businesses with over half a \
                     decade of hands-on experience in computer engineering and software \
                     development.",
                ),
                Experience::new(
                    "ERP Implementation Specialist",
                    "Various Organizations",
                    "2019 - 2020",
                    "Professional ERP implementation experience with robust understanding \
                     of business domains and tech-innovation with real business value.",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
}

impl ServiceCard {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    pub fn new(title: &str, company: &str, period: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            period: period.to_string(),
            description: description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.author, "Jeevan KC");
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.api.revalidate_secs, 60);
        assert_eq!(config.api.projects_revalidate_secs, 3600);
        assert_eq!(config.profile.services.len(), 3);
        assert_eq!(config.profile.skills.len(), 14);
        assert_eq!(config.profile.experience.len(), 2);
        assert_eq!(config.profile.experience[1].period, "2019 - 2020");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
api:
  base_url: http://localhost:5000
  revalidate_secs: 0
profile:
  name: Test User
  experience:
    - title: Engineer
      company: ACME
      period: 2020 - now
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.revalidate_secs, 0);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.profile.experience[0].company, "ACME");
        assert_eq!(config.profile.experience[0].description, "");
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.menu.len(), 3);
    }

    #[test]
    fn test_page_title() {
        let config = SiteConfig::default();
        assert_eq!(config.page_title(Some("About")), "About | Jeevan KC");
        assert_eq!(config.page_title(None), config.title);
        assert_eq!(config.page_title(Some("")), config.title);
    }
}
