//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blogs/42/") // -> "/blogs/42/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of a blog detail page
pub fn blog_path(config: &SiteConfig, id: &str) -> String {
    url_for(config, &format!("blogs/{}/", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/site/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/about/"), "/site/about/");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "blogs/"),
            "https://example.com/site/blogs/"
        );
    }

    #[test]
    fn test_blog_path() {
        let config = SiteConfig::default();
        assert_eq!(blog_path(&config, "abc"), "/blogs/abc/");
    }
}
