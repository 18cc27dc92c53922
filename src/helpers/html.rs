//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Whether a link leaves the site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

/// `href` when it is relative or uses http, https or mailto; otherwise ""
pub fn safe_url(href: &str) -> &str {
    let colon = match href.find(':') {
        Some(colon) => colon,
        None => return href,
    };
    // A path, query or fragment before the colon makes it relative
    if href[..colon].contains(['/', '?', '#']) {
        return href;
    }

    let scheme: String = href[..colon]
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    match scheme.as_str() {
        "http" | "https" | "mailto" => href,
        _ => "",
    }
}

/// Open Graph data for one page
#[derive(Debug, Clone, Default)]
pub struct OpenGraph<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub image: Option<&'a str>,
    pub site_name: &'a str,
    /// `article` pages carry a publication time
    pub published_time: Option<&'a str>,
}

/// Generate Open Graph meta tags
pub fn open_graph(og: &OpenGraph<'_>) -> String {
    let kind = if og.published_time.is_some() {
        "article"
    } else {
        "website"
    };

    let mut tags = vec![
        format!(r#"<meta property="og:type" content="{}">"#, kind),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(og.title)
        ),
        format!(
            r#"<meta property="og:url" content="{}">"#,
            html_escape(og.url)
        ),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(og.site_name)
        ),
        r#"<meta property="og:locale" content="en_US">"#.to_string(),
    ];

    if !og.description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(og.description)
        ));
    }

    if let Some(img) = og.image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    if let Some(time) = og.published_time {
        tags.push(format!(
            r#"<meta property="article:published_time" content="{}">"#,
            html_escape(time)
        ));
    }

    tags.join("\n")
}

/// Generate Twitter card meta tags
pub fn twitter_card(title: &str, description: &str, image: Option<&str>) -> String {
    let card = if image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };

    let mut tags = vec![
        format!(r#"<meta name="twitter:card" content="{}">"#, card),
        format!(
            r#"<meta name="twitter:title" content="{}">"#,
            html_escape(title)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta name="twitter:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta name="twitter:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
        assert_eq!(truncate("ab cd ef", 5, Some("…")), "ab c…");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://example.com"));
        assert!(is_external("//cdn.example.com/x.js"));
        assert!(!is_external("/blogs/1"));
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://example.com/a:b"), "https://example.com/a:b");
        assert_eq!(safe_url("HTTP://example.com"), "HTTP://example.com");
        assert_eq!(safe_url("mailto:me@example.com"), "mailto:me@example.com");
        assert_eq!(safe_url("/blogs/1"), "/blogs/1");
        assert_eq!(safe_url("#top"), "#top");
        assert_eq!(safe_url("./a?b=c:d"), "./a?b=c:d");
        assert_eq!(safe_url("javascript:alert(1)"), "");
        assert_eq!(safe_url("JavaScript:alert(1)"), "");
        assert_eq!(safe_url("java\tscript:alert(1)"), "");
        assert_eq!(safe_url("data:text/html,x"), "");
    }

    #[test]
    fn test_open_graph_article() {
        let tags = open_graph(&OpenGraph {
            title: "Post & More",
            description: "Desc",
            url: "https://example.com/blogs/1",
            image: Some("https://img/x.png"),
            site_name: "Site",
            published_time: Some("2025-01-05T10:00:00.000Z"),
        });
        assert!(tags.contains(r#"content="article""#));
        assert!(tags.contains("Post &amp; More"));
        assert!(tags.contains("og:image"));
        assert!(tags.contains("article:published_time"));
    }

    #[test]
    fn test_open_graph_website() {
        let tags = open_graph(&OpenGraph {
            title: "Home",
            site_name: "Site",
            ..Default::default()
        });
        assert!(tags.contains(r#"content="website""#));
        assert!(!tags.contains("og:description"));
        assert!(!tags.contains("og:image"));
    }

    #[test]
    fn test_twitter_card() {
        assert!(twitter_card("T", "", Some("i.png")).contains("summary_large_image"));
        let plain = twitter_card("T", "D", None);
        assert!(plain.contains(r#"content="summary""#));
        assert!(!plain.contains("twitter:image"));
    }
}
