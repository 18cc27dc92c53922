//! List content served by the API

use anyhow::Result;

use crate::content::{Blog, Project};
use crate::helpers::format_date;
use crate::Folio;

/// List content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let api = folio.api()?;

    let lines = match content_type {
        "blog" | "blogs" => {
            let blogs = api.try_list_blogs().await?;
            println!("Blogs ({}):", blogs.len());
            blog_lines(&blogs, folio.config.words_per_minute)
        }
        "project" | "projects" => {
            let projects = api.try_list_projects().await?;
            println!("Projects ({}):", projects.len());
            project_lines(&projects)
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: blog, project", content_type);
        }
    };

    for line in lines {
        println!("  {}", line);
    }

    Ok(())
}

fn blog_lines(blogs: &[Blog], words_per_minute: usize) -> Vec<String> {
    blogs
        .iter()
        .map(|blog| {
            let date = blog
                .created()
                .map(|d| format_date(&d, "YYYY-MM-DD"))
                .unwrap_or_else(|| "----------".to_string());
            format!(
                "{} - {} [{}] {} min",
                date,
                blog.title,
                blog.id,
                blog.read_time(words_per_minute)
            )
        })
        .collect()
}

fn project_lines(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|project| {
            if project.technologies.is_empty() {
                format!("{} [{}]", project.title, project.id)
            } else {
                format!(
                    "{} [{}] ({})",
                    project.title,
                    project.id,
                    project.technologies.join(", ")
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_lines() {
        let blogs = vec![
            Blog {
                id: "a".to_string(),
                title: "Dated".to_string(),
                content: "one two".to_string(),
                created_at: Some("2024-03-09T08:00:00Z".to_string()),
                ..Default::default()
            },
            Blog {
                id: "b".to_string(),
                title: "Undated".to_string(),
                read_time: Some(5),
                ..Default::default()
            },
        ];
        assert_eq!(
            blog_lines(&blogs, 200),
            vec![
                "2024-03-09 - Dated [a] 1 min",
                "---------- - Undated [b] 5 min"
            ]
        );
    }

    #[test]
    fn test_project_lines() {
        let projects = vec![
            Project {
                id: "p".to_string(),
                title: "Folio".to_string(),
                technologies: vec!["Rust".to_string(), "Axum".to_string()],
                ..Default::default()
            },
            Project {
                id: "q".to_string(),
                title: "Bare".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(
            project_lines(&projects),
            vec!["Folio [p] (Rust, Axum)", "Bare [q]"]
        );
    }

    #[tokio::test]
    async fn test_unknown_type() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(run(&folio, "tag").await.is_err());
    }
}
