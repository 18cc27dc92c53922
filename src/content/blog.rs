//! Blog and project models as served by the content API

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::normalize::{estimate_read_minutes_at, normalize, strip_html_tags};
use crate::helpers::{format_date, truncate};

/// Maximum length of a generated meta description
pub const META_DESCRIPTION_LEN: usize = 160;

/// Length of the plain-text excerpt shown on listing cards
pub const EXCERPT_LEN: usize = 150;

lazy_static! {
    static ref MD_IMAGE: Regex = Regex::new(r"!\[.*?\]\(.*?\)").unwrap();
    static ref MD_LINK: Regex = Regex::new(r"\[.*?\]\(.*?\)").unwrap();
    static ref MATH_BLOCK: Regex = Regex::new(r"\$\$[\s\S]*?\$\$").unwrap();
    static ref MATH_INLINE: Regex = Regex::new(r"\$.*?\$").unwrap();
    static ref MD_SYMBOLS: Regex = Regex::new(r"[#*`\[\]]").unwrap();
}

/// Response wrapper used by every API endpoint: `{"data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Raw body, a mix of HTML and Markdown
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "nullable_list")]
    pub tags: Vec<String>,

    /// Reading time in minutes supplied by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
}

impl Blog {
    /// Parse either a bare blog object or an `{"data": {...}}` envelope
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let blog = match value {
            serde_json::Value::Object(mut map) if !map.contains_key("content") => {
                let data = map
                    .remove("data")
                    .ok_or_else(|| anyhow::anyhow!("Blog JSON has neither `content` nor `data`"))?;
                serde_json::from_value(data)?
            }
            other => serde_json::from_value(other)?,
        };
        Ok(blog)
    }

    /// Reading time: the API value when positive, otherwise estimated
    pub fn read_time(&self, words_per_minute: usize) -> u32 {
        match self.read_time {
            Some(minutes) if minutes > 0 => minutes,
            _ => estimate_read_minutes_at(&self.content, words_per_minute),
        }
    }

    /// Body ready for the Markdown renderer
    pub fn normalized_content(&self) -> String {
        normalize(&self.content)
    }

    /// Description for `<meta>` tags
    ///
    /// Uses the `description` field when set, otherwise the first
    /// characters of the content with Markdown syntax removed.
    pub fn meta_description(&self) -> String {
        if let Some(description) = self.description.as_deref() {
            if !description.trim().is_empty() {
                return description.trim().to_string();
            }
        }

        let plain = plain_text(&self.content);
        let head: String = plain.chars().take(META_DESCRIPTION_LEN).collect();
        head.trim().to_string()
    }

    /// Plain-text excerpt for listing cards
    pub fn excerpt(&self, length: usize) -> String {
        let text = self
            .normalized_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        truncate(&text, length, Some("..."))
    }

    /// Parsed creation time
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Publication date as "January 5, 2025", in UTC
    pub fn published_on(&self) -> String {
        match self.created() {
            Some(date) => format_date(&date, "LL"),
            None => self.created_at.clone().unwrap_or_default(),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Either `"rust, axum"` or `["rust", "axum"]` upstream
    #[serde(default, deserialize_with = "comma_list")]
    pub technologies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// Strip Markdown and HTML syntax down to readable text
pub fn plain_text(content: &str) -> String {
    let text = strip_html_tags(content);
    let text = MATH_BLOCK.replace_all(&text, "");
    let text = MATH_INLINE.replace_all(&text, "");
    let text = MD_IMAGE.replace_all(&text, "");
    let text = MD_LINK.replace_all(&text, "");
    let text = MD_SYMBOLS.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a comma separated string or a list of strings
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct CommaList;

    impl<'de> Visitor<'de> for CommaList {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a comma separated string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                let item = item.trim();
                if !item.is_empty() {
                    vec.push(item.to_string());
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(CommaList)
}
