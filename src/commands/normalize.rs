//! Run the content normalizer over a file or stdin

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::content::{normalize, strip_html_tags};

/// Read `input` (stdin when `None`) and return the cleaned text
pub fn run(input: Option<&Path>, strip_only: bool) -> Result<String> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(transform(&raw, strip_only))
}

/// `strip_only` stops after tag stripping and entity decoding
pub fn transform(raw: &str, strip_only: bool) -> String {
    if strip_only {
        strip_html_tags(raw)
    } else {
        normalize(raw)
    }
}
