//! Content module - blog models, body normalization and Markdown rendering

mod blog;
mod markdown;
pub mod normalize;

pub use blog::{plain_text, Blog, Envelope, Project, EXCERPT_LEN, META_DESCRIPTION_LEN};
pub use markdown::MarkdownRenderer;
pub use normalize::{estimate_read_minutes, normalize, strip_html_tags};
