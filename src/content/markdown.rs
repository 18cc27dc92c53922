//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::{html_escape, is_external, safe_url};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// Image being collected between its start and end events
struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Create from the site highlight settings
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_options(&config.theme, config.line_number)
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_MATH
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();
        let mut image: Option<PendingImage> = None;

        for event in parser {
            if in_code_block {
                match event {
                    Event::Text(text) => code_block_content.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted =
                            self.highlight_code(&code_block_content, code_block_lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        in_code_block = false;
                        code_block_lang = None;
                    }
                    _ => {}
                }
                continue;
            }

            if image.is_some() {
                match event {
                    Event::End(TagEnd::Image) => {
                        if let Some(done) = image.take() {
                            events.push(Event::Html(CowStr::from(render_image(&done))));
                        }
                    }
                    Event::Text(text) | Event::Code(text) => {
                        if let Some(pending) = image.as_mut() {
                            pending.alt.push_str(&text);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry attributes after the language
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some(PendingImage {
                        src: safe_url(&dest_url).to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                    });
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    let href = safe_url(&dest_url).to_string();
                    if is_external(&href) {
                        let title_attr = if title.is_empty() {
                            String::new()
                        } else {
                            format!(r#" title="{}""#, html_escape(&title))
                        };
                        events.push(Event::Html(CowStr::from(format!(
                            r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                            html_escape(&href),
                            title_attr
                        ))));
                    } else {
                        events.push(Event::Start(Tag::Link {
                            link_type,
                            dest_url: CowStr::from(href),
                            title,
                            id,
                        }));
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let label = lang.unwrap_or("text");
        let class = html_escape(label);

        let syntax = self
            .syntax_set
            .find_syntax_by_token(label)
            .or_else(|| self.syntax_set.find_syntax_by_extension(label))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            })
            .map(|html| {
                if self.line_numbers {
                    add_line_numbers(&html, &class)
                } else {
                    format!(r#"<pre><code class="language-{}">{}</code></pre>"#, class, html)
                }
            })
            .unwrap_or_else(|| {
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                )
            });

        match lang {
            Some(lang) => format!(
                r#"<div class="code-block"><div class="code-header"><span class="code-lang">{}</span></div>{}</div>"#,
                class,
                highlighted
            ),
            None => highlighted,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Image with its alt text repeated as a caption
fn render_image(image: &PendingImage) -> String {
    let alt = if image.alt.is_empty() {
        "Blog image"
    } else {
        image.alt.as_str()
    };
    let title_attr = if image.title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(&image.title))
    };

    let mut out = format!(
        r#"<figure class="image"><img src="{}" alt="{}"{} loading="lazy">"#,
        html_escape(&image.src),
        html_escape(alt),
        title_attr
    );
    if !image.alt.is_empty() {
        out.push_str(&format!(
            "<figcaption>{}</figcaption>",
            html_escape(&image.alt)
        ));
    }
    out.push_str("</figure>");
    out
}
