use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static PATH_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\:]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Word,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Word => "doc",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "doc" | "word" => Ok(ExportFormat::Word),
            other => Err(format!("unknown export format '{}' (use md or doc)", other)),
        }
    }
}

/// `Harbour  Tower` -> `Harbour_Tower_BEP.doc`
///
/// The result is always a bare file name: separators become `-` and leading
/// dots are dropped, so a project name never selects a directory.
pub fn export_file_name(project_name: &str, format: ExportFormat) -> String {
    let stem = WHITESPACE.replace_all(project_name.trim(), "_");
    let stem = PATH_SEPARATORS.replace_all(&stem, "-");
    let stem = stem.trim_start_matches('.');
    let stem = if stem.is_empty() { "project" } else { stem };
    format!("{}_BEP.{}", stem, format.extension())
}

pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}

/// Wraps rendered Markdown in the Office HTML envelope word processors open
/// as a document.
pub fn word_document(markdown: &str, title: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' \
xmlns='http://www.w3.org/TR/REC-html40'>\
<head><meta charset='utf-8'><meta name='created' content='{created}'><title>{title}</title></head>\
<body>{body}</body></html>",
        created = generated_at.to_rfc3339(),
        title = escape_text(title),
        body = render_html(markdown),
    )
}

pub fn render(
    markdown: &str,
    title: &str,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> String {
    match format {
        ExportFormat::Markdown => markdown.to_string(),
        ExportFormat::Word => word_document(markdown, title, generated_at),
    }
}
