//! Markdown-based content pages.
//!
//! Pages are compiled into the binary from `content/pages/*.md`, parsed once
//! at startup (YAML frontmatter plus GitHub Flavored Markdown) and served
//! from memory.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;

/// Embedded page sources, keyed by slug.
const PAGE_SOURCES: &[(&str, &str)] = &[(
    "terminos",
    include_str!("../content/pages/terminos.md"),
)];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Metadata for static pages (terms, privacy, etc.)
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

impl PageMeta {
    /// Update date in Spanish, e.g. `"octubre de 2025"`.
    #[must_use]
    pub fn updated_label(&self) -> Option<String> {
        self.updated_at.map(month_year)
    }
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// Content store that holds all loaded content in memory
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Parse the embedded pages.
    ///
    /// # Errors
    ///
    /// Returns an error if a page has missing or malformed frontmatter.
    pub fn builtin() -> Result<Self, ContentError> {
        let mut pages = HashMap::new();
        for (slug, source) in PAGE_SOURCES {
            let page = parse_page(slug, source)?;
            tracing::debug!(slug, "Loaded page");
            pages.insert(page.slug.clone(), page);
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Get a page by slug
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }
}

fn parse_page(slug: &str, source: &str) -> Result<Page, ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<PageMeta> = matter
        .parse(source)
        .map_err(|e| ContentError::Parse(format!("{slug}: failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse(format!("{slug}: missing frontmatter")))?;

    Ok(Page {
        slug: slug.to_string(),
        meta,
        content_html: render_markdown(&parsed.content),
    })
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());

    // Pages are first-party; allow the raw HTML callouts they use
    options.render.r#unsafe = true;

    markdown_to_html(content, &options)
}

fn month_year(date: NaiveDate) -> String {
    let month = MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{month} de {}", date.year())
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_terms_page() {
        let store = ContentStore::builtin().unwrap();
        let page = store.get_page("terminos").unwrap();
        assert_eq!(page.meta.title, "Términos y Condiciones");
        assert_eq!(page.meta.updated_label().as_deref(), Some("octubre de 2025"));
        assert!(page.content_html.contains("<h2"));
        assert!(page.content_html.contains("contacto@bigle.com.co"));
        assert!(store.get_page("privacidad").is_none());
    }

    #[test]
    fn test_missing_frontmatter_is_an_error() {
        assert!(parse_page("x", "# Sin metadatos\n").is_err());
    }

    #[test]
    fn test_month_year() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
        assert_eq!(month_year(date), "diciembre de 2025");
    }
}
