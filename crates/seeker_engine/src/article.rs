use seeker_logging::{seeker_debug, seeker_warn};

use crate::config::ExtractionConfig;
use crate::page::{document_title, first, meta_content, PageElement, PageError, PageSnapshot};
use crate::types::{ArticleDocument, Section, TocEntry};

pub trait ArticleExtractor {
    fn extract_article<P: PageSnapshot>(&self, page: &P) -> ArticleDocument;
}

/// Splits an article page into metadata, body text, headings, table of
/// contents and citation markers.
///
/// Content is read from the first container matching the configured
/// selectors (`article`, `main`, named content blocks) and falls back to the
/// whole body. A failing field leaves the others intact and records the
/// first failure in `error`.
#[derive(Debug, Clone, Default)]
pub struct ArticleStructurer {
    config: ExtractionConfig,
}

impl ArticleStructurer {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    fn content_container<'p, P: PageSnapshot>(
        &self,
        page: &'p P,
    ) -> Result<Option<P::Element<'p>>, PageError> {
        for selector in &self.config.content_selectors {
            if let Some(container) = first(page, selector)? {
                seeker_debug!("article content resolved via `{selector}`");
                return Ok(Some(container));
            }
        }
        first(page, "body")
    }

    fn sections<E: PageElement>(&self, container: &E) -> Result<Vec<Section>, PageError> {
        Ok(container
            .query(&self.config.heading_selector)?
            .iter()
            .filter_map(|heading| {
                let level = heading_level(&heading.tag_name())?;
                Some(Section {
                    level,
                    text: heading.text(),
                    id: heading.attribute("id").unwrap_or_default(),
                })
            })
            .collect())
    }

    fn table_of_contents<P: PageSnapshot>(&self, page: &P) -> Result<Vec<TocEntry>, PageError> {
        Ok(page
            .query(&self.config.toc_selector)?
            .iter()
            .filter_map(|link| {
                let href = link.attribute("href")?;
                let section_id = href.trim().strip_prefix('#')?.to_string();
                let text = link.text();
                (!text.is_empty() && !section_id.is_empty()).then_some(TocEntry { text, section_id })
            })
            .collect())
    }

    fn references<P: PageSnapshot>(&self, page: &P) -> Result<Vec<String>, PageError> {
        Ok(page
            .query(&self.config.reference_selector)?
            .iter()
            .map(PageElement::text)
            .filter(|text| is_citation_marker(text))
            .collect())
    }
}

impl ArticleExtractor for ArticleStructurer {
    fn extract_article<P: PageSnapshot>(&self, page: &P) -> ArticleDocument {
        let mut doc = ArticleDocument {
            url: page.page_url().to_string(),
            ..ArticleDocument::default()
        };
        let mut failures = Vec::new();
        let mut record = |field: &str, err: PageError| failures.push(format!("{field}: {err}"));

        match document_title(page) {
            Ok(title) => doc.title = title,
            Err(err) => record("title", err),
        }
        match meta_content(page, "description") {
            Ok(description) => doc.description = description,
            Err(err) => record("description", err),
        }
        match meta_content(page, "author") {
            Ok(author) => doc.author = author,
            Err(err) => record("author", err),
        }
        match self.content_container(page) {
            Ok(Some(container)) => {
                doc.content = container.text();
                match self.sections(&container) {
                    Ok(sections) => doc.sections = sections,
                    Err(err) => record("sections", err),
                }
            }
            Ok(None) => seeker_debug!("article {} has no body", doc.url),
            Err(err) => record("content", err),
        }
        match self.table_of_contents(page) {
            Ok(toc) => doc.table_of_contents = toc,
            Err(err) => record("table of contents", err),
        }
        match self.references(page) {
            Ok(references) => doc.references = references,
            Err(err) => record("references", err),
        }

        if !failures.is_empty() {
            seeker_warn!("partial extraction of {}: {}", doc.url, failures.join("; "));
            doc.error = Some(format!("Content extraction failed: {}", failures.join("; ")));
        }
        doc
    }
}

/// `h1`..`h6` to 1..=6; deeper or malformed heading tags clamp into range.
fn heading_level(tag: &str) -> Option<u8> {
    let digits = tag.strip_prefix('h')?;
    let level: u32 = digits.parse().ok()?;
    Some(level.clamp(1, 6) as u8)
}

/// `3`, `[12]` and similar bracketed numbers.
fn is_citation_marker(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
