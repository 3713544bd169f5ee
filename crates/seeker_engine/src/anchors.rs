use url::Url;

use crate::config::ExtractionConfig;
use crate::page::{PageElement, PageError, PageSnapshot};
use crate::snippet::element_context;
use crate::types::{Candidate, SourceStrategy};

/// Every anchor on the page whose text and href make it a plausible result,
/// in document order, capped at `max_results`.
pub fn broad_anchor_scan<P: PageSnapshot>(
    page: &P,
    config: &ExtractionConfig,
) -> Result<Vec<Candidate>, PageError> {
    let anchors = page.query("a[href]")?;
    Ok(anchors
        .iter()
        .filter_map(|anchor| {
            qualify(anchor, page.page_url(), config, config.anchor_min_text_len)
                .map(|(title, href)| {
                    Candidate::new(title, href, "", SourceStrategy::AnchorScan)
                        .with_context(element_context(anchor, config.snippet_max_len))
                })
        })
        .take(config.max_results)
        .collect())
}

/// Anchors inside containers whose class names mention a result keyword.
pub fn result_container_scan<P: PageSnapshot>(
    page: &P,
    config: &ExtractionConfig,
) -> Result<Vec<Candidate>, PageError> {
    let mut found = Vec::new();
    for container in page.query("div[class], section[class], ul[class], ol[class]")? {
        if !is_result_container(&container, config) {
            continue;
        }
        for anchor in container.query("a[href]")? {
            if let Some((title, href)) =
                qualify(&anchor, page.page_url(), config, config.container_min_text_len)
            {
                found.push(
                    Candidate::new(title, href, "", SourceStrategy::ResultContainer)
                        .with_context(element_context(&anchor, config.snippet_max_len)),
                );
            }
        }
        if found.len() >= config.max_results {
            break;
        }
    }
    found.truncate(config.max_results);
    Ok(found)
}

/// Last-resort scan: long link texts that mention the search term, from any host.
pub fn relaxed_anchor_scan<P: PageSnapshot>(
    page: &P,
    search_term: &str,
    config: &ExtractionConfig,
) -> Result<Vec<Candidate>, PageError> {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return Ok(Vec::new());
    }
    let anchors = page.query("a[href]")?;
    Ok(anchors
        .iter()
        .filter_map(|anchor| {
            let (title, href) = link_parts(anchor)?;
            let long_enough = title.chars().count() > config.relaxed_min_text_len;
            if !long_enough || !title.to_lowercase().contains(&term) || config.is_skipped_href(&href) {
                return None;
            }
            let snippet = element_context(anchor, config.snippet_max_len);
            Some(Candidate::new(title, href, snippet, SourceStrategy::RelaxedAnchor))
        })
        .take(config.max_results)
        .collect())
}

fn link_parts<E: PageElement>(anchor: &E) -> Option<(String, String)> {
    let href = anchor.attribute("href")?.trim().to_string();
    if href.is_empty() {
        return None;
    }
    Some((anchor.text(), href))
}

/// Text and href of an anchor that passes the length, skip-list and
/// retention rules. Retained hrefs are relative, point at an article path,
/// or stay on the page's host.
fn qualify<E: PageElement>(
    anchor: &E,
    page_url: &Url,
    config: &ExtractionConfig,
    min_text_len: usize,
) -> Option<(String, String)> {
    let (title, href) = link_parts(anchor)?;
    if title.chars().count() <= min_text_len || config.is_skipped_href(&href) {
        return None;
    }
    is_retained_href(&href, page_url, config).then_some((title, href))
}

fn is_retained_href(href: &str, page_url: &Url, config: &ExtractionConfig) -> bool {
    let Ok(absolute) = Url::parse(href) else {
        return true;
    };
    if config
        .article_path_markers
        .iter()
        .any(|marker| absolute.path().contains(marker.as_str()))
    {
        return true;
    }
    match (absolute.host_str(), page_url.host_str()) {
        (Some(link_host), Some(page_host)) => link_host.eq_ignore_ascii_case(page_host),
        _ => false,
    }
}

fn is_result_container<E: PageElement>(container: &E, config: &ExtractionConfig) -> bool {
    let Some(class) = container.attribute("class") else {
        return false;
    };
    let class = class.to_lowercase();
    config
        .container_keywords
        .iter()
        .any(|keyword| class.contains(&keyword.to_lowercase()))
}
