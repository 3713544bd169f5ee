use url::Url;

use crate::config::ExtractionConfig;
use crate::types::{Candidate, SourceStrategy};

/// Recover result titles from plain page text.
///
/// Search pages that render results without links still print a line such as
/// `Search for "x" yielded 12 results:` followed by one title per line. Every
/// later line that does not look like pagination or navigation becomes a
/// candidate with a synthetic article URL under `origin`.
pub fn parse_text_results(
    text: &str,
    search_term: &str,
    origin: &Url,
    config: &ExtractionConfig,
) -> Vec<Candidate> {
    let (first_word, second_word) = &config.results_marker;
    let mut lines = text.lines();
    if !lines
        .by_ref()
        .any(|line| line.contains(first_word.as_str()) && line.contains(second_word.as_str()))
    {
        return Vec::new();
    }

    let root = origin.origin().ascii_serialization();
    lines
        .map(str::trim)
        .filter(|line| is_title_line(line, config))
        .take(config.max_results)
        .map(|title| {
            let url = format!("{root}{}", config.article_path_template.replace("{slug}", &slug(title)));
            Candidate::new(
                title,
                url,
                format!("Search result for '{search_term}'"),
                SourceStrategy::TextFallback,
            )
        })
        .collect()
}

fn is_title_line(line: &str, config: &ExtractionConfig) -> bool {
    if line.chars().count() <= config.text_min_line_len {
        return false;
    }
    if line.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let lower = line.to_lowercase();
    if config
        .navigation_tokens
        .iter()
        .any(|token| lower.contains(token.as_str()))
    {
        return false;
    }
    !is_absolute_url(line)
}

/// `scheme://host...` lines are links printed as text, not titles.
fn is_absolute_url(line: &str) -> bool {
    Url::parse(line).is_ok_and(|url| url.has_host())
}

/// `Rust (programming language)` -> `Rust_programming_language`
fn slug(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}
