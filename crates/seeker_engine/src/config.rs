use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid extraction config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Heuristics used by the extractor. They were tuned against live markup and
/// are expected to drift, so every threshold and token list lives here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Page used to issue searches; the term is sent as the `q` parameter.
    pub search_url: String,
    /// Anchor text must be longer than this (in chars) for the broad scan.
    pub anchor_min_text_len: usize,
    /// Substrings that disqualify an href (compared case-insensitively).
    pub anchor_skip_list: Vec<String>,
    /// Path fragments that mark an absolute href as an article link.
    pub article_path_markers: Vec<String>,
    /// Anchor text must be longer than this for the relaxed term-matching scan.
    pub relaxed_min_text_len: usize,
    /// Class keywords identifying result containers. Empty disables the container scan.
    pub container_keywords: Vec<String>,
    pub container_min_text_len: usize,
    pub max_results: usize,
    /// Selectors for skeleton placeholders shown while results render.
    pub loading_selectors: Vec<String>,
    /// Selectors whose presence means real content has rendered.
    pub rendered_content_selectors: Vec<String>,
    /// Both words must appear on the line that precedes plain-text results.
    pub results_marker: (String, String),
    /// Lowercase tokens that mark a text line as navigation or noise.
    pub navigation_tokens: Vec<String>,
    pub text_min_line_len: usize,
    /// Path for synthetic article URLs; `{slug}` is replaced by the title slug.
    pub article_path_template: String,
    pub snippet_max_len: usize,
    pub max_json_depth: usize,
    /// Article containers, most specific first. The body is the implicit last resort.
    pub content_selectors: Vec<String>,
    pub toc_selector: String,
    pub reference_selector: String,
    pub heading_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::browser()
    }
}

impl ExtractionConfig {
    /// Thresholds observed against fully rendered pages.
    pub fn browser() -> Self {
        Self {
            search_url: "https://grokipedia.com/search".to_string(),
            anchor_min_text_len: 2,
            anchor_skip_list: strings(&[
                "#",
                "javascript:",
                "mailto:",
                "/legal/",
                "/images/",
                "/favicon",
                "/manifest",
                "/login",
                "/toggle",
            ]),
            article_path_markers: strings(&["/article/", "/wiki/"]),
            relaxed_min_text_len: 10,
            container_keywords: strings(&["search", "result", "list", "item"]),
            container_min_text_len: 3,
            max_results: 20,
            loading_selectors: strings(&[".animate-pulse"]),
            rendered_content_selectors: strings(&["article", ".card", "[class*=\"result\" i]"]),
            results_marker: ("yielded".to_string(), "results:".to_string()),
            navigation_tokens: strings(&[
                "previous", "next", "login", "toggle", "\u{2026}", "...", "\u{FFFD}",
            ]),
            text_min_line_len: 3,
            article_path_template: "/page/{slug}".to_string(),
            snippet_max_len: 200,
            max_json_depth: 64,
            content_selectors: strings(&[
                "article",
                "main",
                "#content",
                ".content",
                ".mw-content",
            ]),
            toc_selector: "a[href^=\"#\"]".to_string(),
            reference_selector: "sup".to_string(),
            heading_selector: "h1, h2, h3, h4, h5, h6".to_string(),
        }
    }

    /// Thresholds observed against server-rendered HTML fetched without a browser.
    pub fn static_html() -> Self {
        Self {
            anchor_min_text_len: 10,
            anchor_skip_list: strings(&[
                "#",
                "javascript:",
                "mailto:",
                "/legal/",
                "/images/",
                "/favicon",
                "/manifest",
            ]),
            ..Self::browser()
        }
    }

    /// Overlays a JSON document on the browser preset. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn is_skipped_href(&self, href: &str) -> bool {
        let lower = href.to_lowercase();
        self.anchor_skip_list
            .iter()
            .any(|skip| lower.contains(&skip.to_lowercase()))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
