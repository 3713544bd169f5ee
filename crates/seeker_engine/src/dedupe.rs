use std::collections::HashMap;

use url::Url;

use crate::types::Candidate;

/// Resolve `raw` against `base`. Absolute URLs are returned unchanged;
/// anything that cannot be resolved is returned trimmed.
pub fn absolutize_url(raw: &str, base: &Url) -> String {
    let trimmed = raw.trim();
    if Url::parse(trimmed).is_ok() {
        return trimmed.to_string();
    }
    base.join(trimmed)
        .map(String::from)
        .unwrap_or_else(|_| trimmed.to_string())
}

/// Comparison key for a URL: scheme and host are case-insensitive, the path
/// is case-sensitive and a trailing slash is ignored.
pub fn dedupe_key(raw: &str, base: &Url) -> String {
    let absolute = absolutize_url(raw, base);
    match Url::parse(&absolute) {
        Ok(mut url) => {
            let path = url.path();
            if path.len() > 1 && path.ends_with('/') {
                let trimmed = path.trim_end_matches('/').to_string();
                url.set_path(&trimmed);
            }
            url.into()
        }
        Err(_) => absolute,
    }
}

/// Collapse candidates that share a normalized URL, keeping the first
/// occurrence's position and title. A later duplicate only contributes a
/// snippet or context the kept entry lacks.
pub fn dedupe_candidates(candidates: Vec<Candidate>, base: &Url) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for mut candidate in candidates {
        let key = dedupe_key(&candidate.url, base);
        if let Some(&index) = index_by_key.get(&key) {
            let existing = &mut kept[index];
            if existing.snippet.is_empty() && !candidate.snippet.is_empty() {
                existing.snippet = candidate.snippet;
            }
            if existing.context.is_none() {
                existing.context = candidate.context;
            }
            continue;
        }
        candidate.url = absolutize_url(&candidate.url, base);
        index_by_key.insert(key, kept.len());
        kept.push(candidate);
    }
    kept
}
