use crate::page::PageElement;
use crate::types::Candidate;

/// Context for a link: the ancestor text with one copy of the link text
/// removed, trimmed and cut to `max_len` characters. No ellipsis is added.
pub fn snippet_from_context(link_text: &str, ancestor_text: &str, max_len: usize) -> String {
    let link_text = link_text.trim();
    let context = if !link_text.is_empty() && ancestor_text.contains(link_text) {
        ancestor_text.replacen(link_text, "", 1)
    } else {
        ancestor_text.to_string()
    };
    context.trim().chars().take(max_len).collect()
}

/// Context of `element` taken from its nearest ancestor that carries text
/// beyond the element's own. Empty when no such ancestor exists.
pub fn element_context<E: PageElement>(element: &E, max_len: usize) -> String {
    let own_text = element.text();
    let mut ancestor = element.parent();
    while let Some(node) = ancestor {
        if node.tag_name() == "body" {
            break;
        }
        let snippet = snippet_from_context(&own_text, &node.text(), max_len);
        if !snippet.is_empty() {
            return snippet;
        }
        ancestor = node.parent();
    }
    String::new()
}

/// Give every candidate without a snippet the context captured at discovery.
pub(crate) fn fill_missing_snippets(candidates: &mut [Candidate]) {
    for candidate in candidates.iter_mut().filter(|c| c.snippet.is_empty()) {
        if let Some(context) = candidate.context.take() {
            candidate.snippet = context;
        }
    }
}
