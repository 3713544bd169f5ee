use serde_json::{Map, Value};
use seeker_logging::{seeker_debug, seeker_trace};

use crate::types::{Candidate, SourceStrategy};

/// Keys whose array values are treated as result lists.
const RESULT_KEYS: &[&str] = &["results", "articles", "search", "data"];
const TITLE_KEYS: &[&str] = &["title", "name"];
const URL_KEYS: &[&str] = &["url", "link"];
const SNIPPET_KEYS: &[&str] = &["description", "snippet"];

/// Scan one embedded JSON payload for result-like records.
///
/// Malformed payloads contribute nothing. Nesting deeper than `max_depth`
/// is not visited.
pub fn scan_json_payload(payload: &str, max_depth: usize) -> Vec<Candidate> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(err) => {
            seeker_debug!("skipping malformed embedded JSON ({} bytes): {}", payload.len(), err);
            return Vec::new();
        }
    };
    let mut found = Vec::new();
    walk(&value, 0, max_depth, &mut found);
    found
}

/// Scan every payload in order, concatenating what each one yields.
pub fn scan_json_payloads<I, S>(payloads: I, max_depth: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    payloads
        .into_iter()
        .flat_map(|payload| scan_json_payload(payload.as_ref(), max_depth))
        .collect()
}

fn walk(value: &Value, depth: usize, max_depth: usize, out: &mut Vec<Candidate>) {
    if depth > max_depth {
        seeker_trace!("embedded JSON deeper than {max_depth}, not descending");
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if let Value::Array(items) = child {
                    if RESULT_KEYS.contains(&key.to_lowercase().as_str()) {
                        out.extend(items.iter().filter_map(record_to_candidate));
                    }
                }
                walk(child, depth + 1, max_depth, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, max_depth, out);
            }
        }
        _ => {}
    }
}

fn record_to_candidate(item: &Value) -> Option<Candidate> {
    let record = item.as_object()?;
    let title = first_string(record, TITLE_KEYS)?;
    let url = first_string(record, URL_KEYS)?;
    let snippet = first_string(record, SNIPPET_KEYS).unwrap_or_default();
    Some(Candidate::new(title, url, snippet, SourceStrategy::EmbeddedJson))
}

fn first_string(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
