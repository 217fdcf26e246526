use crate::rules::{match_rule, rule_candidate, NAME_SEPARATOR};
use crate::sanitize::sanitize_name;

/// Normalizes a fetched page title before it enters the rule engine.
///
/// `" - "` separators survive: the rule engine splits on them.
pub fn normalize_fetched_title(title: &str) -> String {
    title
        .replace('/', "_")
        .replace(':', "：")
        .replace(" | ", " ")
        .replace('｜', " ")
        .trim()
        .to_string()
}

/// Runs the rule engine and sanitizer over `raw`. Returns `None` when no
/// usable name remains after the prefix.
pub fn compose_final_name(
    url: &str,
    raw: &str,
    reserved_suffix_len: usize,
    directory_path_len: usize,
) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let (prefix, body) = rule_candidate(url, raw);
    finish(prefix, &body, reserved_suffix_len, directory_path_len)
}

/// Names a record whose display prefix was carried over from its file name.
/// The prefix stays verbatim; only a matched platform's cleaner runs, and only
/// on `body`.
pub fn compose_prefixed_name(
    url: &str,
    prefix: &str,
    body: &str,
    reserved_suffix_len: usize,
    directory_path_len: usize,
) -> Option<String> {
    let body = match match_rule(url) {
        Some(rule) => (rule.suffix_cleaner)(body),
        None => body.to_string(),
    };
    let prefix = format!("{prefix}{NAME_SEPARATOR}");
    finish(&prefix, body.trim(), reserved_suffix_len, directory_path_len)
}

fn finish(
    prefix: &str,
    body: &str,
    reserved_suffix_len: usize,
    directory_path_len: usize,
) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let name = sanitize_name(&format!("{prefix}{body}"), reserved_suffix_len, directory_path_len);
    let rest = name.strip_prefix(prefix)?;
    if rest.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}
