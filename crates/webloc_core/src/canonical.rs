/// Query-parameter cut rules for known video hosts. The first rule whose
/// prefix matches is applied; everything from each marker onward is dropped.
struct CanonicalRule {
    url_prefix: &'static str,
    cut_markers: &'static [&'static str],
}

const CANONICAL_RULES: &[CanonicalRule] = &[
    CanonicalRule {
        url_prefix: "https://www.youtube.com/watch?",
        cut_markers: &["&pp"],
    },
    CanonicalRule {
        url_prefix: "https://www.bilibili.com/video/",
        cut_markers: &["&vd_source=", "?vd_source=", "?spm_id_from="],
    },
];

/// Strips session and recommendation parameters so that two shortcuts for the
/// same resource share one key. Unmatched URLs pass through (trimmed).
pub fn canonicalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let Some(rule) = CANONICAL_RULES
        .iter()
        .find(|rule| trimmed.starts_with(rule.url_prefix))
    else {
        return trimmed.to_string();
    };

    let mut kept = trimmed;
    for marker in rule.cut_markers {
        if let Some(idx) = kept.find(marker) {
            kept = &kept[..idx];
        }
    }
    kept.to_string()
}
