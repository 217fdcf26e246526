/// Maximum filename length, in characters, including the extension.
pub const PLATFORM_PATH_LIMIT: usize = 255;

/// Symbol and pictograph blocks removed from names.
const EXCLUDED_RANGES: &[(char, char)] = &[
    ('\u{1F600}', '\u{1F64F}'),
    ('\u{1F300}', '\u{1F5FF}'),
    ('\u{1F680}', '\u{1F6FF}'),
    ('\u{1F700}', '\u{1F77F}'),
    ('\u{1F780}', '\u{1F7FF}'),
    ('\u{1F800}', '\u{1F8FF}'),
    ('\u{1F900}', '\u{1F9FF}'),
    ('\u{1FA00}', '\u{1FA6F}'),
    ('\u{1FA70}', '\u{1FAFF}'),
    ('\u{2702}', '\u{27B0}'),
    ('\u{24C2}', '\u{257F}'),
    ('\u{2600}', '\u{26FF}'),
    ('\u{2700}', '\u{27BF}'),
    ('\u{FE00}', '\u{FE0F}'),
    ('\u{1F1E6}', '\u{1F1FF}'),
];

const FULL_WIDTH_SPACE: char = '\u{3000}';

fn is_disallowed(c: char) -> bool {
    matches!(c, '/' | '\\' | '?' | '!' | '"' | '\u{201C}' | '\u{201D}' | '\0') || c.is_control()
}

fn is_pictographic(c: char) -> bool {
    EXCLUDED_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

/// Largest name length that still fits the platform limit once the
/// extension and directory path are accounted for.
pub fn max_name_len(reserved_suffix_len: usize, directory_path_len: usize) -> usize {
    PLATFORM_PATH_LIMIT
        .saturating_sub(reserved_suffix_len)
        .saturating_sub(directory_path_len)
}

/// Produces a filesystem-safe name from a rule-engine candidate.
///
/// Leading and interior spaces are kept as-is; display prefixes rely on them.
/// Trailing whitespace is dropped.
/// Truncation keeps the first `max_name_len` characters and is not word-aware.
pub fn sanitize_name(
    candidate: &str,
    reserved_suffix_len: usize,
    directory_path_len: usize,
) -> String {
    let cleaned: String = candidate
        .chars()
        .filter(|c| !is_disallowed(*c) && !is_pictographic(*c))
        .map(|c| match c {
            FULL_WIDTH_SPACE => ' ',
            ':' => '：',
            other => other,
        })
        .collect();

    let cleaned = cleaned.trim_end();

    let limit = max_name_len(reserved_suffix_len, directory_path_len);
    if cleaned.chars().count() > limit {
        let truncated: String = cleaned.chars().take(limit).collect();
        truncated.trim_end().to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_disallowed_characters() {
        assert_eq!(
            sanitize_name("What? A/B \"quote\" wow!", 7, 10),
            "What AB quote wow"
        );
    }

    #[test]
    fn colon_becomes_full_width() {
        assert_eq!(sanitize_name("Rust: the book", 7, 0), "Rust： the book");
    }

    #[test]
    fn removes_emoji_and_symbols() {
        assert_eq!(sanitize_name("Party 🎉 time ☀️ now", 7, 0), "Party  time  now");
    }

    #[test]
    fn trailing_whitespace_left_by_removal_is_trimmed() {
        assert_eq!(sanitize_name("Tune 🎵", 7, 0), "Tune");
    }

    #[test]
    fn full_width_space_becomes_ascii() {
        assert_eq!(sanitize_name("香港\u{3000}旅行", 7, 0), "香港 旅行");
    }

    #[test]
    fn keeps_display_prefix_spacing() {
        let name = "       YouTube - Some Video";
        assert_eq!(sanitize_name(name, 7, 20), name);
    }

    #[test]
    fn truncates_to_length_budget() {
        let long = "字".repeat(300);
        let out = sanitize_name(&long, 7, 48);
        assert_eq!(out.chars().count(), 255 - 7 - 48);
        assert!(long.starts_with(&out));
    }

    #[test]
    fn length_invariant_holds_for_oversized_reservations() {
        let out = sanitize_name("anything", 200, 100);
        assert_eq!(out, "");
        assert_eq!(max_name_len(200, 100), 0);
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "Plain name",
            "a/b?c!d: 🎉\u{3000}e",
            &"x".repeat(400),
            "\u{201C}curly\u{201D} \u{1F1EF}\u{1F1F5}",
        ] {
            let once = sanitize_name(input, 7, 30);
            assert_eq!(sanitize_name(&once, 7, 30), once, "input {input:?}");
            assert!(once.chars().count() + 7 + 30 <= PLATFORM_PATH_LIMIT);
        }
    }
}
