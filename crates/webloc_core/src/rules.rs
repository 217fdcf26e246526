//! Ordered platform rules that turn a raw page title into a display name.
//!
//! Rules are evaluated top to bottom and the first match wins, so a rule whose
//! marker is contained in another rule's host must be declared before it.

/// Separator between a display prefix and the name proper.
pub const NAME_SEPARATOR: &str = " - ";

/// Prefix used when no platform rule matches.
pub const FALLBACK_PREFIX: &str = "       Link - ";

pub type SuffixCleaner = fn(&str) -> String;

#[derive(Debug, Clone, Copy)]
pub struct PlatformRule {
    pub label: &'static str,
    /// Lowercase substrings, any of which identifies the platform in a URL.
    pub url_markers: &'static [&'static str],
    pub prefix: &'static str,
    pub suffix_cleaner: SuffixCleaner,
}

impl PlatformRule {
    pub fn matches(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.url_markers.iter().any(|marker| url.contains(marker))
    }
}

pub const PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        label: "Bilibili",
        url_markers: &["b23.tv", "bilibili.com"],
        prefix: "       Bilibili - ",
        suffix_cleaner: clean_bilibili,
    },
    PlatformRule {
        label: "YouTube",
        url_markers: &["youtu.be", "youtube.com"],
        prefix: "       YouTube - ",
        suffix_cleaner: clean_youtube,
    },
    PlatformRule {
        label: "Baidu Baike",
        url_markers: &["baike.baidu.com"],
        prefix: "       百度百科 - ",
        suffix_cleaner: clean_baike,
    },
    PlatformRule {
        label: "Wikipedia",
        url_markers: &["wikipedia.org"],
        prefix: "       Wikipedia - ",
        suffix_cleaner: clean_wikipedia,
    },
    PlatformRule {
        label: "GeeksforGeeks",
        url_markers: &["geeksforgeeks.org"],
        prefix: "       GeeksforGeeks - ",
        suffix_cleaner: clean_geeksforgeeks,
    },
    PlatformRule {
        label: "Latex StackExchange",
        url_markers: &["tex.stackexchange.com"],
        prefix: "       Latex StackExchange - ",
        suffix_cleaner: clean_tex_stackexchange,
    },
    PlatformRule {
        label: "StackOverflow",
        url_markers: &["stackoverflow.com"],
        prefix: "       StackOverflow - ",
        suffix_cleaner: clean_stackoverflow,
    },
    PlatformRule {
        label: "Zhihu",
        url_markers: &["zhihu.com"],
        prefix: "       Zhihu - ",
        suffix_cleaner: clean_zhihu,
    },
    PlatformRule {
        label: "CSDN",
        url_markers: &["blog.csdn.net"],
        prefix: "       CSDN - ",
        suffix_cleaner: clean_csdn,
    },
    PlatformRule {
        label: "HuggingFace",
        url_markers: &["huggingface.co"],
        prefix: "       HuggingFace - ",
        suffix_cleaner: keep,
    },
    PlatformRule {
        label: "BBC",
        url_markers: &["bbc.com", "bbc.co.uk"],
        prefix: "       BBC - ",
        suffix_cleaner: clean_bbc,
    },
    PlatformRule {
        label: "Python",
        url_markers: &["python.org"],
        prefix: "       Python - ",
        suffix_cleaner: keep,
    },
    PlatformRule {
        label: "Github",
        url_markers: &["github.com"],
        prefix: "       Github - ",
        suffix_cleaner: clean_github,
    },
];

/// Returns the first rule matching `url`, in declared order.
pub fn match_rule(url: &str) -> Option<&'static PlatformRule> {
    PLATFORM_RULES.iter().find(|rule| rule.matches(url))
}

/// Text after the last `" - "` separator, or the whole input.
pub fn last_segment(name: &str) -> &str {
    name.rsplit(NAME_SEPARATOR).next().unwrap_or(name)
}

/// Splits the display-name candidate for `raw_title` found at `url` into the
/// rule's prefix and the cleaned text that follows it.
///
/// A title that already starts with the matched prefix keeps its text and only
/// runs the cleaner, which never sees the prefix.
pub fn rule_candidate(url: &str, raw_title: &str) -> (&'static str, String) {
    let Some(rule) = match_rule(url) else {
        return (FALLBACK_PREFIX, last_segment(raw_title).trim().to_string());
    };

    let body = match raw_title.strip_prefix(rule.prefix) {
        Some(body) => body.to_string(),
        // Brand boilerplate is itself " - "-separated, so clean before splitting.
        None => last_segment(&(rule.suffix_cleaner)(raw_title)).to_string(),
    };
    (rule.prefix, (rule.suffix_cleaner)(&body).trim().to_string())
}

/// Builds the display-name candidate for `raw_title` found at `url`. The
/// candidate is neither sanitized nor length-checked.
pub fn apply_rules(url: &str, raw_title: &str) -> String {
    let (prefix, body) = rule_candidate(url, raw_title);
    format!("{prefix}{body}")
}

fn keep(name: &str) -> String {
    name.to_string()
}

fn cut_at<'a>(name: &'a str, marker: &str) -> &'a str {
    name.split(marker).next().unwrap_or(name)
}

fn clean_bilibili(name: &str) -> String {
    let name = cut_at(name, "_哔哩哔哩bilibili");
    cut_at(name, "_哔哩哔哩_bilibili").to_string()
}

fn clean_youtube(name: &str) -> String {
    let name = cut_at(name, "• • 收看次數");
    name.replace(" - YouTube", "").trim_end().to_string()
}

fn clean_baike(name: &str) -> String {
    name.replace("_百度百科", "")
}

fn clean_wikipedia(name: &str) -> String {
    name.replace(" - 維基百科, 自由的百科全書", "")
        .replace(" 維基百科，自由的百科全書", "")
        .replace(" - Wikipedia", "")
}

fn clean_geeksforgeeks(name: &str) -> String {
    name.replace(" | GeeksforGeeks", "")
}

fn clean_tex_stackexchange(name: &str) -> String {
    name.replace(" - TeX - LaTeX Stack Exchange", "")
}

fn clean_stackoverflow(name: &str) -> String {
    name.replace(" - Stack Overflow", "")
}

fn clean_zhihu(name: &str) -> String {
    name.replace(" - 知乎", "")
}

fn clean_csdn(name: &str) -> String {
    name.replace("-CSDN博客", "")
}

fn clean_bbc(name: &str) -> String {
    name.replace(" - BBC News 中文", "").replace(" - BBC News", "")
}

fn clean_github(name: &str) -> String {
    cut_at(name, " · ").to_string()
}
