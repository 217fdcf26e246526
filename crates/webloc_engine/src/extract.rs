use scraper::{Html, Selector};

/// Pulls the display title out of a page:
/// - `<title>` text if present and non-empty
/// - otherwise the `og:title` meta property
///
/// Whitespace runs (including newlines inside `<title>`) collapse to one space.
pub fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let from_title = Selector::parse("title")
        .ok()
        .and_then(|sel| doc.select(&sel).next().map(|t| t.text().collect::<String>()))
        .map(|t| collapse_whitespace(&t))
        .filter(|t| !t.is_empty());
    if from_title.is_some() {
        return from_title;
    }

    Selector::parse(r#"meta[property="og:title"]"#)
        .ok()
        .and_then(|sel| {
            doc.select(&sel)
                .next()
                .and_then(|m| m.value().attr("content").map(str::to_string))
        })
        .map(|t| collapse_whitespace(&t))
        .filter(|t| !t.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
