use scraper::{Html, Selector};

/// Returns every `href` attribute value attached to an `<a>` element, in
/// document order, duplicates included. Anchors without an `href` contribute
/// nothing. No validation of URL well-formedness is done.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor = Selector::parse("a").unwrap();
    document
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

/// Keeps only the links whose uppercase form starts with `prefix` (compared
/// uppercase as well). `None` keeps everything.
pub fn filter_prefix(links: Vec<String>, prefix: Option<&str>) -> Vec<String> {
    let Some(prefix) = prefix else {
        return links;
    };
    let prefix = prefix.to_ascii_uppercase();
    links
        .into_iter()
        .filter(|link| link.to_ascii_uppercase().starts_with(&prefix))
        .collect()
}
