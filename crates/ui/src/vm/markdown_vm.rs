use std::collections::{HashMap, HashSet};

/// Render model output (markdown with `$…$` math) to sanitized HTML.
///
/// Math spans come out as `<span class="math …">` for a client-side renderer.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_MATH);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td", "del",
    ]
    .into_iter()
    .collect();

    let mut classes: HashMap<&str, HashSet<&str>> = HashMap::new();
    classes.insert(
        "span",
        ["math", "math-inline", "math-display"].into_iter().collect(),
    );

    ammonia::Builder::new()
        .tags(tags)
        .allowed_classes(classes)
        .clean(html)
        .to_string()
}
