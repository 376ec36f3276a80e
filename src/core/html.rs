// src/core/html.rs
// Element helpers over `scraper`. Section logic lives in specs.

use scraper::{ElementRef, Html, Selector};

use crate::error::ConfigError;

pub fn selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::Selector {
        selector: s!(css),
        message: e.to_string(),
    })
}

pub fn parse(doc: &str) -> Html {
    Html::parse_document(doc)
}

/// Concatenated descendant text, untrimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn is_list(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol")
}

/// Direct `<li>` children of a list element, in order.
pub fn list_items<'a>(list: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "li")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_items_are_direct_children_only() {
        let doc = parse("<ul><li>a<ul><li>inner</li></ul></li><li>b</li></ul>");
        let ul = doc.select(&selector("ul").unwrap()).next().unwrap();
        assert!(is_list(ul));
        let items: Vec<String> = list_items(ul).map(element_text).collect();
        assert_eq!(items, vec!["ainner", "b"]);
    }

    #[test]
    fn bad_selector_is_a_config_error() {
        assert!(selector("h2[").is_err());
    }
}
