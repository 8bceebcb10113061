use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

// Listing ids look like "PR0086009~24d0a6a2-...": program record number,
// tilde, then a UUID. Matched as a substring so the suffix never matters.
static LISTING_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"PR[0-9]+~").unwrap());
static DIV_WITH_ID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[id]").unwrap());

/// All restaurant listing blocks in the document, in document order.
/// A page with no matches is an empty result, not an error.
pub fn find_listings(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&DIV_WITH_ID)
        .filter(|el| {
            el.value()
                .attr("id")
                .is_some_and(|id| LISTING_ID_RE.is_match(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_listings_in_document_order() {
        let doc = Html::parse_document(
            "<body>\
             <div id=\"PR0086009~24d0a6a2-40ef-4b21-9c3a-c3a9f5763abc\">first</div>\
             <div id=\"nav\">menu</div>\
             <div id=\"PR0012345~f00dbabe-1111-2222-3333-444455556666\">second</div>\
             </body>",
        );
        let listings = find_listings(&doc);
        assert_eq!(listings.len(), 2);
        let texts: Vec<String> = listings
            .iter()
            .map(|l| l.text().collect::<String>())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn id_is_matched_as_substring() {
        let doc = Html::parse_document("<div id=\"resultsPR77~tail\">x</div>");
        assert_eq!(find_listings(&doc).len(), 1);
    }

    #[test]
    fn rejects_near_misses() {
        let doc = Html::parse_document(
            "<div id=\"PR~missing-digits\">a</div>\
             <div id=\"PR123\">no-tilde</div>\
             <div id=\"PageControl\">b</div>\
             <div>no-id</div>",
        );
        assert!(find_listings(&doc).is_empty());
    }

    #[test]
    fn no_listings_is_empty_not_error() {
        let doc = Html::parse_document("<html><body><p>No results found.</p></body></html>");
        assert!(find_listings(&doc).is_empty());
    }
}
