use scraper::ElementRef;

/// Characters stripped from both ends of cell text; the site pads its
/// label cells with colons and hyphens.
const STRIP: &[char] = &[' ', '\n', ':', '-'];

/// A row's direct `td` children, in order. The results page nests tables
/// inside cells; recursing here would mix their cells into the row.
pub fn direct_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

/// Text of a cell's direct text nodes, stripped of padding. Total: a
/// missing cell, or one holding only nested elements, comes back as "" so
/// the extractors never deal in absent values.
pub fn clean_cell(cell: Option<ElementRef<'_>>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    let text: String = cell
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &*text.text)
        .collect();
    text.trim_matches(STRIP).to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn table(rows: &str) -> Html {
        Html::parse_document(&format!("<table><tbody>{rows}</tbody></table>"))
    }

    fn td_selector() -> Selector {
        Selector::parse("td").unwrap()
    }

    #[test]
    fn strips_padding() {
        let doc = table("<tr><td> :Name- </td></tr>");
        let cell = doc.select(&td_selector()).next();
        assert_eq!(clean_cell(cell), "Name");
    }

    #[test]
    fn already_clean_text_is_unchanged() {
        let doc = table("<tr><td>Routine Inspection/Field Review</td></tr>");
        let cell = doc.select(&td_selector()).next();
        assert_eq!(clean_cell(cell), "Routine Inspection/Field Review");
    }

    #[test]
    fn padding_only_cell_is_empty() {
        let doc = table("<tr><td> -: \n </td></tr>");
        let cell = doc.select(&td_selector()).next();
        assert_eq!(clean_cell(cell), "");
    }

    #[test]
    fn missing_cell_is_empty() {
        assert_eq!(clean_cell(None), "");
    }

    #[test]
    fn nested_elements_only_is_empty() {
        let doc = table("<tr><td><span>hidden</span></td></tr>");
        let cell = doc.select(&td_selector()).next();
        assert_eq!(clean_cell(cell), "");
    }

    #[test]
    fn only_direct_text_is_read() {
        let doc = table("<tr><td>Seattle <b>WA</b></td></tr>");
        let cell = doc.select(&td_selector()).next();
        assert_eq!(clean_cell(cell), "Seattle");
    }

    #[test]
    fn direct_cells_skips_nested_tables() {
        let doc = table(
            "<tr><td>a</td><td><table><tbody><tr><td>inner</td></tr></tbody></table></td></tr>",
        );
        let row = doc.select(&Selector::parse("tr").unwrap()).next().unwrap();
        assert_eq!(direct_cells(&row).len(), 2);
    }
}
