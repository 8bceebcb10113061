pub mod cells;
pub mod document;
pub mod extract;
pub mod listings;

pub use document::ParseError;
pub use extract::{Metadata, Record, ScoreSummary};

/// Full pipeline over one results document: decode and parse, locate each
/// restaurant listing, extract its metadata and score rollup. Records come
/// back in document order; a page with no listings is an empty Vec.
pub fn process(content: &[u8], encoding: &str) -> Result<Vec<Record>, ParseError> {
    let doc = document::parse(content, encoding)?;
    let records = listings::find_listings(&doc)
        .into_iter()
        .map(extract::extract_all)
        .collect();
    Ok(records)
}
