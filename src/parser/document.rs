use encoding_rs::Encoding;
use scraper::Html;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized character encoding label `{0}`")]
    UnknownEncoding(String),
}

/// Decode raw bytes with the caller-supplied encoding label and build a
/// traversable tree. html5ever recovers from the page's unclosed tags and
/// entity quirks on its own; the one fatal case is a label we cannot
/// decode with. Unmappable bytes become replacement characters, not errors.
pub fn parse(content: &[u8], encoding: &str) -> Result<Html, ParseError> {
    let enc = Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| ParseError::UnknownEncoding(encoding.to_string()))?;
    let (text, _, _) = enc.decode(content);
    Ok(Html::parse_document(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_malformed_markup() {
        let doc = parse(b"<html><body><div id=x><table><tr><td>open", "utf-8").unwrap();
        let text: String = doc.root_element().text().collect();
        assert!(text.contains("open"));
    }

    #[test]
    fn decodes_by_label() {
        let doc = parse(b"<html><body>caf\xe9</body></html>", "windows-1252").unwrap();
        let text: String = doc.root_element().text().collect();
        assert!(text.contains("caf\u{e9}"));
    }

    #[test]
    fn label_is_case_insensitive() {
        assert!(parse(b"<p>ok</p>", "UTF-8").is_ok());
    }

    #[test]
    fn unknown_label_is_fatal() {
        let err = parse(b"<p>ok</p>", "martian").unwrap_err();
        assert!(matches!(err, ParseError::UnknownEncoding(label) if label == "martian"));
    }
}
