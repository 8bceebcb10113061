use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

const INSPECTION_DOMAIN: &str = "http://info.kingcounty.gov";
const INSPECTION_PATH: &str = "/health/ehs/foodsafety/inspections/Results.aspx";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Search form fields the operator can set. Everything else in the
/// service's query shape is fixed and filled in by `to_query`.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub business_name: String,
    pub business_address: String,
    pub city: String,
    pub zip_code: String,
    pub inspection_start: Option<NaiveDate>,
    pub inspection_end: Option<NaiveDate>,
}

impl SearchParams {
    /// The Results.aspx query contract. The service expects every field on
    /// every request, empty or not, so all sixteen are always sent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Output", "W".to_string()),
            ("Business_Name", self.business_name.clone()),
            ("Business_Address", self.business_address.clone()),
            ("Longitude", String::new()),
            ("Latitude", String::new()),
            ("City", self.city.clone()),
            ("Zip_Code", self.zip_code.clone()),
            ("Inspection_Type", "All".to_string()),
            ("Inspection_Start", format_date(self.inspection_start)),
            ("Inspection_End", format_date(self.inspection_end)),
            ("Inspection_Closed_Business", "A".to_string()),
            ("Violation_Points", String::new()),
            ("Violation_Red_Points", String::new()),
            ("Violation_Descr", String::new()),
            ("Fuzzy_Search", "N".to_string()),
            ("Sort", "H".to_string()),
        ]
    }
}

// Dates go over the wire in the service's M/D/YYYY form, unset as "".
fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

/// GET one search results page. Returns the raw body plus the encoding
/// label from the Content-Type header (utf-8 when the header is silent);
/// decoding is the parser's job.
pub async fn fetch_inspection_page(params: &SearchParams) -> Result<(Vec<u8>, String)> {
    let url = format!("{INSPECTION_DOMAIN}{INSPECTION_PATH}");
    info!("Fetching inspection results: {}", url);

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;
    let response = client
        .get(&url)
        .query(&params.to_query())
        .send()
        .await
        .context("Inspection search request failed")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP {} from inspection search", status);
    }

    let encoding = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_label)
        .unwrap_or_else(|| "utf-8".to_string());
    let body = response
        .bytes()
        .await
        .context("Failed to read response body")?;
    info!("Received {} bytes ({})", body.len(), encoding);

    Ok((body.to_vec(), encoding))
}

/// Offline stand-in for `fetch_inspection_page`: a previously saved
/// results page, assumed utf-8.
pub fn load_saved_page(path: &Path) -> Result<(Vec<u8>, String)> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read saved page {}", path.display()))?;
    Ok((content, "utf-8".to_string()))
}

/// charset parameter of a Content-Type value, if present.
fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}
