use flexion_extract::{ExtractError, Extraction, Extractor};
use url::Url;
use worker::Fetch;

use crate::error::ApiError;

pub async fn fetch_flexion_page(locator: &Url) -> Result<String, ApiError> {
    let mut response = Fetch::Url(locator.clone()).send().await?;
    let status = response.status_code();
    if status >= 400 {
        return Err(ApiError::Upstream(format!(
            "failed to fetch conjugation page: status {status}"
        )));
    }

    let html = response.text().await?;
    Ok(html)
}

pub async fn scrape_conjugations(extractor: &Extractor, verb: &str) -> Extraction {
    let fetched = match extractor.locator(verb) {
        Ok(locator) => fetch_flexion_page(&locator)
            .await
            .map_err(|error| ExtractError::Retrieval(error.to_string())),
        Err(error) => Err(error),
    };

    let extraction = extractor.extract_fetched(verb, fetched);
    match &extraction.diagnostic {
        Some(diagnostic) => {
            worker::console_warn!("conjugation extraction for '{verb}' returned no records: {diagnostic}");
        }
        None => {
            worker::console_log!(
                "conjugation extraction completed: verb={}, records={}, tables={}, skipped_rows={}",
                verb,
                extraction.records.len(),
                extraction.report.tables_scanned,
                extraction.report.rows_skipped
            );
        }
    }
    extraction
}
