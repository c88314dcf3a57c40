mod classify;
mod csv_out;
mod error;
mod fetch;
#[cfg(test)]
mod fixture;
mod html;
mod locate;
mod model;
mod options;
mod tree;
mod walk;
mod warning;

use crate::classify::{FormNormalizer, RowOutcome, SENTINEL, TenseCounter, classify_row};
use crate::walk::{collect_tables, table_rows};
use crate::warning::WarningCode;

pub use classify::{ROWS_PER_TENSE, classify_person, strip_pronoun};
pub use csv_out::{
    CSV_HEADERS, TAG_SEPARATOR, parse_csv, render, write_csv_to_string, write_json_to_string,
};
pub use error::ExtractError;
pub use fetch::PageFetcher;
pub use html::HtmlDocument;
pub use locate::{conjugation_url, encode_verb};
pub use model::{ConjugationRecord, LANGUAGE, Person, Tag, Tense};
pub use options::{
    DEFAULT_SECTION_ID, DEFAULT_SOURCE_URL, ExtractOptions, OutputFormat, PronounStrip, TableScan,
};
pub use tree::DocumentTree;
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionReport {
    pub tables_scanned: usize,
    pub rows_skipped: usize,
    pub sentinel_found: bool,
    pub warnings: Vec<ExtractWarning>,
}

/// On failure `records` is empty and `diagnostic` says why.
#[derive(Debug)]
pub struct Extraction {
    pub records: Vec<ConjugationRecord>,
    pub report: ExtractionReport,
    pub diagnostic: Option<ExtractError>,
}

impl Extraction {
    fn failed(diagnostic: ExtractError) -> Self {
        tracing::warn!(code = diagnostic.code(), "extraction yielded no records: {diagnostic}");
        Self {
            records: Vec::new(),
            report: ExtractionReport::default(),
            diagnostic: Some(diagnostic),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> &'static str {
        self.diagnostic.as_ref().map_or("ok", ExtractError::code)
    }
}

pub struct Extractor {
    options: ExtractOptions,
    normalizer: FormNormalizer,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Result<Self, ExtractError> {
        if options.min_cells < 2 {
            return Err(ExtractError::InvalidOption(
                "min_cells must be at least 2".to_string(),
            ));
        }
        if options.section_id.trim().is_empty() {
            return Err(ExtractError::InvalidOption(
                "section_id must not be empty".to_string(),
            ));
        }

        let normalizer = FormNormalizer::new(options.pronoun_strip)?;
        Ok(Self {
            options,
            normalizer,
        })
    }

    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn locator(&self, verb: &str) -> Result<url::Url, ExtractError> {
        conjugation_url(&self.options.source_url, verb)
    }

    pub fn extract<F>(&self, verb: &str, fetcher: &F) -> Extraction
    where
        F: PageFetcher + ?Sized,
    {
        let fetched = self
            .locator(verb)
            .and_then(|locator| fetcher.fetch(&locator));
        self.extract_fetched(verb, fetched)
    }

    pub fn extract_fetched(&self, verb: &str, fetched: Result<String, ExtractError>) -> Extraction {
        let verb = match locate::normalize_verb(verb) {
            Ok(verb) => verb,
            Err(error) => return Extraction::failed(error),
        };
        let body = match fetched {
            Ok(body) => body,
            Err(error) => return Extraction::failed(error),
        };
        if let Err(error) = locate::verify_page(&body, &verb) {
            return Extraction::failed(error);
        }

        let document = HtmlDocument::parse(&body);
        self.extract_from_tree(&document)
    }

    pub fn extract_from_tree<T: DocumentTree>(&self, tree: &T) -> Extraction {
        let Some(anchor) = tree.find_by_id(&self.options.section_id) else {
            return Extraction::failed(ExtractError::SectionNotFound(
                self.options.section_id.clone(),
            ));
        };
        let start = tree.parent(anchor).unwrap_or(anchor);
        let tables = collect_tables(tree, start, self.options.table_scan);

        let mut records = Vec::new();
        let mut report = ExtractionReport::default();
        let mut counter = TenseCounter::default();
        let mut overflow_reported = false;

        for (table_index, table) in tables.into_iter().enumerate() {
            let mut sentinel_seen = false;
            for (row_index, cells) in table_rows(tree, table).iter().enumerate() {
                if cells.iter().any(|cell| cell.text.contains(SENTINEL)) {
                    sentinel_seen = true;
                }

                match classify_row(cells, &self.options, &self.normalizer, &mut counter) {
                    RowOutcome::Record { record, overflowed } => {
                        if overflowed && !overflow_reported {
                            overflow_reported = true;
                            tracing::warn!(
                                table = table_index,
                                row = row_index,
                                "more eligible rows than tense slots; reusing the last tense"
                            );
                            report.warnings.push(
                                ExtractWarning::new(
                                    WarningCode::TenseOverflow,
                                    "more eligible rows than tense slots; reusing the last tense",
                                )
                                .with_table(table_index)
                                .with_row(row_index),
                            );
                        }
                        records.push(record);
                    }
                    RowOutcome::Header => {}
                    RowOutcome::Malformed => {
                        tracing::debug!(
                            table = table_index,
                            row = row_index,
                            cells = cells.len(),
                            "skipping row without enough cells"
                        );
                        report.rows_skipped += 1;
                        report.warnings.push(
                            ExtractWarning::new(
                                WarningCode::MalformedRow,
                                format!("row has {} cell(s)", cells.len()),
                            )
                            .with_table(table_index)
                            .with_row(row_index),
                        );
                    }
                }
            }

            report.tables_scanned += 1;
            if sentinel_seen {
                report.sentinel_found = true;
                break;
            }
        }

        if !report.sentinel_found {
            tracing::warn!(
                tables = report.tables_scanned,
                "no '{SENTINEL}' block seen; scanned every table after the anchor"
            );
            report.warnings.push(ExtractWarning::new(
                WarningCode::SentinelNotFound,
                format!("no '{SENTINEL}' block seen"),
            ));
        }

        tracing::debug!(
            records = records.len(),
            tables = report.tables_scanned,
            skipped = report.rows_skipped,
            "conjugation extraction completed"
        );

        Extraction {
            records,
            report,
            diagnostic: None,
        }
    }
}
