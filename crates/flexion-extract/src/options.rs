use std::str::FromStr;

pub const DEFAULT_SOURCE_URL: &str = "https://de.wiktionary.org/wiki/Flexion:";
pub const DEFAULT_SECTION_ID: &str = "Indikativ_und_Konjunktiv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronounStrip {
    Split,
    Pattern,
}

impl FromStr for PronounStrip {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "pattern" | "regex" => Ok(Self::Pattern),
            other => Err(format!(
                "invalid pronoun strategy '{other}', expected split or pattern"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableScan {
    Siblings,
    Following,
}

impl FromStr for TableScan {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "siblings" => Ok(Self::Siblings),
            "following" => Ok(Self::Following),
            other => Err(format!(
                "invalid table scan '{other}', expected siblings or following"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported format '{other}', expected json or csv")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub source_url: String,
    pub section_id: String,
    pub min_cells: usize,
    pub collapse_leading_column: bool,
    pub pronoun_strip: PronounStrip,
    pub table_scan: TableScan,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            section_id: DEFAULT_SECTION_ID.to_string(),
            min_cells: 2,
            collapse_leading_column: true,
            pronoun_strip: PronounStrip::Split,
            table_scan: TableScan::Siblings,
        }
    }
}
