use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ExtractError;
use crate::model::{ConjugationRecord, Tag};
use crate::options::OutputFormat;

pub const CSV_HEADERS: [&str; 3] = ["lang", "value", "tags"];
pub const TAG_SEPARATOR: &str = ", ";

pub fn write_json_to_string(records: &[ConjugationRecord]) -> Result<String, ExtractError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_csv_to_string(
    records: &[ConjugationRecord],
    include_header: bool,
) -> Result<String, ExtractError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    if include_header {
        writer.write_record(CSV_HEADERS)?;
    }
    for record in records {
        writer.write_record([
            record.lang(),
            record.value(),
            record.joined_tags(TAG_SEPARATOR).as_str(),
        ])?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Io(error.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidRecord(format!("invalid utf-8 csv output: {error}")))
}

pub fn render(
    records: &[ConjugationRecord],
    format: OutputFormat,
    include_header: bool,
) -> Result<String, ExtractError> {
    match format {
        OutputFormat::Json => write_json_to_string(records),
        OutputFormat::Csv => write_csv_to_string(records, include_header),
    }
}

pub fn parse_csv(input: &str, has_header: bool) -> Result<Vec<ConjugationRecord>, ExtractError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .from_reader(input.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let [lang, value, tags] = [0, 1, 2].map(|column| row.get(column));
        let (Some(lang), Some(value), Some(tags)) = (lang, value, tags) else {
            return Err(ExtractError::InvalidRecord(format!(
                "row {} has {} columns, expected 3",
                index + 1,
                row.len()
            )));
        };

        let tags = tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.parse::<Tag>().map_err(ExtractError::InvalidRecord))
            .collect::<Result<Vec<_>, _>>()?;
        records.push(ConjugationRecord::from_parts(
            lang.to_string(),
            value.to_string(),
            tags,
        ));
    }
    Ok(records)
}
