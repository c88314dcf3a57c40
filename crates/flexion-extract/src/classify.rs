use regex::Regex;

use crate::error::ExtractError;
use crate::model::{ConjugationRecord, Person, Tense};
use crate::options::{ExtractOptions, PronounStrip};
use crate::walk::Cell;

pub const HEADER_LABEL: &str = "Person";
pub const SENTINEL: &str = "Futur II";
pub const PLURAL_MARKER: &str = "Plural";
pub const NEGATION_MARKER: &str = "nicht";
pub const ROWS_PER_TENSE: usize = 6;

const PRONOUN_PATTERN: &str = r"^\s*\S+\s+(?P<form>[^,]*)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub label: String,
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowOutcome {
    Header,
    Malformed,
    Record {
        record: ConjugationRecord,
        overflowed: bool,
    },
}

#[must_use]
pub fn strip_pronoun(raw: &str) -> String {
    let remainder = raw.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    truncate_at_comma(&remainder)
}

fn truncate_at_comma(input: &str) -> String {
    input
        .split_once(',')
        .map_or(input, |(head, _)| head)
        .trim()
        .to_string()
}

#[must_use]
pub fn classify_person(label: &str) -> Person {
    if label.contains("1.") {
        Person::First
    } else if label.contains("2.") {
        Person::Second
    } else {
        Person::Third
    }
}

pub(crate) enum FormNormalizer {
    Split,
    Pattern(Regex),
}

impl FormNormalizer {
    pub(crate) fn new(strategy: PronounStrip) -> Result<Self, ExtractError> {
        match strategy {
            PronounStrip::Split => Ok(Self::Split),
            PronounStrip::Pattern => Regex::new(PRONOUN_PATTERN)
                .map(Self::Pattern)
                .map_err(|error| ExtractError::InvalidOption(error.to_string())),
        }
    }

    pub(crate) fn normalize(&self, raw: &str) -> String {
        match self {
            Self::Split => strip_pronoun(raw),
            Self::Pattern(pattern) => pattern
                .captures(raw)
                .and_then(|capture| capture.name("form"))
                .map_or_else(
                    || truncate_at_comma(raw),
                    |form| form.as_str().trim().to_string(),
                ),
        }
    }
}

// A page whose blocks are not exactly ROWS_PER_TENSE rows long shifts every later tag.
#[derive(Debug, Default)]
pub(crate) struct TenseCounter {
    eligible: usize,
}

impl TenseCounter {
    pub(crate) fn advance(&mut self) -> (Tense, bool) {
        let block = self.eligible / ROWS_PER_TENSE;
        self.eligible += 1;
        match Tense::ORDER.get(block) {
            Some(tense) => (*tense, false),
            None => (Tense::FuturII, true),
        }
    }
}

pub(crate) fn raw_entry(cells: &[Cell], options: &ExtractOptions) -> Option<RawEntry> {
    if cells.len() < options.min_cells {
        return None;
    }

    let data = match cells {
        [first, rest @ ..]
            if options.collapse_leading_column && cells.len() >= 3 && first.is_decorative() =>
        {
            rest
        }
        _ => cells,
    };

    let [label, form, ..] = data else {
        return None;
    };
    Some(RawEntry {
        label: label.text.trim().to_string(),
        form: form.text.trim().to_string(),
    })
}

pub(crate) fn classify_row(
    cells: &[Cell],
    options: &ExtractOptions,
    normalizer: &FormNormalizer,
    counter: &mut TenseCounter,
) -> RowOutcome {
    let Some(entry) = raw_entry(cells, options) else {
        return RowOutcome::Malformed;
    };

    if entry.label.is_empty() || entry.label == HEADER_LABEL {
        return RowOutcome::Header;
    }

    let value = normalizer.normalize(&entry.form);
    let person = classify_person(&entry.label);
    let plural = entry.label.contains(PLURAL_MARKER);
    let negation = value.contains(NEGATION_MARKER);
    let (tense, overflowed) = counter.advance();

    RowOutcome::Record {
        record: ConjugationRecord::new(value, person, tense, plural, negation),
        overflowed,
    }
}
