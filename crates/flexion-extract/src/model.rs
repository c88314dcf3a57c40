use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const LANGUAGE: &str = "de";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "1.PERS",
            Self::Second => "2.PERS",
            Self::Third => "3.PERS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Praesens,
    Praeteritum,
    Perfekt,
    Plusquamperfekt,
    FuturI,
    FuturII,
}

impl Tense {
    pub const ORDER: [Self; 6] = [
        Self::Praesens,
        Self::Praeteritum,
        Self::Perfekt,
        Self::Plusquamperfekt,
        Self::FuturI,
        Self::FuturII,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Praesens => "PRAESENS",
            Self::Praeteritum => "PRAETERITUM",
            Self::Perfekt => "PERFEKT",
            Self::Plusquamperfekt => "PLUSQAMPERFEKT",
            Self::FuturI => "FUTURI",
            Self::FuturII => "FUTURII",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tag {
    Person(Person),
    Tense(Tense),
    Plural,
    Negation,
}

impl Tag {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Person(person) => person.label(),
            Self::Tense(tense) => tense.label(),
            Self::Plural => "PLURAL",
            Self::Negation => "NEGATION",
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let person = [Person::First, Person::Second, Person::Third]
            .into_iter()
            .find(|person| person.label() == value);
        if let Some(person) = person {
            return Ok(Self::Person(person));
        }
        if let Some(tense) = Tense::ORDER.into_iter().find(|tense| tense.label() == value) {
            return Ok(Self::Tense(tense));
        }
        match value {
            "PLURAL" => Ok(Self::Plural),
            "NEGATION" => Ok(Self::Negation),
            _ => Err(format!("unknown tag: '{value}'")),
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.label().to_string()
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationRecord {
    lang: String,
    value: String,
    tags: Vec<Tag>,
}

impl ConjugationRecord {
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        person: Person,
        tense: Tense,
        plural: bool,
        negation: bool,
    ) -> Self {
        let mut tags = vec![Tag::Person(person), Tag::Tense(tense)];
        if plural {
            tags.push(Tag::Plural);
        }
        if negation {
            tags.push(Tag::Negation);
        }
        Self {
            lang: LANGUAGE.to_string(),
            value: value.into(),
            tags,
        }
    }

    pub(crate) fn from_parts(lang: String, value: String, tags: Vec<Tag>) -> Self {
        Self { lang, value, tags }
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn person(&self) -> Option<Person> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Person(person) => Some(*person),
            _ => None,
        })
    }

    #[must_use]
    pub fn tense(&self) -> Option<Tense> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Tense(tense) => Some(*tense),
            _ => None,
        })
    }

    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    #[must_use]
    pub fn joined_tags(&self, separator: &str) -> String {
        self.tags
            .iter()
            .map(|tag| tag.label())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
