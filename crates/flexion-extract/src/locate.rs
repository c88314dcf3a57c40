use url::Url;

use crate::error::ExtractError;

pub(crate) fn normalize_verb(verb: &str) -> Result<String, ExtractError> {
    let verb = verb.trim().to_lowercase();
    if verb.is_empty() {
        return Err(ExtractError::EmptyVerb);
    }
    Ok(verb)
}

#[must_use]
pub fn encode_verb(verb: &str) -> String {
    urlencoding::encode(verb).into_owned()
}

pub fn conjugation_url(source_url: &str, verb: &str) -> Result<Url, ExtractError> {
    let verb = normalize_verb(verb)?;
    let raw = format!("{source_url}{}", encode_verb(&verb));
    Url::parse(&raw)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid page URL '{raw}': {error}")))
}

pub(crate) fn verify_page(body: &str, verb: &str) -> Result<(), ExtractError> {
    if body.trim().is_empty() {
        return Err(ExtractError::Retrieval("fetched page is empty".to_string()));
    }

    let marker = encode_verb(verb);
    if !body.contains(&marker) {
        return Err(ExtractError::Retrieval(format!(
            "page does not mention '{marker}'; no such verb"
        )));
    }
    Ok(())
}
