use url::Url;

use crate::error::ExtractError;

pub trait PageFetcher {
    fn fetch(&self, locator: &Url) -> Result<String, ExtractError>;
}

impl<F> PageFetcher for F
where
    F: Fn(&Url) -> Result<String, ExtractError>,
{
    fn fetch(&self, locator: &Url) -> Result<String, ExtractError> {
        self(locator)
    }
}
