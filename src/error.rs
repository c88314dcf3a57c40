use std::fmt::{Display, Formatter};

use flexion_extract::ExtractError;
use worker::Response;

use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
    Render(String),
    Config(String),
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Upstream(_) => "upstream_error",
            Self::Render(_) => "render_error",
            Self::Config(_) => "config_error",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::Upstream(message)
            | Self::Render(message)
            | Self::Config(message)
            | Self::Internal(message) => message,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Upstream(_) => 502,
            Self::Render(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    pub fn into_response(self) -> worker::Result<Response> {
        let mut response = Response::from_json(&ErrorResponse {
            code: self.code().to_string(),
            message: self.message().to_string(),
        })?;
        response.headers_mut().set("Cache-Control", "no-store")?;
        Ok(response.with_status(self.status_code()))
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<worker::Error> for ApiError {
    fn from(error: worker::Error) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Render(error.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<ExtractError> for ApiError {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::EmptyVerb => Self::BadRequest(error.to_string()),
            ExtractError::InvalidOption(_) => Self::Config(error.to_string()),
            ExtractError::Retrieval(_) | ExtractError::SectionNotFound(_) => {
                Self::Upstream(error.to_string())
            }
            ExtractError::Io(_)
            | ExtractError::Csv(_)
            | ExtractError::Json(_)
            | ExtractError::InvalidRecord(_) => {
                Self::Render(error.to_string())
            }
        }
    }
}
