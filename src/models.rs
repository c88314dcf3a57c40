use serde::{Deserialize, Serialize};

pub const CONJUGATION_PATH: &str = "/api/v1/conjugation";
pub const LEGACY_PATH: &str = "/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
