#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningCode {
    MalformedRow,
    TenseOverflow,
    SentinelNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub table: Option<usize>,
    pub row: Option<usize>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            table: None,
            row: None,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: usize) -> Self {
        self.table = Some(table);
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}
