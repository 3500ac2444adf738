use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("sales data is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type Result<T> = std::result::Result<T, ReportError>;
