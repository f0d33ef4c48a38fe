use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhHeatError>;

#[derive(Error, Debug)]
pub enum GhHeatError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} from {url}")]
    Status { status: u16, url: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepo(String),
    #[error("Unknown heatmap {kind} label: {label}")]
    UnknownLabel { kind: &'static str, label: String },
    #[error("Other: {0}")]
    Other(String),
}
