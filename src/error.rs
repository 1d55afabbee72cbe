#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("Database error")]
    DatabaseError(#[from] sqlx::error::Error),

    #[error("Request error")]
    RequestError(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    StatusError {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid JSON")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Could not find {what} in {url}")]
    MissingElement { url: String, what: String },

    #[error("Invalid date {value:?} (expected {format})")]
    DateError { value: String, format: String },

    #[error("Unknown comic or category: {0}")]
    UnknownComic(String),
}

impl CrawlerError {
    pub fn missing<U: Into<String>, W: Into<String>>(url: U, what: W) -> Self {
        CrawlerError::MissingElement {
            url: url.into(),
            what: what.into(),
        }
    }
}
