use thiserror::Error;

/// Errors that can occur while looking up meals
#[derive(Error, Debug)]
pub enum MealError {
    /// Input rejected before any request was made (blank query, blank id, bad selector value)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Transport failure or non-success HTTP status
    #[error("Failed to fetch from meal API: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Response body was not the JSON shape the API documents
    #[error("Failed to decode meal API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl MealError {
    /// True for failures the user sees as "network or API error"
    pub fn is_network(&self) -> bool {
        matches!(self, MealError::Fetch(_) | MealError::Decode(_))
    }
}
