/// Structured error types for pokedex-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// The server crate maps these onto HTTP status codes; binaries can
/// still wrap them in `anyhow` at the edge.

use thiserror::Error;

/// Main error type for pokedex-core operations
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Import range failed validation; no partial work is attempted
    #[error("invalid import range [{start}, {end}]: start must be >= 1 and end >= start")]
    InvalidRange { start: i64, end: i64 },

    /// Upstream returned a non-retryable status (e.g. 404, 400)
    #[error("catalog returned {status} for {url}: {body}")]
    PermanentStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// Retryable statuses on every attempt until the budget ran out
    #[error("catalog still returning {last_status} for {url} after {attempts} attempts")]
    RetriesExhausted {
        last_status: u16,
        url: String,
        attempts: u32,
    },

    /// Transport-level failure (connect, timeout) after the retry budget
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Upstream said 200 but the body did not parse
    #[error("could not decode catalog response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Store operation failed
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for pokedex-core operations
pub type Result<T> = std::result::Result<T, PokedexError>;

impl PokedexError {
    /// Create an invalid range error
    pub fn invalid_range(start: i64, end: i64) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Create a permanent status error, truncating the body for display
    pub fn permanent_status(status: u16, url: impl Into<String>, body: &str) -> Self {
        Self::PermanentStatus {
            status,
            url: url.into(),
            body: truncate_body(body),
        }
    }

    /// Create a retries exhausted error
    pub fn retries_exhausted(last_status: u16, url: impl Into<String>, attempts: u32) -> Self {
        Self::RetriesExhausted {
            last_status,
            url: url.into(),
            attempts,
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Truncate upstream error bodies so logs don't carry whole HTML pages
fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PokedexError::invalid_range(5, 2);
        assert_eq!(
            err.to_string(),
            "invalid import range [5, 2]: start must be >= 1 and end >= start"
        );

        let err = PokedexError::retries_exhausted(503, "https://x/pokemon/7", 5);
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("https://x/pokemon/7"));
        assert!(err.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_body_truncation() {
        let long = "x".repeat(2000);
        let err = PokedexError::permanent_status(400, "https://x", &long);
        match err {
            PokedexError::PermanentStatus { body, .. } => {
                assert_eq!(body.len(), 503); // 500 chars + "..."
            }
            _ => panic!("wrong variant"),
        }
    }
}
