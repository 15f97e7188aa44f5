//! Application-wide error types.

use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().starts_with("config error"));
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn source_error_converts() {
        let e: AppError = SourceError::UnknownSource("scraper".into()).into();
        assert!(e.to_string().contains("source error"));
        assert!(e.to_string().contains("scraper"));
    }
}
