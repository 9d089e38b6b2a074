use std::path::PathBuf;

/// Errors produced while loading configuration, colours or translations.
///
/// The scanning and layout paths never fail; only the ambient setup does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scanner config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color `{value}`: {reason}")]
    InvalidColor { value: String, reason: String },
    #[error("invalid locale `{locale}`: {source}")]
    InvalidLocale {
        locale: String,
        #[source]
        source: unic_langid::LanguageIdentifierError,
    },
    #[error("failed to load Fluent resource for `{locale}`: {reason}")]
    Fluent { locale: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
