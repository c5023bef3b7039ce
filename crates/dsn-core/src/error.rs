use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DsnError {
    #[error("failed to read declaration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference date '{0}' (expected DDMMYYYY)")]
    InvalidReferenceDate(String),

    #[error("invalid analysis options: {0}")]
    InvalidOptions(String),

    #[error("failed to load options from {path}: {reason}")]
    OptionsLoad { path: PathBuf, reason: String },

    #[error("no declaration was provided for analysis")]
    NoDeclarations,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
