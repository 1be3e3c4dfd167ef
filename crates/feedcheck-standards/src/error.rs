use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse header file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no reference header definition for template {template} (looked for {path})")]
    MissingReferenceDefinition { template: String, path: PathBuf },

    #[error("reference header for template {template} is empty: {path}")]
    EmptyHeader { template: String, path: PathBuf },

    #[error("invalid template {template}: {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("unknown template: {template}")]
    UnknownTemplate { template: String },

    #[error("feed configuration already installed")]
    ConfigAlreadyInstalled,
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for configuration and header loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
