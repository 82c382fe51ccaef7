use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Template error in probe '{probe}': {message}")]
    Template { probe: String, message: String },

    #[error("Signature error ({language}): {source}")]
    Signature {
        language: String,
        source: regex::Error,
    },

    #[error("Unknown probe: {0}")]
    UnknownProbe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProbeError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
