use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimCheckError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reference catalog error: {0}")]
    Catalog(String),

    #[error("IPC error: {0}")]
    Ipc(String),
}
