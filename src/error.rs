use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Provider error ({category}): {message}")]
    Provider { category: String, message: String },

    #[error("Resource id has no resourceGroups segment: {0}")]
    MalformedResourceId(String),

    #[error("No resource export files found in directory: {0}")]
    NoExport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScanError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
