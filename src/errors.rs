use thiserror::Error;

/// Errors that can occur while loading and linking verse collections.
#[derive(Error, Debug)]
pub enum VerseLinkError {
    #[error("file error: {message} (path: {path})")]
    File { message: String, path: String },

    #[error("parse error: {message} (path: {path}, line: {line:?})")]
    Parse {
        message: String,
        path: String,
        line: Option<usize>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("task error: {message}")]
    Task { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `VerseLinkError`.
pub type Result<T> = std::result::Result<T, VerseLinkError>;
