use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("not a git repository: {0}")]
    NotGitRepo(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("git command failed: {0}")]
    Git(String),

    #[error("invalid --as-of timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
