use std::path::PathBuf;
use thiserror::Error;

pub type InjectResult<T> = Result<T, InjectError>;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("Failed to write support module to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("No relative path from {from} to {to}")]
    Unrelatable { from: PathBuf, to: PathBuf },

    #[error("Failed to build support statement `{code}`: {message}")]
    Template { code: String, message: String },

    #[error("Invalid injector options: {0}")]
    Options(#[from] serde_json::Error),
}

impl InjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn template(code: impl Into<String>, message: impl ToString) -> Self {
        Self::Template {
            code: code.into(),
            message: message.to_string(),
        }
    }
}
