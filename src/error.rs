use serde_json::Value;
use thiserror::Error;

/// Unified error type for semrel operations
#[derive(Error, Debug)]
pub enum SemrelError {
    #[error("Invalid path target at '{segment}': cannot traverse into {found}")]
    InvalidPathTarget { segment: String, found: String },

    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Backend operation failed: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in semrel
pub type Result<T> = std::result::Result<T, SemrelError>;

impl SemrelError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemrelError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemrelError::Version(msg.into())
    }

    /// Create a backend error with context
    pub fn backend(msg: impl Into<String>) -> Self {
        SemrelError::Backend(msg.into())
    }

    /// Create a path-target error naming the offending segment and a preview
    /// of the value that could not be traversed.
    pub fn path_target(segment: impl Into<String>, found: &Value) -> Self {
        SemrelError::InvalidPathTarget {
            segment: segment.into(),
            found: preview(found),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        SemrelError::IndexOutOfRange { index, len }
    }
}

/// Short, single-line rendering of a JSON value for error messages.
fn preview(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    };
    let mut rendered = value.to_string();
    if rendered.len() > 60 {
        // truncate on a char boundary; byte 57 may fall inside a multibyte char
        let cut = (0..=57)
            .rev()
            .find(|&i| rendered.is_char_boundary(i))
            .unwrap_or(0);
        rendered.truncate(cut);
        rendered.push_str("...");
    }
    format!("{} {}", kind, rendered)
}
