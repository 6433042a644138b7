//! Result type for internal evaluator failures.

/// The result type for operations that can only fail because of a bug.
///
/// User-facing problems (malformed input, illegal moves) are reported as
/// diagnostics or as evaluation errors, never through this type.
pub type EcoResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in the evaluator, not an input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal evaluator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("row bucket out of range");
        assert_eq!(
            format!("{err}"),
            "internal evaluator error: row bucket out of range"
        );
    }

    #[test]
    fn from_string() {
        let err: InternalError = "lost cell".to_string().into();
        assert_eq!(err.message, "lost cell");
    }
}
