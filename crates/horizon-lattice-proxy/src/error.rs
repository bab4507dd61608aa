//! Error types for proxy objects.
//!
//! A missing delegate or a missing value is never an error; both resolve to
//! `None`. The variants below only describe failures raised by collaborators
//! (the path resolver, a self-describing delegate, or a caller-supplied
//! comparator), which are propagated to the caller unchanged.

/// Result type alias for proxy operations.
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Errors raised while resolving or writing a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path contains an empty segment (`"a..b"`, `".a"`, `"a."`).
    #[error("Path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    /// A write tried to descend into a value that is neither an object nor an array.
    #[error("Cannot descend into '{segment}' of path '{path}': not an object or array")]
    NotAContainer { path: String, segment: String },

    /// An array was addressed with a segment that is not a decimal index.
    #[error("Invalid array index '{segment}' in path '{path}'")]
    InvalidIndex { path: String, segment: String },

    /// An array write addressed an index past the end of the array.
    #[error("Index {index} out of bounds for array of length {len} in path '{path}'")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Errors that can occur in proxy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// Generic path resolution failed.
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// A self-describing delegate refused a write.
    #[error("Write to '{path}' rejected: {reason}")]
    Rejected { path: String, reason: String },

    /// A caller-supplied comparator failed.
    #[error("Compare failed: {0}")]
    Compare(String),

    /// A self-describing delegate failed for another reason.
    #[error("Delegate error: {0}")]
    Delegate(String),
}

impl ProxyError {
    /// Create a rejected-write error.
    pub fn rejected(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a comparator error.
    pub fn compare(message: impl Into<String>) -> Self {
        Self::Compare(message.into())
    }

    /// Create a delegate error.
    pub fn delegate(message: impl Into<String>) -> Self {
        Self::Delegate(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_converts_into_proxy_error() {
        let err: ProxyError = PathError::EmptySegment {
            path: "a..b".to_string(),
        }
        .into();
        assert!(matches!(err, ProxyError::Path(PathError::EmptySegment { .. })));
        assert_eq!(err.to_string(), "Path error: Path 'a..b' contains an empty segment");
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            ProxyError::rejected("age", "must be positive").to_string(),
            "Write to 'age' rejected: must be positive"
        );
        assert_eq!(ProxyError::compare("boom").to_string(), "Compare failed: boom");
        assert_eq!(ProxyError::delegate("gone").to_string(), "Delegate error: gone");
    }
}
