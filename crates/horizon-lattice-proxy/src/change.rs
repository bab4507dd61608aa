//! Change detection for proxied writes.

use serde_json::Value;

/// A change reported by a proxied write.
///
/// `was` is the value read before the write, `is` the value that was
/// written. Either side is `None` when the path did not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    /// The path that was written.
    pub path: String,
    /// The value before the write.
    pub was: Option<Value>,
    /// The value written.
    pub is: Option<Value>,
}

impl ValueChange {
    /// Create a change record.
    pub fn new(path: impl Into<String>, was: Option<Value>, is: Option<Value>) -> Self {
        Self {
            path: path.into(),
            was,
            is,
        }
    }
}

/// Shallow identity comparison between two resolved values.
///
/// Scalars compare by value and numbers compare numerically, so `1` equals
/// `1.0`. Arrays and objects never compare equal, even to identical
/// contents: every write of a structured value counts as a change. A present
/// `null` is not equal to an absent value.
///
/// # Example
///
/// ```
/// use horizon_lattice_proxy::strictly_equal;
/// use serde_json::json;
///
/// assert!(strictly_equal(Some(&json!(1)), Some(&json!(1.0))));
/// assert!(!strictly_equal(Some(&json!({})), Some(&json!({}))));
/// assert!(!strictly_equal(None, Some(&json!(null))));
/// ```
pub fn strictly_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a == b,
                _ => match (a.as_u64(), b.as_u64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => a.as_f64() == b.as_f64(),
                },
            },
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_compare_by_value() {
        assert!(strictly_equal(Some(&json!(null)), Some(&json!(null))));
        assert!(strictly_equal(Some(&json!(true)), Some(&json!(true))));
        assert!(!strictly_equal(Some(&json!(true)), Some(&json!(false))));
        assert!(strictly_equal(Some(&json!("a")), Some(&json!("a"))));
        assert!(!strictly_equal(Some(&json!("a")), Some(&json!("b"))));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(strictly_equal(Some(&json!(1)), Some(&json!(1))));
        assert!(strictly_equal(Some(&json!(2)), Some(&json!(2.0))));
        assert!(strictly_equal(Some(&json!(u64::MAX)), Some(&json!(u64::MAX))));
        assert!(!strictly_equal(Some(&json!(1)), Some(&json!(2))));
    }

    #[test]
    fn test_mixed_types_differ() {
        assert!(!strictly_equal(Some(&json!(1)), Some(&json!("1"))));
        assert!(!strictly_equal(Some(&json!(0)), Some(&json!(false))));
        assert!(!strictly_equal(Some(&json!(null)), None));
    }

    #[test]
    fn test_structured_values_never_equal() {
        assert!(!strictly_equal(Some(&json!([])), Some(&json!([]))));
        assert!(!strictly_equal(Some(&json!({"a": 1})), Some(&json!({"a": 1}))));
    }

    #[test]
    fn test_absent_equals_absent() {
        assert!(strictly_equal(None, None));
    }
}
