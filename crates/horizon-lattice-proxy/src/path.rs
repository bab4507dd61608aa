//! Dotted-path resolution over JSON-like values.
//!
//! This is the fallback used by [`ProxyObject`](crate::ProxyObject) when a
//! delegate does not implement [`PathAccess`](crate::PathAccess). Paths are
//! keys separated by `.`; segments address object keys, or array elements
//! when the current value is an array.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_proxy::{DottedPathResolver, PathResolver, WriteOptions};
//! use serde_json::json;
//!
//! let resolver = DottedPathResolver;
//! let mut doc = json!({"user": {"tags": ["a", "b"]}});
//!
//! assert_eq!(resolver.get(&doc, "user.tags.1").unwrap(), Some(json!("b")));
//!
//! resolver.set(&mut doc, "user.name", json!("Ada"), &WriteOptions::default()).unwrap();
//! assert_eq!(doc["user"]["name"], json!("Ada"));
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{PathError, Result};
use crate::logging::targets;
use crate::options::WriteOptions;

/// A parsed dotted path.
///
/// The empty path addresses the root value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<String>);

impl Path {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptySegment`] if any segment is empty.
    pub fn parse(path: &str) -> std::result::Result<Self, PathError> {
        if path.is_empty() {
            return Ok(Self::default());
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }
        Ok(Self(segments))
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Generic get/set by path, applied to a delegate's value.
///
/// Implement this to plug a different path syntax into a
/// [`ProxyConfig`](crate::ProxyConfig).
pub trait PathResolver: Send + Sync {
    /// Read the value at `path`, or `None` if it cannot be fully resolved.
    fn get(&self, target: &Value, path: &str) -> Result<Option<Value>>;

    /// Write `value` at `path`.
    fn set(&self, target: &mut Value, path: &str, value: Value, options: &WriteOptions)
        -> Result<()>;
}

/// The default resolver: `.`-separated keys, decimal array indices.
///
/// Reads never fail on a missing value. Writes create missing intermediate
/// objects and append when an array index equals the array length.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedPathResolver;

impl PathResolver for DottedPathResolver {
    fn get(&self, target: &Value, path: &str) -> Result<Option<Value>> {
        let parsed = Path::parse(path)?;
        Ok(lookup(target, &parsed).cloned())
    }

    fn set(
        &self,
        target: &mut Value,
        path: &str,
        value: Value,
        _options: &WriteOptions,
    ) -> Result<()> {
        let parsed = Path::parse(path)?;
        let Some((last, parents)) = parsed.segments().split_last() else {
            *target = value;
            return Ok(());
        };

        let mut current = target;
        for segment in parents {
            current = child_or_insert(current, segment, path)?;
        }
        assign(current, last, value, path)?;
        Ok(())
    }
}

/// Borrow the value at `path`.
fn lookup<'a>(target: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = target;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(arr) => arr.get(array_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Descend one step for a write, creating an empty object when the key is missing.
fn child_or_insert<'a>(
    current: &'a mut Value,
    segment: &str,
    path: &str,
) -> std::result::Result<&'a mut Value, PathError> {
    match current {
        Value::Object(map) => Ok(map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(arr) => {
            let index = parse_index(segment, path)?;
            let len = arr.len();
            if index == len {
                arr.push(Value::Object(Map::new()));
            }
            arr.get_mut(index).ok_or(PathError::IndexOutOfBounds {
                path: path.to_string(),
                index,
                len,
            })
        }
        _ => Err(not_a_container(segment, path)),
    }
}

/// Write `value` under `segment` of `current`.
fn assign(
    current: &mut Value,
    segment: &str,
    value: Value,
    path: &str,
) -> std::result::Result<(), PathError> {
    match current {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let index = parse_index(segment, path)?;
            let len = arr.len();
            if index < len {
                arr[index] = value;
            } else if index == len {
                arr.push(value);
            } else {
                return Err(PathError::IndexOutOfBounds {
                    path: path.to_string(),
                    index,
                    len,
                });
            }
            Ok(())
        }
        _ => Err(not_a_container(segment, path)),
    }
}

/// Decimal array index without sign or leading zeros.
fn array_index(segment: &str) -> Option<usize> {
    let valid = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && !(segment.len() > 1 && segment.starts_with('0'));
    if valid { segment.parse().ok() } else { None }
}

fn parse_index(segment: &str, path: &str) -> std::result::Result<usize, PathError> {
    array_index(segment).ok_or_else(|| PathError::InvalidIndex {
        path: path.to_string(),
        segment: segment.to_string(),
    })
}

fn not_a_container(segment: &str, path: &str) -> PathError {
    tracing::debug!(target: targets::PATH, path, segment, "write descends into a scalar");
    PathError::NotAContainer {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyError;
    use serde_json::json;

    fn set(doc: &mut Value, path: &str, value: Value) -> Result<()> {
        DottedPathResolver.set(doc, path, value, &WriteOptions::default())
    }

    #[test]
    fn test_parse_path() {
        assert!(Path::parse("").unwrap().is_root());
        assert_eq!(Path::parse("a.b.0").unwrap().segments(), ["a", "b", "0"]);
        assert_eq!(Path::parse("a.b").unwrap().to_string(), "a.b");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for path in ["a..b", ".a", "a.", "."] {
            assert!(
                matches!(Path::parse(path), Err(PathError::EmptySegment { .. })),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_get_nested() {
        let doc = json!({"a": {"b": [10, {"c": true}]}});
        let resolver = DottedPathResolver;

        assert_eq!(resolver.get(&doc, "a.b.0").unwrap(), Some(json!(10)));
        assert_eq!(resolver.get(&doc, "a.b.1.c").unwrap(), Some(json!(true)));
        assert_eq!(resolver.get(&doc, "").unwrap(), Some(doc.clone()));
    }

    #[test]
    fn test_get_missing_is_none() {
        let doc = json!({"a": {"b": [10]}, "s": "text"});
        let resolver = DottedPathResolver;

        assert_eq!(resolver.get(&doc, "missing").unwrap(), None);
        assert_eq!(resolver.get(&doc, "a.b.5").unwrap(), None);
        assert_eq!(resolver.get(&doc, "a.b.x").unwrap(), None);
        assert_eq!(resolver.get(&doc, "s.length").unwrap(), None);
    }

    #[test]
    fn test_get_and_set_agree_on_array_indices() {
        let mut doc = json!({"list": [10, 20]});
        let resolver = DottedPathResolver;

        for segment in ["01", "+1", "-1", "1e0"] {
            let path = format!("list.{segment}");
            assert_eq!(resolver.get(&doc, &path).unwrap(), None, "{path}");
            let err = set(&mut doc, &path, json!(0)).unwrap_err();
            assert!(
                matches!(err, ProxyError::Path(PathError::InvalidIndex { .. })),
                "{path}: {err}"
            );
        }
        assert_eq!(resolver.get(&doc, "list.1").unwrap(), Some(json!(20)));
        assert_eq!(doc, json!({"list": [10, 20]}));
    }

    #[test]
    fn test_get_present_null_is_some() {
        let doc = json!({"a": null});
        assert_eq!(DottedPathResolver.get(&doc, "a").unwrap(), Some(Value::Null));
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut doc = json!({});
        set(&mut doc, "a.b.c", json!(1)).unwrap();
        assert_eq!(doc, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_set_array_elements() {
        let mut doc = json!({"list": [1, 2]});
        set(&mut doc, "list.0", json!(9)).unwrap();
        set(&mut doc, "list.2", json!(3)).unwrap();
        assert_eq!(doc, json!({"list": [9, 2, 3]}));

        let err = set(&mut doc, "list.7", json!(0)).unwrap_err();
        assert_eq!(
            err,
            ProxyError::Path(PathError::IndexOutOfBounds {
                path: "list.7".to_string(),
                index: 7,
                len: 3,
            })
        );

        let err = set(&mut doc, "list.01", json!(0)).unwrap_err();
        assert!(matches!(err, ProxyError::Path(PathError::InvalidIndex { .. })));
    }

    #[test]
    fn test_set_through_appended_array_element() {
        let mut doc = json!({"rows": []});
        set(&mut doc, "rows.0.name", json!("first")).unwrap();
        assert_eq!(doc, json!({"rows": [{"name": "first"}]}));
    }

    #[test]
    fn test_set_into_scalar_fails() {
        let mut doc = json!({"n": 5});
        let err = set(&mut doc, "n.x", json!(1)).unwrap_err();
        assert_eq!(
            err,
            ProxyError::Path(PathError::NotAContainer {
                path: "n.x".to_string(),
                segment: "x".to_string(),
            })
        );
        assert_eq!(doc, json!({"n": 5}));
    }

    #[test]
    fn test_set_root_replaces_value() {
        let mut doc = json!({"old": true});
        set(&mut doc, "", json!([1])).unwrap();
        assert_eq!(doc, json!([1]));
    }
}
