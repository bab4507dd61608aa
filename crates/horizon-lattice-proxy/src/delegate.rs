//! Delegates: the objects a proxy forwards to.
//!
//! A delegate is either a plain value, resolved with the proxy's
//! [`PathResolver`](crate::PathResolver), or a self-describing object that
//! implements [`PathAccess`] and handles its own paths. The self-describing
//! form always takes precedence, so a delegate can apply its own validation
//! or computed values.

use std::fmt;

use serde_json::Value;

use crate::error::Result;
use crate::options::WriteOptions;

/// Path accessors implemented by a self-describing delegate.
///
/// # Example
///
/// ```
/// use horizon_lattice_proxy::{PathAccess, ProxyError, Result, WriteOptions};
/// use serde_json::Value;
/// use std::collections::HashMap;
///
/// /// A flat store that only accepts strings.
/// #[derive(Default)]
/// struct Labels(HashMap<String, String>);
///
/// impl PathAccess for Labels {
///     fn get(&self, path: &str) -> Result<Option<Value>> {
///         Ok(self.0.get(path).cloned().map(Value::String))
///     }
///
///     fn set(&mut self, path: &str, value: Value, _options: &WriteOptions) -> Result<()> {
///         match value {
///             Value::String(s) => {
///                 self.0.insert(path.to_string(), s);
///                 Ok(())
///             }
///             _ => Err(ProxyError::rejected(path, "labels must be strings")),
///         }
///     }
/// }
/// ```
pub trait PathAccess: Send + Sync {
    /// Read the value at `path`.
    fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Write `value` at `path`. The options are the normalized options of
    /// the proxied call.
    fn set(&mut self, path: &str, value: Value, options: &WriteOptions) -> Result<()>;
}

/// The object a host forwards its accessors to.
pub enum Delegate {
    /// A plain container resolved by the proxy's path resolver.
    Generic(Value),
    /// An object with its own path accessors.
    SelfDescribing(Box<dyn PathAccess>),
}

impl Delegate {
    /// Wrap a plain value.
    pub fn generic(value: impl Into<Value>) -> Self {
        Self::Generic(value.into())
    }

    /// Wrap an object exposing its own accessors.
    pub fn self_describing(access: impl PathAccess + 'static) -> Self {
        Self::SelfDescribing(Box::new(access))
    }

    /// Whether this delegate handles its own paths.
    pub fn is_self_describing(&self) -> bool {
        matches!(self, Self::SelfDescribing(_))
    }

    /// The wrapped value of a generic delegate.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Generic(value) => Some(value),
            Self::SelfDescribing(_) => None,
        }
    }
}

impl From<Value> for Delegate {
    fn from(value: Value) -> Self {
        Self::Generic(value)
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic(value) => f.debug_tuple("Generic").field(value).finish(),
            Self::SelfDescribing(_) => f.write_str("SelfDescribing(..)"),
        }
    }
}

static_assertions::assert_impl_all!(Delegate: Send, Sync);
