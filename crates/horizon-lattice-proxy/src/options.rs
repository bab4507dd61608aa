//! Write options for proxied `set` calls.
//!
//! [`WriteOptions`] carries the two knobs a write accepts: `force`, which
//! notifies even when nothing changed, and an optional comparator that can
//! declare a change the strict equality check would miss.
//!
//! Callers that only care about forcing can pass a bare `bool`; the
//! `From<bool>` adapter maps `true` to `{ force: true }` and `false` to the
//! default options.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

/// A caller-supplied change predicate, called as `compare(was, is)`.
///
/// Returning `Ok(true)` marks the write as a change. An `Err` propagates out
/// of the `set` call that invoked it.
pub type Comparator = Arc<dyn Fn(Option<&Value>, Option<&Value>) -> Result<bool> + Send + Sync>;

/// Options accepted by a proxied write.
#[derive(Clone, Default)]
pub struct WriteOptions {
    /// Notify even when the value did not change.
    pub force: bool,
    /// Extra change predicate consulted when the values are strictly equal.
    pub compare: Option<Comparator>,
}

impl WriteOptions {
    /// Default options: no force, no comparator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with `force` set.
    pub fn forced() -> Self {
        Self {
            force: true,
            compare: None,
        }
    }

    /// Set the force flag.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Attach a comparator.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_lattice_proxy::WriteOptions;
    ///
    /// let opts = WriteOptions::new().with_compare(|was, is| {
    ///     let delta = is.and_then(|v| v.as_f64()).unwrap_or(0.0)
    ///         - was.and_then(|v| v.as_f64()).unwrap_or(0.0);
    ///     Ok(delta.abs() > 10.0)
    /// });
    /// assert!(opts.compare.is_some());
    /// ```
    pub fn with_compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> Result<bool> + Send + Sync + 'static,
    {
        self.compare = Some(Arc::new(compare));
        self
    }

    /// Run the comparator, if any. Without one this is `Ok(false)`.
    pub(crate) fn compare(&self, was: Option<&Value>, is: Option<&Value>) -> Result<bool> {
        match &self.compare {
            Some(compare) => compare(was, is),
            None => Ok(false),
        }
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("force", &self.force)
            .field("compare", &self.compare.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl From<bool> for WriteOptions {
    fn from(force: bool) -> Self {
        Self::new().force(force)
    }
}

impl From<Option<bool>> for WriteOptions {
    fn from(force: Option<bool>) -> Self {
        Self::from(force.unwrap_or(false))
    }
}

impl From<()> for WriteOptions {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&WriteOptions> for WriteOptions {
    fn from(options: &WriteOptions) -> Self {
        options.clone()
    }
}
