//! A ready-made proxy host.
//!
//! [`ProxyModel`] keeps named attributes, forwards `get`/`set` through its
//! own [`ProxyObject`], and reports changes on a [`Signal<ValueChange>`].
//!
//! # Example
//!
//! ```
//! use horizon_lattice_proxy::ProxyModel;
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! let mut model = ProxyModel::with_data(json!({"count": 0}));
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! model.changed().connect(move |change| {
//!     seen_clone.lock().unwrap().push(change.path.clone());
//! });
//!
//! model.set("count", json!(1), ())?.set("count", json!(1), ())?;
//! assert_eq!(*seen.lock().unwrap(), vec!["count"]);
//! assert_eq!(model.get("count")?, Some(json!(1)));
//! # Ok::<(), horizon_lattice_proxy::ProxyError>(())
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::change::ValueChange;
use crate::delegate::Delegate;
use crate::error::Result;
use crate::logging::targets;
use crate::options::WriteOptions;
use crate::proxy::{ProxyConfig, ProxyHost, ProxyObject};
use crate::signal::Signal;

/// A host with named attributes and a change signal.
pub struct ProxyModel {
    proxy: ProxyObject,
    attributes: HashMap<String, Delegate>,
    changed: Signal<ValueChange>,
    notifications_enabled: bool,
}

impl Default for ProxyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyModel {
    /// An empty model forwarding to the `"data"` attribute.
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    /// An empty model with a custom proxy configuration.
    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            proxy: ProxyObject::with_config(config),
            attributes: HashMap::new(),
            changed: Signal::new(),
            notifications_enabled: true,
        }
    }

    /// A model whose delegate attribute holds `value`.
    pub fn with_data(value: Value) -> Self {
        let mut model = Self::new();
        let key = model.proxy.key().to_string();
        model.set_attribute(key, Delegate::generic(value));
        model
    }

    /// The model's proxy.
    pub fn proxy(&self) -> &ProxyObject {
        &self.proxy
    }

    /// Store `delegate` under `name`, returning the previous attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, delegate: Delegate) -> Option<Delegate> {
        let name = name.into();
        tracing::debug!(target: targets::MODEL, name = %name, self_describing = delegate.is_self_describing(), "attribute set");
        self.attributes.insert(name, delegate)
    }

    /// Remove the attribute `name`.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Delegate> {
        self.attributes.remove(name)
    }

    /// Borrow the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&Delegate> {
        self.attributes.get(name)
    }

    /// The signal emitted for every reported change.
    pub fn changed(&self) -> &Signal<ValueChange> {
        &self.changed
    }

    /// Turn change reporting on or off. Writes still apply while it is off.
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
    }

    /// Whether changes are currently reported.
    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Read `path` from the delegate.
    pub fn get(&self, path: &str) -> Result<Option<Value>> {
        self.proxy.get(self, path)
    }

    /// Write `value` at `path` on the delegate.
    pub fn set(
        &mut self,
        path: &str,
        value: Value,
        options: impl Into<WriteOptions>,
    ) -> Result<&mut Self> {
        let proxy = self.proxy.clone();
        proxy.set(self, path, value, options)
    }
}

impl ProxyHost for ProxyModel {
    fn delegate(&self, key: &str) -> Option<&Delegate> {
        self.attributes.get(key)
    }

    fn delegate_mut(&mut self, key: &str) -> Option<&mut Delegate> {
        self.attributes.get_mut(key)
    }

    fn observes_changes(&self) -> bool {
        self.notifications_enabled
    }

    fn notify(&mut self, path: &str, was: Option<&Value>, is: Option<&Value>) {
        self.changed
            .emit(ValueChange::new(path, was.cloned(), is.cloned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::PathAccess;
    use crate::error::ProxyError;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    fn spy(model: &ProxyModel) -> Arc<Mutex<Vec<ValueChange>>> {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        model.changed().connect(move |change| {
            changes_clone.lock().push(change.clone());
        });
        changes
    }

    /// Accepts only non-negative numbers.
    struct NonNegative(HashMap<String, Value>);

    impl PathAccess for NonNegative {
        fn get(&self, path: &str) -> Result<Option<Value>> {
            Ok(self.0.get(path).cloned())
        }

        fn set(&mut self, path: &str, value: Value, _options: &WriteOptions) -> Result<()> {
            match value.as_f64() {
                Some(n) if n >= 0.0 => {
                    self.0.insert(path.to_string(), value);
                    Ok(())
                }
                _ => Err(ProxyError::rejected(path, "expected a non-negative number")),
            }
        }
    }

    #[test]
    fn test_emits_value_change() {
        let mut model = ProxyModel::with_data(json!({"n": 1}));
        let changes = spy(&model);

        model.set("n", json!(2), ()).unwrap();

        assert_eq!(
            *changes.lock(),
            vec![ValueChange::new("n", Some(json!(1)), Some(json!(2)))]
        );
    }

    #[test]
    fn test_notifications_can_be_disabled() {
        let mut model = ProxyModel::with_data(json!({"n": 1}));
        let changes = spy(&model);

        model.set_notifications_enabled(false);
        model.set("n", json!(2), true).unwrap();
        assert!(changes.lock().is_empty());
        assert_eq!(model.get("n").unwrap(), Some(json!(2)));

        model.set_notifications_enabled(true);
        model.set("n", json!(3), ()).unwrap();
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_empty_model_is_noop() {
        let mut model = ProxyModel::new();
        let changes = spy(&model);

        model.set("a", json!(1), true).unwrap().set("b", json!(2), ()).unwrap();

        assert_eq!(model.get("a").unwrap(), None);
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_self_describing_rejection_propagates() {
        let mut model = ProxyModel::new();
        model.set_attribute("data", Delegate::self_describing(NonNegative(HashMap::new())));
        let changes = spy(&model);

        model.set("width", json!(10), ()).unwrap();
        let err = model.set("width", json!(-1), ()).err().unwrap();

        assert_eq!(err, ProxyError::rejected("width", "expected a non-negative number"));
        assert_eq!(model.get("width").unwrap(), Some(json!(10)));
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_custom_key_and_attribute_swap() {
        let mut model = ProxyModel::with_config(ProxyConfig::with_key("record"));
        assert_eq!(model.proxy().key(), "record");

        model.set_attribute("record", Delegate::generic(json!({"id": 1})));
        assert_eq!(model.get("id").unwrap(), Some(json!(1)));

        let previous = model.set_attribute("record", Delegate::generic(json!({"id": 2})));
        assert_eq!(previous.and_then(|d| d.as_value().cloned()), Some(json!({"id": 1})));
        assert_eq!(model.get("id").unwrap(), Some(json!(2)));

        assert!(model.remove_attribute("record").is_some());
        assert!(model.attribute("record").is_none());
        assert_eq!(model.get("id").unwrap(), None);
    }

    #[test]
    fn test_blocked_signal_suppresses_emission() {
        let mut model = ProxyModel::with_data(json!({}));
        let changes = spy(&model);

        model.changed().set_blocked(true);
        model.set("x", json!(1), ()).unwrap();
        model.changed().set_blocked(false);
        model.set("x", json!(2), ()).unwrap();

        assert_eq!(changes.lock().len(), 1);
    }
}
