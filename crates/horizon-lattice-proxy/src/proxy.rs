//! The delegate-forwarding accessor.
//!
//! A [`ProxyObject`] lets a host forward path-based reads and writes to one
//! of its attributes, the *delegate*, and reports writes back to the host
//! only when they change something.
//!
//! Hosts attach the behavior by composition: they hold a `ProxyObject`
//! configured with the name of the delegate attribute and forward their own
//! accessors to it.
//!
//! # Dispatch
//!
//! - A [`Delegate::SelfDescribing`] delegate handles the path itself.
//! - A [`Delegate::Generic`] delegate is resolved by the configured
//!   [`PathResolver`] (by default [`DottedPathResolver`]).
//! - A missing delegate makes `get` return `None` and `set` a no-op.
//!
//! # Notification
//!
//! After a write, the host is notified if it observes changes and at least
//! one of these holds, checked in order:
//!
//! 1. the write was forced,
//! 2. the old and new values are not [strictly equal](crate::strictly_equal),
//! 3. the comparator from the write options returns `true`.
//!
//! # Threading
//!
//! `ProxyObject` holds no mutable state. `notify` runs synchronously on the
//! calling thread and receives `&mut` access to the host, so it may re-enter
//! `get`/`set`. The read, write, compare and notify steps are not atomic
//! across threads; wrap the host in a [`SharedHost`](crate::SharedHost) to
//! serialize them.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_proxy::{Delegate, ProxyHost, ProxyObject, Result, WriteOptions};
//! use serde_json::{json, Value};
//!
//! struct Record {
//!     proxy: ProxyObject,
//!     data: Option<Delegate>,
//!     log: Vec<String>,
//! }
//!
//! impl ProxyHost for Record {
//!     fn delegate(&self, key: &str) -> Option<&Delegate> {
//!         (key == "data").then_some(self.data.as_ref()).flatten()
//!     }
//!
//!     fn delegate_mut(&mut self, key: &str) -> Option<&mut Delegate> {
//!         (key == "data").then_some(self.data.as_mut()).flatten()
//!     }
//!
//!     fn observes_changes(&self) -> bool {
//!         true
//!     }
//!
//!     fn notify(&mut self, path: &str, _was: Option<&Value>, _is: Option<&Value>) {
//!         self.log.push(path.to_string());
//!     }
//! }
//!
//! impl Record {
//!     fn set(&mut self, path: &str, value: Value) -> Result<&mut Self> {
//!         self.proxy.clone().set(self, path, value, WriteOptions::default())
//!     }
//! }
//!
//! let mut record = Record {
//!     proxy: ProxyObject::new(),
//!     data: Some(Delegate::generic(json!({}))),
//!     log: Vec::new(),
//! };
//! record.set("name", json!("Ada"))?.set("name", json!("Ada"))?;
//! assert_eq!(record.log, vec!["name"]);
//! # Ok::<(), horizon_lattice_proxy::ProxyError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::change::strictly_equal;
use crate::delegate::Delegate;
use crate::error::Result;
use crate::logging::targets;
use crate::options::WriteOptions;
use crate::path::{DottedPathResolver, PathResolver};

/// The attribute name a proxy forwards to unless configured otherwise.
pub const DEFAULT_PROXY_KEY: &str = "data";

/// An object that can carry a proxy.
///
/// The host owns (or shares) its delegate and decides whether it wants to
/// hear about changes. Only `delegate` and `delegate_mut` are required.
pub trait ProxyHost {
    /// Look up the delegate stored under `key`.
    fn delegate(&self, key: &str) -> Option<&Delegate>;

    /// Look up the delegate stored under `key` for writing.
    fn delegate_mut(&mut self, key: &str) -> Option<&mut Delegate>;

    /// Whether this host wants [`notify`](Self::notify) calls.
    fn observes_changes(&self) -> bool {
        false
    }

    /// Called after a write that changed `path`, or that was forced.
    fn notify(&mut self, _path: &str, _was: Option<&Value>, _is: Option<&Value>) {}
}

/// Configuration for a [`ProxyObject`].
#[derive(Clone)]
pub struct ProxyConfig {
    /// The host attribute holding the delegate.
    pub key: String,
    /// Resolver used for generic delegates.
    pub resolver: Arc<dyn PathResolver>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_PROXY_KEY.to_string(),
            resolver: Arc::new(DottedPathResolver),
        }
    }
}

impl ProxyConfig {
    /// Create a configuration forwarding to the attribute `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ProxyObject`]s with custom configuration.
#[derive(Debug, Default)]
pub struct ProxyBuilder {
    config: ProxyConfig,
}

impl ProxyBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delegate attribute name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = key.into();
        self
    }

    /// Set the resolver used for generic delegates.
    pub fn resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.config.resolver = Arc::new(resolver);
        self
    }

    /// Build the proxy.
    pub fn build(self) -> ProxyObject {
        ProxyObject::with_config(self.config)
    }
}

/// Forwards path-based `get`/`set` from a host to its delegate.
///
/// Cloning is cheap; hosts typically forward through a clone of their own
/// proxy so the host can be borrowed mutably for the call.
#[derive(Clone)]
pub struct ProxyObject {
    key: Arc<str>,
    resolver: Arc<dyn PathResolver>,
}

impl Default for ProxyObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyObject {
    /// A proxy forwarding to the `"data"` attribute.
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    /// A proxy forwarding to the attribute `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self::with_config(ProxyConfig::with_key(key))
    }

    /// A proxy built from an explicit configuration.
    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            key: Arc::from(config.key),
            resolver: config.resolver,
        }
    }

    /// Start building a proxy.
    pub fn builder() -> ProxyBuilder {
        ProxyBuilder::new()
    }

    /// The host attribute this proxy forwards to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the value at `path` from the host's delegate.
    ///
    /// Returns `Ok(None)` when the host has no delegate or the path does not
    /// resolve.
    pub fn get<H>(&self, host: &H, path: &str) -> Result<Option<Value>>
    where
        H: ProxyHost + ?Sized,
    {
        match host.delegate(&self.key) {
            None => {
                tracing::trace!(target: targets::PROXY, key = %self.key, path, "no delegate, get yields nothing");
                Ok(None)
            }
            Some(Delegate::SelfDescribing(access)) => access.get(path),
            Some(Delegate::Generic(value)) => self.resolver.get(value, path),
        }
    }

    /// Write `value` at `path` on the host's delegate and notify the host.
    ///
    /// `options` accepts a [`WriteOptions`] or a bare `bool` meaning
    /// "force". Returns the host for chaining, also when the host has no
    /// delegate and nothing was written.
    ///
    /// # Errors
    ///
    /// Errors from the delegate, the resolver, or the comparator are
    /// returned unchanged; no notification is sent in that case.
    #[tracing::instrument(
        name = "proxy_set",
        skip_all,
        target = "horizon_lattice_proxy::proxy",
        level = "trace",
        fields(key = %self.key, path = %path)
    )]
    pub fn set<'h, H>(
        &self,
        host: &'h mut H,
        path: &str,
        value: Value,
        options: impl Into<WriteOptions>,
    ) -> Result<&'h mut H>
    where
        H: ProxyHost + ?Sized,
    {
        if host.delegate(&self.key).is_none() {
            tracing::trace!(target: targets::PROXY, "no delegate, set is a no-op");
            return Ok(host);
        }
        let options = options.into();

        let was = self.get(&*host, path)?;

        let written = match host.delegate_mut(&self.key) {
            Some(Delegate::SelfDescribing(access)) => {
                tracing::trace!(target: targets::PROXY, "forwarding to self-describing delegate");
                access.set(path, value.clone(), &options)?;
                true
            }
            Some(Delegate::Generic(target)) => {
                self.resolver.set(target, path, value.clone(), &options)?;
                true
            }
            None => false,
        };
        if !written {
            return Ok(host);
        }

        let is = Some(value);
        if host.observes_changes()
            && (options.force
                || !strictly_equal(was.as_ref(), is.as_ref())
                || options.compare(was.as_ref(), is.as_ref())?)
        {
            tracing::trace!(target: targets::PROXY, force = options.force, "notifying host");
            host.notify(path, was.as_ref(), is.as_ref());
        } else {
            tracing::trace!(target: targets::PROXY, "no change, notification skipped");
        }

        Ok(host)
    }
}

impl fmt::Debug for ProxyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyObject")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ProxyObject: Send, Sync);
