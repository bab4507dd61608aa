//! Cross-thread access to a proxy host.
//!
//! [`ProxyObject`](crate::ProxyObject) takes no locks. When a host is shared
//! between threads, [`SharedHost`] puts it behind one mutex and runs each
//! `get` or `set`, including the notify call, while holding it. A notify
//! handler still receives `&mut` access to the host and must not go through
//! the `SharedHost` again, or it will deadlock.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;

use crate::error::Result;
use crate::options::WriteOptions;
use crate::proxy::{ProxyHost, ProxyObject};

/// A proxy host shared between threads.
pub struct SharedHost<H> {
    inner: Arc<Mutex<H>>,
    proxy: ProxyObject,
}

impl<H> Clone for SharedHost<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            proxy: self.proxy.clone(),
        }
    }
}

impl<H: ProxyHost> SharedHost<H> {
    /// Share `host`, forwarding through the default proxy.
    pub fn new(host: H) -> Self {
        Self::with_proxy(host, ProxyObject::new())
    }

    /// Share `host`, forwarding through `proxy`.
    pub fn with_proxy(host: H, proxy: ProxyObject) -> Self {
        Self {
            inner: Arc::new(Mutex::new(host)),
            proxy,
        }
    }

    /// Read `path` under the host lock.
    pub fn get(&self, path: &str) -> Result<Option<Value>> {
        let host = self.inner.lock();
        self.proxy.get(&*host, path)
    }

    /// Write `value` at `path` and notify, all under the host lock.
    pub fn set(&self, path: &str, value: Value, options: impl Into<WriteOptions>) -> Result<()> {
        let mut host = self.inner.lock();
        self.proxy.set(&mut *host, path, value, options)?;
        Ok(())
    }

    /// Lock the host directly.
    pub fn lock(&self) -> MutexGuard<'_, H> {
        self.inner.lock()
    }
}
