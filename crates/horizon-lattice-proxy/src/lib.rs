//! Proxy objects for Horizon Lattice.
//!
//! This crate lets a host object forward path-based reads and writes to one
//! of its attributes (the *delegate*) and hear about the writes that change
//! something:
//!
//! - **ProxyObject**: the forwarding accessor a host holds and delegates to
//! - **Delegates**: plain JSON values, or objects with their own accessors
//! - **Write options**: a force flag and an optional change comparator
//! - **Path resolution**: dotted paths over JSON-like values
//! - **Signals**: synchronous change notification
//! - **ProxyModel**: a ready-made host reporting changes on a signal
//! - **SharedHost**: a locked wrapper for sharing a host between threads
//!
//! # Example
//!
//! ```
//! use horizon_lattice_proxy::{ProxyModel, WriteOptions};
//! use serde_json::json;
//!
//! let mut model = ProxyModel::with_data(json!({"user": {"name": "Ada"}}));
//!
//! model.changed().connect(|change| {
//!     println!("{} changed from {:?} to {:?}", change.path, change.was, change.is);
//! });
//!
//! // Unchanged: no notification.
//! model.set("user.name", json!("Ada"), ())?;
//! // Changed: notifies once.
//! model.set("user.name", json!("Grace"), ())?;
//! // Forced: notifies even though nothing changed.
//! model.set("user.name", json!("Grace"), WriteOptions::forced())?;
//!
//! assert_eq!(model.get("user.name")?, Some(json!("Grace")));
//! # Ok::<(), horizon_lattice_proxy::ProxyError>(())
//! ```

pub mod change;
pub mod delegate;
mod error;
pub mod logging;
pub mod model;
pub mod options;
pub mod path;
pub mod proxy;
pub mod shared;
pub mod signal;

pub use change::{strictly_equal, ValueChange};
pub use delegate::{Delegate, PathAccess};
pub use error::{PathError, ProxyError, Result};
pub use model::ProxyModel;
pub use options::{Comparator, WriteOptions};
pub use path::{DottedPathResolver, Path, PathResolver};
pub use proxy::{ProxyBuilder, ProxyConfig, ProxyHost, ProxyObject, DEFAULT_PROXY_KEY};
pub use shared::SharedHost;
pub use signal::{ConnectionId, Signal};
