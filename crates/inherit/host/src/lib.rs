//! Inherit Host - the boundary adapter.
//!
//! The host's broadcast-style hooks (front-end render, save, structured-save
//! completion, edit-view and list rendering, metadata filters, plugin load)
//! map one-to-one onto methods of [`InheritanceHooks`]. Each method takes
//! the request context explicitly and delegates to the resolver, gate or
//! editor layer, which remain callable on their own.
//!
//! Also provides configuration loading, the tracing bootstrap and the
//! versioned migration of the legacy flag key.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod migration;

pub use crate::config::{InheritConfig, LoggingConfig};
pub use error::{HostAdapterError, HostAdapterResult};
pub use hooks::{HostCollaborators, InheritanceHooks, IssuedCredential};
pub use logging::init_tracing;
pub use migration::{MigrationReport, UpgradeMigrator, VERSION_OPTION_KEY};

/// Version recorded after a successful upgrade pass.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
