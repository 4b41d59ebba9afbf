//! Inherit Types - shared model for inherited password protection.
//!
//! A content item marked "protect children" that carries its own password
//! extends that password to every descendant. The descendants themselves are
//! never rewritten: inheritance only changes who may *see* them and how the
//! authoring surfaces *display* them.
//!
//! This crate holds the data model, the request context passed explicitly into
//! every decision, and the collaborator traits through which the host content
//! system is consumed. An [`InMemoryHost`] reference implementation backs tests
//! and embeddings that have no host of their own.

#![deny(unsafe_code)]

pub mod content;
pub mod error;
pub mod meta;
pub mod mocks;
pub mod request;
pub mod traits;

pub use content::{AncestorChain, ContentId, ContentItem, ProtectionVerdict, Visibility};
pub use error::{HostError, HostResult};
pub use meta::{
    flag_value, is_truthy, EDIT_CONTENT_CAPABILITY, FLAG_DISABLED_VALUE, FLAG_ENABLED_VALUE,
    INHERIT_META_KEY, LEGACY_ENABLED_VALUE, LEGACY_INHERIT_META_KEY, PROTECT_CHILDREN_FIELD,
};
pub use mocks::InMemoryHost;
pub use request::{Actor, RequestContext, RequestKind};
pub use traits::{
    CapabilityProvider, ContentGraph, MetaStore, OptionStore, PasswordHasher, PasswordVerifier,
};
