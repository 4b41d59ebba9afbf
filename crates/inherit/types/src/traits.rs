//! Host collaborator seams.
//!
//! The host content system is consumed through these traits only. Every call
//! is a plain synchronous lookup bounded by tree depth.

use crate::content::{ContentId, ContentItem};
use crate::error::HostResult;
use crate::request::Actor;

/// Read access to the content tree.
pub trait ContentGraph: Send + Sync {
    /// Fetch one item. `Ok(None)` when the item does not exist.
    fn get_item(&self, id: ContentId) -> HostResult<Option<ContentItem>>;

    /// Ancestors of `id`, immediate parent first.
    fn get_ancestor_ids(&self, id: ContentId) -> HostResult<Vec<ContentId>>;

    fn has_children(&self, id: ContentId) -> HostResult<bool>;

    /// Items whose metadata `key` equals `value`.
    fn get_items_by_meta_flag(&self, key: &str, value: &str) -> HostResult<Vec<ContentId>>;
}

/// Per-item metadata storage.
pub trait MetaStore: Send + Sync {
    fn get_meta(&self, id: ContentId, key: &str) -> HostResult<Option<String>>;

    fn set_meta(&self, id: ContentId, key: &str, value: &str) -> HostResult<()>;

    fn delete_meta(&self, id: ContentId, key: &str) -> HostResult<()>;
}

/// Site-wide settings.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, key: &str) -> HostResult<Option<String>>;

    fn set_option(&self, key: &str, value: &str) -> HostResult<()>;
}

/// Capability checks against the host's permission model.
pub trait CapabilityProvider: Send + Sync {
    /// Check a site-wide capability.
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool;

    /// Check whether `actor` may edit one specific item.
    fn can_edit_item(&self, actor: &Actor, id: ContentId) -> bool;
}

/// One-way check of a client-held credential against a stored password.
pub trait PasswordVerifier: Send + Sync {
    /// `Ok(true)` only if `credential` was issued for `password`.
    fn verify(&self, password: &str, credential: &str) -> HostResult<bool>;
}

/// Issues credentials that a matching [`PasswordVerifier`] accepts.
pub trait PasswordHasher: PasswordVerifier {
    fn hash(&self, password: &str) -> HostResult<String>;
}
