//! Editor Consistency Layer.
//!
//! Two concerns that share the resolver verdict and the authoring context:
//!
//! - **Flag persistence** ([`FlagPersistence`]): store the "protect children"
//!   flag from genuine editor saves, ignoring autosaves and metadata-loader
//!   sub-requests, and deferring saves that arrive without a form body until
//!   the structured editor has finished writing.
//! - **Display rewrite** ([`DisplayRewriter`]): inject inherited protection
//!   into the edit-screen and list view models before they are rendered, so a
//!   descendant of a protected item is shown as protected and its visibility
//!   control is withdrawn.
//!
//! [`MetaPolicy`] keeps the flag out of generic metadata editing.

#![deny(unsafe_code)]

pub mod config;
pub mod eligibility;
pub mod error;
pub mod meta_policy;
pub mod persistence;
pub mod rewrite;
pub mod view;

pub use config::EditorConfig;
pub use eligibility::Eligibility;
pub use error::EditorError;
pub use meta_policy::{MetaPolicy, MetaRegistration};
pub use persistence::{DeferredSave, FlagPersistence, SaveOutcome, SkipReason};
pub use rewrite::{DisplayRewriter, RewriteOutcome};
pub use view::{
    EditScreen, InheritedNotice, ListRow, ListView, ProtectChildrenField, VisibilityPanel,
    INHERITED_STATE_LABEL,
};
