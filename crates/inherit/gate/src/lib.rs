//! Access Gate - inherited password challenge for public requests.
//!
//! On every content render the gate asks the [`AncestryResolver`] whether an
//! ancestor extends its password to the item. If one does and the requester
//! holds no credential that verifies against that ancestor's password, the
//! render must show the standard password challenge, exactly as if the item
//! carried the password itself.
//!
//! The gate only decides. Rendering the challenge stays with the host.
//!
//! ## Guarantees
//!
//! - Fail closed: a missing, malformed or rejected credential, or any
//!   verifier error, requires the challenge.
//! - Composition: the inherited decision is OR-ed with the host's own
//!   "is this item protected" answer, never substituted for it.
//! - The item's own stored protection is never modified.
//!
//! [`AncestryResolver`]: inherit_resolver::AncestryResolver

#![deny(unsafe_code)]

pub mod challenge;
pub mod config;
pub mod credential;
pub mod error;
pub mod gate;

pub use challenge::PasswordChallenge;
pub use config::GateConfig;
pub use credential::Sha256PasswordHasher;
pub use error::GateError;
pub use gate::{AccessGate, GateDecision, GateReason};
