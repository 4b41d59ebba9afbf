use std::sync::Arc;

use inherit_resolver::AncestryResolver;
use inherit_types::{ContentId, ContentItem, PasswordVerifier, ProtectionVerdict, RequestContext};
use tracing::{debug, warn};

use crate::config::GateConfig;

/// Why the gate reached its decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateReason {
    /// No ancestor extends protection to the item.
    NotInherited,
    /// The requester holds no credential.
    CredentialMissing,
    /// The credential verified against the protecting password.
    CredentialAccepted,
    /// The credential was issued for some other password.
    CredentialRejected,
    /// The verifier could not check the credential.
    VerificationFailed,
}

/// Result of one gate evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateDecision {
    pub challenge_required: bool,
    /// The protecting ancestor, when inheritance is in play.
    pub source: Option<ContentId>,
    pub reason: GateReason,
}

impl GateDecision {
    fn not_inherited() -> Self {
        Self {
            challenge_required: false,
            source: None,
            reason: GateReason::NotInherited,
        }
    }
}

/// The Access Gate.
pub struct AccessGate {
    resolver: AncestryResolver,
    verifier: Arc<dyn PasswordVerifier>,
    config: GateConfig,
}

impl AccessGate {
    pub fn new(
        resolver: AncestryResolver,
        verifier: Arc<dyn PasswordVerifier>,
        config: GateConfig,
    ) -> Self {
        Self {
            resolver,
            verifier,
            config,
        }
    }

    /// Configuration accessor.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decide whether rendering `id` requires the inherited password challenge.
    pub fn evaluate(&self, id: ContentId, request: &RequestContext) -> GateDecision {
        let (source, password) = match self.resolver.resolve_protection(id) {
            ProtectionVerdict::None => return GateDecision::not_inherited(),
            ProtectionVerdict::Inherited { source, password } => (source, password),
        };

        let reason = self.check_credential(&password, request);
        let challenge_required = reason != GateReason::CredentialAccepted;

        debug!(
            item_id = %id,
            ancestor_id = %source,
            reason = ?reason,
            challenge_required,
            "Inherited protection evaluated"
        );

        GateDecision {
            challenge_required,
            source: Some(source),
            reason,
        }
    }

    /// Combine the host's own "password required" answer for `id` with the
    /// inherited one. Inheritance can only add a challenge, never lift one.
    pub fn password_required(
        &self,
        id: ContentId,
        request: &RequestContext,
        native_required: bool,
    ) -> bool {
        native_required || self.evaluate(id, request).challenge_required
    }

    /// Whether `item`'s own password, ignoring inheritance, demands a challenge.
    pub fn own_password_required(&self, item: &ContentItem, request: &RequestContext) -> bool {
        item.has_password()
            && self.check_credential(&item.password, request) != GateReason::CredentialAccepted
    }

    /// Full decision for an item: its own password or any inherited one.
    ///
    /// The credential is verified at most once. Once it has matched the
    /// item's own password, an inherited password is satisfied only if it is
    /// the same password.
    pub fn challenge_required(&self, item: &ContentItem, request: &RequestContext) -> bool {
        if !item.has_password() {
            return self.evaluate(item.id, request).challenge_required;
        }
        if self.own_password_required(item, request) {
            return true;
        }

        match self.resolver.resolve_protection(item.id) {
            ProtectionVerdict::None => false,
            ProtectionVerdict::Inherited { source, password } => {
                let challenge_required = password != item.password;
                debug!(
                    item_id = %item.id,
                    ancestor_id = %source,
                    challenge_required,
                    "Inherited protection checked against own credential"
                );
                challenge_required
            }
        }
    }

    fn check_credential(&self, password: &str, request: &RequestContext) -> GateReason {
        let Some(credential) = request.credential(&self.config.credential_name) else {
            return GateReason::CredentialMissing;
        };

        match self.verifier.verify(password, credential) {
            Ok(true) => GateReason::CredentialAccepted,
            Ok(false) => GateReason::CredentialRejected,
            Err(err) => {
                warn!(error = %err, "Credential verification failed, requiring challenge");
                GateReason::VerificationFailed
            }
        }
    }
}
