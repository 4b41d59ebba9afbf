use std::sync::Arc;

use inherit_editor::{
    DeferredSave, DisplayRewriter, EditScreen, Eligibility, FlagPersistence, ListView,
    MetaPolicy, MetaRegistration, RewriteOutcome, SaveOutcome,
};
use inherit_gate::{AccessGate, GateDecision, PasswordChallenge, Sha256PasswordHasher};
use inherit_resolver::AncestryResolver;
use inherit_types::{
    Actor, CapabilityProvider, ContentGraph, ContentId, InMemoryHost, MetaStore, OptionStore,
    PasswordHasher, PasswordVerifier, RequestContext,
};

use crate::config::InheritConfig;
use crate::error::{HostAdapterError, HostAdapterResult};
use crate::migration::{MigrationReport, UpgradeMigrator};

/// The host services the add-on consumes.
#[derive(Clone)]
pub struct HostCollaborators {
    pub graph: Arc<dyn ContentGraph>,
    pub meta: Arc<dyn MetaStore>,
    pub options: Arc<dyn OptionStore>,
    pub capabilities: Arc<dyn CapabilityProvider>,
    /// Checks client credentials on every render.
    pub verifier: Arc<dyn PasswordVerifier>,
    /// Issues credentials after a passed challenge; must agree with `verifier`.
    pub hasher: Arc<dyn PasswordHasher>,
}

impl HostCollaborators {
    /// Back every collaborator with one in-memory host and the reference
    /// credential hasher.
    pub fn in_memory(host: Arc<InMemoryHost>) -> Self {
        let hasher = Arc::new(Sha256PasswordHasher::new());
        Self {
            graph: host.clone(),
            meta: host.clone(),
            options: host.clone(),
            capabilities: host,
            verifier: hasher.clone(),
            hasher,
        }
    }
}

/// A credential issued after a passed challenge, to be handed to the client
/// under `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedCredential {
    pub name: String,
    pub value: String,
}

/// Host hook entry points.
pub struct InheritanceHooks {
    graph: Arc<dyn ContentGraph>,
    gate: AccessGate,
    challenge: PasswordChallenge,
    persistence: FlagPersistence,
    rewriter: DisplayRewriter,
    meta_policy: MetaPolicy,
    migrator: UpgradeMigrator,
    config: InheritConfig,
}

impl InheritanceHooks {
    pub fn new(host: HostCollaborators, config: InheritConfig) -> Self {
        let resolver = AncestryResolver::new(host.graph.clone());
        let eligibility =
            Eligibility::new(host.graph.clone(), config.editor.supported_kinds.clone());
        let gate = AccessGate::new(resolver.clone(), host.verifier, config.gate.clone());

        Self {
            graph: host.graph.clone(),
            gate,
            challenge: PasswordChallenge::new(host.hasher.clone()),
            persistence: FlagPersistence::new(
                host.graph.clone(),
                host.meta.clone(),
                host.capabilities.clone(),
                eligibility.clone(),
            ),
            rewriter: DisplayRewriter::new(resolver, eligibility, config.editor.clone()),
            meta_policy: MetaPolicy::new(host.capabilities),
            migrator: UpgradeMigrator::new(host.graph, host.meta, host.options),
            config,
        }
    }

    pub fn config(&self) -> &InheritConfig {
        &self.config
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Plugin load: run the upgrade migration if this version has not yet.
    pub fn on_load(&self) -> HostAdapterResult<Option<MigrationReport>> {
        self.migrator.run_if_needed(crate::VERSION)
    }

    /// Front-end render: final "password required" answer for `id`, given
    /// the host's own answer.
    pub fn on_render(
        &self,
        id: ContentId,
        request: &RequestContext,
        native_required: bool,
    ) -> bool {
        self.gate.password_required(id, request, native_required)
    }

    /// Front-end render when the host leaves the native check to us.
    pub fn challenge_required(
        &self,
        id: ContentId,
        request: &RequestContext,
    ) -> HostAdapterResult<bool> {
        let item = self
            .graph
            .get_item(id)?
            .ok_or(HostAdapterError::NotFound(id))?;
        Ok(self.gate.challenge_required(&item, request))
    }

    /// Detailed inherited-protection decision, for diagnostics.
    pub fn inspect(&self, id: ContentId, request: &RequestContext) -> GateDecision {
        self.gate.evaluate(id, request)
    }

    /// Password form submission for item `id`.
    pub fn on_password_submit(
        &self,
        id: ContentId,
        submitted: &str,
    ) -> HostAdapterResult<IssuedCredential> {
        let item = self
            .graph
            .get_item(id)?
            .ok_or(HostAdapterError::NotFound(id))?;
        let value = self.challenge.submit(&item, submitted)?;
        Ok(IssuedCredential {
            name: self.config.gate.credential_name.clone(),
            value,
        })
    }

    /// Generic save hook.
    pub fn on_save(&self, id: ContentId, request: &RequestContext) -> SaveOutcome {
        self.persistence.save(id, request)
    }

    /// Structured-editor save completed; finishes a deferred save.
    pub fn on_structured_save_complete(
        &self,
        deferred: DeferredSave,
        submitted: Option<bool>,
    ) -> SaveOutcome {
        self.persistence.complete_deferred(deferred, submitted)
    }

    pub fn on_render_edit_screen(
        &self,
        screen: &mut EditScreen,
        request: &RequestContext,
    ) -> RewriteOutcome {
        self.rewriter.rewrite_edit_screen(screen, request)
    }

    pub fn on_render_list(&self, list: &mut ListView, request: &RequestContext) -> usize {
        self.rewriter.annotate_list(list, request)
    }

    /// Metadata filter: hide the flag from generic editing.
    pub fn is_protected_meta(&self, key: &str, host_default: bool) -> bool {
        self.meta_policy.is_protected_meta(key, host_default)
    }

    /// Metadata authorisation callback.
    pub fn can_edit_meta(&self, key: &str, actor: Option<&Actor>) -> Option<bool> {
        self.meta_policy.can_edit_meta(key, actor)
    }

    pub fn meta_registration(&self) -> MetaRegistration {
        self.meta_policy.registration()
    }
}
