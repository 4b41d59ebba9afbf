use std::sync::Arc;

use inherit_types::{
    flag_value, is_truthy, CapabilityProvider, ContentGraph, ContentId, ContentItem, MetaStore,
    RequestContext, INHERIT_META_KEY, PROTECT_CHILDREN_FIELD,
};
use tracing::{debug, info, warn};

use crate::eligibility::Eligibility;

/// Why a save left the flag alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    Ineligible,
    MetaLoader,
    Autosave,
    Unauthorized,
    StorageFailed,
}

/// Handle for a save that arrived without a form body.
///
/// The structured editor writes its fields after the generic save hook has
/// run; the flag is persisted once it reports completion. Only issued after
/// the request passed every save guard.
#[derive(Debug, PartialEq, Eq)]
pub struct DeferredSave {
    item_id: ContentId,
}

impl DeferredSave {
    pub fn item_id(&self) -> ContentId {
        self.item_id
    }
}

/// Result of a flag save attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The stored flag changed to the given value.
    Written(bool),
    /// The stored flag already held the given value.
    Unchanged(bool),
    Deferred(DeferredSave),
    Skipped(SkipReason),
}

/// Persists the "protect children" flag from editor saves.
pub struct FlagPersistence {
    graph: Arc<dyn ContentGraph>,
    meta: Arc<dyn MetaStore>,
    capabilities: Arc<dyn CapabilityProvider>,
    eligibility: Eligibility,
}

impl FlagPersistence {
    pub fn new(
        graph: Arc<dyn ContentGraph>,
        meta: Arc<dyn MetaStore>,
        capabilities: Arc<dyn CapabilityProvider>,
        eligibility: Eligibility,
    ) -> Self {
        Self {
            graph,
            meta,
            capabilities,
            eligibility,
        }
    }

    /// Handle an editor save of `id`.
    ///
    /// An unchecked box is simply absent from the form, so a form body
    /// without the field means "disabled".
    pub fn save(&self, id: ContentId, request: &RequestContext) -> SaveOutcome {
        if let Err(reason) = self.eligible_item(id) {
            return SaveOutcome::Skipped(reason);
        }

        if request.kind.meta_loader {
            return SaveOutcome::Skipped(SkipReason::MetaLoader);
        }

        if request.kind.autosave {
            return SaveOutcome::Skipped(SkipReason::Autosave);
        }

        let authorized = request
            .actor
            .as_ref()
            .is_some_and(|actor| self.capabilities.can_edit_item(actor, id));
        if !authorized {
            debug!(item_id = %id, "Actor may not edit item, flag not persisted");
            return SaveOutcome::Skipped(SkipReason::Unauthorized);
        }

        if !request.has_form_body() {
            debug!(item_id = %id, "Save carried no form body, deferring flag persistence");
            return SaveOutcome::Deferred(DeferredSave { item_id: id });
        }

        let enabled = request
            .field(PROTECT_CHILDREN_FIELD)
            .is_some_and(is_truthy);
        self.write(id, enabled)
    }

    /// Finish a deferred save once the structured editor has written.
    ///
    /// `submitted` is the flag carried in the structured payload, if any;
    /// without one the stored value is re-normalised.
    pub fn complete_deferred(
        &self,
        deferred: DeferredSave,
        submitted: Option<bool>,
    ) -> SaveOutcome {
        let id = deferred.item_id;
        if let Err(reason) = self.eligible_item(id) {
            return SaveOutcome::Skipped(reason);
        }

        let enabled = match submitted {
            Some(enabled) => enabled,
            None => match self.meta.get_meta(id, INHERIT_META_KEY) {
                Ok(stored) => stored.as_deref().is_some_and(is_truthy),
                Err(err) => {
                    warn!(item_id = %id, error = %err, "Could not read stored flag");
                    return SaveOutcome::Skipped(SkipReason::StorageFailed);
                }
            },
        };
        self.write(id, enabled)
    }

    /// Store `enabled` for `id`. Re-storing the current value writes nothing.
    pub fn write(&self, id: ContentId, enabled: bool) -> SaveOutcome {
        let canonical = flag_value(enabled);
        let current = match self.meta.get_meta(id, INHERIT_META_KEY) {
            Ok(current) => current,
            Err(err) => {
                warn!(item_id = %id, error = %err, "Could not read stored flag");
                return SaveOutcome::Skipped(SkipReason::StorageFailed);
            }
        };

        let unchanged = match current.as_deref() {
            Some(value) => value == canonical,
            None => !enabled,
        };
        if unchanged {
            return SaveOutcome::Unchanged(enabled);
        }

        match self.meta.set_meta(id, INHERIT_META_KEY, canonical) {
            Ok(()) => {
                info!(item_id = %id, enabled, "Protect-children flag stored");
                SaveOutcome::Written(enabled)
            }
            Err(err) => {
                warn!(item_id = %id, error = %err, "Could not store flag");
                SaveOutcome::Skipped(SkipReason::StorageFailed)
            }
        }
    }

    fn eligible_item(&self, id: ContentId) -> Result<ContentItem, SkipReason> {
        let item = match self.graph.get_item(id) {
            Ok(Some(item)) => item,
            Ok(None) => return Err(SkipReason::NotFound),
            Err(err) => {
                warn!(item_id = %id, error = %err, "Could not load item for save");
                return Err(SkipReason::NotFound);
            }
        };

        if self.eligibility.is_eligible(&item) {
            Ok(item)
        } else {
            Err(SkipReason::Ineligible)
        }
    }
}
