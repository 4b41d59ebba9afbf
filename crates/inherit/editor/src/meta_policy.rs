use std::sync::Arc;

use inherit_types::{Actor, CapabilityProvider, EDIT_CONTENT_CAPABILITY, INHERIT_META_KEY};
use serde::{Deserialize, Serialize};

/// How the flag is exposed to the structured editor's data API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRegistration {
    pub key: String,
    pub value_type: String,
    pub single: bool,
    pub show_in_api: bool,
}

/// Metadata access rules for the "protect children" flag.
///
/// The flag is hidden from the generic custom-field editor; only actors with
/// the content-editing capability may change it through the data API.
#[derive(Clone)]
pub struct MetaPolicy {
    capabilities: Arc<dyn CapabilityProvider>,
}

impl MetaPolicy {
    pub fn new(capabilities: Arc<dyn CapabilityProvider>) -> Self {
        Self { capabilities }
    }

    /// Whether `key` is hidden from generic metadata editing. Other keys keep
    /// the host's answer.
    pub fn is_protected_meta(&self, key: &str, host_default: bool) -> bool {
        key == INHERIT_META_KEY || host_default
    }

    /// Edit permission for `key`. `None` leaves the decision to the host.
    pub fn can_edit_meta(&self, key: &str, actor: Option<&Actor>) -> Option<bool> {
        if key != INHERIT_META_KEY {
            return None;
        }
        Some(actor.is_some_and(|actor| {
            self.capabilities
                .has_capability(actor, EDIT_CONTENT_CAPABILITY)
        }))
    }

    pub fn registration(&self) -> MetaRegistration {
        MetaRegistration {
            key: INHERIT_META_KEY.to_string(),
            value_type: "boolean".to_string(),
            single: true,
            show_in_api: true,
        }
    }
}
