//! Explicit per-request context.
//!
//! Everything a decision needs from the incoming request (who is acting, what
//! was submitted, which credentials the client holds, what kind of request it
//! is) travels in a [`RequestContext`] value rather than being read from
//! ambient state.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// The authenticated actor behind a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub capabilities: BTreeSet<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Request classification supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestKind {
    /// Periodic autosave of an open editor.
    pub autosave: bool,
    /// Background partial refresh.
    pub ajax: bool,
    /// Sub-request that only loads metadata panels for a structured editor.
    pub meta_loader: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub actor: Option<Actor>,
    /// Submitted form fields. `None` when the request carried no form body.
    pub fields: Option<HashMap<String, String>>,
    /// Credentials held by the client, keyed by credential name.
    pub credentials: HashMap<String, String>,
    pub kind: RequestKind,
}

impl RequestContext {
    /// A request from an anonymous visitor with no body and no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_actor(actor: Actor) -> Self {
        Self {
            actor: Some(actor),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Mark the request as carrying a form body, even if it has no fields of
    /// interest (an unchecked checkbox is simply absent).
    pub fn with_form_body(mut self) -> Self {
        self.fields.get_or_insert_with(HashMap::new);
        self
    }

    pub fn with_credential(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(name.into(), value.into());
        self
    }

    pub fn autosave(mut self) -> Self {
        self.kind.autosave = true;
        self
    }

    pub fn ajax(mut self) -> Self {
        self.kind.ajax = true;
        self
    }

    pub fn meta_loader(mut self) -> Self {
        self.kind.meta_loader = true;
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.get(name))
            .map(String::as_str)
    }

    /// True when a non-empty form body was submitted.
    pub fn has_form_body(&self) -> bool {
        self.fields.as_ref().is_some_and(|fields| !fields.is_empty())
    }

    pub fn credential(&self, name: &str) -> Option<&str> {
        self.credentials.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_request_has_nothing() {
        let request = RequestContext::anonymous();
        assert!(request.actor.is_none());
        assert!(!request.has_form_body());
        assert!(request.credential("postpass").is_none());
        assert_eq!(request.kind, RequestKind::default());
    }

    #[test]
    fn empty_form_body_is_not_a_body() {
        let request = RequestContext::anonymous().with_form_body();
        assert!(request.fields.is_some());
        assert!(!request.has_form_body());

        let request = request.with_field("title", "About");
        assert!(request.has_form_body());
        assert_eq!(request.field("title"), Some("About"));
        assert_eq!(request.field("protect_children"), None);
    }

    #[test]
    fn kind_builders() {
        let request = RequestContext::anonymous().autosave().ajax().meta_loader();
        assert!(request.kind.autosave);
        assert!(request.kind.ajax);
        assert!(request.kind.meta_loader);
    }
}
