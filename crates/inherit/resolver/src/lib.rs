//! Ancestry Resolver.
//!
//! Given a content item, walk its ancestors from the immediate parent towards
//! the root and report the first one that both has "protect children" enabled
//! and carries a password of its own. The nearest qualifying ancestor wins.
//!
//! Resolution never fails. An ancestor that cannot be read is skipped, and an
//! unreadable chain resolves to [`ProtectionVerdict::None`].

#![deny(unsafe_code)]

use std::sync::Arc;

use inherit_types::{AncestorChain, ContentGraph, ContentId, ContentItem, ProtectionVerdict};
use tracing::{debug, warn};

/// Read-only inheritance lookup over a [`ContentGraph`].
#[derive(Clone)]
pub struct AncestryResolver {
    graph: Arc<dyn ContentGraph>,
}

impl AncestryResolver {
    pub fn new(graph: Arc<dyn ContentGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Arc<dyn ContentGraph> {
        &self.graph
    }

    /// Ancestors of `id`, immediate parent first. Empty if the chain cannot
    /// be read.
    pub fn ancestor_chain(&self, id: ContentId) -> AncestorChain {
        match self.graph.get_ancestor_ids(id) {
            Ok(ids) => AncestorChain::from(ids),
            Err(err) => {
                warn!(item_id = %id, error = %err, "Ancestor lookup failed, treating as root");
                AncestorChain::default()
            }
        }
    }

    /// Resolve inherited protection for `id`.
    pub fn resolve_protection(&self, id: ContentId) -> ProtectionVerdict {
        let chain = self.ancestor_chain(id);
        if chain.is_empty() {
            return ProtectionVerdict::None;
        }

        let verdict = self.first_protecting(&chain);
        debug!(
            item_id = %id,
            depth = chain.len(),
            verdict = ?verdict,
            "Resolved inherited protection"
        );
        verdict
    }

    /// First ancestor in `chain` order that protects its children.
    pub fn first_protecting(&self, chain: &AncestorChain) -> ProtectionVerdict {
        chain
            .iter()
            .filter_map(|ancestor| self.load(*ancestor))
            .find(ContentItem::protects_children)
            .map(|item| ProtectionVerdict::Inherited {
                source: item.id,
                password: item.password,
            })
            .unwrap_or(ProtectionVerdict::None)
    }

    fn load(&self, id: ContentId) -> Option<ContentItem> {
        match self.graph.get_item(id) {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                debug!(ancestor_id = %id, "Ancestor missing, skipping");
                None
            }
            Err(err) => {
                warn!(ancestor_id = %id, error = %err, "Ancestor unreadable, skipping");
                None
            }
        }
    }
}
