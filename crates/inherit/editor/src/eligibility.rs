use std::sync::Arc;

use inherit_types::{ContentGraph, ContentItem};
use tracing::warn;

/// Decides which items offer the "protect children" setting.
///
/// An item is eligible when its kind is supported outright, or when it has
/// children to protect.
#[derive(Clone)]
pub struct Eligibility {
    graph: Arc<dyn ContentGraph>,
    supported_kinds: Vec<String>,
}

impl Eligibility {
    pub fn new(graph: Arc<dyn ContentGraph>, supported_kinds: Vec<String>) -> Self {
        Self {
            graph,
            supported_kinds,
        }
    }

    pub fn is_eligible(&self, item: &ContentItem) -> bool {
        if self.supported_kinds.iter().any(|kind| *kind == item.kind) {
            return true;
        }

        self.graph.has_children(item.id).unwrap_or_else(|err| {
            warn!(item_id = %item.id, error = %err, "Child lookup failed, treating as ineligible");
            false
        })
    }
}
