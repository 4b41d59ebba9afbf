//! In-memory reference host.
//!
//! Deterministic and test-friendly. Implements every storage-side collaborator
//! trait over plain maps, with switches for injecting lookup and write
//! failures.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::content::{ContentId, ContentItem};
use crate::error::{HostError, HostResult};
use crate::meta::{flag_value, is_truthy, EDIT_CONTENT_CAPABILITY, INHERIT_META_KEY};
use crate::request::Actor;
use crate::traits::{CapabilityProvider, ContentGraph, MetaStore, OptionStore};

#[derive(Default)]
pub struct InMemoryHost {
    items: RwLock<BTreeMap<ContentId, ContentItem>>,
    meta: RwLock<HashMap<(ContentId, String), String>>,
    options: RwLock<HashMap<String, String>>,
    locked: RwLock<HashSet<ContentId>>,
    failing_items: RwLock<HashSet<ContentId>>,
    failing_meta_writes: RwLock<HashSet<ContentId>>,
    meta_writes: AtomicUsize,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. Its `inherit_enabled` flag is written to
    /// metadata, which stays the storage of record.
    pub fn insert(&self, item: ContentItem) -> HostResult<()> {
        if item.inherit_enabled {
            self.meta
                .write()
                .map_err(|_| HostError::LockPoisoned("meta"))?
                .insert((item.id, INHERIT_META_KEY.to_string()), flag_value(true).to_string());
        }
        self.items
            .write()
            .map_err(|_| HostError::LockPoisoned("items"))?
            .insert(item.id, item);
        Ok(())
    }

    pub fn remove(&self, id: ContentId) -> HostResult<Option<ContentItem>> {
        Ok(self
            .items
            .write()
            .map_err(|_| HostError::LockPoisoned("items"))?
            .remove(&id))
    }

    /// Make `get_item` fail for `id`.
    pub fn fail_lookups_for(&self, id: ContentId) -> HostResult<()> {
        self.failing_items
            .write()
            .map_err(|_| HostError::LockPoisoned("failing_items"))?
            .insert(id);
        Ok(())
    }

    /// Make `set_meta` fail for `id`.
    pub fn fail_meta_writes_for(&self, id: ContentId) -> HostResult<()> {
        self.failing_meta_writes
            .write()
            .map_err(|_| HostError::LockPoisoned("failing_meta_writes"))?
            .insert(id);
        Ok(())
    }

    /// Deny per-item edit capability on `id` to everyone.
    pub fn lock(&self, id: ContentId) -> HostResult<()> {
        self.locked
            .write()
            .map_err(|_| HostError::LockPoisoned("locked"))?
            .insert(id);
        Ok(())
    }

    /// Number of successful metadata writes and deletes so far.
    pub fn meta_write_count(&self) -> usize {
        self.meta_writes.load(Ordering::SeqCst)
    }
}

impl ContentGraph for InMemoryHost {
    fn get_item(&self, id: ContentId) -> HostResult<Option<ContentItem>> {
        if self
            .failing_items
            .read()
            .map_err(|_| HostError::LockPoisoned("failing_items"))?
            .contains(&id)
        {
            return Err(HostError::Backend(format!("lookup of item {} failed", id)));
        }

        let item = self
            .items
            .read()
            .map_err(|_| HostError::LockPoisoned("items"))?
            .get(&id)
            .cloned();

        match item {
            Some(mut item) => {
                item.inherit_enabled = self
                    .get_meta(id, INHERIT_META_KEY)?
                    .map(|value| is_truthy(&value))
                    .unwrap_or(false);
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn get_ancestor_ids(&self, id: ContentId) -> HostResult<Vec<ContentId>> {
        let items = self
            .items
            .read()
            .map_err(|_| HostError::LockPoisoned("items"))?;
        let mut current = items.get(&id).ok_or(HostError::NotFound(id))?.parent;

        let mut visited = HashSet::from([id]);
        let mut ancestors = Vec::new();
        while let Some(parent) = current {
            if !visited.insert(parent) {
                break;
            }
            ancestors.push(parent);
            // A dangling parent ends the chain.
            current = items.get(&parent).and_then(|item| item.parent);
        }
        Ok(ancestors)
    }

    fn has_children(&self, id: ContentId) -> HostResult<bool> {
        Ok(self
            .items
            .read()
            .map_err(|_| HostError::LockPoisoned("items"))?
            .values()
            .any(|item| item.parent == Some(id)))
    }

    fn get_items_by_meta_flag(&self, key: &str, value: &str) -> HostResult<Vec<ContentId>> {
        let meta = self.meta.read().map_err(|_| HostError::LockPoisoned("meta"))?;
        let mut ids: Vec<ContentId> = meta
            .iter()
            .filter(|((_, k), v)| k == key && v.as_str() == value)
            .map(|((id, _), _)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl MetaStore for InMemoryHost {
    fn get_meta(&self, id: ContentId, key: &str) -> HostResult<Option<String>> {
        Ok(self
            .meta
            .read()
            .map_err(|_| HostError::LockPoisoned("meta"))?
            .get(&(id, key.to_string()))
            .cloned())
    }

    fn set_meta(&self, id: ContentId, key: &str, value: &str) -> HostResult<()> {
        if self
            .failing_meta_writes
            .read()
            .map_err(|_| HostError::LockPoisoned("failing_meta_writes"))?
            .contains(&id)
        {
            return Err(HostError::Backend(format!("meta write for item {} failed", id)));
        }

        self.meta
            .write()
            .map_err(|_| HostError::LockPoisoned("meta"))?
            .insert((id, key.to_string()), value.to_string());
        self.meta_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete_meta(&self, id: ContentId, key: &str) -> HostResult<()> {
        let removed = self
            .meta
            .write()
            .map_err(|_| HostError::LockPoisoned("meta"))?
            .remove(&(id, key.to_string()));
        if removed.is_some() {
            self.meta_writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl OptionStore for InMemoryHost {
    fn get_option(&self, key: &str) -> HostResult<Option<String>> {
        Ok(self
            .options
            .read()
            .map_err(|_| HostError::LockPoisoned("options"))?
            .get(key)
            .cloned())
    }

    fn set_option(&self, key: &str, value: &str) -> HostResult<()> {
        self.options
            .write()
            .map_err(|_| HostError::LockPoisoned("options"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl CapabilityProvider for InMemoryHost {
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool {
        actor.has_capability(capability)
    }

    fn can_edit_item(&self, actor: &Actor, id: ContentId) -> bool {
        let locked = self
            .locked
            .read()
            .map(|locked| locked.contains(&id))
            .unwrap_or(true);
        !locked && actor.has_capability(EDIT_CONTENT_CAPABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: u64) -> ContentItem {
        ContentItem::new(ContentId(id), "page")
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let host = InMemoryHost::new();
        host.insert(page(1)).unwrap();
        host.insert(page(2).with_parent(ContentId(1))).unwrap();
        host.insert(page(3).with_parent(ContentId(2))).unwrap();

        assert_eq!(
            host.get_ancestor_ids(ContentId(3)).unwrap(),
            vec![ContentId(2), ContentId(1)]
        );
        assert!(host.get_ancestor_ids(ContentId(1)).unwrap().is_empty());
        assert!(host.has_children(ContentId(2)).unwrap());
        assert!(!host.has_children(ContentId(3)).unwrap());
    }

    #[test]
    fn parent_cycle_terminates() {
        let host = InMemoryHost::new();
        host.insert(page(1).with_parent(ContentId(2))).unwrap();
        host.insert(page(2).with_parent(ContentId(1))).unwrap();

        assert_eq!(host.get_ancestor_ids(ContentId(1)).unwrap(), vec![ContentId(2)]);
    }

    #[test]
    fn inherit_flag_is_read_from_meta() {
        let host = InMemoryHost::new();
        host.insert(page(1).with_password("pw").with_inherit(true)).unwrap();
        assert!(host.get_item(ContentId(1)).unwrap().unwrap().inherit_enabled);

        host.set_meta(ContentId(1), INHERIT_META_KEY, "").unwrap();
        assert!(!host.get_item(ContentId(1)).unwrap().unwrap().inherit_enabled);
    }

    #[test]
    fn injected_failures_surface_as_errors() {
        let host = InMemoryHost::new();
        host.insert(page(1)).unwrap();
        host.fail_lookups_for(ContentId(1)).unwrap();
        host.fail_meta_writes_for(ContentId(1)).unwrap();

        assert!(matches!(host.get_item(ContentId(1)), Err(HostError::Backend(_))));
        assert!(host.set_meta(ContentId(1), "k", "v").is_err());
        assert_eq!(host.meta_write_count(), 0);
    }

    #[test]
    fn unknown_item_has_no_ancestry() {
        let host = InMemoryHost::new();
        assert_eq!(
            host.get_ancestor_ids(ContentId(9)),
            Err(HostError::NotFound(ContentId(9)))
        );
    }
}
