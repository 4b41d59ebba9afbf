//! Versioned upgrade of the legacy flag key.
//!
//! Older installs stored the flag under `_protect_children = "on"`. On the
//! first load of a new version every such item is rewritten to the current
//! key and the legacy key is removed. Items are migrated independently; one
//! failure never blocks the rest.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use inherit_types::{
    flag_value, ContentGraph, ContentId, HostResult, MetaStore, OptionStore, INHERIT_META_KEY,
    LEGACY_ENABLED_VALUE, LEGACY_INHERIT_META_KEY,
};
use tracing::{info, warn};

use crate::error::HostAdapterResult;

/// Option holding the version whose upgrade pass last completed.
pub const VERSION_OPTION_KEY: &str = "inherit_plugin_version";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationReport {
    pub examined: usize,
    pub migrated: usize,
    pub failed: Vec<ContentId>,
    pub completed_at: DateTime<Utc>,
}

impl MigrationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct UpgradeMigrator {
    graph: Arc<dyn ContentGraph>,
    meta: Arc<dyn MetaStore>,
    options: Arc<dyn OptionStore>,
}

impl UpgradeMigrator {
    pub fn new(
        graph: Arc<dyn ContentGraph>,
        meta: Arc<dyn MetaStore>,
        options: Arc<dyn OptionStore>,
    ) -> Self {
        Self {
            graph,
            meta,
            options,
        }
    }

    /// Run the migration when the recorded version differs from
    /// `running_version`. The version is recorded only after a pass with no
    /// failed items, so failures are retried on the next load.
    pub fn run_if_needed(
        &self,
        running_version: &str,
    ) -> HostAdapterResult<Option<MigrationReport>> {
        let installed = self.options.get_option(VERSION_OPTION_KEY)?;
        if installed.as_deref() == Some(running_version) {
            return Ok(None);
        }

        let report = self.migrate_legacy_flags()?;
        if report.is_complete() {
            self.options.set_option(VERSION_OPTION_KEY, running_version)?;
        }

        info!(
            from = installed.as_deref().unwrap_or("none"),
            to = running_version,
            examined = report.examined,
            migrated = report.migrated,
            failed = report.failed.len(),
            "Upgrade migration finished"
        );
        Ok(Some(report))
    }

    /// Move every legacy flag to the current key.
    pub fn migrate_legacy_flags(&self) -> HostAdapterResult<MigrationReport> {
        let ids = self
            .graph
            .get_items_by_meta_flag(LEGACY_INHERIT_META_KEY, LEGACY_ENABLED_VALUE)?;

        let mut migrated = 0;
        let mut failed = Vec::new();
        for id in &ids {
            match self.migrate_item(*id) {
                Ok(()) => migrated += 1,
                Err(err) => {
                    warn!(item_id = %id, error = %err, "Legacy flag migration failed");
                    failed.push(*id);
                }
            }
        }

        Ok(MigrationReport {
            examined: ids.len(),
            migrated,
            failed,
            completed_at: Utc::now(),
        })
    }

    fn migrate_item(&self, id: ContentId) -> HostResult<()> {
        self.meta.set_meta(id, INHERIT_META_KEY, flag_value(true))?;
        self.meta.delete_meta(id, LEGACY_INHERIT_META_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inherit_types::{ContentItem, InMemoryHost};

    fn setup() -> (Arc<InMemoryHost>, UpgradeMigrator) {
        let host = Arc::new(InMemoryHost::new());
        for id in 1..=3 {
            host.insert(ContentItem::new(ContentId(id), "page")).unwrap();
        }
        let migrator = UpgradeMigrator::new(host.clone(), host.clone(), host.clone());
        (host, migrator)
    }

    #[test]
    fn legacy_flag_moves_to_current_key() {
        let (host, migrator) = setup();
        host.set_meta(ContentId(1), LEGACY_INHERIT_META_KEY, "on").unwrap();

        let report = migrator.migrate_legacy_flags().unwrap();
        assert_eq!(report.examined, 1);
        assert_eq!(report.migrated, 1);
        assert!(report.is_complete());

        assert_eq!(
            host.get_meta(ContentId(1), INHERIT_META_KEY).unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(host.get_meta(ContentId(1), LEGACY_INHERIT_META_KEY).unwrap(), None);
    }

    #[test]
    fn disabled_legacy_values_are_not_migrated() {
        let (host, migrator) = setup();
        host.set_meta(ContentId(2), LEGACY_INHERIT_META_KEY, "").unwrap();

        let report = migrator.migrate_legacy_flags().unwrap();
        assert_eq!(report.examined, 0);
        assert_eq!(host.get_meta(ContentId(2), INHERIT_META_KEY).unwrap(), None);
    }

    #[test]
    fn one_failure_does_not_block_others() {
        let (host, migrator) = setup();
        for id in 1..=3 {
            host.set_meta(ContentId(id), LEGACY_INHERIT_META_KEY, "on").unwrap();
        }
        host.fail_meta_writes_for(ContentId(2)).unwrap();

        let report = migrator.migrate_legacy_flags().unwrap();
        assert_eq!(report.examined, 3);
        assert_eq!(report.migrated, 2);
        assert_eq!(report.failed, vec![ContentId(2)]);
        assert_eq!(
            host.get_meta(ContentId(3), INHERIT_META_KEY).unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(
            host.get_meta(ContentId(2), LEGACY_INHERIT_META_KEY).unwrap().as_deref(),
            Some("on")
        );
    }

    #[test]
    fn runs_once_per_version() {
        let (host, migrator) = setup();
        host.set_meta(ContentId(1), LEGACY_INHERIT_META_KEY, "on").unwrap();

        assert!(migrator.run_if_needed("1.5.0").unwrap().is_some());
        assert_eq!(
            host.get_option(VERSION_OPTION_KEY).unwrap().as_deref(),
            Some("1.5.0")
        );
        assert!(migrator.run_if_needed("1.5.0").unwrap().is_none());
        assert!(migrator.run_if_needed("1.6.0").unwrap().is_some());
    }

    #[test]
    fn incomplete_pass_is_retried() {
        let (host, migrator) = setup();
        host.set_meta(ContentId(1), LEGACY_INHERIT_META_KEY, "on").unwrap();
        host.fail_meta_writes_for(ContentId(1)).unwrap();

        let report = migrator.run_if_needed("1.5.0").unwrap().unwrap();
        assert!(!report.is_complete());
        assert_eq!(host.get_option(VERSION_OPTION_KEY).unwrap(), None);
    }
}
