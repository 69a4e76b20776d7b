use super::*;
use crate::types::{CategoryPatch, Name, ProjectPatch, TechnologyPatch};
use chrono::TimeZone;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

mod common {
    use super::*;

    pub(super) fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    pub(super) fn name(s: &str) -> Name {
        Name::try_new(s.to_string()).unwrap()
    }

    pub(super) fn create_test_core() -> FolioCore<MemorySlots> {
        FolioCore::in_memory(RetentionConfig::default())
    }

    pub(super) fn create_test_core_on_disk() -> (FolioCore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            base_path: temp_dir.path().to_path_buf(),
            namespace: "portfolio-store".to_string(),
            retention: RetentionConfig::default(),
        };
        (FolioCore::open(config).unwrap(), temp_dir)
    }

    /// Slots whose writes fail while `failing` is set.
    #[derive(Default)]
    pub(super) struct FlakySlots {
        pub(super) inner: MemorySlots,
        pub(super) failing: Arc<AtomicBool>,
    }

    impl SlotStorage for FlakySlots {
        type Error = std::io::Error;

        fn read(&self, slot: &str) -> Result<Option<String>, std::io::Error> {
            Ok(self.inner.read(slot).unwrap_or_default())
        }

        fn write(&mut self, slot: &str, contents: &str) -> Result<(), std::io::Error> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(std::io::Error::other("disk full"));
            }
            let _ = self.inner.write(slot, contents);
            Ok(())
        }

        fn clear(&mut self, slot: &str) -> Result<(), std::io::Error> {
            let _ = self.inner.clear(slot);
            Ok(())
        }
    }
}

mod add {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_add_assigns_id_and_timestamps() {
        let mut core = create_test_core();

        let record = core.add(Technology::new(name("React")), t0());

        assert_eq!(record.created_at, t0());
        assert_eq!(record.updated_at, t0());
        assert_eq!(record.sync_state, SyncState::Pending);
        assert_eq!(core.get::<Technology>(record.id), Some(&record));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut core = create_test_core();

        let ids: HashSet<Uuid> = (0..200)
            .map(|i| core.add(Category::new(name(&format!("c{i}"))), t0()).id)
            .collect();

        assert_eq!(ids.len(), 200);
        assert_eq!(core.list::<Category>().len(), 200);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut core = create_test_core();

        for n in ["Rust", "Go", "Zig"] {
            core.add(Technology::new(name(n)), t0());
        }

        let names: Vec<&str> = core
            .list::<Technology>()
            .iter()
            .map(|r| r.data.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rust", "Go", "Zig"]);
    }

    #[test]
    fn test_collections_are_disjoint() {
        let mut core = create_test_core();

        let tech = core.add(Technology::new(name("Rust")), t0());
        core.add(Project::new(name("Portfolio")), t0());

        assert_eq!(core.list::<Technology>().len(), 1);
        assert_eq!(core.list::<Project>().len(), 1);
        assert!(core.list::<Category>().is_empty());
        assert!(core.get::<Project>(tech.id).is_none());
    }
}

mod update {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_update_preserves_identity() {
        let mut core = create_test_core();
        let original = core.add(
            Project {
                description: Some("My site".to_string()),
                ..Project::new(name("Portfolio"))
            },
            t0(),
        );
        let later = t0() + TimeDelta::minutes(5);

        let updated = core
            .update::<Project>(
                original.id,
                ProjectPatch {
                    is_featured: Some(true),
                    ..Default::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.updated_at, later);
        assert!(updated.data.is_featured);
        assert_eq!(updated.data.description.as_deref(), Some("My site"));
        assert_eq!(updated.data.name, original.data.name);
        assert_eq!(core.get::<Project>(original.id), Some(&updated));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut core = create_test_core();
        core.add(Technology::new(name("Rust")), t0());
        let before = core.snapshot();

        let result = core.update::<Technology>(
            Uuid::new_v4(),
            TechnologyPatch {
                is_active: Some(false),
                ..Default::default()
            },
            t0(),
        );

        assert!(result.is_none());
        assert_eq!(core.snapshot(), before);
    }

    #[test]
    fn test_update_wrong_kind_is_noop() {
        let mut core = create_test_core();
        let tech = core.add(Technology::new(name("Rust")), t0());

        let result = core.update::<Category>(tech.id, CategoryPatch::default(), t0());

        assert!(result.is_none());
    }

    #[test]
    fn test_update_never_moves_updated_at_backwards() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        let later = t0() + TimeDelta::minutes(5);
        core.update::<Technology>(record.id, TechnologyPatch::default(), later);

        let updated = core
            .update::<Technology>(
                record.id,
                TechnologyPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
                t0() + TimeDelta::minutes(1),
            )
            .unwrap();

        assert_eq!(updated.updated_at, later);
        assert!(!updated.data.is_active);
    }

    #[test]
    fn test_update_never_moves_updated_at_before_created_at() {
        let mut core = create_test_core();
        let record = core.add(Category::new(name("Web")), t0());

        let updated = core
            .update::<Category>(record.id, CategoryPatch::default(), t0() - TimeDelta::hours(1))
            .unwrap();

        assert_eq!(updated.updated_at, record.created_at);
    }
}

mod sync_state {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_mark_synced_then_update_is_pending_again() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());

        assert!(core.mark_synced::<Technology>(record.id));
        assert!(core.pending::<Technology>().is_empty());

        core.update::<Technology>(record.id, TechnologyPatch::default(), t0());

        assert_eq!(core.pending::<Technology>().len(), 1);
    }

    #[test]
    fn test_mark_synced_unknown_id() {
        let mut core = create_test_core();

        assert!(!core.mark_synced::<Project>(Uuid::new_v4()));
    }
}

mod remove {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_remove_moves_snapshot_to_trash() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("React")), t0());

        let item = core.remove::<Technology>(record.id, t0()).unwrap();

        assert!(core.get::<Technology>(record.id).is_none());
        assert!(core.list::<Technology>().is_empty());
        assert_eq!(core.list_trash().len(), 1);
        assert_eq!(item.kind(), EntityKind::Technology);
        assert_eq!(item.entity(), &TrashedEntity::Technology(record));
        assert_eq!(item.deleted_at(), t0());
        assert_eq!(item.expires_at(), t0() + TimeDelta::days(7));
    }

    #[test]
    fn test_remove_keeps_last_known_data() {
        let mut core = create_test_core();
        let record = core.add(Category::new(name("Web")), t0());
        let updated = core
            .update::<Category>(
                record.id,
                CategoryPatch {
                    description: Some(Some("Frontend work".to_string())),
                    ..Default::default()
                },
                t0() + TimeDelta::seconds(1),
            )
            .unwrap();

        let item = core.remove::<Category>(record.id, t0()).unwrap();

        assert_eq!(item.entity(), &TrashedEntity::Category(updated));
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut core = create_test_core();

        assert!(core.remove::<Project>(Uuid::new_v4(), t0()).is_none());
        assert!(core.list_trash().is_empty());
    }

    #[test]
    fn test_remove_twice() {
        let mut core = create_test_core();
        let record = core.add(Project::new(name("Portfolio")), t0());

        assert!(core.remove::<Project>(record.id, t0()).is_some());
        assert!(core.remove::<Project>(record.id, t0()).is_none());
        assert_eq!(core.list_trash().len(), 1);
    }
}

mod restore {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_restore_round_trip() {
        let mut core = create_test_core();
        let record = core.add(
            Project {
                is_active: true,
                ..Project::new(name("Portfolio"))
            },
            t0(),
        );
        let trash_id = core.remove::<Project>(record.id, t0()).unwrap().id();
        assert!(core.list::<Project>().is_empty());
        assert_eq!(core.list_trash().len(), 1);

        let later = t0() + TimeDelta::hours(2);
        let outcome = core.restore(trash_id, later).unwrap();

        assert_eq!(
            outcome,
            RestoreOutcome {
                kind: EntityKind::Project,
                entity_id: record.id,
            }
        );
        let projects = core.list::<Project>();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, record.id);
        assert_eq!(projects[0].data, record.data);
        assert_eq!(projects[0].created_at, record.created_at);
        assert_eq!(projects[0].updated_at, later);
        assert!(core.list_trash().is_empty());
    }

    #[test]
    fn test_restore_unknown_id_is_noop() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        core.remove::<Technology>(record.id, t0());

        assert!(core.restore(Uuid::new_v4(), t0()).is_none());
        assert_eq!(core.list_trash().len(), 1);
    }

    #[test]
    fn test_restore_twice() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        let trash_id = core.remove::<Technology>(record.id, t0()).unwrap().id();

        assert!(core.restore(trash_id, t0()).is_some());
        assert!(core.restore(trash_id, t0()).is_none());
        assert_eq!(core.list::<Technology>().len(), 1);
    }

    #[test]
    fn test_restore_refused_when_id_is_live() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        let snapshot_with_live = core.snapshot();
        core.remove::<Technology>(record.id, t0());

        // Seed a store where the entity is both live and trashed.
        let mut seed = core.snapshot();
        seed.collections = snapshot_with_live.collections;
        let mut core = FolioCore::with_seed(
            Persistence::new(MemorySlots::new(), "seeded"),
            RetentionConfig::default(),
            seed,
        );
        let trash_id = core.list_trash()[0].id();

        assert!(core.restore(trash_id, t0()).is_none());
        assert_eq!(core.list::<Technology>().len(), 1);
        assert_eq!(core.list_trash().len(), 1);
    }

    #[test]
    fn test_restore_keeps_updated_at_monotonic() {
        let mut core = create_test_core();
        let record = core.add(Category::new(name("Web")), t0());
        let edited = t0() + TimeDelta::hours(3);
        core.update::<Category>(record.id, CategoryPatch::default(), edited);
        let trash_id = core.remove::<Category>(record.id, edited).unwrap().id();

        core.restore(trash_id, t0() + TimeDelta::hours(1)).unwrap();

        assert_eq!(core.get::<Category>(record.id).unwrap().updated_at, edited);
    }

    #[test]
    fn test_restore_after_expiry_before_cleanup() {
        let mut core = create_test_core();
        let record = core.add(Category::new(name("Web")), t0());
        let trash_id = core.remove::<Category>(record.id, t0()).unwrap().id();

        let outcome = core.restore(trash_id, t0() + TimeDelta::days(8));

        assert!(outcome.is_some());
        assert_eq!(core.list::<Category>().len(), 1);
    }
}

mod permanently_delete {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_permanently_delete() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        let trash_id = core.remove::<Technology>(record.id, t0()).unwrap().id();

        assert!(core.permanently_delete(trash_id));

        assert!(core.list_trash().is_empty());
        assert!(core.list::<Technology>().is_empty());
        assert!(core.restore(trash_id, t0()).is_none());
    }

    #[test]
    fn test_permanently_delete_after_cleanup_is_noop() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("Rust")), t0());
        let trash_id = core.remove::<Technology>(record.id, t0()).unwrap().id();

        core.cleanup_expired(t0() + TimeDelta::days(8));

        assert!(!core.permanently_delete(trash_id));
    }

    #[test]
    fn test_empty_trash() {
        let mut core = create_test_core();
        for n in ["a", "b"] {
            let record = core.add(Category::new(name(n)), t0());
            core.remove::<Category>(record.id, t0());
        }

        assert_eq!(core.empty_trash().len(), 2);
        assert!(core.list_trash().is_empty());
        assert!(core.empty_trash().is_empty());
    }
}

mod expiry {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_delete_then_expire_scenario() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("React")), t0());
        let trash_id = core.remove::<Technology>(record.id, t0()).unwrap().id();

        assert_eq!(
            core.time_until_expiry(trash_id, t0()),
            Some(TimeDelta::days(7))
        );

        let after = t0() + TimeDelta::days(7) + TimeDelta::seconds(1);
        let outcome = core.cleanup_expired(after);

        assert_eq!(outcome.purged.len(), 1);
        assert_eq!(outcome.purged[0].id(), trash_id);
        assert!(core.list_trash().is_empty());
        assert_eq!(core.time_until_expiry(trash_id, after), None);
    }

    #[test]
    fn test_cleanup_boundary_and_idempotence() {
        let mut core = create_test_core();
        let record = core.add(Technology::new(name("React")), t0());
        core.remove::<Technology>(record.id, t0());
        let expiry = t0() + TimeDelta::days(7);

        assert!(
            core.cleanup_expired(expiry - TimeDelta::nanoseconds(1))
                .purged
                .is_empty()
        );
        assert_eq!(core.cleanup_expired(expiry).purged.len(), 1);
        assert!(core.cleanup_expired(expiry).purged.is_empty());
    }

    #[test]
    fn test_cleanup_only_removes_expired() {
        let mut core = create_test_core();
        let old = core.add(Technology::new(name("Old")), t0());
        let new = core.add(Technology::new(name("New")), t0());
        core.remove::<Technology>(old.id, t0());
        let kept = core
            .remove::<Technology>(new.id, t0() + TimeDelta::days(3))
            .unwrap()
            .id();

        core.cleanup_expired(t0() + TimeDelta::days(7));

        assert_eq!(core.list_trash().len(), 1);
        assert_eq!(core.list_trash()[0].id(), kept);
    }

    #[test]
    fn test_is_expiring_soon() {
        let mut core = create_test_core();
        let record = core.add(Project::new(name("Portfolio")), t0());
        let trash_id = core.remove::<Project>(record.id, t0()).unwrap().id();

        assert!(!core.is_expiring_soon(trash_id, t0()));
        assert!(!core.is_expiring_soon(trash_id, t0() + TimeDelta::days(5)));
        assert!(core.is_expiring_soon(trash_id, t0() + TimeDelta::days(6)));
        assert!(core.is_expiring_within(trash_id, TimeDelta::days(3), t0() + TimeDelta::days(4)));
        assert!(!core.is_expiring_soon(Uuid::new_v4(), t0()));
    }

    #[test]
    fn test_custom_retention() {
        let mut core = FolioCore::in_memory(RetentionConfig {
            retention: TimeDelta::hours(1),
            ..RetentionConfig::default()
        });
        let record = core.add(Technology::new(name("Rust")), t0());
        let item = core.remove::<Technology>(record.id, t0()).unwrap();

        assert_eq!(item.expires_at(), t0() + TimeDelta::hours(1));
    }

    #[test]
    fn test_should_run_cleanup() {
        let mut core = create_test_core();
        let hour = Duration::from_secs(3600);

        assert!(core.should_run_cleanup(t0(), hour));

        core.cleanup_expired(t0());

        assert_eq!(core.last_cleanup_at(), Some(t0()));
        assert!(!core.should_run_cleanup(t0() + TimeDelta::minutes(30), hour));
        assert!(core.should_run_cleanup(t0() + TimeDelta::hours(1), hour));
    }
}

mod labels {
    use super::common::{create_test_core, name, t0};
    use super::*;

    #[test]
    fn test_labels_follow_lifecycle() {
        let mut core = create_test_core();
        let rust = core.add(Technology::new(name("Rust")), t0());
        core.add(Project::new(name("Portfolio")), t0());

        let item = core.remove::<Technology>(rust.id, t0()).unwrap();

        let active = core.active_labels();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "Portfolio");

        let trashed = core.trashed_labels();
        assert_eq!(trashed.len(), 1);
        assert_eq!(trashed[0].id, item.id());
        assert_eq!(trashed[0].kind, EntityKind::Technology);
    }
}

mod persistence {
    use super::common::{FlakySlots, create_test_core_on_disk, name, t0};
    use super::*;

    #[test]
    fn test_state_survives_reopen() {
        let (mut core, temp) = create_test_core_on_disk();
        let rust = core.add(Technology::new(name("Rust")), t0());
        let portfolio = core.add(Project::new(name("Portfolio")), t0());
        let trash_id = core.remove::<Project>(portfolio.id, t0()).unwrap().id();
        let before = core.snapshot();
        drop(core);

        let config = Config {
            base_path: temp.path().to_path_buf(),
            namespace: "portfolio-store".to_string(),
            retention: RetentionConfig::default(),
        };
        let mut reopened = FolioCore::open(config).unwrap();

        assert_eq!(reopened.snapshot(), before);
        assert!(reopened.get::<Technology>(rust.id).is_some());
        assert!(reopened.restore(trash_id, t0()).is_some());
    }

    #[test]
    fn test_with_seed_writes_through() {
        let mut seed = Snapshot::default();
        seed.collections
            .categories
            .push(Record::new(Category::new(name("Web")), t0()));

        let core = FolioCore::with_seed(
            Persistence::new(MemorySlots::new(), "seed"),
            RetentionConfig::default(),
            seed.clone(),
        );
        let slots = core.close().unwrap();

        let reloaded = FolioCore::new(Persistence::new(slots, "seed"), RetentionConfig::default());
        assert_eq!(reloaded.snapshot(), seed);
    }

    #[test]
    fn test_with_seed_rejects_duplicate_ids() {
        let mut seed = Snapshot::default();
        let record = Record::new(Technology::new(name("React")), t0());
        seed.collections.technologies.push(record.clone());
        seed.collections.technologies.push(record.clone());

        let mut core = FolioCore::with_seed(
            Persistence::new(MemorySlots::new(), "seed"),
            RetentionConfig::default(),
            seed,
        );

        assert!(core.list::<Technology>().is_empty());
        assert!(core.remove::<Technology>(record.id, t0()).is_none());
    }

    #[test]
    fn test_failed_write_marks_dirty_until_flush() {
        let slots = FlakySlots::default();
        let failing = slots.failing.clone();
        let mut core = FolioCore::new(
            Persistence::new(slots, "flaky"),
            RetentionConfig::default(),
        );

        failing.store(true, Ordering::SeqCst);
        let record = core.add(Technology::new(name("Rust")), t0());

        assert!(core.is_dirty());
        assert!(core.get::<Technology>(record.id).is_some());
        assert!(matches!(core.flush(), Err(FolioError::Persist(_))));

        failing.store(false, Ordering::SeqCst);
        core.flush().unwrap();

        assert!(!core.is_dirty());
        let slots = core.close().unwrap();
        let reloaded = FolioCore::new(Persistence::new(slots, "flaky"), RetentionConfig::default());
        assert_eq!(reloaded.list::<Technology>().len(), 1);
    }
}
