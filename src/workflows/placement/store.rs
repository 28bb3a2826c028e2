use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Application, Opportunity, WithdrawalRequest};
use super::identity::User;
use super::repository::{PlacementStore, StoreError};

pub const SNAPSHOT_VERSION: u32 = 1;

const USERS_FILE: &str = "users.json";
const OPPORTUNITIES_FILE: &str = "opportunities.json";
const APPLICATIONS_FILE: &str = "applications.json";
const WITHDRAWALS_FILE: &str = "withdrawals.json";

/// Versioned envelope around a persisted collection, so the on-disk format
/// stays introspectable and future schema changes can be detected instead of
/// silently misread.
#[derive(Debug, Deserialize)]
struct Snapshot<T> {
    version: u32,
    records: Vec<T>,
}

#[derive(Debug, Serialize)]
struct SnapshotRef<'a, T> {
    version: u32,
    records: &'a [T],
}

/// Flat-file store: one pretty-printed JSON snapshot per collection under a
/// data directory. Writes land in a temp file first and are renamed into
/// place, so a crash mid-write never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: display(&path),
            source,
        })?;
        let snapshot: Snapshot<T> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: display(&path),
                source,
            })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: display(&path),
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        debug!(path = %path.display(), count = snapshot.records.len(), "snapshot loaded");
        Ok(snapshot.records)
    }

    fn save<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: display(&self.dir),
            source,
        })?;

        let path = self.dir.join(name);
        let json = serde_json::to_vec_pretty(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            records,
        })
        .map_err(|source| StoreError::Encode {
            path: display(&path),
            source,
        })?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, &json).map_err(|source| StoreError::Io {
            path: display(&staging),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io {
            path: display(&path),
            source,
        })?;

        debug!(path = %path.display(), count = records.len(), "snapshot written");
        Ok(())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl PlacementStore for JsonFileStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.load(USERS_FILE)
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.save(USERS_FILE, users)
    }

    fn load_opportunities(&self) -> Result<Vec<Opportunity>, StoreError> {
        self.load(OPPORTUNITIES_FILE)
    }

    fn save_opportunities(&self, opportunities: &[Opportunity]) -> Result<(), StoreError> {
        self.save(OPPORTUNITIES_FILE, opportunities)
    }

    fn load_applications(&self) -> Result<Vec<Application>, StoreError> {
        self.load(APPLICATIONS_FILE)
    }

    fn save_applications(&self, applications: &[Application]) -> Result<(), StoreError> {
        self.save(APPLICATIONS_FILE, applications)
    }

    fn load_withdrawals(&self) -> Result<Vec<WithdrawalRequest>, StoreError> {
        self.load(WITHDRAWALS_FILE)
    }

    fn save_withdrawals(&self, requests: &[WithdrawalRequest]) -> Result<(), StoreError> {
        self.save(WITHDRAWALS_FILE, requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::placement::domain::{OpportunityDraft, OpportunityId};
    use crate::workflows::placement::identity::{
        Major, RoleProfile, StudentProfile, UserId,
    };
    use chrono::NaiveDate;

    fn sample_users() -> Vec<User> {
        vec![User::new(
            "S100",
            "Avery Lin",
            "pw",
            RoleProfile::Student(StudentProfile::new(2, Major::Design).expect("valid year")),
        )]
    }

    fn sample_opportunity() -> Opportunity {
        Opportunity::from_draft(
            OpportunityId("ITP-9X2K1Q".to_string()),
            UserId::new("r200"),
            OpportunityDraft {
                title: "Design Intern".to_string(),
                description: "Summer studio placement".to_string(),
                preferred_major: Major::Design,
                level: crate::workflows::placement::domain::InternshipLevel::Basic,
                open_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
                close_date: NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date"),
                slots: 3,
            },
        )
    }

    #[test]
    fn loads_are_empty_when_no_snapshot_exists() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path());

        assert!(store.load_users().expect("empty load").is_empty());
        assert!(store.load_opportunities().expect("empty load").is_empty());
        assert!(store.load_applications().expect("empty load").is_empty());
        assert!(store.load_withdrawals().expect("empty load").is_empty());
    }

    #[test]
    fn snapshots_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path());

        store.save_users(&sample_users()).expect("save users");
        store
            .save_opportunities(&[sample_opportunity()])
            .expect("save opportunities");

        assert_eq!(store.load_users().expect("load users"), sample_users());
        assert_eq!(
            store.load_opportunities().expect("load opportunities"),
            vec![sample_opportunity()]
        );
    }

    #[test]
    fn canonical_user_ids_survive_reload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(dir.path());

        store.save_users(&sample_users()).expect("save users");
        let users = store.load_users().expect("load users");
        assert_eq!(users[0].id, UserId::new(" s100 "));
    }

    #[test]
    fn unknown_snapshot_versions_are_refused() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(USERS_FILE);
        fs::write(&path, r#"{"version": 99, "records": []}"#).expect("write snapshot");

        let store = JsonFileStore::new(dir.path());
        match store.load_users() {
            Err(StoreError::UnsupportedVersion { found: 99, .. }) => {}
            other => panic!("expected unsupported version, got {other:?}"),
        }
    }

    #[test]
    fn malformed_snapshots_are_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(OPPORTUNITIES_FILE);
        fs::write(&path, "not json").expect("write snapshot");

        let store = JsonFileStore::new(dir.path());
        match store.load_opportunities() {
            Err(StoreError::Malformed { .. }) => {}
            other => panic!("expected malformed error, got {other:?}"),
        }
    }
}
