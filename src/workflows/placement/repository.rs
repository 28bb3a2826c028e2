use super::domain::{Application, Opportunity, WithdrawalRequest};
use super::identity::User;

/// Storage boundary for the placement collections. Loads return an empty
/// collection when no durable copy exists; saves report failure upward, never
/// swallow it. The engine persists after successful mutations only.
pub trait PlacementStore: Send + Sync {
    fn load_users(&self) -> Result<Vec<User>, StoreError>;
    fn save_users(&self, users: &[User]) -> Result<(), StoreError>;

    fn load_opportunities(&self) -> Result<Vec<Opportunity>, StoreError>;
    fn save_opportunities(&self, opportunities: &[Opportunity]) -> Result<(), StoreError>;

    fn load_applications(&self) -> Result<Vec<Application>, StoreError>;
    fn save_applications(&self, applications: &[Application]) -> Result<(), StoreError>;

    fn load_withdrawals(&self) -> Result<Vec<WithdrawalRequest>, StoreError>;
    fn save_withdrawals(&self, requests: &[WithdrawalRequest]) -> Result<(), StoreError>;
}

/// Error enumeration for snapshot failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {path} is not readable as JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode snapshot {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot {path} uses schema version {found}; this build reads version {supported}")]
    UnsupportedVersion {
        path: String,
        found: u32,
        supported: u32,
    },
}
