use std::io;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::placement::domain::{
    Application, InternshipLevel, Opportunity, OpportunityDraft, OpportunityId, WithdrawalRequest,
};
use crate::workflows::placement::eligibility::YearLevelPolicy;
use crate::workflows::placement::engine::{EngineConfig, PlacementEngine};
use crate::workflows::placement::identity::{
    AccountStatus, Major, PlainTextVerifier, RepresentativeProfile, RoleProfile, StaffProfile,
    StudentProfile, User, UserId,
};
use crate::workflows::placement::ids::TokenSource;
use crate::workflows::placement::repository::{PlacementStore, StoreError};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn student(id: &str, year: u8, major: Major) -> User {
    User::new(
        id,
        &format!("Student {id}"),
        "pw",
        RoleProfile::Student(StudentProfile::new(year, major).expect("valid year")),
    )
}

pub(super) fn representative(id: &str, status: AccountStatus) -> User {
    User::new(
        id,
        &format!("Rep {id}"),
        "pw",
        RoleProfile::Representative(RepresentativeProfile {
            company: "Northwind Robotics".to_string(),
            department: "Talent".to_string(),
            position: "Recruiter".to_string(),
            account_status: status,
        }),
    )
}

pub(super) fn staff(id: &str) -> User {
    User::new(
        id,
        &format!("Staff {id}"),
        "pw",
        RoleProfile::Staff(StaffProfile {
            department: "Career Center".to_string(),
        }),
    )
}

pub(super) fn roster() -> Vec<User> {
    vec![
        student("amy", 1, Major::ComputerScience),
        student("ben", 3, Major::ComputerScience),
        student("cara", 4, Major::ComputerScience),
        student("dev", 3, Major::Business),
        representative("rhea", AccountStatus::Approved),
        representative("omar", AccountStatus::Approved),
        representative("paul", AccountStatus::Pending),
        staff("sana"),
    ]
}

pub(super) fn draft() -> OpportunityDraft {
    OpportunityDraft {
        title: "Platform Engineering Intern".to_string(),
        description: "Build internal tooling with the platform team.".to_string(),
        preferred_major: Major::ComputerScience,
        level: InternshipLevel::Basic,
        open_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        close_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
        slots: 1,
    }
}

pub(super) fn uid(raw: &str) -> UserId {
    UserId::new(raw)
}

/// In-memory store double; saves overwrite, loads clone.
#[derive(Default)]
pub(super) struct MemoryStore {
    users: Mutex<Vec<User>>,
    opportunities: Mutex<Vec<Opportunity>>,
    applications: Mutex<Vec<Application>>,
    withdrawals: Mutex<Vec<WithdrawalRequest>>,
}

impl MemoryStore {
    pub(super) fn with_users(users: Vec<User>) -> Self {
        let store = Self::default();
        *store.users.lock().expect("store mutex poisoned") = users;
        store
    }

    pub(super) fn saved_opportunities(&self) -> Vec<Opportunity> {
        self.opportunities
            .lock()
            .expect("store mutex poisoned")
            .clone()
    }

    pub(super) fn saved_applications(&self) -> Vec<Application> {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .clone()
    }
}

impl PlacementStore for MemoryStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().expect("store mutex poisoned").clone())
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        *self.users.lock().expect("store mutex poisoned") = users.to_vec();
        Ok(())
    }

    fn load_opportunities(&self) -> Result<Vec<Opportunity>, StoreError> {
        Ok(self
            .opportunities
            .lock()
            .expect("store mutex poisoned")
            .clone())
    }

    fn save_opportunities(&self, opportunities: &[Opportunity]) -> Result<(), StoreError> {
        *self.opportunities.lock().expect("store mutex poisoned") = opportunities.to_vec();
        Ok(())
    }

    fn load_applications(&self) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .lock()
            .expect("store mutex poisoned")
            .clone())
    }

    fn save_applications(&self, applications: &[Application]) -> Result<(), StoreError> {
        *self.applications.lock().expect("store mutex poisoned") = applications.to_vec();
        Ok(())
    }

    fn load_withdrawals(&self) -> Result<Vec<WithdrawalRequest>, StoreError> {
        Ok(self
            .withdrawals
            .lock()
            .expect("store mutex poisoned")
            .clone())
    }

    fn save_withdrawals(&self, requests: &[WithdrawalRequest]) -> Result<(), StoreError> {
        *self.withdrawals.lock().expect("store mutex poisoned") = requests.to_vec();
        Ok(())
    }
}

/// Loads succeed empty; every save reports an offline store.
pub(super) struct OfflineStore {
    users: Vec<User>,
}

impl OfflineStore {
    pub(super) fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }
}

fn offline(path: &str) -> StoreError {
    StoreError::Io {
        path: path.to_string(),
        source: io::Error::new(io::ErrorKind::Other, "store offline"),
    }
}

impl PlacementStore for OfflineStore {
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.clone())
    }

    fn save_users(&self, _users: &[User]) -> Result<(), StoreError> {
        Err(offline("users.json"))
    }

    fn load_opportunities(&self) -> Result<Vec<Opportunity>, StoreError> {
        Ok(Vec::new())
    }

    fn save_opportunities(&self, _opportunities: &[Opportunity]) -> Result<(), StoreError> {
        Err(offline("opportunities.json"))
    }

    fn load_applications(&self) -> Result<Vec<Application>, StoreError> {
        Ok(Vec::new())
    }

    fn save_applications(&self, _applications: &[Application]) -> Result<(), StoreError> {
        Err(offline("applications.json"))
    }

    fn load_withdrawals(&self) -> Result<Vec<WithdrawalRequest>, StoreError> {
        Ok(Vec::new())
    }

    fn save_withdrawals(&self, _requests: &[WithdrawalRequest]) -> Result<(), StoreError> {
        Err(offline("withdrawals.json"))
    }
}

/// Deterministic token sequence so allocated ids are predictable in tests.
#[derive(Default)]
pub(super) struct SequentialTokens {
    counter: Mutex<u32>,
}

impl TokenSource for SequentialTokens {
    fn token(&self, _len: usize) -> String {
        let mut counter = self.counter.lock().expect("token mutex poisoned");
        *counter += 1;
        format!("{:06}", *counter)
    }
}

pub(super) fn engine() -> (PlacementEngine<MemoryStore>, Arc<MemoryStore>) {
    engine_with_users(roster())
}

pub(super) fn engine_with_users(
    users: Vec<User>,
) -> (PlacementEngine<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_users(users));
    let engine = PlacementEngine::with_components(
        store.clone(),
        Arc::new(YearLevelPolicy),
        Arc::new(PlainTextVerifier),
        Arc::new(SequentialTokens::default()),
        EngineConfig::default(),
    )
    .expect("engine loads");
    (engine, store)
}

/// Create a listing as `rep` and approve it as staff `sana`.
pub(super) fn approved_opportunity(
    engine: &PlacementEngine<MemoryStore>,
    rep: &str,
    draft: OpportunityDraft,
) -> OpportunityId {
    let created = engine
        .create_opportunity(&uid(rep), draft)
        .expect("listing created");
    engine
        .approve_opportunity(&uid("sana"), &created.id)
        .expect("listing approved");
    created.id
}
