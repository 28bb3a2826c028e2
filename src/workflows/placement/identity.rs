use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical user identifier. Lookup and equality ignore case and surrounding
/// whitespace, so `" U123 "` and `"u123"` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Snapshots written by earlier tooling may carry uncanonicalized ids, so
// canonicalize again on the way in.
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

/// The three roles in the closed placement workforce. The engine branches on
/// this tag only, never on runtime type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Representative,
    Staff,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Representative => "company representative",
            Self::Staff => "career-center staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vetting state of a company representative account. Only approved accounts
/// may sign in; the gate sits at the authentication boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared majors recognized by the placement office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Major {
    ComputerScience,
    Business,
    Engineering,
    Design,
    Science,
}

impl Major {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Business => "Business",
            Self::Engineering => "Engineering",
            Self::Design => "Design",
            Self::Science => "Science",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let folded: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match folded.as_str() {
            "computerscience" | "cs" => Some(Self::ComputerScience),
            "business" => Some(Self::Business),
            "engineering" => Some(Self::Engineering),
            "design" => Some(Self::Design),
            "science" => Some(Self::Science),
            _ => None,
        }
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const MIN_YEAR_OF_STUDY: u8 = 1;
pub const MAX_YEAR_OF_STUDY: u8 = 4;

/// Student-specific account data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub year_of_study: u8,
    pub major: Major,
}

impl StudentProfile {
    pub fn new(year_of_study: u8, major: Major) -> Result<Self, IdentityError> {
        if !(MIN_YEAR_OF_STUDY..=MAX_YEAR_OF_STUDY).contains(&year_of_study) {
            return Err(IdentityError::YearOutOfRange(year_of_study));
        }
        Ok(Self {
            year_of_study,
            major,
        })
    }
}

/// Company representative account data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeProfile {
    pub company: String,
    pub department: String,
    pub position: String,
    pub account_status: AccountStatus,
}

/// Career-center staff account data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub department: String,
}

/// Role-specific half of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Student(StudentProfile),
    Representative(RepresentativeProfile),
    Staff(StaffProfile),
}

/// A member of the placement workforce. Created at load time; only the display
/// name and credential change during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub credential: String,
    pub profile: RoleProfile,
}

impl User {
    pub fn new(id: &str, display_name: &str, credential: &str, profile: RoleProfile) -> Self {
        Self {
            id: UserId::new(id),
            display_name: display_name.to_string(),
            credential: credential.to_string(),
            profile,
        }
    }

    pub const fn role(&self) -> Role {
        match self.profile {
            RoleProfile::Student(_) => Role::Student,
            RoleProfile::Representative(_) => Role::Representative,
            RoleProfile::Staff(_) => Role::Staff,
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.profile {
            RoleProfile::Student(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_representative(&self) -> Option<&RepresentativeProfile> {
        match &self.profile {
            RoleProfile::Representative(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_staff(&self) -> Option<&StaffProfile> {
        match &self.profile {
            RoleProfile::Staff(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Credential comparison seam. The engine never inspects raw credentials
/// itself; swapping the verifier swaps the storage scheme.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, user: &User, raw: &str) -> bool;
    fn change_credential(&self, user: &mut User, old: &str, new: &str)
        -> Result<(), IdentityError>;
}

/// Plain string comparison, matching the seeded rosters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn verify(&self, user: &User, raw: &str) -> bool {
        user.credential == raw
    }

    fn change_credential(
        &self,
        user: &mut User,
        old: &str,
        new: &str,
    ) -> Result<(), IdentityError> {
        if !self.verify(user, old) {
            return Err(IdentityError::CredentialMismatch);
        }
        if new.trim().is_empty() {
            return Err(IdentityError::BlankCredential);
        }
        user.credential = new.to_string();
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("current credential does not match")]
    CredentialMismatch,
    #[error("replacement credential must not be blank")]
    BlankCredential,
    #[error("year of study must be between 1 and 4, got {0}")]
    YearOutOfRange(u8),
}
