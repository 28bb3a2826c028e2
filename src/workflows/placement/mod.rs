//! Lifecycle and eligibility engine for internship placements.
//!
//! [`engine::PlacementEngine`] is the single choke point through which every
//! mutation of the user, opportunity, application, and withdrawal collections
//! passes. The surrounding modules supply the pieces it composes: identities
//! and roles, the domain state machines, the eligibility policy, identifier
//! allocation, and the persistence boundary.

pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod identity;
pub mod ids;
pub mod repository;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, InternshipLevel, Opportunity, OpportunityDraft,
    OpportunityId, OpportunityStatus, ReviewStatus, WithdrawalRequest, WithdrawalRequestId,
};
pub use eligibility::{EligibilityPolicy, YearLevelPolicy};
pub use engine::{
    ApplicationSnapshot, EngineConfig, OpportunitySnapshot, PlacementEngine, PlacementSummary,
};
pub use error::{ErrorKind, PlacementError};
pub use identity::{
    AccountStatus, CredentialVerifier, Major, PlainTextVerifier, RepresentativeProfile, Role,
    RoleProfile, StaffProfile, StudentProfile, User, UserId,
};
pub use ids::{RandomTokenSource, TokenSource};
pub use repository::{PlacementStore, StoreError};
pub use store::JsonFileStore;
