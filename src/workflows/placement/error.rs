use chrono::NaiveDate;

use super::domain::{
    ApplicationId, ApplicationStatus, OpportunityId, OpportunityStatus, ReviewStatus,
    WithdrawalRequestId,
};
use super::identity::{AccountStatus, IdentityError, Role, UserId};
use super::repository::StoreError;

/// Broad classification of a refusal, so calling layers can route on the
/// blocked invariant without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidState,
    Capacity,
    Conflict,
    Validation,
    Store,
}

/// Every refusal the engine can produce. All variants are recoverable and
/// carry a one-line, human-readable reason naming the blocked invariant.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("no user with id {0}")]
    UserNotFound(UserId),
    #[error("no opportunity with id {0}")]
    OpportunityNotFound(OpportunityId),
    #[error("no application with id {0}")]
    ApplicationNotFound(ApplicationId),
    #[error("no withdrawal request with id {0}")]
    WithdrawalRequestNotFound(WithdrawalRequestId),

    #[error("operation requires the {0} role")]
    RoleRequired(Role),
    #[error("opportunity {0} is managed by another representative")]
    NotOpportunityOwner(OpportunityId),
    #[error("application {0} belongs to another student")]
    NotApplicationOwner(ApplicationId),
    #[error("only the applying student or career-center staff may withdraw application {0}")]
    WithdrawalNotAllowed(ApplicationId),
    #[error("credential rejected for user {0}")]
    CredentialRejected(UserId),
    #[error("representative account {id} is {status}; sign-in requires an approved account")]
    AccountNotApproved { id: UserId, status: AccountStatus },
    #[error("opportunity {0} is not open to this student")]
    Ineligible(OpportunityId),

    #[error("opportunity {id} is {status}; expected {expected}")]
    OpportunityState {
        id: OpportunityId,
        status: OpportunityStatus,
        expected: &'static str,
    },
    #[error("application {id} is {status}; expected {expected}")]
    ApplicationState {
        id: ApplicationId,
        status: ApplicationStatus,
        expected: &'static str,
    },
    #[error("application {0} has already been accepted")]
    AlreadyAccepted(ApplicationId),
    #[error("withdrawal request {id} was already reviewed ({review})")]
    RequestAlreadyReviewed {
        id: WithdrawalRequestId,
        review: ReviewStatus,
    },

    #[error("opportunity {id} has no remaining slots ({confirmed}/{slots})")]
    SlotsExhausted {
        id: OpportunityId,
        confirmed: u32,
        slots: u32,
    },
    #[error("student {id} already has {count} pending applications (limit {limit})")]
    PendingApplicationLimit {
        id: UserId,
        count: usize,
        limit: usize,
    },

    #[error("student already has a pending application for opportunity {0}")]
    DuplicateApplication(OpportunityId),
    #[error("student {student} has already accepted offer {existing}")]
    OfferAlreadyAccepted {
        student: UserId,
        existing: ApplicationId,
    },
    #[error("a pending withdrawal request already exists for application {0}")]
    DuplicateWithdrawalRequest(ApplicationId),
    #[error("opportunity {0} still has applications on record")]
    OpportunityInUse(OpportunityId),
    #[error("could not allocate a collision-free identifier")]
    IdSpaceExhausted,

    #[error("opportunity title must not be blank")]
    BlankTitle,
    #[error("opportunity must offer at least one slot")]
    NonPositiveSlots,
    #[error("opportunity closes on {closes}, before it opens on {opens}")]
    ClosesBeforeOpening { opens: NaiveDate, closes: NaiveDate },
    #[error("cannot reduce slots to {requested}: {confirmed} already confirmed")]
    SlotsBelowConfirmed { confirmed: u32, requested: u32 },
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlacementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_)
            | Self::OpportunityNotFound(_)
            | Self::ApplicationNotFound(_)
            | Self::WithdrawalRequestNotFound(_) => ErrorKind::NotFound,

            Self::RoleRequired(_)
            | Self::NotOpportunityOwner(_)
            | Self::NotApplicationOwner(_)
            | Self::WithdrawalNotAllowed(_)
            | Self::CredentialRejected(_)
            | Self::AccountNotApproved { .. }
            | Self::Ineligible(_)
            | Self::Identity(IdentityError::CredentialMismatch) => ErrorKind::Forbidden,

            Self::OpportunityState { .. }
            | Self::ApplicationState { .. }
            | Self::AlreadyAccepted(_)
            | Self::RequestAlreadyReviewed { .. } => ErrorKind::InvalidState,

            Self::SlotsExhausted { .. } | Self::PendingApplicationLimit { .. } => {
                ErrorKind::Capacity
            }

            Self::DuplicateApplication(_)
            | Self::OfferAlreadyAccepted { .. }
            | Self::DuplicateWithdrawalRequest(_)
            | Self::OpportunityInUse(_)
            | Self::IdSpaceExhausted => ErrorKind::Conflict,

            Self::BlankTitle
            | Self::NonPositiveSlots
            | Self::ClosesBeforeOpening { .. }
            | Self::SlotsBelowConfirmed { .. }
            | Self::Identity(_) => ErrorKind::Validation,

            Self::Store(_) => ErrorKind::Store,
        }
    }
}
