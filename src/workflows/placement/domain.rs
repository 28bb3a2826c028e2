use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::PlacementError;
use super::identity::{Major, UserId};

/// Identifier wrapper for posted opportunities (`ITP-XXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications (`APP-XXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for withdrawal requests (`WDR-XXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WithdrawalRequestId(pub String);

impl fmt::Display for WithdrawalRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Difficulty tier of a posted internship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternshipLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl InternshipLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for InternshipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Approval/visibility lifecycle of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    Pending,
    Approved,
    Rejected,
    Filled,
}

impl OpportunityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Filled => "filled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "filled" => Some(Self::Filled),
            _ => None,
        }
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision/acceptance lifecycle of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Successful,
    Unsuccessful,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Successful => "successful",
            Self::Unsuccessful => "unsuccessful",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Review state of a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable fields of an opportunity, used both for creation and for edits.
/// An edit replaces every field and always sends the listing back for
/// re-approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityDraft {
    pub title: String,
    pub description: String,
    pub preferred_major: Major,
    pub level: InternshipLevel,
    pub open_date: NaiveDate,
    pub close_date: NaiveDate,
    pub slots: u32,
}

impl OpportunityDraft {
    pub(crate) fn validate(&self) -> Result<(), PlacementError> {
        if self.title.trim().is_empty() {
            return Err(PlacementError::BlankTitle);
        }
        if self.slots == 0 {
            return Err(PlacementError::NonPositiveSlots);
        }
        if self.close_date < self.open_date {
            return Err(PlacementError::ClosesBeforeOpening {
                opens: self.open_date,
                closes: self.close_date,
            });
        }
        Ok(())
    }
}

/// A posted internship listing owned by one company representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub rep_in_charge: UserId,
    pub title: String,
    pub description: String,
    pub preferred_major: Major,
    pub level: InternshipLevel,
    pub open_date: NaiveDate,
    pub close_date: NaiveDate,
    pub slots: u32,
    pub confirmed_slots: u32,
    pub status: OpportunityStatus,
    pub visible: bool,
}

impl Opportunity {
    /// New listings always start pending and invisible with no confirmed
    /// slots, whatever the draft says.
    pub(crate) fn from_draft(id: OpportunityId, rep_in_charge: UserId, draft: OpportunityDraft) -> Self {
        Self {
            id,
            rep_in_charge,
            title: draft.title,
            description: draft.description,
            preferred_major: draft.preferred_major,
            level: draft.level,
            open_date: draft.open_date,
            close_date: draft.close_date,
            slots: draft.slots,
            confirmed_slots: 0,
            status: OpportunityStatus::Pending,
            visible: false,
        }
    }

    pub(crate) fn approve(&mut self) -> Result<(), PlacementError> {
        self.expect_pending()?;
        self.status = OpportunityStatus::Approved;
        self.visible = true;
        Ok(())
    }

    pub(crate) fn reject(&mut self) -> Result<(), PlacementError> {
        self.expect_pending()?;
        self.status = OpportunityStatus::Rejected;
        self.visible = false;
        Ok(())
    }

    /// Apply an owner edit. Every edit revokes prior approval: the listing
    /// drops back to pending and out of sight. Slots may not shrink below the
    /// offers already confirmed; the edit is refused rather than clamped.
    pub(crate) fn apply_edit(&mut self, draft: OpportunityDraft) -> Result<(), PlacementError> {
        draft.validate()?;
        if draft.slots < self.confirmed_slots {
            return Err(PlacementError::SlotsBelowConfirmed {
                confirmed: self.confirmed_slots,
                requested: draft.slots,
            });
        }

        self.title = draft.title;
        self.description = draft.description;
        self.preferred_major = draft.preferred_major;
        self.level = draft.level;
        self.open_date = draft.open_date;
        self.close_date = draft.close_date;
        self.slots = draft.slots;
        self.status = OpportunityStatus::Pending;
        self.visible = false;
        Ok(())
    }

    pub(crate) fn confirm_slot(&mut self) -> Result<(), PlacementError> {
        if !self.has_vacancy() {
            return Err(PlacementError::SlotsExhausted {
                id: self.id.clone(),
                confirmed: self.confirmed_slots,
                slots: self.slots,
            });
        }
        self.confirmed_slots += 1;
        self.recompute_filled_status();
        Ok(())
    }

    pub(crate) fn release_slot(&mut self) {
        self.confirmed_slots = self.confirmed_slots.saturating_sub(1);
        self.recompute_filled_status();
    }

    /// Capacity recomputation, run after every slot mutation: exhausted
    /// capacity forces `Filled` and hides the listing; freed capacity reverts
    /// a filled listing to approved and visible.
    pub(crate) fn recompute_filled_status(&mut self) {
        if self.confirmed_slots >= self.slots {
            self.status = OpportunityStatus::Filled;
            self.visible = false;
        } else if self.status == OpportunityStatus::Filled {
            self.status = OpportunityStatus::Approved;
            self.visible = true;
        }
    }

    pub fn has_vacancy(&self) -> bool {
        self.confirmed_slots < self.slots
    }

    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.open_date <= today && today <= self.close_date
    }

    pub fn deletable(&self) -> bool {
        matches!(
            self.status,
            OpportunityStatus::Pending | OpportunityStatus::Rejected
        )
    }

    fn expect_pending(&self) -> Result<(), PlacementError> {
        if self.status != OpportunityStatus::Pending {
            return Err(PlacementError::OpportunityState {
                id: self.id.clone(),
                status: self.status,
                expected: "pending",
            });
        }
        Ok(())
    }
}

/// One student's bid for one opportunity. Holds relational ids, never owned
/// references; all lookups go through the engine's collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student: UserId,
    pub opportunity: OpportunityId,
    pub status: ApplicationStatus,
    pub accepted: bool,
    pub applied_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Application {
    pub(crate) fn new(
        id: ApplicationId,
        student: UserId,
        opportunity: OpportunityId,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student,
            opportunity,
            status: ApplicationStatus::Pending,
            accepted: false,
            applied_at,
            decided_at: None,
        }
    }

    /// Pending applications count against the per-student cap.
    pub fn is_active(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// One-shot representative decision.
    pub(crate) fn mark_decision(
        &mut self,
        approve: bool,
        at: DateTime<Utc>,
    ) -> Result<(), PlacementError> {
        if self.status != ApplicationStatus::Pending {
            return Err(PlacementError::ApplicationState {
                id: self.id.clone(),
                status: self.status,
                expected: "pending",
            });
        }
        self.status = if approve {
            ApplicationStatus::Successful
        } else {
            ApplicationStatus::Unsuccessful
        };
        self.decided_at = Some(at);
        Ok(())
    }

    /// One-shot student acceptance of a successful offer.
    pub(crate) fn mark_accepted(&mut self) -> Result<(), PlacementError> {
        if self.status != ApplicationStatus::Successful {
            return Err(PlacementError::ApplicationState {
                id: self.id.clone(),
                status: self.status,
                expected: "successful",
            });
        }
        if self.accepted {
            return Err(PlacementError::AlreadyAccepted(self.id.clone()));
        }
        self.accepted = true;
        Ok(())
    }

    /// Terminal withdrawal from any non-terminal state. Returns whether the
    /// application had been accepted, so the caller can release the slot.
    pub(crate) fn mark_withdrawn(&mut self, at: DateTime<Utc>) -> Result<bool, PlacementError> {
        match self.status {
            ApplicationStatus::Pending | ApplicationStatus::Successful => {
                let was_accepted = self.accepted;
                self.status = ApplicationStatus::Withdrawn;
                self.accepted = false;
                self.decided_at = Some(at);
                Ok(was_accepted)
            }
            ApplicationStatus::Unsuccessful | ApplicationStatus::Withdrawn => {
                Err(PlacementError::ApplicationState {
                    id: self.id.clone(),
                    status: self.status,
                    expected: "pending or successful",
                })
            }
        }
    }
}

/// Student-initiated, staff-reviewed request to retract an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: WithdrawalRequestId,
    pub application: ApplicationId,
    pub student: UserId,
    pub requested_at: DateTime<Utc>,
    pub review: ReviewStatus,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl WithdrawalRequest {
    pub(crate) fn new(
        id: WithdrawalRequestId,
        application: ApplicationId,
        student: UserId,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            application,
            student,
            requested_at,
            review: ReviewStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    /// One-shot review out of pending.
    pub(crate) fn mark_review(
        &mut self,
        approve: bool,
        reviewer: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), PlacementError> {
        if self.review != ReviewStatus::Pending {
            return Err(PlacementError::RequestAlreadyReviewed {
                id: self.id.clone(),
                review: self.review,
            });
        }
        self.review = if approve {
            ReviewStatus::Approved
        } else {
            ReviewStatus::Rejected
        };
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(at);
        Ok(())
    }

    /// The only path back to a pending review; clears the reviewer trail.
    pub(crate) fn reset_review(&mut self) {
        self.review = ReviewStatus::Pending;
        self.reviewed_by = None;
        self.reviewed_at = None;
    }
}
