use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Opportunity, OpportunityDraft, OpportunityId,
    OpportunityStatus, ReviewStatus, WithdrawalRequest, WithdrawalRequestId,
};
use super::eligibility::EligibilityPolicy;
use super::error::PlacementError;
use super::identity::{
    AccountStatus, CredentialVerifier, PlainTextVerifier, Role, StudentProfile, User, UserId,
};
use super::ids::{
    self, RandomTokenSource, TokenSource, APPLICATION_PREFIX, OPPORTUNITY_PREFIX,
    WITHDRAWAL_PREFIX,
};
use super::repository::PlacementStore;

/// Tunable limits enforced by the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Global cap on a student's simultaneously pending applications.
    pub max_pending_applications: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_pending_applications: 3,
        }
    }
}

/// The authoritative in-memory collections. One shared resource per process;
/// every mutating operation holds the write lock for its whole
/// check-then-mutate sequence.
struct EngineState {
    users: BTreeMap<UserId, User>,
    opportunities: BTreeMap<OpportunityId, Opportunity>,
    applications: BTreeMap<ApplicationId, Application>,
    withdrawals: BTreeMap<WithdrawalRequestId, WithdrawalRequest>,
}

impl EngineState {
    fn user(&self, id: &UserId) -> Result<&User, PlacementError> {
        self.users
            .get(id)
            .ok_or_else(|| PlacementError::UserNotFound(id.clone()))
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, PlacementError> {
        self.users
            .get_mut(id)
            .ok_or_else(|| PlacementError::UserNotFound(id.clone()))
    }

    fn require_role(&self, id: &UserId, required: Role) -> Result<&User, PlacementError> {
        let user = self.user(id)?;
        if user.role() != required {
            return Err(PlacementError::RoleRequired(required));
        }
        Ok(user)
    }

    fn student_profile(&self, id: &UserId) -> Result<StudentProfile, PlacementError> {
        self.user(id)?
            .as_student()
            .copied()
            .ok_or(PlacementError::RoleRequired(Role::Student))
    }

    fn opportunity(&self, id: &OpportunityId) -> Result<&Opportunity, PlacementError> {
        self.opportunities
            .get(id)
            .ok_or_else(|| PlacementError::OpportunityNotFound(id.clone()))
    }

    fn opportunity_mut(&mut self, id: &OpportunityId) -> Result<&mut Opportunity, PlacementError> {
        self.opportunities
            .get_mut(id)
            .ok_or_else(|| PlacementError::OpportunityNotFound(id.clone()))
    }

    fn application(&self, id: &ApplicationId) -> Result<&Application, PlacementError> {
        self.applications
            .get(id)
            .ok_or_else(|| PlacementError::ApplicationNotFound(id.clone()))
    }

    fn application_mut(&mut self, id: &ApplicationId) -> Result<&mut Application, PlacementError> {
        self.applications
            .get_mut(id)
            .ok_or_else(|| PlacementError::ApplicationNotFound(id.clone()))
    }

    fn withdrawal(&self, id: &WithdrawalRequestId) -> Result<&WithdrawalRequest, PlacementError> {
        self.withdrawals
            .get(id)
            .ok_or_else(|| PlacementError::WithdrawalRequestNotFound(id.clone()))
    }

    fn withdrawal_mut(
        &mut self,
        id: &WithdrawalRequestId,
    ) -> Result<&mut WithdrawalRequest, PlacementError> {
        self.withdrawals
            .get_mut(id)
            .ok_or_else(|| PlacementError::WithdrawalRequestNotFound(id.clone()))
    }
}

/// Discoverability gate: every condition a listing must pass before a given
/// student may apply today. Pure; consults the policy fresh on each call.
fn open_for(
    policy: &dyn EligibilityPolicy,
    opportunity: &Opportunity,
    student: &StudentProfile,
    today: NaiveDate,
) -> bool {
    opportunity.visible
        && opportunity.status == OpportunityStatus::Approved
        && opportunity.is_open_on(today)
        && opportunity.has_vacancy()
        && policy.can_apply(student, opportunity)
}

/// Single choke point for every mutation of the placement collections.
/// Resolves the acting identity's role, verifies ownership, sequences the two
/// state machines so capacity changes always trigger recomputation, and
/// persists after each successful mutation.
pub struct PlacementEngine<S: PlacementStore> {
    state: RwLock<EngineState>,
    store: Arc<S>,
    policy: Arc<dyn EligibilityPolicy>,
    verifier: Arc<dyn CredentialVerifier>,
    tokens: Arc<dyn TokenSource>,
    config: EngineConfig,
}

impl<S: PlacementStore> PlacementEngine<S> {
    pub fn new(store: Arc<S>, policy: Arc<dyn EligibilityPolicy>) -> Result<Self, PlacementError> {
        Self::with_components(
            store,
            policy,
            Arc::new(PlainTextVerifier),
            Arc::new(RandomTokenSource),
            EngineConfig::default(),
        )
    }

    pub fn with_components(
        store: Arc<S>,
        policy: Arc<dyn EligibilityPolicy>,
        verifier: Arc<dyn CredentialVerifier>,
        tokens: Arc<dyn TokenSource>,
        config: EngineConfig,
    ) -> Result<Self, PlacementError> {
        let users = store
            .load_users()?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        let opportunities = store
            .load_opportunities()?
            .into_iter()
            .map(|opportunity| (opportunity.id.clone(), opportunity))
            .collect();
        let applications = store
            .load_applications()?
            .into_iter()
            .map(|application| (application.id.clone(), application))
            .collect();
        let withdrawals = store
            .load_withdrawals()?
            .into_iter()
            .map(|request| (request.id.clone(), request))
            .collect();

        Ok(Self {
            state: RwLock::new(EngineState {
                users,
                opportunities,
                applications,
                withdrawals,
            }),
            store,
            policy,
            verifier,
            tokens,
            config,
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_users(&self, state: &EngineState) -> Result<(), PlacementError> {
        let users: Vec<User> = state.users.values().cloned().collect();
        Ok(self.store.save_users(&users)?)
    }

    fn persist_opportunities(&self, state: &EngineState) -> Result<(), PlacementError> {
        let opportunities: Vec<Opportunity> = state.opportunities.values().cloned().collect();
        Ok(self.store.save_opportunities(&opportunities)?)
    }

    fn persist_applications(&self, state: &EngineState) -> Result<(), PlacementError> {
        let applications: Vec<Application> = state.applications.values().cloned().collect();
        Ok(self.store.save_applications(&applications)?)
    }

    fn persist_withdrawals(&self, state: &EngineState) -> Result<(), PlacementError> {
        let requests: Vec<WithdrawalRequest> = state.withdrawals.values().cloned().collect();
        Ok(self.store.save_withdrawals(&requests)?)
    }

    // ---- session boundary ----

    /// Resolve raw credentials to a role. Non-approved representative
    /// accounts are refused here, before any lifecycle operation is
    /// reachable.
    pub fn login(&self, user_id: &UserId, raw_credential: &str) -> Result<Role, PlacementError> {
        let state = self.read_state();
        let user = state.user(user_id)?;
        if !self.verifier.verify(user, raw_credential) {
            return Err(PlacementError::CredentialRejected(user_id.clone()));
        }
        if let Some(profile) = user.as_representative() {
            if profile.account_status != AccountStatus::Approved {
                return Err(PlacementError::AccountNotApproved {
                    id: user_id.clone(),
                    status: profile.account_status,
                });
            }
        }
        Ok(user.role())
    }

    pub fn change_credential(
        &self,
        user_id: &UserId,
        old: &str,
        new: &str,
    ) -> Result<(), PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        let user = state.user_mut(user_id)?;
        self.verifier.change_credential(user, old, new)?;

        info!(user = %user_id, "credential changed");
        self.persist_users(state)?;
        Ok(())
    }

    // ---- opportunity lifecycle ----

    pub fn create_opportunity(
        &self,
        rep: &UserId,
        draft: OpportunityDraft,
    ) -> Result<Opportunity, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(rep, Role::Representative)?;
        draft.validate()?;

        let id = ids::allocate(OPPORTUNITY_PREFIX, self.tokens.as_ref(), |candidate| {
            state.opportunities.keys().any(|key| key.0 == candidate)
        })?;
        let opportunity = Opportunity::from_draft(OpportunityId(id), rep.clone(), draft);
        state
            .opportunities
            .insert(opportunity.id.clone(), opportunity.clone());

        info!(opportunity = %opportunity.id, rep = %rep, "listing created");
        self.persist_opportunities(state)?;
        Ok(opportunity)
    }

    /// Owner edit. Always sends the listing back to pending/invisible, so
    /// every edit requires fresh staff approval.
    pub fn edit_opportunity(
        &self,
        rep: &UserId,
        id: &OpportunityId,
        draft: OpportunityDraft,
    ) -> Result<Opportunity, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(rep, Role::Representative)?;
        let opportunity = state.opportunity_mut(id)?;
        if opportunity.rep_in_charge != *rep {
            return Err(PlacementError::NotOpportunityOwner(id.clone()));
        }
        opportunity.apply_edit(draft)?;
        let result = opportunity.clone();

        info!(opportunity = %id, "listing edited, approval revoked");
        self.persist_opportunities(state)?;
        Ok(result)
    }

    pub fn delete_opportunity(&self, rep: &UserId, id: &OpportunityId) -> Result<(), PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(rep, Role::Representative)?;
        let opportunity = state.opportunity(id)?;
        if opportunity.rep_in_charge != *rep {
            return Err(PlacementError::NotOpportunityOwner(id.clone()));
        }
        if !opportunity.deletable() {
            return Err(PlacementError::OpportunityState {
                id: id.clone(),
                status: opportunity.status,
                expected: "pending or rejected",
            });
        }
        if state
            .applications
            .values()
            .any(|application| application.opportunity == *id)
        {
            return Err(PlacementError::OpportunityInUse(id.clone()));
        }

        state.opportunities.remove(id);
        info!(opportunity = %id, "listing deleted");
        self.persist_opportunities(state)?;
        Ok(())
    }

    pub fn approve_opportunity(
        &self,
        staff: &UserId,
        id: &OpportunityId,
    ) -> Result<Opportunity, PlacementError> {
        self.review_opportunity(staff, id, true)
    }

    pub fn reject_opportunity(
        &self,
        staff: &UserId,
        id: &OpportunityId,
    ) -> Result<Opportunity, PlacementError> {
        self.review_opportunity(staff, id, false)
    }

    fn review_opportunity(
        &self,
        staff: &UserId,
        id: &OpportunityId,
        approve: bool,
    ) -> Result<Opportunity, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(staff, Role::Staff)?;
        let opportunity = state.opportunity_mut(id)?;
        if approve {
            opportunity.approve()?;
        } else {
            opportunity.reject()?;
        }
        let result = opportunity.clone();

        info!(opportunity = %id, approved = approve, "listing reviewed");
        self.persist_opportunities(state)?;
        Ok(result)
    }

    // ---- application lifecycle ----

    /// Submit an application. The opportunity must be discoverable for this
    /// student today, the student must be under the pending cap, and no
    /// second active application for the same listing may exist.
    pub fn apply(
        &self,
        student: &UserId,
        opportunity_id: &OpportunityId,
        today: NaiveDate,
    ) -> Result<Application, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        let profile = state.student_profile(student)?;
        let opportunity = state.opportunity(opportunity_id)?;
        if !open_for(self.policy.as_ref(), opportunity, &profile, today) {
            return Err(PlacementError::Ineligible(opportunity_id.clone()));
        }

        let pending = state
            .applications
            .values()
            .filter(|application| application.student == *student && application.is_active())
            .count();
        if pending >= self.config.max_pending_applications {
            return Err(PlacementError::PendingApplicationLimit {
                id: student.clone(),
                count: pending,
                limit: self.config.max_pending_applications,
            });
        }
        if state.applications.values().any(|application| {
            application.student == *student
                && application.opportunity == *opportunity_id
                && application.is_active()
        }) {
            return Err(PlacementError::DuplicateApplication(opportunity_id.clone()));
        }

        let id = ids::allocate(APPLICATION_PREFIX, self.tokens.as_ref(), |candidate| {
            state.applications.keys().any(|key| key.0 == candidate)
        })?;
        let application = Application::new(
            ApplicationId(id),
            student.clone(),
            opportunity_id.clone(),
            Utc::now(),
        );
        state
            .applications
            .insert(application.id.clone(), application.clone());

        info!(application = %application.id, student = %student, opportunity = %opportunity_id, "application submitted");
        self.persist_applications(state)?;
        Ok(application)
    }

    /// One-shot representative decision on a pending application. Approval
    /// additionally requires the listing itself to be approved. Slot
    /// accounting is untouched here; it moves only on acceptance.
    pub fn decide(
        &self,
        rep: &UserId,
        application_id: &ApplicationId,
        approve: bool,
    ) -> Result<Application, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(rep, Role::Representative)?;
        let application = state.application(application_id)?;
        let opportunity_id = application.opportunity.clone();
        let opportunity = state.opportunity(&opportunity_id)?;
        if opportunity.rep_in_charge != *rep {
            return Err(PlacementError::NotOpportunityOwner(opportunity_id));
        }
        if application.status != ApplicationStatus::Pending {
            return Err(PlacementError::ApplicationState {
                id: application.id.clone(),
                status: application.status,
                expected: "pending",
            });
        }
        if approve && opportunity.status != OpportunityStatus::Approved {
            return Err(PlacementError::OpportunityState {
                id: opportunity_id,
                status: opportunity.status,
                expected: "approved",
            });
        }

        let application = state.application_mut(application_id)?;
        application.mark_decision(approve, Utc::now())?;
        let result = application.clone();

        info!(application = %application_id, approved = approve, "application decided");
        self.persist_applications(state)?;
        Ok(result)
    }

    /// Student acceptance of a successful offer. The whole
    /// check-accepted / check-capacity / mark / increment-and-recompute
    /// sequence runs under one write lock, so concurrent accepts cannot
    /// overcommit slots.
    pub fn accept(
        &self,
        student: &UserId,
        application_id: &ApplicationId,
    ) -> Result<Application, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(student, Role::Student)?;
        let application = state.application(application_id)?;
        if application.student != *student {
            return Err(PlacementError::NotApplicationOwner(application_id.clone()));
        }
        if application.status != ApplicationStatus::Successful {
            return Err(PlacementError::ApplicationState {
                id: application.id.clone(),
                status: application.status,
                expected: "successful",
            });
        }
        if application.accepted {
            return Err(PlacementError::AlreadyAccepted(application_id.clone()));
        }
        if let Some(existing) = state.applications.values().find(|candidate| {
            candidate.student == *student && candidate.accepted && candidate.id != *application_id
        }) {
            return Err(PlacementError::OfferAlreadyAccepted {
                student: student.clone(),
                existing: existing.id.clone(),
            });
        }

        let opportunity_id = application.opportunity.clone();
        let opportunity = state.opportunity(&opportunity_id)?;
        if !opportunity.has_vacancy() {
            return Err(PlacementError::SlotsExhausted {
                id: opportunity_id,
                confirmed: opportunity.confirmed_slots,
                slots: opportunity.slots,
            });
        }

        let opportunity = state.opportunity_mut(&opportunity_id)?;
        opportunity.confirm_slot()?;
        let application = state.application_mut(application_id)?;
        application.mark_accepted()?;
        let result = application.clone();

        info!(application = %application_id, opportunity = %opportunity_id, "offer accepted");
        self.persist_applications(state)?;
        self.persist_opportunities(state)?;
        Ok(result)
    }

    /// Direct withdrawal by the applying student or by career-center staff.
    /// Withdrawing an accepted application releases its confirmed slot.
    pub fn withdraw(
        &self,
        actor: &UserId,
        application_id: &ApplicationId,
    ) -> Result<Application, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        let acting_role = state.user(actor)?.role();
        let application = state.application(application_id)?;
        match acting_role {
            Role::Student => {
                if application.student != *actor {
                    return Err(PlacementError::NotApplicationOwner(application_id.clone()));
                }
            }
            Role::Staff => {}
            Role::Representative => {
                return Err(PlacementError::WithdrawalNotAllowed(application_id.clone()));
            }
        }

        let opportunity_id = application.opportunity.clone();
        let application = state.application_mut(application_id)?;
        let was_accepted = application.mark_withdrawn(Utc::now())?;
        let result = application.clone();

        if was_accepted {
            let opportunity = state
                .opportunities
                .get_mut(&opportunity_id)
                .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))?;
            opportunity.release_slot();
        }

        info!(application = %application_id, by = %actor, "application withdrawn");
        self.persist_applications(state)?;
        if was_accepted {
            self.persist_opportunities(state)?;
        }
        Ok(result)
    }

    // ---- withdrawal review ----

    /// File a staff-reviewed withdrawal request instead of withdrawing
    /// directly.
    pub fn request_withdrawal(
        &self,
        student: &UserId,
        application_id: &ApplicationId,
    ) -> Result<WithdrawalRequest, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(student, Role::Student)?;
        let application = state.application(application_id)?;
        if application.student != *student {
            return Err(PlacementError::NotApplicationOwner(application_id.clone()));
        }
        if !matches!(
            application.status,
            ApplicationStatus::Pending | ApplicationStatus::Successful
        ) {
            return Err(PlacementError::ApplicationState {
                id: application_id.clone(),
                status: application.status,
                expected: "pending or successful",
            });
        }
        if state.withdrawals.values().any(|request| {
            request.application == *application_id && request.review == ReviewStatus::Pending
        }) {
            return Err(PlacementError::DuplicateWithdrawalRequest(
                application_id.clone(),
            ));
        }

        let id = ids::allocate(WITHDRAWAL_PREFIX, self.tokens.as_ref(), |candidate| {
            state.withdrawals.keys().any(|key| key.0 == candidate)
        })?;
        let request = WithdrawalRequest::new(
            WithdrawalRequestId(id),
            application_id.clone(),
            student.clone(),
            Utc::now(),
        );
        state.withdrawals.insert(request.id.clone(), request.clone());

        info!(request = %request.id, application = %application_id, "withdrawal requested");
        self.persist_withdrawals(state)?;
        Ok(request)
    }

    /// One-shot staff review. Approving the request executes the withdrawal
    /// on the underlying application.
    pub fn review_withdrawal(
        &self,
        staff: &UserId,
        request_id: &WithdrawalRequestId,
        approve: bool,
    ) -> Result<WithdrawalRequest, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(staff, Role::Staff)?;
        let request = state.withdrawal(request_id)?;
        if request.review != ReviewStatus::Pending {
            return Err(PlacementError::RequestAlreadyReviewed {
                id: request.id.clone(),
                review: request.review,
            });
        }
        let application_id = request.application.clone();

        let mut released_slot = false;
        if approve {
            let application = state.application_mut(&application_id)?;
            let opportunity_id = application.opportunity.clone();
            let was_accepted = application.mark_withdrawn(Utc::now())?;
            if was_accepted {
                let opportunity = state
                    .opportunities
                    .get_mut(&opportunity_id)
                    .ok_or_else(|| PlacementError::OpportunityNotFound(opportunity_id.clone()))?;
                opportunity.release_slot();
                released_slot = true;
            }
        }

        let request = state.withdrawal_mut(request_id)?;
        request.mark_review(approve, staff.clone(), Utc::now())?;
        let result = request.clone();

        info!(request = %request_id, approved = approve, "withdrawal reviewed");
        if approve {
            self.persist_applications(state)?;
        }
        if released_slot {
            self.persist_opportunities(state)?;
        }
        self.persist_withdrawals(state)?;
        Ok(result)
    }

    /// Clear a finished review back to pending, erasing the reviewer trail.
    pub fn reset_withdrawal_review(
        &self,
        staff: &UserId,
        request_id: &WithdrawalRequestId,
    ) -> Result<WithdrawalRequest, PlacementError> {
        let mut guard = self.write_state();
        let state = &mut *guard;

        state.require_role(staff, Role::Staff)?;
        let request = state.withdrawal_mut(request_id)?;
        request.reset_review();
        let result = request.clone();

        info!(request = %request_id, "withdrawal review reset");
        self.persist_withdrawals(state)?;
        Ok(result)
    }

    // ---- queries ----

    pub fn is_open_for(
        &self,
        opportunity_id: &OpportunityId,
        student: &UserId,
        today: NaiveDate,
    ) -> Result<bool, PlacementError> {
        let state = self.read_state();
        let profile = state.student_profile(student)?;
        let opportunity = state.opportunity(opportunity_id)?;
        Ok(open_for(self.policy.as_ref(), opportunity, &profile, today))
    }

    pub fn open_opportunities_for(
        &self,
        student: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<Opportunity>, PlacementError> {
        let state = self.read_state();
        let profile = state.student_profile(student)?;
        Ok(state
            .opportunities
            .values()
            .filter(|opportunity| open_for(self.policy.as_ref(), opportunity, &profile, today))
            .cloned()
            .collect())
    }

    pub fn opportunity(&self, id: &OpportunityId) -> Result<Opportunity, PlacementError> {
        let state = self.read_state();
        Ok(state.opportunity(id)?.clone())
    }

    pub fn application(&self, id: &ApplicationId) -> Result<Application, PlacementError> {
        let state = self.read_state();
        Ok(state.application(id)?.clone())
    }

    pub fn withdrawal_request(
        &self,
        id: &WithdrawalRequestId,
    ) -> Result<WithdrawalRequest, PlacementError> {
        let state = self.read_state();
        Ok(state.withdrawal(id)?.clone())
    }

    /// A student's applications in submission order, for display.
    pub fn applications_for_student(
        &self,
        student: &UserId,
    ) -> Result<Vec<Application>, PlacementError> {
        let state = self.read_state();
        state.user(student)?;
        let mut applications: Vec<Application> = state
            .applications
            .values()
            .filter(|application| application.student == *student)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.applied_at.cmp(&b.applied_at).then(a.id.cmp(&b.id)));
        Ok(applications)
    }

    pub fn opportunities_for_representative(
        &self,
        rep: &UserId,
    ) -> Result<Vec<Opportunity>, PlacementError> {
        let state = self.read_state();
        state.user(rep)?;
        Ok(state
            .opportunities
            .values()
            .filter(|opportunity| opportunity.rep_in_charge == *rep)
            .cloned()
            .collect())
    }

    pub fn summary(&self) -> PlacementSummary {
        let state = self.read_state();
        PlacementSummary {
            opportunities: state
                .opportunities
                .values()
                .map(OpportunitySnapshot::from)
                .collect(),
            applications: state
                .applications
                .values()
                .map(ApplicationSnapshot::from)
                .collect(),
        }
    }
}

/// Flat view of the pipeline for reporting layers.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementSummary {
    pub opportunities: Vec<OpportunitySnapshot>,
    pub applications: Vec<ApplicationSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunitySnapshot {
    pub id: String,
    pub title: String,
    pub rep_in_charge: String,
    pub status: &'static str,
    pub visible: bool,
    pub confirmed_slots: u32,
    pub slots: u32,
}

impl From<&Opportunity> for OpportunitySnapshot {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            id: opportunity.id.0.clone(),
            title: opportunity.title.clone(),
            rep_in_charge: opportunity.rep_in_charge.as_str().to_string(),
            status: opportunity.status.label(),
            visible: opportunity.visible,
            confirmed_slots: opportunity.confirmed_slots,
            slots: opportunity.slots,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSnapshot {
    pub id: String,
    pub student: String,
    pub opportunity: String,
    pub status: &'static str,
    pub accepted: bool,
}

impl From<&Application> for ApplicationSnapshot {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.0.clone(),
            student: application.student.as_str().to_string(),
            opportunity: application.opportunity.0.clone(),
            status: application.status.label(),
            accepted: application.accepted,
        }
    }
}
