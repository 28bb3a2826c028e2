use super::common::*;
use crate::workflows::placement::domain::{
    ApplicationStatus, InternshipLevel, OpportunityStatus,
};
use crate::workflows::placement::eligibility::YearLevelPolicy;
use crate::workflows::placement::engine::PlacementEngine;
use crate::workflows::placement::error::{ErrorKind, PlacementError};
use std::sync::Arc;

#[test]
fn applying_creates_a_pending_application() {
    let (engine, store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");

    assert!(application.id.0.starts_with("APP-"));
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(!application.accepted);
    assert_eq!(application.student, uid("amy"));
    assert_eq!(application.opportunity, id);
    assert!(application.decided_at.is_none());

    let mine = engine
        .applications_for_student(&uid("amy"))
        .expect("listing query");
    assert_eq!(mine.len(), 1);
    assert_eq!(store.saved_applications().len(), 1);
}

#[test]
fn juniors_cannot_apply_above_basic_level() {
    let (engine, _store) = engine();

    // Scenario E: the same first-year student is refused at intermediate
    // level and accepted at basic level for the same major.
    let intermediate = {
        let mut draft = draft();
        draft.level = InternshipLevel::Intermediate;
        draft
    };
    let blocked = approved_opportunity(&engine, "rhea", intermediate);
    let error = engine
        .apply(&uid("amy"), &blocked, today())
        .expect_err("year 1 blocked at intermediate");
    assert!(matches!(error, PlacementError::Ineligible(_)));
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let basic = approved_opportunity(&engine, "rhea", draft());
    engine
        .apply(&uid("amy"), &basic, today())
        .expect("year 1 eligible at basic");
}

#[test]
fn applications_require_a_visible_approved_listing_in_window() {
    let (engine, _store) = engine();

    // Still pending, so invisible.
    let pending = engine
        .create_opportunity(&uid("rhea"), draft())
        .expect("listing created");
    assert!(matches!(
        engine.apply(&uid("ben"), &pending.id, today()),
        Err(PlacementError::Ineligible(_))
    ));

    // Approved but out of its application window.
    let approved = approved_opportunity(&engine, "rhea", draft());
    let after_close = today()
        .checked_add_signed(chrono::Duration::days(60))
        .expect("valid date");
    assert!(matches!(
        engine.apply(&uid("ben"), &approved, after_close),
        Err(PlacementError::Ineligible(_))
    ));

    // Major mismatch.
    assert!(matches!(
        engine.apply(&uid("dev"), &approved, today()),
        Err(PlacementError::Ineligible(_))
    ));
}

#[test]
fn pending_applications_are_capped_at_three() {
    let (engine, _store) = engine();

    // Scenario C: a fourth concurrent application is refused until one of
    // the three pending ones is withdrawn.
    let ids: Vec<_> = (0..4)
        .map(|_| approved_opportunity(&engine, "rhea", draft()))
        .collect();
    for id in &ids[..3] {
        engine.apply(&uid("ben"), id, today()).expect("under the cap");
    }

    let error = engine
        .apply(&uid("ben"), &ids[3], today())
        .expect_err("cap reached");
    assert!(matches!(
        error,
        PlacementError::PendingApplicationLimit { count: 3, .. }
    ));
    assert_eq!(error.kind(), ErrorKind::Capacity);

    let mine = engine
        .applications_for_student(&uid("ben"))
        .expect("listing query");
    engine
        .withdraw(&uid("ben"), &mine[0].id)
        .expect("withdrawal frees a slot in the cap");
    engine
        .apply(&uid("ben"), &ids[3], today())
        .expect("fourth application accepted after withdrawal");
}

#[test]
fn duplicate_active_applications_are_refused() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let first = engine
        .apply(&uid("ben"), &id, today())
        .expect("first application");

    let error = engine
        .apply(&uid("ben"), &id, today())
        .expect_err("duplicate refused");
    assert!(matches!(error, PlacementError::DuplicateApplication(_)));
    assert_eq!(error.kind(), ErrorKind::Conflict);

    // Once the active application is withdrawn the student may reapply.
    engine.withdraw(&uid("ben"), &first.id).expect("withdrawn");
    engine
        .apply(&uid("ben"), &id, today())
        .expect("fresh application accepted");
}

#[test]
fn decisions_are_reserved_for_the_owning_representative() {
    let (engine, _store) = engine();

    // Scenario D.
    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("ben"), &id, today())
        .expect("application accepted");

    let error = engine
        .decide(&uid("omar"), &application.id, true)
        .expect_err("other rep refused");
    assert!(matches!(error, PlacementError::NotOpportunityOwner(_)));
    assert_eq!(error.kind(), ErrorKind::Forbidden);
}

#[test]
fn decisions_are_one_shot() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("ben"), &id, today())
        .expect("application accepted");

    let decided = engine
        .decide(&uid("rhea"), &application.id, false)
        .expect("decision recorded");
    assert_eq!(decided.status, ApplicationStatus::Unsuccessful);
    assert!(decided.decided_at.is_some());

    let error = engine
        .decide(&uid("rhea"), &application.id, true)
        .expect_err("second decision refused");
    assert!(matches!(error, PlacementError::ApplicationState { .. }));
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn approval_decisions_require_an_approved_listing() {
    let (engine, _store) = engine();

    // Scenario B: the listing drops back to pending (owner edit), the
    // approval decision is refused, and the same call succeeds once staff
    // re-approve the listing.
    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("ben"), &id, today())
        .expect("application accepted");

    engine
        .edit_opportunity(&uid("rhea"), &id, draft())
        .expect("edit revokes approval");
    let error = engine
        .decide(&uid("rhea"), &application.id, true)
        .expect_err("listing no longer approved");
    assert!(matches!(error, PlacementError::OpportunityState { .. }));
    assert_eq!(error.kind(), ErrorKind::InvalidState);

    engine
        .approve_opportunity(&uid("sana"), &id)
        .expect("re-approved");
    let decided = engine
        .decide(&uid("rhea"), &application.id, true)
        .expect("same call now succeeds");
    assert_eq!(decided.status, ApplicationStatus::Successful);
}

#[test]
fn decisions_leave_slot_accounting_untouched() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("ben"), &id, today())
        .expect("application accepted");
    engine
        .decide(&uid("rhea"), &application.id, true)
        .expect("offer extended");

    let listing = engine.opportunity(&id).expect("listing present");
    assert_eq!(listing.confirmed_slots, 0);
    assert_eq!(listing.status, OpportunityStatus::Approved);
}

#[test]
fn accepting_the_last_slot_fills_the_listing() {
    let (engine, _store) = engine();

    // Scenario A end to end with a single slot.
    let id = approved_opportunity(&engine, "rhea", draft());
    let app1 = engine
        .apply(&uid("amy"), &id, today())
        .expect("first applicant");
    let app2 = engine
        .apply(&uid("ben"), &id, today())
        .expect("second applicant");

    engine
        .decide(&uid("rhea"), &app1.id, true)
        .expect("offer extended");
    let accepted = engine.accept(&uid("amy"), &app1.id).expect("offer accepted");

    assert!(accepted.accepted);
    assert_eq!(accepted.status, ApplicationStatus::Successful);

    let listing = engine.opportunity(&id).expect("listing present");
    assert_eq!(listing.confirmed_slots, 1);
    assert_eq!(listing.status, OpportunityStatus::Filled);
    assert!(!listing.visible);

    // The rival application is untouched, and the listing is no longer
    // discoverable.
    let rival = engine.application(&app2.id).expect("rival present");
    assert_eq!(rival.status, ApplicationStatus::Pending);
    assert!(!engine
        .is_open_for(&id, &uid("cara"), today())
        .expect("query runs"));
}

#[test]
fn acceptance_requires_a_successful_offer_held_by_the_caller() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");

    let error = engine
        .accept(&uid("amy"), &application.id)
        .expect_err("still pending");
    assert!(matches!(error, PlacementError::ApplicationState { .. }));

    engine
        .decide(&uid("rhea"), &application.id, true)
        .expect("offer extended");
    let error = engine
        .accept(&uid("ben"), &application.id)
        .expect_err("someone else's offer");
    assert!(matches!(error, PlacementError::NotApplicationOwner(_)));
    assert_eq!(error.kind(), ErrorKind::Forbidden);
}

#[test]
fn students_hold_at_most_one_accepted_offer() {
    let (engine, _store) = engine();

    let first = approved_opportunity(&engine, "rhea", draft());
    let second = approved_opportunity(&engine, "omar", draft());
    let app1 = engine
        .apply(&uid("cara"), &first, today())
        .expect("first application");
    let app2 = engine
        .apply(&uid("cara"), &second, today())
        .expect("second application");
    engine
        .decide(&uid("rhea"), &app1.id, true)
        .expect("first offer");
    engine
        .decide(&uid("omar"), &app2.id, true)
        .expect("second offer");

    engine.accept(&uid("cara"), &app1.id).expect("first accepted");
    let error = engine
        .accept(&uid("cara"), &app2.id)
        .expect_err("second offer refused");
    assert!(matches!(error, PlacementError::OfferAlreadyAccepted { .. }));
    assert_eq!(error.kind(), ErrorKind::Conflict);

    let error = engine
        .accept(&uid("cara"), &app1.id)
        .expect_err("re-acceptance refused");
    assert!(matches!(error, PlacementError::AlreadyAccepted(_)));
}

#[test]
fn acceptance_fails_once_capacity_is_exhausted() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let app1 = engine
        .apply(&uid("amy"), &id, today())
        .expect("first applicant");
    let app2 = engine
        .apply(&uid("ben"), &id, today())
        .expect("second applicant");
    engine.decide(&uid("rhea"), &app1.id, true).expect("offer one");
    engine.decide(&uid("rhea"), &app2.id, true).expect("offer two");

    engine.accept(&uid("amy"), &app1.id).expect("slot taken");
    let error = engine
        .accept(&uid("ben"), &app2.id)
        .expect_err("no slots left");
    assert!(matches!(error, PlacementError::SlotsExhausted { .. }));
    assert_eq!(error.kind(), ErrorKind::Capacity);
}

#[test]
fn withdrawing_an_accepted_offer_releases_its_slot() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");
    engine
        .decide(&uid("rhea"), &application.id, true)
        .expect("offer extended");
    engine.accept(&uid("amy"), &application.id).expect("accepted");
    assert_eq!(
        engine.opportunity(&id).expect("listing present").status,
        OpportunityStatus::Filled
    );

    let withdrawn = engine
        .withdraw(&uid("amy"), &application.id)
        .expect("withdrawn");
    assert_eq!(withdrawn.status, ApplicationStatus::Withdrawn);
    assert!(!withdrawn.accepted);

    let listing = engine.opportunity(&id).expect("listing present");
    assert_eq!(listing.confirmed_slots, 0);
    assert_eq!(listing.status, OpportunityStatus::Approved);
    assert!(listing.visible);
}

#[test]
fn withdrawal_is_limited_to_the_student_or_staff() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");

    let error = engine
        .withdraw(&uid("rhea"), &application.id)
        .expect_err("reps cannot withdraw");
    assert!(matches!(error, PlacementError::WithdrawalNotAllowed(_)));

    let error = engine
        .withdraw(&uid("ben"), &application.id)
        .expect_err("other students cannot withdraw");
    assert!(matches!(error, PlacementError::NotApplicationOwner(_)));

    engine
        .withdraw(&uid("sana"), &application.id)
        .expect("staff may withdraw");
    let error = engine
        .withdraw(&uid("amy"), &application.id)
        .expect_err("re-withdrawal refused");
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn deleting_a_listing_with_applications_is_refused() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");
    engine
        .edit_opportunity(&uid("rhea"), &id, draft())
        .expect("edit drops back to pending");

    let error = engine
        .delete_opportunity(&uid("rhea"), &id)
        .expect_err("applications on record");
    assert!(matches!(error, PlacementError::OpportunityInUse(_)));
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn edits_cannot_reduce_slots_below_confirmed_offers() {
    let (engine, _store) = engine();

    let two_slots = {
        let mut draft = draft();
        draft.slots = 2;
        draft
    };
    let id = approved_opportunity(&engine, "rhea", two_slots);
    for student in ["amy", "ben"] {
        let application = engine
            .apply(&uid(student), &id, today())
            .expect("application accepted");
        engine
            .decide(&uid("rhea"), &application.id, true)
            .expect("offer extended");
        engine
            .accept(&uid(student), &application.id)
            .expect("offer accepted");
    }

    let error = engine
        .edit_opportunity(&uid("rhea"), &id, draft())
        .expect_err("slots below confirmed");
    assert!(matches!(
        error,
        PlacementError::SlotsBelowConfirmed {
            confirmed: 2,
            requested: 1
        }
    ));
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn raising_capacity_reopens_a_filled_listing_after_re_approval() {
    let (engine, _store) = engine();

    let id = approved_opportunity(&engine, "rhea", draft());
    let application = engine
        .apply(&uid("amy"), &id, today())
        .expect("application accepted");
    engine
        .decide(&uid("rhea"), &application.id, true)
        .expect("offer extended");
    engine.accept(&uid("amy"), &application.id).expect("filled");

    let larger = {
        let mut draft = draft();
        draft.slots = 2;
        draft
    };
    engine
        .edit_opportunity(&uid("rhea"), &id, larger)
        .expect("capacity raised");
    engine
        .approve_opportunity(&uid("sana"), &id)
        .expect("re-approved");

    let listing = engine.opportunity(&id).expect("listing present");
    assert_eq!(listing.status, OpportunityStatus::Approved);
    assert!(listing.has_vacancy());
    assert!(engine
        .is_open_for(&id, &uid("ben"), today())
        .expect("query runs"));
}

#[test]
fn mutations_survive_a_failing_store() {
    let store = Arc::new(OfflineStore::with_users(roster()));
    let engine = PlacementEngine::new(store, Arc::new(YearLevelPolicy)).expect("engine loads");

    let error = engine
        .create_opportunity(&uid("rhea"), draft())
        .expect_err("save reported");
    assert_eq!(error.kind(), ErrorKind::Store);

    // The listing was still created in memory; the session continues from
    // the in-memory collections.
    assert_eq!(engine.summary().opportunities.len(), 1);
}
