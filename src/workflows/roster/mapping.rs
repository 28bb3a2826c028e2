use std::collections::HashSet;

use chrono::NaiveDate;

use super::parser::{OpportunityRow, RepresentativeRow, StaffRow, StudentRow};
use super::RosterImportError;
use crate::workflows::placement::domain::{
    InternshipLevel, Opportunity, OpportunityDraft, OpportunityId, OpportunityStatus,
};
use crate::workflows::placement::identity::{
    AccountStatus, Major, RepresentativeProfile, RoleProfile, StaffProfile, StudentProfile, User,
    UserId,
};

fn invalid(line: usize, field: &'static str, value: &str) -> RosterImportError {
    RosterImportError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}

fn parse_date(line: usize, field: &'static str, value: &str) -> Result<NaiveDate, RosterImportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| invalid(line, field, value))
}

pub(crate) fn map_student(line: usize, row: StudentRow) -> Result<User, RosterImportError> {
    let year: u8 = row
        .year
        .trim()
        .parse()
        .map_err(|_| invalid(line, "Year", &row.year))?;
    let major = Major::parse(&row.major).ok_or_else(|| invalid(line, "Major", &row.major))?;
    let profile =
        StudentProfile::new(year, major).map_err(|_| invalid(line, "Year", &row.year))?;

    Ok(User::new(
        &row.id,
        &row.name,
        &row.credential,
        RoleProfile::Student(profile),
    ))
}

pub(crate) fn map_representative(
    line: usize,
    row: RepresentativeRow,
) -> Result<User, RosterImportError> {
    let account_status = AccountStatus::parse(&row.account_status)
        .ok_or_else(|| invalid(line, "Account Status", &row.account_status))?;

    Ok(User::new(
        &row.id,
        &row.name,
        &row.credential,
        RoleProfile::Representative(RepresentativeProfile {
            company: row.company,
            department: row.department,
            position: row.position,
            account_status,
        }),
    ))
}

pub(crate) fn map_staff(_line: usize, row: StaffRow) -> Result<User, RosterImportError> {
    Ok(User::new(
        &row.id,
        &row.name,
        &row.credential,
        RoleProfile::Staff(StaffProfile {
            department: row.department,
        }),
    ))
}

pub(crate) fn map_opportunity(
    line: usize,
    row: OpportunityRow,
    known_representatives: &HashSet<UserId>,
) -> Result<Opportunity, RosterImportError> {
    let representative = UserId::new(&row.representative);
    if !known_representatives.contains(&representative) {
        return Err(RosterImportError::UnknownRepresentative {
            line,
            representative: row.representative,
        });
    }

    let preferred_major = Major::parse(&row.preferred_major)
        .ok_or_else(|| invalid(line, "Preferred Major", &row.preferred_major))?;
    let level =
        InternshipLevel::parse(&row.level).ok_or_else(|| invalid(line, "Level", &row.level))?;
    let open_date = parse_date(line, "Opens", &row.opens)?;
    let close_date = parse_date(line, "Closes", &row.closes)?;
    let slots: u32 = row
        .slots
        .trim()
        .parse()
        .map_err(|_| invalid(line, "Slots", &row.slots))?;

    let status = if row.status.trim().is_empty() {
        OpportunityStatus::Pending
    } else {
        OpportunityStatus::parse(&row.status).ok_or_else(|| invalid(line, "Status", &row.status))?
    };

    let draft = OpportunityDraft {
        title: row.title,
        description: row.description,
        preferred_major,
        level,
        open_date,
        close_date,
        slots,
    };
    draft
        .validate()
        .map_err(|source| RosterImportError::Listing { line, source })?;

    let mut opportunity =
        Opportunity::from_draft(OpportunityId(row.id.trim().to_string()), representative, draft);
    match status {
        OpportunityStatus::Pending => {}
        OpportunityStatus::Approved => {
            opportunity.status = OpportunityStatus::Approved;
            opportunity.visible = true;
        }
        OpportunityStatus::Rejected => {
            opportunity.status = OpportunityStatus::Rejected;
        }
        OpportunityStatus::Filled => {
            // A seeded filled listing carries a full complement of confirmed
            // slots so the fill-consistency invariant holds from the start.
            opportunity.status = OpportunityStatus::Filled;
            opportunity.confirmed_slots = opportunity.slots;
        }
    }

    Ok(opportunity)
}
