//! CSV seed-roster ingestion: students, company representatives,
//! career-center staff, and the opportunity book, mapped onto the placement
//! domain with per-line validation.

mod mapping;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::workflows::placement::domain::Opportunity;
use crate::workflows::placement::error::PlacementError;
use crate::workflows::placement::identity::{Role, User, UserId};

use parser::{OpportunityRow, RepresentativeRow, StaffRow, StudentRow};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    DuplicateId {
        line: usize,
        id: String,
    },
    UnknownRepresentative {
        line: usize,
        representative: String,
    },
    Listing {
        line: usize,
        source: PlacementError,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidField { line, field, value } => {
                write!(f, "line {}: invalid {} value '{}'", line, field, value)
            }
            RosterImportError::DuplicateId { line, id } => {
                write!(f, "line {}: duplicate identifier '{}'", line, id)
            }
            RosterImportError::UnknownRepresentative {
                line,
                representative,
            } => write!(
                f,
                "line {}: opportunity references unknown representative '{}'",
                line, representative
            ),
            RosterImportError::Listing { line, source } => {
                write!(f, "line {}: invalid listing: {}", line, source)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Listing { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Collections ready to be written as fresh snapshots.
#[derive(Debug)]
pub struct SeedData {
    pub users: Vec<User>,
    pub opportunities: Vec<Opportunity>,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_paths<P: AsRef<Path>>(
        students: P,
        representatives: P,
        staff: P,
        opportunities: P,
    ) -> Result<SeedData, RosterImportError> {
        Self::from_readers(
            std::fs::File::open(students)?,
            std::fs::File::open(representatives)?,
            std::fs::File::open(staff)?,
            std::fs::File::open(opportunities)?,
        )
    }

    pub fn from_readers<A: Read, B: Read, C: Read, D: Read>(
        students: A,
        representatives: B,
        staff: C,
        opportunities: D,
    ) -> Result<SeedData, RosterImportError> {
        let mut users: Vec<User> = Vec::new();
        let mut seen_users: HashSet<UserId> = HashSet::new();

        // The first data row of each file sits on line 2, under the header.
        for (index, row) in parser::parse_rows::<StudentRow, _>(students)?
            .into_iter()
            .enumerate()
        {
            let line = index + 2;
            let user = mapping::map_student(line, row)?;
            push_unique(&mut users, &mut seen_users, user, line)?;
        }
        for (index, row) in parser::parse_rows::<RepresentativeRow, _>(representatives)?
            .into_iter()
            .enumerate()
        {
            let line = index + 2;
            let user = mapping::map_representative(line, row)?;
            push_unique(&mut users, &mut seen_users, user, line)?;
        }
        for (index, row) in parser::parse_rows::<StaffRow, _>(staff)?
            .into_iter()
            .enumerate()
        {
            let line = index + 2;
            let user = mapping::map_staff(line, row)?;
            push_unique(&mut users, &mut seen_users, user, line)?;
        }

        let representative_ids: HashSet<UserId> = users
            .iter()
            .filter(|user| user.role() == Role::Representative)
            .map(|user| user.id.clone())
            .collect();

        let mut listings: Vec<Opportunity> = Vec::new();
        let mut seen_listings: HashSet<String> = HashSet::new();
        for (index, row) in parser::parse_rows::<OpportunityRow, _>(opportunities)?
            .into_iter()
            .enumerate()
        {
            let line = index + 2;
            let opportunity = mapping::map_opportunity(line, row, &representative_ids)?;
            if !seen_listings.insert(opportunity.id.0.clone()) {
                return Err(RosterImportError::DuplicateId {
                    line,
                    id: opportunity.id.0.clone(),
                });
            }
            listings.push(opportunity);
        }

        Ok(SeedData {
            users,
            opportunities: listings,
        })
    }
}

fn push_unique(
    users: &mut Vec<User>,
    seen: &mut HashSet<UserId>,
    user: User,
    line: usize,
) -> Result<(), RosterImportError> {
    if !seen.insert(user.id.clone()) {
        return Err(RosterImportError::DuplicateId {
            line,
            id: user.id.to_string(),
        });
    }
    users.push(user);
    Ok(())
}
