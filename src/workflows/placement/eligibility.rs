use super::domain::{InternshipLevel, Opportunity};
use super::identity::StudentProfile;

/// Decides whether a student may apply to an opportunity. Pure and
/// side-effect free; the engine consults it fresh on every call because both
/// sides may have changed since the last one.
pub trait EligibilityPolicy: Send + Sync {
    fn can_apply(&self, student: &StudentProfile, opportunity: &Opportunity) -> bool;
}

/// Junior students only see entry-level work.
const BASIC_ONLY_MAX_YEAR: u8 = 2;

/// Default campus rule: the majors must match, and first- and second-year
/// students are limited to basic-level placements. Third year and up may
/// apply to any level.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearLevelPolicy;

impl EligibilityPolicy for YearLevelPolicy {
    fn can_apply(&self, student: &StudentProfile, opportunity: &Opportunity) -> bool {
        if student.major != opportunity.preferred_major {
            return false;
        }
        if student.year_of_study <= BASIC_ONLY_MAX_YEAR {
            return opportunity.level == InternshipLevel::Basic;
        }
        true
    }
}
