use serde::Serialize;

use crate::error::ParseError;

/// Participation outcome as recorded in the participation source.
///
/// The numeric codes match the `Status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    NotAsked,
    Rejected,
    Filtered,
    Completed,
}

impl TryFrom<i64> for ParticipationStatus {
    type Error = ParseError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ParticipationStatus::NotAsked),
            2 => Ok(ParticipationStatus::Rejected),
            3 => Ok(ParticipationStatus::Filtered),
            4 => Ok(ParticipationStatus::Completed),
            other => Err(ParseError::UnknownStatus(other)),
        }
    }
}

pub fn is_completed(status: ParticipationStatus) -> bool {
    matches!(status, ParticipationStatus::Completed)
}

/// Completed and filtered participations both earn points.
pub fn is_eligible_for_points(status: ParticipationStatus) -> bool {
    matches!(
        status,
        ParticipationStatus::Completed | ParticipationStatus::Filtered
    )
}
