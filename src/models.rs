use std::fmt;

use serde::Serialize;

use crate::status::ParticipationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: u64,
    pub name: String,
    pub expected_completes: i64,
    pub completion_points: i64,
    pub filtered_points: i64,
}

/// One member's interaction with one survey. Not unique per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub member_id: u64,
    pub survey_id: u64,
    pub status: ParticipationStatus,
    pub length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPoints {
    pub survey_id: u64,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatistics {
    pub survey_id: u64,
    pub survey_name: String,
    pub number_of_completes: usize,
    pub number_of_filtered: usize,
    pub number_of_rejected: usize,
    pub average_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Members,
    Surveys,
    Participations,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Members => "members",
            SourceKind::Surveys => "surveys",
            SourceKind::Participations => "participations",
        };
        f.write_str(name)
    }
}
