//! Read-only projections over a loaded [`SurveyStore`].

use std::collections::HashSet;

use log::debug;

use crate::error::{QueryError, QueryResult};
use crate::models::{Member, MemberPoints, Participation, Survey, SurveyStatistics};
use crate::status::{is_completed, is_eligible_for_points, ParticipationStatus};
use crate::store::SurveyStore;

/// Surveys the member completed, in participation order.
///
/// Participations pointing at an unknown survey are left out.
pub fn completed_surveys(store: &SurveyStore, member_id: u64) -> Vec<Survey> {
    store
        .participations_for_member(member_id)
        .iter()
        .filter(|p| is_completed(p.status))
        .filter_map(|p| {
            let survey = store.survey(p.survey_id);
            if survey.is_none() {
                debug!(
                    "Member {member_id} completed unknown survey {}, omitting",
                    p.survey_id
                );
            }
            survey.cloned()
        })
        .collect()
}

/// Members who completed the survey, in participation order.
///
/// Participations pointing at an unknown member are left out.
pub fn completed_respondents(store: &SurveyStore, survey_id: u64) -> Vec<Member> {
    store
        .participations_for_survey(survey_id)
        .iter()
        .filter(|p| is_completed(p.status))
        .filter_map(|p| {
            let member = store.member(p.member_id);
            if member.is_none() {
                debug!(
                    "Survey {survey_id} completed by unknown member {}, omitting",
                    p.member_id
                );
            }
            member.cloned()
        })
        .collect()
}

/// Active members with no participation of any status in the survey, by id.
pub fn invitable_members(store: &SurveyStore, survey_id: u64) -> Vec<Member> {
    let participated: HashSet<u64> = store
        .participations_for_survey(survey_id)
        .iter()
        .map(|p| p.member_id)
        .collect();

    store
        .members_by_id()
        .values()
        .filter(|m| m.is_active && !participated.contains(&m.id))
        .cloned()
        .collect()
}

/// Points earned per eligible participation, in participation order.
///
/// Every eligible participation must reference a known survey; a gap is
/// reported as [`QueryError::UnknownSurvey`] rather than skipped.
pub fn member_points(store: &SurveyStore, member_id: u64) -> QueryResult<Vec<MemberPoints>> {
    store
        .participations_for_member(member_id)
        .iter()
        .filter(|p| is_eligible_for_points(p.status))
        .map(|p| -> QueryResult<MemberPoints> {
            let survey = store.survey(p.survey_id).ok_or(QueryError::UnknownSurvey {
                member_id,
                survey_id: p.survey_id,
            })?;
            Ok(MemberPoints {
                survey_id: p.survey_id,
                points: points_for(p.status, survey),
            })
        })
        .collect()
}

/// Statistics for every known survey, by survey id.
pub fn survey_statistics(store: &SurveyStore) -> Vec<SurveyStatistics> {
    store
        .surveys_by_id()
        .values()
        .map(|survey| statistics_for(survey, store.participations_for_survey(survey.id)))
        .collect()
}

fn points_for(status: ParticipationStatus, survey: &Survey) -> i64 {
    if is_completed(status) {
        survey.completion_points
    } else {
        survey.filtered_points
    }
}

fn statistics_for(survey: &Survey, participations: &[Participation]) -> SurveyStatistics {
    let mut completes = 0;
    let mut filtered = 0;
    let mut rejected = 0;
    // i128 holds the sum of any realistic number of i64 lengths.
    let mut length_sum = 0i128;
    let mut length_count = 0usize;

    for participation in participations {
        match participation.status {
            ParticipationStatus::Completed => completes += 1,
            ParticipationStatus::Filtered => filtered += 1,
            ParticipationStatus::Rejected => rejected += 1,
            ParticipationStatus::NotAsked => {}
        }
        if let Some(length) = participation.length {
            length_sum += i128::from(length);
            length_count += 1;
        }
    }

    SurveyStatistics {
        survey_id: survey.id,
        survey_name: survey.name.clone(),
        number_of_completes: completes,
        number_of_filtered: filtered,
        number_of_rejected: rejected,
        average_length: if length_count == 0 {
            0.0
        } else {
            length_sum as f64 / length_count as f64
        },
    }
}
