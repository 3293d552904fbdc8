//! Immutable in-memory snapshot of members, surveys and participations.
//!
//! A [`SurveyStore`] is produced once, by the loader or by
//! [`SurveyStore::from_parts`], and never changes afterwards. Accessors hand out
//! shared borrows only, so nothing outside this module can mutate the maps.
//! Wrap it in an `Arc` to share between threads; a reload builds a new store
//! and swaps the `Arc`.

use std::collections::BTreeMap;

use chrono::Utc;
use log::warn;

use crate::index::ParticipationIndex;
use crate::loader::{LoadReport, SourceReport};
use crate::models::{Member, Participation, SourceKind, Survey};

#[derive(Debug, Clone)]
pub struct SurveyStore {
    members: BTreeMap<u64, Member>,
    surveys: BTreeMap<u64, Survey>,
    participations: ParticipationIndex,
    report: LoadReport,
}

impl SurveyStore {
    /// Builds a snapshot from records already in memory, applying the same
    /// rules as a file load: later duplicate ids replace earlier ones and
    /// participations keep the given order.
    pub fn from_parts(
        members: impl IntoIterator<Item = Member>,
        surveys: impl IntoIterator<Item = Survey>,
        participations: impl IntoIterator<Item = Participation>,
    ) -> Self {
        let mut builder = StoreBuilder::default();
        let mut member_report = SourceReport::new(SourceKind::Members);
        let mut survey_report = SourceReport::new(SourceKind::Surveys);
        let mut participation_report = SourceReport::new(SourceKind::Participations);

        for member in members {
            member_report.record_loaded(builder.insert_member(member));
        }
        for survey in surveys {
            survey_report.record_loaded(builder.insert_survey(survey));
        }
        for participation in participations {
            builder.insert_participation(participation);
            participation_report.record_loaded(false);
        }

        builder.build(LoadReport {
            members: member_report,
            surveys: survey_report,
            participations: participation_report,
            loaded_at: Utc::now(),
        })
    }

    pub fn members_by_id(&self) -> &BTreeMap<u64, Member> {
        &self.members
    }

    pub fn surveys_by_id(&self) -> &BTreeMap<u64, Survey> {
        &self.surveys
    }

    pub fn participations_by_member_id(&self) -> &BTreeMap<u64, Vec<Participation>> {
        self.participations.by_member()
    }

    pub fn participations_by_survey_id(&self) -> &BTreeMap<u64, Vec<Participation>> {
        self.participations.by_survey()
    }

    pub fn member(&self, id: u64) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn survey(&self, id: u64) -> Option<&Survey> {
        self.surveys.get(&id)
    }

    pub fn participations_for_member(&self, member_id: u64) -> &[Participation] {
        self.participations.for_member(member_id)
    }

    pub fn participations_for_survey(&self, survey_id: u64) -> &[Participation] {
        self.participations.for_survey(survey_id)
    }

    pub fn participation_count(&self) -> usize {
        self.participations.count()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

/// Mutable staging area used while a snapshot is being assembled.
#[derive(Debug, Default)]
pub(crate) struct StoreBuilder {
    members: BTreeMap<u64, Member>,
    surveys: BTreeMap<u64, Survey>,
    participations: ParticipationIndex,
}

impl StoreBuilder {
    /// Returns true when an earlier member with the same id was replaced.
    pub(crate) fn insert_member(&mut self, member: Member) -> bool {
        let id = member.id;
        let replaced = self.members.insert(id, member).is_some();
        if replaced {
            warn!("Duplicate member id {id}: later record replaces the earlier one");
        }
        replaced
    }

    /// Returns true when an earlier survey with the same id was replaced.
    pub(crate) fn insert_survey(&mut self, survey: Survey) -> bool {
        let id = survey.id;
        let replaced = self.surveys.insert(id, survey).is_some();
        if replaced {
            warn!("Duplicate survey id {id}: later record replaces the earlier one");
        }
        replaced
    }

    pub(crate) fn insert_participation(&mut self, participation: Participation) {
        self.participations.insert(participation);
    }

    pub(crate) fn build(self, report: LoadReport) -> SurveyStore {
        let dangling_surveys = self
            .participations
            .by_survey()
            .iter()
            .filter(|(id, _)| !self.surveys.contains_key(id))
            .map(|(_, list)| list.len())
            .sum::<usize>();
        let dangling_members = self
            .participations
            .by_member()
            .iter()
            .filter(|(id, _)| !self.members.contains_key(id))
            .map(|(_, list)| list.len())
            .sum::<usize>();

        if dangling_surveys > 0 {
            warn!("{dangling_surveys} participations reference unknown surveys");
        }
        if dangling_members > 0 {
            warn!("{dangling_members} participations reference unknown members");
        }

        SurveyStore {
            members: self.members,
            surveys: self.surveys,
            participations: self.participations,
            report,
        }
    }
}
