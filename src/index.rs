use std::collections::BTreeMap;

use crate::models::Participation;

/// Participations keyed both by member and by survey.
///
/// Each inserted participation lands in exactly one list under each key, and
/// every list keeps insertion order. Keys without participations are absent.
#[derive(Debug, Clone, Default)]
pub struct ParticipationIndex {
    by_member: BTreeMap<u64, Vec<Participation>>,
    by_survey: BTreeMap<u64, Vec<Participation>>,
}

impl ParticipationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, participation: Participation) {
        self.by_survey
            .entry(participation.survey_id)
            .or_default()
            .push(participation.clone());
        self.by_member
            .entry(participation.member_id)
            .or_default()
            .push(participation);
    }

    /// Empty slice when the member has no participations.
    pub fn for_member(&self, member_id: u64) -> &[Participation] {
        self.by_member
            .get(&member_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Empty slice when the survey has no participations.
    pub fn for_survey(&self, survey_id: u64) -> &[Participation] {
        self.by_survey
            .get(&survey_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn by_member(&self) -> &BTreeMap<u64, Vec<Participation>> {
        &self.by_member
    }

    pub fn by_survey(&self) -> &BTreeMap<u64, Vec<Participation>> {
        &self.by_survey
    }

    /// Total participations indexed.
    pub fn count(&self) -> usize {
        self.by_member.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ParticipationStatus;

    fn participation(member_id: u64, survey_id: u64, status: ParticipationStatus) -> Participation {
        Participation {
            member_id,
            survey_id,
            status,
            length: None,
        }
    }

    #[test]
    fn indexes_each_participation_under_both_keys() {
        let mut index = ParticipationIndex::new();
        index.insert(participation(1, 1, ParticipationStatus::Completed));
        index.insert(participation(1, 2, ParticipationStatus::Filtered));
        index.insert(participation(2, 1, ParticipationStatus::Completed));

        assert_eq!(index.count(), 3);
        assert_eq!(index.for_member(1).len(), 2);
        assert_eq!(index.for_member(2).len(), 1);
        assert_eq!(index.for_survey(1).len(), 2);
        assert_eq!(index.for_survey(2).len(), 1);

        let by_member: usize = index.by_member().values().map(Vec::len).sum();
        let by_survey: usize = index.by_survey().values().map(Vec::len).sum();
        assert_eq!(by_member, by_survey);
    }

    #[test]
    fn lists_keep_insertion_order() {
        let mut index = ParticipationIndex::new();
        index.insert(participation(3, 7, ParticipationStatus::NotAsked));
        index.insert(participation(1, 7, ParticipationStatus::Completed));
        index.insert(participation(2, 7, ParticipationStatus::Rejected));

        let members: Vec<u64> = index.for_survey(7).iter().map(|p| p.member_id).collect();
        assert_eq!(members, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_pairs_are_all_retained() {
        let mut index = ParticipationIndex::new();
        index.insert(participation(1, 1, ParticipationStatus::Filtered));
        index.insert(participation(1, 1, ParticipationStatus::Completed));

        assert_eq!(index.for_member(1).len(), 2);
        assert_eq!(index.for_survey(1).len(), 2);
    }

    #[test]
    fn unknown_keys_are_absent_and_read_as_empty() {
        let mut index = ParticipationIndex::new();
        index.insert(participation(1, 1, ParticipationStatus::Completed));

        assert!(!index.by_member().contains_key(&999));
        assert!(index.for_member(999).is_empty());
        assert!(index.for_survey(999).is_empty());
    }
}
