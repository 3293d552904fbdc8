use std::fmt::Write;

use crate::loader::SourceReport;
use crate::models::{Survey, SurveyStatistics};
use crate::queries;
use crate::store::SurveyStore;

/// Share of the expected completes reached, as a percentage.
pub fn completion_rate(completes: usize, survey: &Survey) -> f64 {
    if survey.expected_completes <= 0 {
        0.0
    } else {
        completes as f64 * 100.0 / survey.expected_completes as f64
    }
}

/// Statistics ordered by completes, most first. Ties keep survey id order.
pub fn rank_by_completes(mut stats: Vec<SurveyStatistics>) -> Vec<SurveyStatistics> {
    stats.sort_by(|a, b| b.number_of_completes.cmp(&a.number_of_completes));
    stats
}

pub fn build_report(store: &SurveyStore) -> String {
    let stats = rank_by_completes(queries::survey_statistics(store));
    let load = store.report();

    let mut output = String::new();

    let _ = writeln!(output, "# Survey Analytics Report");
    let _ = writeln!(
        output,
        "Generated from data loaded at {}",
        load.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Data Sources");
    for source in [&load.members, &load.surveys, &load.participations] {
        let _ = writeln!(output, "- {}", source_line(source));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Survey Statistics");

    if stats.is_empty() {
        let _ = writeln!(output, "No surveys loaded.");
    } else {
        for stat in stats.iter() {
            let progress = store
                .survey(stat.survey_id)
                .map(|survey| {
                    format!(
                        ", {:.0}% of {} expected",
                        completion_rate(stat.number_of_completes, survey),
                        survey.expected_completes
                    )
                })
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "- {} (#{}): {} completes{}, {} filtered, {} rejected (avg length {:.1})",
                stat.survey_name,
                stat.survey_id,
                stat.number_of_completes,
                progress,
                stat.number_of_filtered,
                stat.number_of_rejected,
                stat.average_length
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Invitable Members");

    if stats.is_empty() {
        let _ = writeln!(output, "No surveys loaded.");
    } else {
        for stat in stats.iter() {
            let invitable = queries::invitable_members(store, stat.survey_id).len();
            let _ = writeln!(
                output,
                "- {} (#{}): {} active members not yet contacted",
                stat.survey_name, stat.survey_id, invitable
            );
        }
    }

    output
}

fn source_line(source: &SourceReport) -> String {
    let mut line = format!(
        "{}: {} loaded, {} skipped",
        source.kind, source.loaded, source.skipped
    );
    if source.duplicates > 0 {
        let _ = write!(line, ", {} duplicate ids replaced", source.duplicates);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Participation};
    use crate::status::ParticipationStatus;

    fn survey(id: u64, expected_completes: i64) -> Survey {
        Survey {
            id,
            name: format!("Survey {id}"),
            expected_completes,
            completion_points: 5,
            filtered_points: 2,
        }
    }

    fn store() -> SurveyStore {
        SurveyStore::from_parts(
            vec![
                Member {
                    id: 1,
                    full_name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                    is_active: true,
                },
                Member {
                    id: 2,
                    full_name: "Alice Johnson".to_string(),
                    email: "alice@example.com".to_string(),
                    is_active: true,
                },
            ],
            vec![survey(1, 4), survey(2, 0)],
            vec![Participation {
                member_id: 1,
                survey_id: 2,
                status: ParticipationStatus::Completed,
                length: Some(12),
            }],
        )
    }

    #[test]
    fn completion_rate_handles_zero_target() {
        assert_eq!(completion_rate(3, &survey(1, 4)), 75.0);
        assert_eq!(completion_rate(3, &survey(1, 0)), 0.0);
    }

    #[test]
    fn ranking_puts_most_completes_first() {
        let stats = rank_by_completes(queries::survey_statistics(&store()));
        let ids: Vec<u64> = stats.iter().map(|s| s.survey_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn report_lists_sources_and_surveys() {
        let report = build_report(&store());

        assert!(report.starts_with("# Survey Analytics Report"));
        assert!(report.contains("- members: 2 loaded, 0 skipped"));
        assert!(report.contains("- Survey 2 (#2): 1 completes, 0% of 0 expected"));
        assert!(report.contains("(avg length 12.0)"));
        assert!(report.contains("- Survey 1 (#1): 2 active members not yet contacted"));
        assert!(report.contains("- Survey 2 (#2): 1 active members not yet contacted"));
    }

    #[test]
    fn empty_store_reports_no_surveys() {
        let report = build_report(&SurveyStore::from_parts(vec![], vec![], vec![]));
        assert!(report.contains("No surveys loaded."));
    }
}
