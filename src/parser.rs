//! Row-to-record conversion.
//!
//! Every function here takes one header-keyed row and either returns a typed
//! record or a [`ParseError`]. Lookups go by column name, so the column order
//! of a source does not matter.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::models::{Member, Participation, Survey};
use crate::status::ParticipationStatus;

/// One source row keyed by header name.
pub type RawRow = HashMap<String, String>;

pub const MEMBER_ID: &str = "Member Id";
pub const FULL_NAME: &str = "Full name";
pub const EMAIL: &str = "E-mail address";
pub const IS_ACTIVE: &str = "Is Active";

pub const SURVEY_ID: &str = "Survey Id";
pub const SURVEY_NAME: &str = "Name";
pub const EXPECTED_COMPLETES: &str = "Expected completes";
pub const COMPLETION_POINTS: &str = "Completion points";
pub const FILTERED_POINTS: &str = "Filtered points";

pub const STATUS: &str = "Status";
pub const LENGTH: &str = "Length";

pub fn parse_member(row: &RawRow) -> Result<Member, ParseError> {
    Ok(Member {
        id: id_field(row, MEMBER_ID)?,
        full_name: text_field(row, FULL_NAME)?,
        email: text_field(row, EMAIL)?,
        is_active: flag_field(row, IS_ACTIVE),
    })
}

pub fn parse_survey(row: &RawRow) -> Result<Survey, ParseError> {
    Ok(Survey {
        id: id_field(row, SURVEY_ID)?,
        name: text_field(row, SURVEY_NAME)?,
        expected_completes: int_field(row, EXPECTED_COMPLETES)?,
        completion_points: int_field(row, COMPLETION_POINTS)?,
        filtered_points: int_field(row, FILTERED_POINTS)?,
    })
}

pub fn parse_participation(row: &RawRow) -> Result<Participation, ParseError> {
    let member_id = id_field(row, MEMBER_ID)?;
    let survey_id = id_field(row, SURVEY_ID)?;
    let status = ParticipationStatus::try_from(int_field(row, STATUS)?)?;
    let length = optional_int_field(row, LENGTH)?;

    Ok(Participation {
        member_id,
        survey_id,
        status,
        length,
    })
}

fn required<'a>(row: &'a RawRow, column: &'static str) -> Result<&'a str, ParseError> {
    match row.get(column).map(|value| value.trim()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ParseError::MissingField { column }),
    }
}

fn text_field(row: &RawRow, column: &'static str) -> Result<String, ParseError> {
    row.get(column)
        .map(|value| value.trim().to_string())
        .ok_or(ParseError::MissingField { column })
}

fn int_field(row: &RawRow, column: &'static str) -> Result<i64, ParseError> {
    parse_int(required(row, column)?, column)
}

fn id_field(row: &RawRow, column: &'static str) -> Result<u64, ParseError> {
    let value = int_field(row, column)?;
    if value <= 0 {
        return Err(ParseError::NonPositiveId { column });
    }
    Ok(value as u64)
}

/// Blank or missing means absent, not zero.
fn optional_int_field(row: &RawRow, column: &'static str) -> Result<Option<i64>, ParseError> {
    match row.get(column).map(|value| value.trim()) {
        Some(value) if !value.is_empty() => parse_int(value, column).map(Some),
        _ => Ok(None),
    }
}

/// Only the literal "1" is true; anything else, including absence, is false.
fn flag_field(row: &RawRow, column: &'static str) -> bool {
    row.get(column).is_some_and(|value| value.trim() == "1")
}

fn parse_int(value: &str, column: &'static str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_active_member() {
        let member = parse_member(&row(&[
            (MEMBER_ID, "1"),
            (FULL_NAME, "John Doe"),
            (EMAIL, "john.doe@example.com"),
            (IS_ACTIVE, "1"),
        ]))
        .unwrap();

        assert_eq!(
            member,
            Member {
                id: 1,
                full_name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                is_active: true,
            }
        );
    }

    #[test]
    fn active_flag_is_false_unless_literal_one() {
        for flag in ["0", "true", "yes", ""] {
            let member = parse_member(&row(&[
                (MEMBER_ID, "3"),
                (FULL_NAME, "Bob Wilson"),
                (EMAIL, "bob@example.com"),
                (IS_ACTIVE, flag),
            ]))
            .unwrap();
            assert!(!member.is_active, "flag {flag:?} should be inactive");
        }

        let member = parse_member(&row(&[
            (MEMBER_ID, "3"),
            (FULL_NAME, "Bob Wilson"),
            (EMAIL, "bob@example.com"),
        ]))
        .unwrap();
        assert!(!member.is_active);
    }

    #[test]
    fn rejects_non_numeric_member_id() {
        let err = parse_member(&row(&[
            (MEMBER_ID, "invalid_id"),
            (FULL_NAME, "Jane Smith"),
            (EMAIL, "jane@example.com"),
            (IS_ACTIVE, "1"),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::InvalidNumber {
                column: MEMBER_ID,
                value: "invalid_id".to_string(),
            }
        );
    }

    #[test]
    fn rejects_zero_and_negative_ids() {
        for id in ["0", "-4"] {
            let err = parse_member(&row(&[
                (MEMBER_ID, id),
                (FULL_NAME, "Nobody"),
                (EMAIL, "nobody@example.com"),
            ]))
            .unwrap_err();
            assert_eq!(err, ParseError::NonPositiveId { column: MEMBER_ID });
        }
    }

    #[test]
    fn parses_survey_with_column_order_ignored() {
        let survey = parse_survey(&row(&[
            (FILTERED_POINTS, "2"),
            (SURVEY_NAME, "Survey 1"),
            (COMPLETION_POINTS, "5"),
            (SURVEY_ID, "1"),
            (EXPECTED_COMPLETES, "10"),
        ]))
        .unwrap();

        assert_eq!(survey.id, 1);
        assert_eq!(survey.name, "Survey 1");
        assert_eq!(survey.expected_completes, 10);
        assert_eq!(survey.completion_points, 5);
        assert_eq!(survey.filtered_points, 2);
    }

    #[test]
    fn blank_survey_points_are_missing() {
        let err = parse_survey(&row(&[
            (SURVEY_ID, "1"),
            (SURVEY_NAME, "Survey 1"),
            (EXPECTED_COMPLETES, "10"),
            (COMPLETION_POINTS, "  "),
            (FILTERED_POINTS, "2"),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::MissingField {
                column: COMPLETION_POINTS
            }
        );
    }

    #[test]
    fn survey_without_name_column_fails() {
        let err = parse_survey(&row(&[
            (SURVEY_ID, "1"),
            (EXPECTED_COMPLETES, "10"),
            (COMPLETION_POINTS, "5"),
            (FILTERED_POINTS, "2"),
        ]))
        .unwrap_err();

        assert_eq!(err, ParseError::MissingField { column: SURVEY_NAME });
    }

    #[test]
    fn blank_length_is_absent() {
        let participation = parse_participation(&row(&[
            (MEMBER_ID, "1"),
            (SURVEY_ID, "2"),
            (STATUS, "3"),
            (LENGTH, ""),
        ]))
        .unwrap();

        assert_eq!(participation.status, ParticipationStatus::Filtered);
        assert_eq!(participation.length, None);
    }

    #[test]
    fn missing_length_column_is_absent() {
        let participation =
            parse_participation(&row(&[(MEMBER_ID, "1"), (SURVEY_ID, "2"), (STATUS, "2")]))
                .unwrap();

        assert_eq!(participation.length, None);
    }

    #[test]
    fn present_length_is_parsed() {
        let participation = parse_participation(&row(&[
            (MEMBER_ID, "1"),
            (SURVEY_ID, "1"),
            (STATUS, "4"),
            (LENGTH, "15"),
        ]))
        .unwrap();

        assert_eq!(participation.status, ParticipationStatus::Completed);
        assert_eq!(participation.length, Some(15));
    }

    #[test]
    fn non_numeric_length_fails_the_row() {
        let err = parse_participation(&row(&[
            (MEMBER_ID, "1"),
            (SURVEY_ID, "1"),
            (STATUS, "4"),
            (LENGTH, "long"),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::InvalidNumber {
                column: LENGTH,
                value: "long".to_string(),
            }
        );
    }

    #[test]
    fn unknown_status_fails_the_row() {
        let err = parse_participation(&row(&[
            (MEMBER_ID, "1"),
            (SURVEY_ID, "1"),
            (STATUS, "7"),
            (LENGTH, "10"),
        ]))
        .unwrap_err();

        assert_eq!(err, ParseError::UnknownStatus(7));
    }
}
