//! Reads the three CSV sources into a [`SurveyStore`].
//!
//! A bad row is logged, counted and skipped. A source that cannot be opened
//! or read aborts the whole load and no store is produced.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;

use crate::config::DataSources;
use crate::error::{LoadError, LoadResult, ParseError};
use crate::models::SourceKind;
use crate::parser::{self, RawRow};
use crate::store::{StoreBuilder, SurveyStore};

/// Row counts for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub kind: SourceKind,
    pub loaded: usize,
    pub skipped: usize,
    /// Loaded rows that replaced an earlier row with the same id.
    pub duplicates: usize,
}

impl SourceReport {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            loaded: 0,
            skipped: 0,
            duplicates: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.loaded + self.skipped
    }

    pub(crate) fn record_loaded(&mut self, replaced: bool) {
        self.loaded += 1;
        if replaced {
            self.duplicates += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub members: SourceReport,
    pub surveys: SourceReport,
    pub participations: SourceReport,
    pub loaded_at: DateTime<Utc>,
}

pub fn load(sources: &DataSources) -> LoadResult<SurveyStore> {
    info!("Starting data load from CSV sources");
    let members = open(&sources.members, SourceKind::Members)?;
    let surveys = open(&sources.surveys, SourceKind::Surveys)?;
    let participations = open(&sources.participations, SourceKind::Participations)?;
    load_from_readers(members, surveys, participations)
}

/// Loads from already-open CSV readers. Sources are read in order: members,
/// surveys, participations.
pub fn load_from_readers<M, S, P>(
    members: csv::Reader<M>,
    surveys: csv::Reader<S>,
    participations: csv::Reader<P>,
) -> LoadResult<SurveyStore>
where
    M: io::Read,
    S: io::Read,
    P: io::Read,
{
    let mut builder = StoreBuilder::default();

    let member_report = read_source(members, SourceKind::Members, parser::parse_member, |m| {
        builder.insert_member(m)
    })?;
    let survey_report = read_source(surveys, SourceKind::Surveys, parser::parse_survey, |s| {
        builder.insert_survey(s)
    })?;
    let participation_report = read_source(
        participations,
        SourceKind::Participations,
        parser::parse_participation,
        |p| {
            builder.insert_participation(p);
            false
        },
    )?;

    let store = builder.build(LoadReport {
        members: member_report,
        surveys: survey_report,
        participations: participation_report,
        loaded_at: Utc::now(),
    });

    info!(
        "Data load completed. Loaded {} members, {} surveys, {} participations",
        store.members_by_id().len(),
        store.surveys_by_id().len(),
        store.participation_count()
    );

    Ok(store)
}

fn open(path: &Path, kind: SourceKind) -> LoadResult<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path).map_err(|source| {
        error!("Failed to open {kind} source {}: {source}", path.display());
        LoadError::Open {
            kind,
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Streams one source through `parse`, handing each record to `store`.
///
/// `store` returns true when the record replaced an earlier one.
fn read_source<R, T, F, G>(
    mut reader: csv::Reader<R>,
    kind: SourceKind,
    parse: F,
    mut store: G,
) -> LoadResult<SourceReport>
where
    R: io::Read,
    F: Fn(&RawRow) -> Result<T, ParseError>,
    G: FnMut(T) -> bool,
{
    let headers = reader.headers().cloned().map_err(|source| {
        error!("Failed to read header row of {kind} source: {source}");
        LoadError::Header { kind, source }
    })?;

    let mut report = SourceReport::new(kind);
    let mut record = csv::StringRecord::new();
    // Header occupies line 1.
    let mut line = 1u64;

    loop {
        line += 1;
        let parsed = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                if let Some(position) = record.position() {
                    line = position.line();
                }
                record
                    .deserialize::<RawRow>(Some(&headers))
                    .map_err(|err| ParseError::Malformed(err.to_string()))
                    .and_then(|row| parse(&row))
            }
            Err(err) if err.is_io_error() => {
                error!("Failed to read {kind} source near line {line}: {err}");
                return Err(LoadError::Read {
                    kind,
                    line,
                    source: err,
                });
            }
            Err(err) => Err(ParseError::Malformed(err.to_string())),
        };

        match parsed {
            Ok(entity) => report.record_loaded(store(entity)),
            Err(err) => {
                warn!("Skipping invalid {kind} record at line {line}: {err}");
                report.skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} {kind}, skipped {} invalid records",
        report.loaded, report.skipped
    );

    Ok(report)
}
