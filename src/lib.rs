//! In-memory survey analytics over member, survey and participation CSVs.
//!
//! [`loader::load`] builds an immutable [`SurveyStore`] once; the functions in
//! [`queries`] are pure reads over it.

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod models;
pub mod parser;
pub mod queries;
pub mod report;
pub mod status;
pub mod store;

pub use config::DataSources;
pub use error::{LoadError, ParseError, QueryError};
pub use loader::{load, LoadReport, SourceReport};
pub use models::{Member, MemberPoints, Participation, SourceKind, Survey, SurveyStatistics};
pub use status::ParticipationStatus;
pub use store::SurveyStore;
