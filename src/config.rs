use std::path::PathBuf;

pub const DEFAULT_MEMBERS_FILE: &str = "data/members.csv";
pub const DEFAULT_SURVEYS_FILE: &str = "data/surveys.csv";
pub const DEFAULT_PARTICIPATION_FILE: &str = "data/participation.csv";

/// Locations of the three CSV sources read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub members: PathBuf,
    pub surveys: PathBuf,
    pub participations: PathBuf,
}

impl DataSources {
    pub fn new(
        members: impl Into<PathBuf>,
        surveys: impl Into<PathBuf>,
        participations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            members: members.into(),
            surveys: surveys.into(),
            participations: participations.into(),
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::new(
            DEFAULT_MEMBERS_FILE,
            DEFAULT_SURVEYS_FILE,
            DEFAULT_PARTICIPATION_FILE,
        )
    }
}
