use std::fmt;
use thiserror::Error;

/// Errors reported to whoever asked for a computation.
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// The request itself is unusable (missing fields, wrong shapes, zero teams).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Anything that went wrong while computing an otherwise valid request.
    #[error("computation failure: {0}")]
    ComputationFailure(String),
}

impl SolverError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SolverError::InvalidInput(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        SolverError::ComputationFailure(message.into())
    }

    /// Exit code used by the command line for this kind of error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SolverError::InvalidInput(_) => 2,
            SolverError::ComputationFailure(_) => 1,
        }
    }
}

/// Where a skipped record came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordSource {
    Tournament { tournament: String, team: String },
    TestOff { test_off: String },
}

/// A historical record which could not be used and has been ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub source: RecordSource,
    pub event: String,
    pub reason: String,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            RecordSource::Tournament { tournament, team } => write!(
                f,
                "tournament {tournament}, team {team}, event {}: {}",
                self.event, self.reason
            ),
            RecordSource::TestOff { test_off } => write!(
                f,
                "test-off {test_off}, event {}: {}",
                self.event, self.reason
            ),
        }
    }
}
