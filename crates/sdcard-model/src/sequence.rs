use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Call, Level, Metadata, SequenceId};

/// One complete sequence as exported by the calling program, plus the
/// metadata the user has attached to it since.
///
/// Everything except `metadata` is fixed at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: SequenceId,
    /// Transcript timestamp. Two sequences with the same date are the same import.
    pub date: NaiveDateTime,
    pub version: String,
    pub level: Level,
    pub comment: String,
    pub calls: Vec<Call>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl Sequence {
    /// Stand-in date for a header whose timestamp could not be read.
    pub const UNKNOWN_DATE: NaiveDateTime = NaiveDateTime::UNIX_EPOCH;

    /// False when `date` is the [`Sequence::UNKNOWN_DATE`] stand-in.
    pub fn has_known_date(&self) -> bool {
        self.date != Self::UNKNOWN_DATE
    }

    pub fn warning_count(&self) -> usize {
        self.calls.iter().map(|call| call.warnings.len()).sum()
    }

    pub fn has_rotated_formation(&self) -> bool {
        self.calls.iter().any(|call| call.rotated45)
    }
}
