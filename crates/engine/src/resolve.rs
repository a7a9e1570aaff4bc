use std::fmt;

use crate::model::{AbsentReason, CellKey, CellOutcome, QuerySpec};

/// Failure reported by a matching capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The matcher has no data for this kind.
    UnsupportedKind(String),
    /// Transport, timeout, unexpected shape, …
    Failed(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedKind(kind) => write!(f, "unsupported category kind: {kind}"),
            Self::Failed(msg) => write!(f, "match failed: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}

/// External capability that finds entities satisfying a query.
///
/// Result order belongs to the implementation and may differ between calls.
pub trait Matcher {
    fn find(&self, query: &QuerySpec) -> Result<Vec<String>, MatchError>;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn find(&self, query: &QuerySpec) -> Result<Vec<String>, MatchError> {
        (**self).find(query)
    }
}

/// Runs one query per cell and classifies the answer. Never fails: every
/// matcher error becomes an absent outcome for that cell only.
pub struct CellResolver<M> {
    matcher: M,
}

impl<M: Matcher> CellResolver<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn resolve(&self, key: &CellKey, query: &QuerySpec) -> CellOutcome {
        log::debug!("cell {key}: matching with {query}");
        match self.matcher.find(query) {
            Ok(ids) if ids.is_empty() => {
                log::info!("cell {key}: no candidates");
                CellOutcome::Absent(AbsentReason::NoCandidates)
            }
            Ok(ids) => CellOutcome::Matched(ids),
            Err(MatchError::UnsupportedKind(kind)) => {
                log::warn!("cell {key}: category {kind} is not supported yet");
                CellOutcome::Absent(AbsentReason::Unsupported(kind))
            }
            Err(MatchError::Failed(msg)) => {
                log::warn!("cell {key}: error when querying entities: {msg}");
                CellOutcome::Absent(AbsentReason::MatchFailed(msg))
            }
        }
    }
}
