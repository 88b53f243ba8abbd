//! Error types for the tunescribe library

use std::fmt;

/// Library error type for tunescribe operations
#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    /// Input the transpiler refuses to guess about (e.g. double-dotted durations)
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Recoverable problem found while transpiling one piece.
///
/// Input is hand-typed, so the transpiler prefers best-effort output over
/// aborting a whole catalog batch. Each skipped or patched-over token is
/// recorded here (and logged) for later manual correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A character run in a measure matched no note token and was skipped.
    MalformedToken { measure: usize, fragment: String },
    /// Duration digits did not yield a usable note length; the previous
    /// duration was kept.
    DurationParse { duration: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MalformedToken { measure, fragment } => {
                write!(f, "measure {measure}: no note token matches {fragment:?}")
            }
            Self::DurationParse { duration } => {
                write!(f, "unusable duration {duration:?}, previous duration kept")
            }
        }
    }
}
