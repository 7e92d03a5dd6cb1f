//! All kinds of errors in this crate.

use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// The engines themselves never fail: out-of-range coordinates are clipped.
/// Errors only come from building an engine out of a [`Config`](crate::Config).
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Width / height should be positive.
    NonPositiveError,
    /// The grid is too large: {0} × {1} cells.
    TooLargeError(i32, i32),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// B0 rules are not supported: dead regions would have to be rescanned every generation.
    B0Error,
    /// Unknown engine: {0:?}.
    UnknownEngine(String),
    /// Unknown pattern: {0:?}.
    UnknownPattern(String),
}
