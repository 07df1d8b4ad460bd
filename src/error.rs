//! Error types for parsing, expansion and context construction.
//!
//! [`ParseFailure`] is produced by the markup grammar and carries the label of the
//! construct the parser expected. [`ExpandError`] wraps everything that can abort
//! a single expansion. [`ConfigError`] is raised once, while an
//! [`ExpansionContext`](crate::context::ExpansionContext) is being built.

/// Result type alias for expansion operations.
pub type Result<T> = std::result::Result<T, ExpandError>;

/// A failed parse, labelled with the construct that was expected.
///
/// A failure is `committed` once the parser consumed an operator or an opening
/// bracket: ordered alternatives only fall through on uncommitted failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}")]
pub struct ParseFailure {
    pub expected: String,
    pub committed: bool,
}

impl ParseFailure {
    /// An uncommitted failure: the next alternative may still match.
    pub fn soft(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            committed: false,
        }
    }

    /// A committed failure: aborts the whole parse.
    pub fn hard(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            committed: true,
        }
    }

    /// Promote this failure to a committed one, keeping the label.
    pub fn commit(mut self) -> Self {
        self.committed = true;
        self
    }
}

/// Errors that abort one expansion call. The caller sees no partial output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpandError {
    /// The abbreviation did not match the grammar.
    #[error("parse error: {0}")]
    Parse(#[from] ParseFailure),

    /// A `|name` suffix named a filter that does not exist.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// A markup renderer was asked to run on already-rendered text.
    #[error("filter '{0}' must be the first stage of the chain")]
    FilterOrder(String),

    /// Nesting depth or generated node count went over the configured limit.
    #[error("{what} limit of {limit} exceeded")]
    LimitExceeded { what: &'static str, limit: usize },

    /// The CSS abbreviation could not be split into expressions.
    #[error("invalid CSS abbreviation: {0}")]
    InvalidCss(String),
}

impl ExpandError {
    pub fn limit(what: &'static str, limit: usize) -> Self {
        Self::LimitExceeded { what, limit }
    }
}

/// Contract violations detected while building an expansion context.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A lookup table the expander depends on was never supplied.
    #[error("required table '{0}' was not supplied")]
    MissingTable(&'static str),

    /// A default filter list names something that cannot start a chain.
    #[error("invalid default filter list: {0}")]
    InvalidDefaultFilter(String),

    /// Settings files could not be read or deserialized.
    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_display_names_expected_construct() {
        let failure = ParseFailure::soft("a tag name");
        assert_eq!(failure.to_string(), "expected a tag name");
        assert!(!failure.committed);
        assert!(failure.commit().committed);
    }

    #[test]
    fn expand_error_wraps_parse_failure() {
        let err: ExpandError = ParseFailure::hard("`)`").into();
        assert_eq!(err.to_string(), "parse error: expected `)`");
    }
}
