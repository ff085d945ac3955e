//! Error types for connection string parsing.

use thiserror::Error;

/// Errors that can occur when parsing a connection string.
///
/// The rejected text is kept in `input` for programmatic inspection but is
/// not part of the `Display` output, since it may carry a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse connection string: {kind}")]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Missing or invalid scheme (expected "mongodb://")
    #[error("{}", scheme_message(.found.as_deref()))]
    MalformedScheme {
        /// The scheme that was found, if any
        found: Option<String>,
    },
    /// A userinfo segment ending in '@' has no ':' separator
    #[error("credentials must be of the form 'username:password@'")]
    MalformedCredentials,
    /// No host token could be extracted
    #[error("connection string names no hosts")]
    EmptyHostList,
    /// A host token could not be parsed
    #[error("invalid host: {reason}")]
    MalformedHost {
        /// The rejected host token; left out of `Display`
        host: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// An option segment is not a `key=value` pair
    #[error("option '{segment}' is not a 'key=value' pair")]
    MalformedOption {
        /// The rejected option segment
        segment: String,
    },
}

fn scheme_message(found: Option<&str>) -> String {
    match found {
        Some(s) => format!("expected scheme 'mongodb://', found '{s}'"),
        None => "missing scheme; connection string must start with 'mongodb://'".to_string(),
    }
}

impl ParseErrorKind {
    /// Attaches the rejected input to this error kind.
    #[must_use]
    pub fn with_input(self, input: &str) -> ParseError {
        ParseError {
            input: input.to_string(),
            kind: self,
        }
    }
}
