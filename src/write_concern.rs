//! Write concern derived from connection string options.

use std::fmt;

use crate::options::{OptionValue, Options};

/// The `w` level a write must reach before it is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Acknowledgment {
    /// Number of nodes; 0 is unacknowledged and negative values are kept as given
    Nodes(i32),
    /// The majority of voting nodes
    Majority,
    /// A custom write concern tag name
    Custom(String),
}

impl From<&str> for Acknowledgment {
    fn from(s: &str) -> Self {
        if s == "majority" {
            Self::Majority
        } else {
            Self::Custom(s.to_string())
        }
    }
}

impl fmt::Display for Acknowledgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes(n) => write!(f, "{n}"),
            Self::Majority => write!(f, "majority"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Write concern settings named by the `w`, `journal` and `wtimeoutMS`
/// options. Options that were not given are `None`.
///
/// # Examples
///
/// ```
/// use mongodb_uri::{Acknowledgment, ConnectionString};
///
/// let cs = ConnectionString::parse("mongodb://h/?w=majority&journal=true&wtimeoutMS=500").unwrap();
/// let wc = cs.write_concern();
/// assert_eq!(wc.w, Some(Acknowledgment::Majority));
/// assert_eq!(wc.journal, Some(true));
/// assert_eq!(wc.w_timeout_ms, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteConcern {
    /// Acknowledgment level
    pub w: Option<Acknowledgment>,
    /// Whether writes must reach the on-disk journal
    pub journal: Option<bool>,
    /// Acknowledgment time limit in milliseconds
    pub w_timeout_ms: Option<i32>,
}

impl WriteConcern {
    /// Returns true if no write concern option was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w.is_none() && self.journal.is_none() && self.w_timeout_ms.is_none()
    }

    pub(crate) fn from_options(options: &Options) -> Self {
        let w = options.get("w").map(|value| match value {
            OptionValue::Int32(n) => Acknowledgment::Nodes(*n),
            OptionValue::String(s) => Acknowledgment::from(s.as_str()),
            OptionValue::Boolean(b) => Acknowledgment::Nodes(i32::from(*b)),
        });

        Self {
            w,
            journal: options.get_bool("journal"),
            w_timeout_ms: options.get_i32("wtimeoutms"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConnectionString;

    fn write_concern(input: &str) -> WriteConcern {
        ConnectionString::parse(input).unwrap().write_concern()
    }

    #[test]
    fn empty_without_options() {
        assert!(write_concern("mongodb://h").is_empty());
    }

    #[test]
    fn numeric_w() {
        let wc = write_concern("mongodb://h/?w=2");
        assert_eq!(wc.w, Some(Acknowledgment::Nodes(2)));
        assert!(wc.journal.is_none());
    }

    #[test]
    fn named_w() {
        assert_eq!(
            write_concern("mongodb://h/?w=majority").w,
            Some(Acknowledgment::Majority)
        );
        assert_eq!(
            write_concern("mongodb://h/?w=dcTagged").w,
            Some(Acknowledgment::Custom("dcTagged".to_string()))
        );
    }

    #[test]
    fn journal_and_timeout() {
        let wc = write_concern("mongodb://h/?journal=false&wtimeoutMS=100");
        assert_eq!(wc.journal, Some(false));
        assert_eq!(wc.w_timeout_ms, Some(100));
        assert!(wc.w.is_none());
    }

    #[test]
    fn acknowledgment_display() {
        assert_eq!(Acknowledgment::Nodes(-1).to_string(), "-1");
        assert_eq!(Acknowledgment::Majority.to_string(), "majority");
    }
}
