//! Connection string options and their type coercion.
//!
//! Every option key is matched case-insensitively against a fixed coercion
//! table. Keys the table does not know are kept as strings.
//!
//! | Keys | Stored as |
//! |------|-----------|
//! | `connectTimeoutMS`, `socketTimeoutMS`, `maxPoolSize`, `minPoolSize`, `maxIdleTimeMS`, `waitQueueMultiple`, `waitQueueTimeoutMS`, `wtimeoutMS` | 32-bit integer |
//! | `w` | integer if the value starts with '-' or a digit, else string |
//! | `journal`, `slaveOk`, `ssl` | boolean, true only for the exact text `true` |
//! | `readPreferenceTags` | appended to the read preference tag sets |
//! | anything else | string |

use std::fmt;

use indexmap::IndexMap;
use tracing::trace;

use crate::cursor::{Cursor, split_once_unescaped};
use crate::error::ParseErrorKind;
use crate::read_preference::ReadPreferenceTagSets;

/// A coerced option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    /// A 32-bit integer
    Int32(i32),
    /// A boolean flag
    Boolean(bool),
    /// Any other text, verbatim
    String(String),
}

impl OptionValue {
    /// Returns the integer value, if this is one.
    #[must_use]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// How the value of a recognized option key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coercion {
    Int32,
    WriteAcknowledgment,
    Boolean,
    ReadPreferenceTags,
}

/// Recognized keys, lower-cased.
const COERCIONS: &[(&str, Coercion)] = &[
    ("connecttimeoutms", Coercion::Int32),
    ("sockettimeoutms", Coercion::Int32),
    ("maxpoolsize", Coercion::Int32),
    ("minpoolsize", Coercion::Int32),
    ("maxidletimems", Coercion::Int32),
    ("waitqueuemultiple", Coercion::Int32),
    ("waitqueuetimeoutms", Coercion::Int32),
    ("wtimeoutms", Coercion::Int32),
    ("w", Coercion::WriteAcknowledgment),
    ("journal", Coercion::Boolean),
    ("slaveok", Coercion::Boolean),
    ("ssl", Coercion::Boolean),
    ("readpreferencetags", Coercion::ReadPreferenceTags),
];

fn coercion_for(key: &str) -> Option<Coercion> {
    COERCIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coercion)| *coercion)
}

/// Options from the query part of a connection string.
///
/// Keys are stored lower-cased in order of first appearance. A repeated
/// key keeps its position and takes the later value.
///
/// # Examples
///
/// ```
/// use mongodb_uri::ConnectionString;
///
/// let cs = ConnectionString::parse("mongodb://h/?maxPoolSize=20&ssl=true&appName=svc").unwrap();
/// let options = cs.options();
/// assert_eq!(options.get_i32("MAXPOOLSIZE"), Some(20));
/// assert_eq!(options.get_bool("ssl"), Some(true));
/// assert_eq!(options.get_str("appname"), Some("svc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Options {
    values: IndexMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a key, matched case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key.to_ascii_lowercase().as_str())
    }

    /// Returns the integer value for a key, if present and an integer.
    #[must_use]
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(OptionValue::as_i32)
    }

    /// Returns the boolean value for a key, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    /// Returns the string value for a key, if present and a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the options in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, key: String, value: OptionValue) {
        self.values.insert(key, value);
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Consumes the rest of the input as '&'-separated `key=value` pairs.
pub(crate) fn parse_options(
    cursor: &mut Cursor<'_>,
    options: &mut Options,
    tag_sets: &mut ReadPreferenceTagSets,
) -> Result<(), ParseErrorKind> {
    while let Some(segment) = cursor.take_through('&') {
        apply_option(segment, options, tag_sets)?;
    }

    let last = cursor.take_rest();
    if !last.is_empty() {
        apply_option(last, options, tag_sets)?;
    }

    Ok(())
}

fn apply_option(
    segment: &str,
    options: &mut Options,
    tag_sets: &mut ReadPreferenceTagSets,
) -> Result<(), ParseErrorKind> {
    let (key, value) =
        split_once_unescaped(segment, '=').ok_or_else(|| ParseErrorKind::MalformedOption {
            segment: segment.to_string(),
        })?;

    let key = key.to_ascii_lowercase();
    let value = match coercion_for(&key) {
        Some(Coercion::Int32) => OptionValue::Int32(parse_int_lenient(value)),
        Some(Coercion::WriteAcknowledgment) => {
            if value.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
                OptionValue::Int32(parse_int_lenient(value))
            } else {
                OptionValue::String(value.to_string())
            }
        }
        // Only the exact lower-case text counts; "TRUE" is false.
        Some(Coercion::Boolean) => OptionValue::Boolean(value == "true"),
        Some(Coercion::ReadPreferenceTags) => {
            tag_sets.push_raw(value);
            return Ok(());
        }
        None => OptionValue::String(value.to_string()),
    };

    trace!(
        target: "mongodb_uri::parse",
        option = %key,
        kind = value.kind(),
        "parsed option"
    );
    options.insert(key, value);
    Ok(())
}

/// Parses a leading base-10 integer the way C's `strtol` does.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. No digits yields 0. Out-of-range values saturate at
/// `i32::MIN`/`i32::MAX` instead of wrapping to the low 32 bits.
pub(crate) fn parse_int_lenient(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }

    i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<(Options, ReadPreferenceTagSets), ParseErrorKind> {
        let mut cursor = Cursor::new(input);
        let mut options = Options::new();
        let mut tag_sets = ReadPreferenceTagSets::new();
        parse_options(&mut cursor, &mut options, &mut tag_sets)?;
        Ok((options, tag_sets))
    }

    #[test]
    fn integer_options() {
        let (options, _) = parse("connectTimeoutMS=300&maxPoolSize=50&wtimeoutMS=10").unwrap();
        assert_eq!(options.get_i32("connecttimeoutms"), Some(300));
        assert_eq!(options.get_i32("maxpoolsize"), Some(50));
        assert_eq!(options.get_i32("wtimeoutms"), Some(10));
    }

    #[test]
    fn non_numeric_integer_is_zero() {
        let (options, _) = parse("socketTimeoutMS=abc").unwrap();
        assert_eq!(options.get("sockettimeoutms"), Some(&OptionValue::Int32(0)));
    }

    #[test]
    fn w_numeric_and_named() {
        let (options, _) = parse("w=2").unwrap();
        assert_eq!(options.get_i32("w"), Some(2));

        let (options, _) = parse("w=-1").unwrap();
        assert_eq!(options.get_i32("w"), Some(-1));

        let (options, _) = parse("w=majority").unwrap();
        assert_eq!(options.get_str("w"), Some("majority"));
    }

    #[test]
    fn out_of_range_integers_saturate() {
        let (options, _) = parse("w=99999999999&maxPoolSize=-99999999999").unwrap();
        assert_eq!(options.get_i32("w"), Some(i32::MAX));
        assert_eq!(options.get_i32("maxpoolsize"), Some(i32::MIN));
    }

    #[test]
    fn boolean_requires_exact_lowercase_true() {
        let (options, _) = parse("ssl=true&journal=TRUE&slaveOk=True").unwrap();
        assert_eq!(options.get_bool("ssl"), Some(true));
        assert_eq!(options.get_bool("journal"), Some(false));
        assert_eq!(options.get_bool("slaveok"), Some(false));
    }

    #[test]
    fn boolean_key_is_case_insensitive() {
        let (options, _) = parse("SSL=true").unwrap();
        assert_eq!(options.get_bool("ssl"), Some(true));
    }

    #[test]
    fn unknown_keys_are_strings() {
        let (options, _) = parse("replicaSet=rs0&appName=My App").unwrap();
        assert_eq!(options.get_str("replicaset"), Some("rs0"));
        assert_eq!(options.get_str("APPNAME"), Some("My App"));
    }

    #[test]
    fn value_may_contain_equals() {
        let (options, _) = parse("authMechanismProperties=A=b").unwrap();
        assert_eq!(options.get_str("authmechanismproperties"), Some("A=b"));
    }

    #[test]
    fn missing_equals_fails() {
        let result = parse("ssl=true&bogus");
        assert_eq!(
            result.unwrap_err(),
            ParseErrorKind::MalformedOption {
                segment: "bogus".to_string()
            }
        );
    }

    #[test]
    fn empty_segment_fails() {
        assert!(matches!(
            parse("a=1&&b=2"),
            Err(ParseErrorKind::MalformedOption { .. })
        ));
    }

    #[test]
    fn trailing_ampersand_is_ignored() {
        let (options, _) = parse("a=1&").unwrap();
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn escaped_ampersand_stays_in_value() {
        let (options, _) = parse(r"appName=a\&b=c&x=1").unwrap();
        assert_eq!(options.get_str("appname"), Some(r"a\&b=c"));
        assert_eq!(options.get_str("x"), Some("1"));
    }

    #[test]
    fn repeated_key_last_wins_first_position() {
        let (options, _) = parse("a=1&b=2&A=3").unwrap();
        let keys: Vec<_> = options.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(options.get_str("a"), Some("3"));
    }

    #[test]
    fn read_preference_tags_are_not_options() {
        let (options, tag_sets) = parse("readPreferenceTags=dc:ny&w=1").unwrap();
        assert!(!options.contains_key("readpreferencetags"));
        assert_eq!(tag_sets.len(), 1);
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn lenient_integer_parsing() {
        assert_eq!(parse_int_lenient("42"), 42);
        assert_eq!(parse_int_lenient("  -7"), -7);
        assert_eq!(parse_int_lenient("+9"), 9);
        assert_eq!(parse_int_lenient("12ms"), 12);
        assert_eq!(parse_int_lenient(""), 0);
        assert_eq!(parse_int_lenient("-"), 0);
        assert_eq!(parse_int_lenient("99999999999"), i32::MAX);
        assert_eq!(parse_int_lenient("-99999999999"), i32::MIN);
    }
}
