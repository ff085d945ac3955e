//! Main connection string type.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::constants::SCHEME_PREFIX;
use crate::credentials::{Credentials, parse_credentials};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::host::HostEntry;
use crate::host_list::parse_host_list;
use crate::options::{Options, parse_options};
use crate::read_preference::ReadPreferenceTagSets;
use crate::write_concern::WriteConcern;

/// A parsed and validated `mongodb://` connection string.
///
/// # Structure
///
/// ```text
/// mongodb://[username:password@]host[,host]*[/[database]][?key=value[&key=value]*]
/// ```
///
/// A host is either `hostname[:port]` or a Unix domain socket path
/// containing `.sock`.
///
/// # Examples
///
/// ```
/// use mongodb_uri::ConnectionString;
///
/// let cs = ConnectionString::parse(
///     "mongodb://app:pw@db1:27018,db2/inventory?replicaSet=rs0&readPreferenceTags=dc:ny",
/// )
/// .unwrap();
/// assert_eq!(cs.hosts().len(), 2);
/// assert_eq!(cs.hosts()[1].port(), Some(27017));
/// assert_eq!(cs.username(), Some("app"));
/// assert_eq!(cs.database(), Some("inventory"));
/// assert_eq!(cs.options().get_str("replicaset"), Some("rs0"));
/// assert_eq!(cs.read_preference_tags().len(), 1);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    /// The input, verbatim
    original: String,
    hosts: Vec<HostEntry>,
    credentials: Option<Credentials>,
    database: Option<String>,
    options: Options,
    read_preference_tags: ReadPreferenceTagSets,
}

impl ConnectionString {
    /// Parses a connection string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input does not start with "mongodb://"
    /// - A userinfo segment ending in '@' has no ':'
    /// - No host could be extracted
    /// - A host has a ':' not followed by a digit, or a port above 65535
    /// - An option segment has no '='
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match Self::parse_inner(input) {
            Ok(parsed) => {
                debug!(
                    target: "mongodb_uri::parse",
                    hosts = parsed.hosts.len(),
                    options = parsed.options.len(),
                    tag_sets = parsed.read_preference_tags.len(),
                    "parsed connection string"
                );
                Ok(parsed)
            }
            Err(kind) => {
                debug!(target: "mongodb_uri::parse", error = %kind, "rejected connection string");
                Err(kind.with_input(input))
            }
        }
    }

    /// Returns a fresh copy produced by parsing the original text again.
    ///
    /// # Errors
    ///
    /// Parsing is deterministic, so this only fails if the original text
    /// no longer parses, which cannot happen for a value built by
    /// [`Self::parse`].
    pub fn copy(&self) -> Result<Self, ParseError> {
        Self::parse(&self.original)
    }

    /// Returns the original input, exactly as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns the hosts in order of appearance.
    #[must_use]
    pub fn hosts(&self) -> &[HostEntry] {
        &self.hosts
    }

    /// Returns the credentials, if a `username:password@` prefix was given.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the username, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::username)
    }

    /// Returns the password, if present.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::password)
    }

    /// Returns the default database, if present.
    ///
    /// `mongodb://h/` has no database; `mongodb://h/?w=1` has an empty one.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the read preference tag sets.
    #[must_use]
    pub const fn read_preference_tags(&self) -> &ReadPreferenceTagSets {
        &self.read_preference_tags
    }

    /// Returns the write concern named by the options.
    #[must_use]
    pub fn write_concern(&self) -> WriteConcern {
        WriteConcern::from_options(&self.options)
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let mut cursor = Cursor::new(input);

        if !cursor.eat_str(SCHEME_PREFIX) {
            let found = input.split_once("://").map(|(scheme, _)| scheme.to_string());
            return Err(ParseErrorKind::MalformedScheme { found });
        }
        trace!(target: "mongodb_uri::parse", "stripped scheme");
        if cursor.is_at_end() {
            return Err(ParseErrorKind::EmptyHostList);
        }

        let credentials = parse_credentials(&mut cursor)?;
        if credentials.is_some() {
            trace!(target: "mongodb_uri::parse", "parsed credentials");
        }
        if cursor.is_at_end() {
            return Err(ParseErrorKind::EmptyHostList);
        }

        let hosts = parse_host_list(&mut cursor)?;

        let mut database = None;
        let mut options = Options::new();
        let mut read_preference_tags = ReadPreferenceTagSets::new();

        if cursor.eat('/') && !cursor.is_at_end() {
            let name = Self::take_database(&mut cursor);
            trace!(target: "mongodb_uri::parse", database = name, "parsed database");
            database = Some(name.to_string());
        }

        if cursor.eat('?') {
            parse_options(&mut cursor, &mut options, &mut read_preference_tags)?;
        }

        Ok(Self {
            original: input.to_string(),
            hosts,
            credentials,
            database,
            options,
            read_preference_tags,
        })
    }

    // Leaves the cursor on the '?' that ends the database name, if any.
    fn take_database<'a>(cursor: &mut Cursor<'a>) -> &'a str {
        match cursor.scan_until('?') {
            Some(name) => {
                cursor.advance(name.len());
                name
            }
            None => cursor.take_rest(),
        }
    }
}

// The original text may hold a password, so it is left out.
impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("hosts", &self.hosts)
            .field("credentials", &self.credentials)
            .field("database", &self.database)
            .field("options", &self.options)
            .field("read_preference_tags", &self.read_preference_tags)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl FromStr for ConnectionString {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ConnectionString {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl TryFrom<&str> for ConnectionString {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ConnectionString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConnectionString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
