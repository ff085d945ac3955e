//! Host entries named by a connection string.
//!
//! # Grammar Reference
//!
//! ```abnf
//! host        = socket-path / hostname [ ":" port ]
//! socket-path = *CHAR ".sock" *CHAR
//! port        = 1*DIGIT *CHAR
//! ```
//!
//! A token is a socket path as soon as it contains `.sock` anywhere.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_PORT, SOCKET_SUFFIX};
use crate::cursor::split_once_unescaped;
use crate::error::ParseErrorKind;

/// The address family a host entry connects over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AddressFamily {
    /// TCP over IPv4 or IPv6
    Inet,
    /// Unix domain socket
    Unix,
}

/// One server named in the host list.
///
/// # Examples
///
/// ```
/// use mongodb_uri::{AddressFamily, HostEntry};
///
/// let host = HostEntry::parse("db1.example.com:27018").unwrap();
/// assert_eq!(host.host(), "db1.example.com");
/// assert_eq!(host.port(), Some(27018));
///
/// let socket = HostEntry::parse("/tmp/mongodb-27017.sock").unwrap();
/// assert_eq!(socket.family(), AddressFamily::Unix);
/// assert!(socket.port().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum HostEntry {
    /// A network host, always carrying a port
    Tcp {
        /// Host name or address, exactly as written
        host: String,
        /// Explicit port, or [`DEFAULT_PORT`]
        port: u16,
    },
    /// A Unix domain socket path
    Unix {
        /// Socket path, exactly as written
        path: String,
    },
}

impl HostEntry {
    /// Parses a single host token.
    ///
    /// # Errors
    ///
    /// Returns `ParseErrorKind::MalformedHost` if:
    /// - A ':' is not followed by a decimal digit
    /// - The port does not fit in 16 bits
    pub fn parse(token: &str) -> Result<Self, ParseErrorKind> {
        if token.contains(SOCKET_SUFFIX) {
            return Ok(Self::Unix {
                path: token.to_string(),
            });
        }

        let Some((host, port_str)) = split_once_unescaped(token, ':') else {
            return Ok(Self::Tcp {
                host: token.to_string(),
                port: DEFAULT_PORT,
            });
        };

        let port = Self::parse_port(port_str).map_err(|reason| ParseErrorKind::MalformedHost {
            host: token.to_string(),
            reason,
        })?;

        Ok(Self::Tcp {
            host: host.to_string(),
            port,
        })
    }

    /// Returns the host name for network hosts, or the path for sockets.
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::Tcp { host, .. } => host,
            Self::Unix { path } => path,
        }
    }

    /// Returns the port; socket entries have none.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        match self {
            Self::Tcp { port, .. } => Some(*port),
            Self::Unix { .. } => None,
        }
    }

    /// Returns the address family.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        match self {
            Self::Tcp { .. } => AddressFamily::Inet,
            Self::Unix { .. } => AddressFamily::Unix,
        }
    }

    /// Returns true if this entry names a Unix domain socket.
    #[must_use]
    pub const fn is_unix_socket(&self) -> bool {
        matches!(self, Self::Unix { .. })
    }

    /// Returns `host:port` for network hosts, or the bare path for sockets.
    #[must_use]
    pub fn host_and_port(&self) -> String {
        self.to_string()
    }

    // Reads the leading digits only; anything after them is ignored.
    fn parse_port(input: &str) -> Result<u16, &'static str> {
        let digits_len = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());

        if digits_len == 0 {
            return Err("port must start with a digit");
        }

        input[..digits_len]
            .parse()
            .map_err(|_| "port must be 0-65535")
    }
}

impl fmt::Display for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "{host}:{port}"),
            Self::Unix { path } => write!(f, "{path}"),
        }
    }
}

impl FromStr for HostEntry {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
