//! Constants for connection string scanning.

/// The URI scheme.
pub const SCHEME: &str = "mongodb";

/// The literal prefix every connection string must start with.
pub const SCHEME_PREFIX: &str = "mongodb://";

/// Port assigned to network hosts that do not name one.
pub const DEFAULT_PORT: u16 = 27017;

/// Marker that turns a host token into a Unix domain socket path.
pub const SOCKET_SUFFIX: &str = ".sock";

/// Character that shields the following character from delimiter matching.
pub const ESCAPE_CHAR: char = '\\';
