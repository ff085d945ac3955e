//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use mongodb_uri::prelude::*;
//!
//! let cs = ConnectionString::parse("mongodb://localhost").unwrap();
//! assert_eq!(cs.hosts()[0].port(), Some(DEFAULT_PORT));
//! assert_eq!(ESCAPE_CHAR, '\\');
//! ```

pub use crate::{
    // Core types
    AddressFamily, ConnectionString, Credentials, HostEntry, OptionValue, Options,
    ReadPreferenceTagSets, TagSet,
    // Write concern
    Acknowledgment, WriteConcern,
    // Errors
    ParseError, ParseErrorKind,
    // Constants
    DEFAULT_PORT, ESCAPE_CHAR, SCHEME, SCHEME_PREFIX, SOCKET_SUFFIX,
};
