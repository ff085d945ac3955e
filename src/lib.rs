//! Scanner and validator for `mongodb://` connection strings.
//!
//! This crate turns a connection string into a [`ConnectionString`]: the
//! ordered host list, optional credentials, an optional default database,
//! typed options and read preference tag sets.
//!
//! # Overview
//!
//! Connection strings have the structure:
//!
//! ```text
//! mongodb://[username:password@]host[,host]*[/[database]][?key=value[&key=value]*]
//! ```
//!
//! where a host is `hostname[:port]` or a Unix domain socket path that
//! contains `.sock`.
//!
//! # Quick Start
//!
//! ```rust
//! use mongodb_uri::{ConnectionString, OptionValue};
//!
//! let cs = ConnectionString::parse(
//!     "mongodb://app:pw@/tmp/mongodb-27017.sock,db2:27018/orders?ssl=true&w=majority"
//! ).unwrap();
//!
//! assert_eq!(cs.hosts()[0].host(), "/tmp/mongodb-27017.sock");
//! assert_eq!(cs.hosts()[1].port(), Some(27018));
//! assert_eq!(cs.database(), Some("orders"));
//! assert_eq!(cs.options().get("SSL"), Some(&OptionValue::Boolean(true)));
//! ```
//!
//! # Scanning Rules
//!
//! | Stage | Ends at |
//! |-------|---------|
//! | Scheme | the literal `mongodb://` |
//! | Credentials | the first unescaped `@`, split on the first `:` |
//! | Host list | the first `/` or `?` outside a socket path |
//! | Database | the first unescaped `?` |
//! | Options | end of input, split on `&` then `=` |
//!
//! A backslash stops the next character from acting as a delimiter. The
//! backslash is kept in the parsed text; no unescaping or percent-decoding
//! is done.
//!
//! # Logging
//!
//! Parse events are emitted through [`tracing`] under the target
//! `mongodb_uri::parse`. Passwords and option values are never logged.
//!
//! # Grammar Specification
//!
//! See `grammar.abnf` at the crate root for the formal grammar.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod connection_string;
mod constants;
mod credentials;
mod cursor;
mod error;
mod host;
mod host_list;
#[cfg(kani)]
mod kani_impls;
mod options;
pub mod prelude;
mod read_preference;
mod write_concern;

pub use connection_string::ConnectionString;
pub use constants::{DEFAULT_PORT, ESCAPE_CHAR, SCHEME, SCHEME_PREFIX, SOCKET_SUFFIX};
pub use credentials::Credentials;
pub use error::{ParseError, ParseErrorKind};
pub use host::{AddressFamily, HostEntry};
pub use options::{OptionValue, Options};
pub use read_preference::{ReadPreferenceTagSets, TagSet};
pub use write_concern::{Acknowledgment, WriteConcern};
