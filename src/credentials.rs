//! Credentials stage.

use std::fmt;

use crate::cursor::{Cursor, split_once_unescaped};
use crate::error::ParseErrorKind;

/// Username and password from the `username:password@` prefix.
///
/// The password may be empty. `Debug` output never shows it.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Credentials {
    username: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    password: String,
}

impl Credentials {
    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Consumes an optional `username:password@` prefix.
///
/// The '@' is searched across all remaining input, so an unescaped '@'
/// anywhere later in the string is taken as the end of the userinfo.
pub(crate) fn parse_credentials(
    cursor: &mut Cursor<'_>,
) -> Result<Option<Credentials>, ParseErrorKind> {
    let Some(userinfo) = cursor.scan_until('@') else {
        return Ok(None);
    };

    let (username, password) =
        split_once_unescaped(userinfo, ':').ok_or(ParseErrorKind::MalformedCredentials)?;

    cursor.advance(userinfo.len() + '@'.len_utf8());

    Ok(Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }))
}
