//! Host-list stage.
//!
//! Hosts are separated by ',' and the list ends at the first '/' or '?'
//! that is not part of a socket path. Socket paths may themselves contain
//! '/', so they are recognized first: a token that starts with '/' runs
//! through the first `.sock`, provided no ',' or '?' comes before it.
//!
//! A ',' only separates hosts while it is still inside the host list: the
//! text before it must not contain an unescaped '?', nor an unescaped '/'
//! unless it names a socket. Commas in the database name or in option values are left alone.

use tracing::trace;

use crate::constants::SOCKET_SUFFIX;
use crate::cursor::{Cursor, scan_until};
use crate::error::ParseErrorKind;
use crate::host::HostEntry;

/// Consumes the host list, leaving the cursor on the '/' or '?' that ends
/// it, or at end of input.
pub(crate) fn parse_host_list(cursor: &mut Cursor<'_>) -> Result<Vec<HostEntry>, ParseErrorKind> {
    let mut hosts = Vec::new();

    loop {
        if let Some(len) = socket_path_len(cursor.rest()) {
            let token = &cursor.rest()[..len];
            push_host(&mut hosts, token)?;
            cursor.advance(len);
            if cursor.eat(',') {
                continue;
            }
            return Ok(hosts);
        }

        if let Some(token) = cursor.scan_until(',').filter(|t| is_host_token(t)) {
            push_host(&mut hosts, token)?;
            cursor.advance(token.len() + ','.len_utf8());
            continue;
        }

        if let Some(token) = cursor.scan_until('/').or_else(|| cursor.scan_until('?')) {
            push_host(&mut hosts, token)?;
            cursor.advance(token.len());
            return Ok(hosts);
        }

        if !cursor.is_at_end() {
            let token = cursor.take_rest();
            push_host(&mut hosts, token)?;
            return Ok(hosts);
        }

        if hosts.is_empty() {
            return Err(ParseErrorKind::EmptyHostList);
        }
        return Ok(hosts);
    }
}

fn push_host(hosts: &mut Vec<HostEntry>, token: &str) -> Result<(), ParseErrorKind> {
    let host = HostEntry::parse(token)?;
    trace!(target: "mongodb_uri::parse", host = %host, "parsed host");
    hosts.push(host);
    Ok(())
}

fn is_host_token(token: &str) -> bool {
    scan_until(token, '?').is_none()
        && (token.contains(SOCKET_SUFFIX) || scan_until(token, '/').is_none())
}

// Length of a leading socket-path token, including the `.sock` suffix.
fn socket_path_len(rest: &str) -> Option<usize> {
    if !rest.starts_with('/') {
        return None;
    }

    let suffix_at = rest.find(SOCKET_SUFFIX)?;
    let before = &rest[..suffix_at];
    if before.contains(',') || before.contains('?') {
        return None;
    }

    Some(suffix_at + SOCKET_SUFFIX.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PORT;

    fn scan(input: &str) -> (Result<Vec<HostEntry>, ParseErrorKind>, &str) {
        let mut cursor = Cursor::new(input);
        let result = parse_host_list(&mut cursor);
        (result, cursor.rest())
    }

    fn tcp(host: &str, port: u16) -> HostEntry {
        HostEntry::Tcp {
            host: host.to_string(),
            port,
        }
    }

    fn unix(path: &str) -> HostEntry {
        HostEntry::Unix {
            path: path.to_string(),
        }
    }

    #[test]
    fn single_host_to_end() {
        let (hosts, rest) = scan("localhost");
        assert_eq!(hosts.unwrap(), vec![tcp("localhost", DEFAULT_PORT)]);
        assert_eq!(rest, "");
    }

    #[test]
    fn multiple_hosts_stop_at_slash() {
        let (hosts, rest) = scan("a:1,b:2,c/db");
        assert_eq!(hosts.unwrap(), vec![tcp("a", 1), tcp("b", 2), tcp("c", DEFAULT_PORT)]);
        assert_eq!(rest, "/db");
    }

    #[test]
    fn stops_at_question_mark() {
        let (hosts, rest) = scan("a?ssl=true");
        assert_eq!(hosts.unwrap(), vec![tcp("a", DEFAULT_PORT)]);
        assert_eq!(rest, "?ssl=true");
    }

    #[test]
    fn absolute_socket_path_with_database() {
        let (hosts, rest) = scan("/tmp/mongodb-27017.sock/admin");
        assert_eq!(hosts.unwrap(), vec![unix("/tmp/mongodb-27017.sock")]);
        assert_eq!(rest, "/admin");
    }

    #[test]
    fn socket_paths_separated_by_comma() {
        let (hosts, rest) = scan("/tmp/a.sock,/tmp/b.sock?w=1");
        assert_eq!(hosts.unwrap(), vec![unix("/tmp/a.sock"), unix("/tmp/b.sock")]);
        assert_eq!(rest, "?w=1");
    }

    #[test]
    fn socket_then_network_host() {
        let (hosts, rest) = scan("/tmp/a.sock,localhost:27018");
        assert_eq!(
            hosts.unwrap(),
            vec![unix("/tmp/a.sock"), tcp("localhost", 27018)]
        );
        assert_eq!(rest, "");
    }

    #[test]
    fn relative_sockets_split_on_comma() {
        let (hosts, rest) = scan("a.sock,b.sock/db");
        assert_eq!(hosts.unwrap(), vec![unix("a.sock"), unix("b.sock")]);
        assert_eq!(rest, "/db");
    }

    #[test]
    fn question_mark_before_sock_is_not_socket_path() {
        let (hosts, rest) = scan("/?x=a.sock");
        assert_eq!(hosts.unwrap(), vec![tcp("", DEFAULT_PORT)]);
        assert_eq!(rest, "/?x=a.sock");
    }

    #[test]
    fn trailing_comma_ends_list() {
        let (hosts, rest) = scan("a,");
        assert_eq!(hosts.unwrap(), vec![tcp("a", DEFAULT_PORT)]);
        assert_eq!(rest, "");
    }

    #[test]
    fn empty_input_fails() {
        let (hosts, _) = scan("");
        assert_eq!(hosts, Err(ParseErrorKind::EmptyHostList));
    }

    #[test]
    fn bad_port_fails_whole_list() {
        let (hosts, _) = scan("a:1,b:x");
        assert!(matches!(hosts, Err(ParseErrorKind::MalformedHost { .. })));
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let (hosts, _) = scan("a,a,b");
        assert_eq!(
            hosts.unwrap(),
            vec![tcp("a", DEFAULT_PORT), tcp("a", DEFAULT_PORT), tcp("b", DEFAULT_PORT)]
        );
    }

    #[test]
    fn comma_in_options_is_not_a_host_separator() {
        let (hosts, rest) = scan("h/?readPreferenceTags=dc:ny,rack:1");
        assert_eq!(hosts.unwrap(), vec![tcp("h", DEFAULT_PORT)]);
        assert_eq!(rest, "/?readPreferenceTags=dc:ny,rack:1");

        let (hosts, rest) = scan("h?readPreferenceTags=dc:ny,rack:1");
        assert_eq!(hosts.unwrap(), vec![tcp("h", DEFAULT_PORT)]);
        assert_eq!(rest, "?readPreferenceTags=dc:ny,rack:1");
    }

    #[test]
    fn comma_in_database_is_not_a_host_separator() {
        let (hosts, rest) = scan("a,b/my,db");
        assert_eq!(hosts.unwrap(), vec![tcp("a", DEFAULT_PORT), tcp("b", DEFAULT_PORT)]);
        assert_eq!(rest, "/my,db");
    }

    #[test]
    fn relative_socket_with_directories() {
        let (hosts, rest) = scan("run/a.sock,b");
        assert_eq!(hosts.unwrap(), vec![unix("run/a.sock"), tcp("b", DEFAULT_PORT)]);
        assert_eq!(rest, "");
    }

    #[test]
    fn escaped_slash_or_question_mark_still_splits_on_comma() {
        let (hosts, rest) = scan(r"a\/b,c");
        assert_eq!(hosts.unwrap(), vec![tcp(r"a\/b", DEFAULT_PORT), tcp("c", DEFAULT_PORT)]);
        assert_eq!(rest, "");

        let (hosts, rest) = scan(r"a\?b,c/db");
        assert_eq!(hosts.unwrap(), vec![tcp(r"a\?b", DEFAULT_PORT), tcp("c", DEFAULT_PORT)]);
        assert_eq!(rest, "/db");
    }

    #[test]
    fn slash_preferred_over_question_mark() {
        let (hosts, rest) = scan("h?x/y");
        assert_eq!(hosts.unwrap(), vec![tcp("h?x", DEFAULT_PORT)]);
        assert_eq!(rest, "/y");
    }
}
