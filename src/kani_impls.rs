//! Kani proof harnesses for the delimiter scanner and host parser.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::constants::DEFAULT_PORT;
use crate::cursor::scan_until;
use crate::HostEntry;

/// Characters that matter to the scanner, plus a filler and a multi-byte char
const SCAN_CHARS: &[char] = &['a', ':', ',', '@', '\\', '/', '?', 'é'];

/// Generate a short string over the scanner alphabet
fn arbitrary_scan_input(max_len: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max_len + 1);

    (0..len)
        .map(|_| {
            let idx: usize = kani::any();
            SCAN_CHARS[idx % SCAN_CHARS.len()]
        })
        .collect()
}

/// Generate a stop character the scanner may be asked for
fn arbitrary_stop() -> char {
    let stops = [':', ',', '@', '/', '?'];
    let idx: usize = kani::any();
    stops[idx % stops.len()]
}

/// Proof: a match is a prefix that is immediately followed by the stop char
#[kani::proof]
#[kani::unwind(6)]
fn proof_scan_match_is_prefix_before_stop() {
    let input = arbitrary_scan_input(4);
    let stop = arbitrary_stop();

    if let Some(head) = scan_until(&input, stop) {
        assert!(input.starts_with(head));
        assert_eq!(input[head.len()..].chars().next(), Some(stop));
    }
}

/// Proof: input without the stop character never matches
#[kani::proof]
#[kani::unwind(6)]
fn proof_scan_absent_stop_is_none() {
    let input = arbitrary_scan_input(4);
    let stop = arbitrary_stop();
    kani::assume(!input.contains(stop));

    assert!(scan_until(&input, stop).is_none());
}

/// Proof: an escaped stop character never ends the scan
#[kani::proof]
#[kani::unwind(8)]
fn proof_escaped_stop_is_skipped() {
    let tail = arbitrary_scan_input(3);
    let stop = arbitrary_stop();
    let input = format!("\\{stop}{tail}");

    if let Some(head) = scan_until(&input, stop) {
        assert!(head.len() >= 2);
    }
}

/// Proof: a host token without ':' or ".sock" gets the default port
#[kani::proof]
#[kani::unwind(6)]
fn proof_plain_host_uses_default_port() {
    let token = arbitrary_scan_input(4);
    kani::assume(!token.contains(':'));

    let host = HostEntry::parse(&token).expect("no port to reject");
    assert_eq!(host.port(), Some(DEFAULT_PORT));
}
