//! Total order over parsed version tuples
//!
//! Lexicographic over the overlapping prefix of the two token tuples; when
//! the prefixes are equal, the longer tuple sorts first. A pre-release
//! build `140.0.0-nightly0` therefore precedes its release `140.0.0`, and
//! a bare lineage head `140.0` follows all of its dotted children.
//! Equivalent to padding the shorter tuple with plus-infinity components.
//! Two names compare equal only when their full token tuples are
//! identical, which keeps the sort deterministic.

use std::cmp::Ordering;

use crate::version::tokens::{ParsedVersion, VersionParser};

/// Compare two parsed versions. Strict weak ordering over their tokens;
/// the scheme tag does not participate.
pub fn compare(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    let shared = a.tokens.len().min(b.tokens.len());
    match a.tokens[..shared].cmp(&b.tokens[..shared]) {
        // equal prefix: the longer tuple comes first
        Ordering::Equal => b.tokens.len().cmp(&a.tokens.len()),
        unequal => unequal,
    }
}

/// Compare two raw version names by parsing both.
pub fn compare_names(parser: &VersionParser, a: &str, b: &str) -> Ordering {
    compare(&parser.parse(a), &parser.parse(b))
}
