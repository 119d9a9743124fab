//! Credential pair parsing and constant-time secret comparison.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Delimiter between identity and secret in a credential pair.
pub const PAIR_DELIMITER: char = ':';

/// Split a credential pair into `(identity, secret)` on the first delimiter
/// occurrence only. Returns `None` when the delimiter is absent.
#[inline]
pub fn split_pair(pair: &str) -> Option<(&str, &str)> {
    pair.split_once(PAIR_DELIMITER)
}

/// Compare a presented secret against the stored one in constant time.
///
/// Both sides are reduced to fixed-width SHA-256 digests before comparison,
/// so the cost depends neither on where the first mismatching byte occurs
/// nor on the length relationship between the two inputs.
pub fn secret_eq(presented: &str, stored: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let stored = Sha256::digest(stored.as_bytes());
    presented.as_slice().ct_eq(stored.as_slice()).into()
}
