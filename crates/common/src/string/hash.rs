//! Hex digests and a stable string hash.
//!
//! None of these are suitable for passwords or signatures.

use sha2::{Digest, Sha256, Sha512};

use crate::error::ExtensionError;

/// Uppercase hex MD5 of the ASCII bytes of `value`; each non-ASCII char is
/// hashed as `?`.
pub(crate) fn md5_hex(value: &str) -> String {
    let bytes: Vec<u8> = value
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect();
    hex::encode_upper(md5::compute(bytes).0)
}

/// Lowercase hex SHA-256 of the UTF-16LE bytes of `value`.
pub(crate) fn sha256_hex(value: &str) -> Result<String, ExtensionError> {
    if value.is_empty() {
        return Err(ExtensionError::missing("value"));
    }
    Ok(hex::encode(Sha256::digest(utf16_le_bytes(value))))
}

/// Lowercase hex SHA-512 of the UTF-16LE bytes of `value`.
pub(crate) fn sha512_hex(value: &str) -> Result<String, ExtensionError> {
    if value.is_empty() {
        return Err(ExtensionError::missing("value"));
    }
    Ok(hex::encode(Sha512::digest(utf16_le_bytes(value))))
}

pub(crate) fn utf16_le_bytes(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Two interleaved djb2 lanes over the UTF-16 code units, combined at the end.
/// Stable across processes and platforms.
pub(crate) fn deterministic_hash(value: &str) -> i32 {
    let units: Vec<u16> = value.encode_utf16().collect();
    let seed: i32 = (5381 << 16) + 5381;
    let (mut even, mut odd) = (seed, seed);

    for pair in units.chunks(2) {
        even = (even << 5).wrapping_add(even) ^ i32::from(pair[0]);
        if let Some(&unit) = pair.get(1) {
            odd = (odd << 5).wrapping_add(odd) ^ i32::from(unit);
        }
    }

    even.wrapping_add(odd.wrapping_mul(1_566_083_941))
}
