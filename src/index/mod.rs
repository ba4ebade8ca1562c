pub mod document;
pub mod inverted;
pub mod posting;
pub mod store;

/// Encode a POSIX timestamp so that lexicographic order on the
/// encoding equals numeric order on the timestamp, including pre-epoch
/// values: the i64 is sign-bit-flipped and rendered as 16 hex digits.
pub fn sortable_timestamp(secs: i64) -> String {
    format!("{:016x}", (secs as u64) ^ (1u64 << 63))
}

/// Inverse of [`sortable_timestamp`]. Returns `None` for strings that
/// are not a 16-digit encoding.
pub fn parse_sortable_timestamp(encoded: &str) -> Option<i64> {
    if encoded.len() != 16 {
        return None;
    }
    let bits = u64::from_str_radix(encoded, 16).ok()?;
    Some((bits ^ (1u64 << 63)) as i64)
}
