//! m-of-n consistency checks for a grant's multisig.
//!
//! The threshold that ends up in the spawn arguments is always the number of
//! keys supplied: every listed key must sign. `m` and `n` are only checked
//! for consistency with that key list.

use vaultgen_core::error::RowRejection;

/// Check the `m`/`n` fields against `key_count` and return the threshold.
///
/// - both blank: accepted, threshold = `key_count`
/// - exactly one blank: rejected
/// - both set: `n` must equal `key_count` and `1 <= m <= n`; the threshold
///   is still `key_count`
pub fn check_policy(key_count: usize, m: &str, n: &str) -> Result<u8, RowRejection> {
    let threshold =
        u8::try_from(key_count).map_err(|_| RowRejection::TooManyKeys(key_count))?;
    let (m, n) = (m.trim(), n.trim());

    match (m.is_empty(), n.is_empty()) {
        (true, true) => return Ok(threshold),
        (true, false) | (false, true) => return Err(RowRejection::IncompletePolicy),
        (false, false) => {}
    }

    let m_val = parse_small(m).ok_or_else(|| RowRejection::InvalidThreshold(m.to_string()))?;
    let n_val = parse_small(n).ok_or_else(|| RowRejection::InvalidKeyCount(n.to_string()))?;

    if usize::from(n_val) != key_count {
        return Err(RowRejection::KeyCountMismatch {
            n: n_val,
            keys: key_count,
        });
    }
    if m_val == 0 || m_val > n_val {
        return Err(RowRejection::ThresholdOutOfRange { m: m_val, n: n_val });
    }

    Ok(threshold)
}

/// Base-10 `u8`, digits only.
fn parse_small(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
