//! Row validation: amount parsing, unit conversion, and key decoding.

use tracing::warn;
use vaultgen_core::constants::PUBLIC_KEY_SIZE;
use vaultgen_core::error::{KeyRejection, RowRejection, VaultgenError};
use vaultgen_core::types::{Amount, PublicKey};

use crate::params::ColumnLayout;
use crate::policy::check_policy;

/// One input row, split into the fields the pipeline reads. The name column
/// is never decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantRecord<'a> {
    pub amount: &'a str,
    pub keys: Vec<&'a str>,
    pub m: &'a str,
    pub n: &'a str,
}

impl<'a> GrantRecord<'a> {
    /// Pick the grant's fields out of a raw row.
    ///
    /// Returns `None` if the row is narrower than `layout` requires, and
    /// `Some(Err(..))` if a field the pipeline reads is not UTF-8.
    pub fn from_fields(
        fields: &[&'a [u8]],
        layout: &ColumnLayout,
    ) -> Option<Result<Self, RowRejection>> {
        if fields.len() < layout.width() {
            return None;
        }
        Some(Self::decode(fields, layout))
    }

    fn decode(fields: &[&'a [u8]], layout: &ColumnLayout) -> Result<Self, RowRejection> {
        let text = |column: usize| {
            std::str::from_utf8(fields[column])
                .map_err(|_| RowRejection::InvalidEncoding { column })
        };
        Ok(Self {
            amount: text(layout.amount)?,
            keys: (layout.keys_start..layout.keys_end)
                .map(text)
                .collect::<Result<_, _>>()?,
            m: text(layout.m)?,
            n: text(layout.n)?,
        })
    }
}

/// A row that passed every check. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedGrant {
    /// Amount as entered, in SMH.
    pub amount: u64,
    /// Amount in smidge.
    pub amount_base: Amount,
    /// Keys in column order. Never empty.
    pub keys: Vec<PublicKey>,
    /// Signatures required; always the number of keys.
    pub threshold: u8,
}

/// Result of validating one row.
#[derive(Debug, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(ValidatedGrant),
    Rejected(RowRejection),
}

/// Parse a human-entered amount such as `"1,000"`.
pub fn parse_amount(raw: &str) -> Result<u64, RowRejection> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RowRejection::InvalidAmount(raw.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| RowRejection::InvalidAmount(raw.to_string()))
}

/// Convert SMH to smidge. Overflow means a corrupt input file or constant
/// and aborts the whole run.
pub fn to_base_units(amount: u64, multiplier: u64) -> Result<Amount, VaultgenError> {
    amount
        .checked_mul(multiplier)
        .ok_or(VaultgenError::AmountOverflow { amount, multiplier })
}

/// Decode one key column. A blank column yields `Ok(None)`.
pub fn decode_key(raw: &str) -> Result<Option<PublicKey>, KeyRejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let hex_str = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(hex_str).map_err(|e| KeyRejection::InvalidHex(e.to_string()))?;
    let arr: [u8; PUBLIC_KEY_SIZE] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyRejection::InvalidLength {
                expected: PUBLIC_KEY_SIZE,
                got: bytes.len(),
            })?;
    Ok(Some(PublicKey::from_bytes(arr)))
}

/// Decode every key column, skipping blanks. Bad keys are returned with
/// their offset in the key slice instead of failing the row.
pub fn decode_keys(raw: &[&str]) -> (Vec<PublicKey>, Vec<(usize, KeyRejection)>) {
    let mut keys = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();
    for (i, field) in raw.iter().enumerate() {
        match decode_key(field) {
            Ok(Some(key)) => keys.push(key),
            Ok(None) => {}
            Err(e) => rejected.push((i, e)),
        }
    }
    (keys, rejected)
}

/// Validate one row.
///
/// Row-level problems come back as `RowOutcome::Rejected`; only an amount
/// that overflows on unit conversion is an `Err`.
pub fn validate(
    record: &GrantRecord<'_>,
    multiplier: u64,
    line: u64,
) -> Result<RowOutcome, VaultgenError> {
    let amount = match parse_amount(record.amount) {
        Ok(a) => a,
        Err(e) => return Ok(RowOutcome::Rejected(e)),
    };
    let amount_base = to_base_units(amount, multiplier)?;

    let (keys, bad_keys) = decode_keys(&record.keys);
    for (key_index, reason) in &bad_keys {
        warn!(line, key_index, reason = %reason, "invalid key, dropping it");
    }
    if keys.is_empty() {
        return Ok(RowOutcome::Rejected(RowRejection::NoKeys));
    }

    let threshold = match check_policy(keys.len(), record.m, record.n) {
        Ok(t) => t,
        Err(e) => return Ok(RowOutcome::Rejected(e)),
    };

    Ok(RowOutcome::Accepted(ValidatedGrant {
        amount,
        amount_base,
        keys,
        threshold,
    }))
}
