use codec::Encode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{ADDRESS_LENGTH, ADDRESS_RESERVED_SPACE, PUBLIC_KEY_SIZE};

/// Amount in smidge (1 SMH = 1_000_000_000 smidge).
pub type Amount = u64;

// ── Address ──────────────────────────────────────────────────────────────────

/// 24-byte account address: 4 reserved zero bytes followed by 20 bytes of
/// a principal hash. Templates use the same shape with a small tag in the
/// last byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn from_bytes(b: [u8; ADDRESS_LENGTH]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Build an address from the trailing bytes of a digest.
    pub fn from_digest_tail(digest: &[u8]) -> Self {
        let tail = ADDRESS_LENGTH - ADDRESS_RESERVED_SPACE;
        let mut arr = [0u8; ADDRESS_LENGTH];
        let start = digest.len().saturating_sub(tail);
        arr[ADDRESS_LENGTH - (digest.len() - start)..].copy_from_slice(&digest[start..]);
        Self(arr)
    }

    /// Template address: all zero except `tag` in the last byte.
    pub const fn template(tag: u8) -> Self {
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr[ADDRESS_LENGTH - 1] = tag;
        Self(arr)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

// ── PublicKey ────────────────────────────────────────────────────────────────

/// Raw ed25519 public key. Only the width is checked; the point itself is
/// never decompressed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Encode)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub fn from_bytes(b: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}…)", &self.to_hex()[..16])
    }
}

// ── LayerId ──────────────────────────────────────────────────────────────────

/// Index of a layer, the chain's unit of time. Treated as an opaque ordinal.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug,
)]
#[serde(transparent)]
pub struct LayerId(pub u32);

impl LayerId {
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LayerId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
