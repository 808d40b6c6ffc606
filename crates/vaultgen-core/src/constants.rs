/// ─── Genesis Vault Economics ────────────────────────────────────────────────
///
/// Base unit:  smidge  (1 SMH = 1,000,000,000 smidge)
/// Layer:      5 minutes, 105,120 layers per year
///
/// Every genesis vault shares one vesting schedule: nothing vests for the
/// first year, then the remainder unlocks linearly over the next three.

// ── Units ────────────────────────────────────────────────────────────────────

/// 1 SMH expressed in smidge.
pub const ONE_SMESH: u64 = 1_000_000_000;

/// Human-readable prefix of mainnet addresses.
pub const MAINNET_HRP: &str = "sm";

/// Human-readable prefix of testnet addresses.
pub const TESTNET_HRP: &str = "stest";

// ── Vesting schedule (layer indices) ─────────────────────────────────────────

/// Layers per year at 5 minutes per layer.
pub const LAYERS_PER_YEAR: u32 = 105_120;

/// First layer at which vault funds start vesting.
pub const VEST_START: u32 = LAYERS_PER_YEAR;

/// Layer at which vault funds are fully vested.
pub const VEST_END: u32 = 4 * LAYERS_PER_YEAR;

/// Divisor applied to a vault's total to get its initial unlock (25%).
pub const INITIAL_UNLOCK_DIVISOR: u64 = 4;

// ── Issuance ─────────────────────────────────────────────────────────────────

/// Total SMH placed in genesis vaults.
pub const TOTAL_VAULTED_SMH: u64 = 150_000_000;

/// Total smidge placed in genesis vaults.
pub const TOTAL_VAULTED: u128 = TOTAL_VAULTED_SMH as u128 * ONE_SMESH as u128;

// ── Multisig ─────────────────────────────────────────────────────────────────

/// Maximum number of key columns per input row.
pub const MAX_KEYS_PER_GRANT: usize = 5;

/// Width of an ed25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

// ── Addresses ────────────────────────────────────────────────────────────────

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 24;

/// Leading bytes of an address that are always zero.
pub const ADDRESS_RESERVED_SPACE: usize = 4;
