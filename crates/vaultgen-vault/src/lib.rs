//! vaultgen-vault
//!
//! Vesting arithmetic for genesis vaults: the shared schedule, the initial
//! unlock split, the vault spawn arguments, and the linear unlock curve the
//! on-chain vault enforces.

pub mod schedule;
pub mod vault;

pub use schedule::{initial_unlock, VestingSchedule};
pub use vault::{Vault, VaultSpawnArgs};
