use codec::Encode;
use vaultgen_core::types::{Address, Amount, LayerId};

use crate::schedule::{initial_unlock, VestingSchedule};

/// Spawn arguments of a vault account. The field order and compact integer
/// encoding are part of the address derivation and must not change.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub struct VaultSpawnArgs {
    pub owner: Address,
    #[codec(compact)]
    pub total_amount: u64,
    #[codec(compact)]
    pub initial_unlock_amount: u64,
    #[codec(compact)]
    pub vesting_start: u32,
    #[codec(compact)]
    pub vesting_end: u32,
}

/// A vault holding `total` for `owner`, unlocking on `schedule`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vault {
    pub owner: Address,
    pub total: Amount,
    pub initial: Amount,
    pub schedule: VestingSchedule,
}

impl Vault {
    /// Build a vault with the standard initial unlock split.
    pub fn new(owner: Address, total: Amount, schedule: VestingSchedule) -> Self {
        Self {
            owner,
            total,
            initial: initial_unlock(total),
            schedule,
        }
    }

    pub fn spawn_args(&self) -> VaultSpawnArgs {
        VaultSpawnArgs {
            owner: self.owner,
            total_amount: self.total,
            initial_unlock_amount: self.initial,
            vesting_start: self.schedule.start.get(),
            vesting_end: self.schedule.end.get(),
        }
    }

    /// Amount the owner may have drained by `layer`.
    ///
    /// Nothing before the start. The initial unlock becomes available at
    /// the start and the remainder then grows linearly until the end.
    pub fn available(&self, layer: LayerId) -> Amount {
        if layer < self.schedule.start {
            return 0;
        }
        if layer >= self.schedule.end {
            return self.total;
        }
        let vesting = self.total.saturating_sub(self.initial) as u128;
        let elapsed = (layer.get() - self.schedule.start.get()) as u128;
        let span = self.schedule.span() as u128;
        // vesting * elapsed / span < vesting, so the cast back is lossless.
        self.initial.saturating_add((vesting * elapsed / span) as u64)
    }
}
