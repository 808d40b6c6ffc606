//! Shared vesting schedule and initial unlock split.
//!
//! All genesis vaults vest on the same schedule: nothing is available before
//! `VEST_START`, where an initial `total / 4` unlocks at once, then the rest
//! unlocks linearly until `VEST_END`.

use serde::{Deserialize, Serialize};
use vaultgen_core::constants::{INITIAL_UNLOCK_DIVISOR, VEST_END, VEST_START};
use vaultgen_core::error::VaultgenError;
use vaultgen_core::types::{Amount, LayerId};

/// Vesting window, in layers. Fixed for a whole batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    pub start: LayerId,
    pub end: LayerId,
}

impl VestingSchedule {
    /// Build a schedule, rejecting an empty or inverted window.
    pub fn new(start: LayerId, end: LayerId) -> Result<Self, VaultgenError> {
        if start >= end {
            return Err(VaultgenError::InvalidSchedule {
                start: start.get(),
                end: end.get(),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of layers between start and end.
    pub fn span(&self) -> u32 {
        self.end.get() - self.start.get()
    }
}

impl Default for VestingSchedule {
    fn default() -> Self {
        Self {
            start: LayerId::new(VEST_START),
            end: LayerId::new(VEST_END),
        }
    }
}

/// Amount unlocked at vault creation: a quarter of the total, rounded down.
pub fn initial_unlock(total: Amount) -> Amount {
    total / INITIAL_UNLOCK_DIVISOR
}
