use serde::{Deserialize, Serialize};
use vaultgen_core::constants::{
    MAINNET_HRP, MAX_KEYS_PER_GRANT, ONE_SMESH, TOTAL_VAULTED, VEST_END, VEST_START,
};
use vaultgen_core::error::VaultgenError;
use vaultgen_core::types::LayerId;
use vaultgen_crypto::AddressCodec;
use vaultgen_vault::VestingSchedule;

/// Column positions of the input sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub name: usize,
    pub amount: usize,
    /// First key column.
    pub keys_start: usize,
    /// One past the last key column.
    pub keys_end: usize,
    pub m: usize,
    pub n: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: 0,
            amount: 1,
            keys_start: 2,
            keys_end: 2 + MAX_KEYS_PER_GRANT,
            m: 2 + MAX_KEYS_PER_GRANT,
            n: 3 + MAX_KEYS_PER_GRANT,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of columns a row needs.
    pub fn width(&self) -> usize {
        [self.name, self.amount, self.keys_end.saturating_sub(1), self.m, self.n]
            .into_iter()
            .max()
            .map_or(0, |last| last + 1)
    }

    pub fn validate(&self) -> Result<(), VaultgenError> {
        if self.keys_start >= self.keys_end {
            return Err(VaultgenError::InvalidParams(
                "layout must have at least one key column".into(),
            ));
        }
        let keys = self.keys_start..self.keys_end;
        let singles = [self.name, self.amount, self.m, self.n];
        if singles.iter().any(|c| keys.contains(c)) {
            return Err(VaultgenError::InvalidParams(
                "key columns overlap another column".into(),
            ));
        }
        for (i, a) in singles.iter().enumerate() {
            if singles[i + 1..].contains(a) {
                return Err(VaultgenError::InvalidParams(format!(
                    "column {a} is assigned twice"
                )));
            }
        }
        Ok(())
    }
}

/// Everything a batch run needs besides its input.
///
/// Defaults are the mainnet genesis economics; a JSON file may override any
/// subset of fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    /// Human-readable prefix of rendered addresses.
    pub network_prefix: String,
    /// Smidge per SMH.
    pub unit_multiplier: u64,
    pub vest_start: LayerId,
    pub vest_end: LayerId,
    /// Expected sum of all vault totals, in smidge.
    pub expected_total: u128,
    pub columns: ColumnLayout,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            network_prefix: MAINNET_HRP.to_string(),
            unit_multiplier: ONE_SMESH,
            vest_start: LayerId::new(VEST_START),
            vest_end: LayerId::new(VEST_END),
            expected_total: TOTAL_VAULTED,
            columns: ColumnLayout::default(),
        }
    }
}

impl BatchParams {
    pub fn validate(&self) -> Result<(), VaultgenError> {
        if self.unit_multiplier == 0 {
            return Err(VaultgenError::InvalidParams(
                "unit_multiplier must be non-zero".into(),
            ));
        }
        self.schedule()?;
        self.address_codec()?;
        self.columns.validate()
    }

    pub fn schedule(&self) -> Result<VestingSchedule, VaultgenError> {
        VestingSchedule::new(self.vest_start, self.vest_end)
    }

    pub fn address_codec(&self) -> Result<AddressCodec, VaultgenError> {
        AddressCodec::new(&self.network_prefix)
    }
}
