//! Address derivation for one grant: a multisig vesting account that owns a
//! vault holding the grant.

use codec::Encode;
use tracing::debug;
use vaultgen_core::error::VaultgenError;
use vaultgen_core::templates::{VAULT_TEMPLATE, VESTING_TEMPLATE};
use vaultgen_core::types::{Address, Amount, LayerId, PublicKey};
use vaultgen_crypto::{compute_principal, AddressCodec};
use vaultgen_vault::{Vault, VestingSchedule};

use crate::record::ValidatedGrant;

/// Spawn arguments of a multisig (and vesting) account. Key order is part of
/// the address.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub struct MultisigSpawnArgs {
    #[codec(compact)]
    pub required: u8,
    pub public_keys: Vec<PublicKey>,
}

/// Both accounts derived for one grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedAccounts {
    pub template: Address,
    pub vesting: Address,
    pub vault: Address,
    pub amount_initial: Amount,
    pub amount_total: Amount,
    pub vest_start: LayerId,
    pub vest_end: LayerId,
}

/// `DerivedAccounts` with every address rendered under the deriver's prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedAccounts {
    pub template: String,
    pub vesting: String,
    pub vault: String,
}

/// Derives vesting and vault addresses under one network prefix and one
/// vesting schedule.
#[derive(Clone, Debug)]
pub struct AccountDeriver {
    codec: AddressCodec,
    schedule: VestingSchedule,
}

impl AccountDeriver {
    pub fn new(codec: AddressCodec, schedule: VestingSchedule) -> Self {
        Self { codec, schedule }
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    pub fn schedule(&self) -> &VestingSchedule {
        &self.schedule
    }

    /// Derive both accounts. Total over its inputs; never fails.
    pub fn derive(&self, keys: &[PublicKey], threshold: u8, total: Amount) -> DerivedAccounts {
        let vesting_args = MultisigSpawnArgs {
            required: threshold,
            public_keys: keys.to_vec(),
        };
        let vesting = compute_principal(&VESTING_TEMPLATE, &vesting_args);

        let vault = Vault::new(vesting, total, self.schedule);
        let vault_address = compute_principal(&VAULT_TEMPLATE, &vault.spawn_args());

        DerivedAccounts {
            template: VESTING_TEMPLATE,
            vesting,
            vault: vault_address,
            amount_initial: vault.initial,
            amount_total: vault.total,
            vest_start: self.schedule.start,
            vest_end: self.schedule.end,
        }
    }

    pub fn derive_grant(&self, grant: &ValidatedGrant) -> DerivedAccounts {
        self.derive(&grant.keys, grant.threshold, grant.amount_base)
    }

    pub fn render(&self, accounts: &DerivedAccounts) -> Result<RenderedAccounts, VaultgenError> {
        Ok(RenderedAccounts {
            template: self.codec.encode(&accounts.template)?,
            vesting: self.codec.encode(&accounts.vesting)?,
            vault: self.codec.encode(&accounts.vault)?,
        })
    }

    /// Log what was derived from which keys.
    pub fn trace(&self, line: u64, keys: &[PublicKey], rendered: &RenderedAccounts) {
        debug!(line, vesting = %rendered.vesting, vault = %rendered.vault, "derived accounts");
        for (index, key) in keys.iter().enumerate() {
            debug!(line, index, key = %key, "public key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use vaultgen_core::constants::{MAINNET_HRP, ONE_SMESH, TESTNET_HRP};

    fn key(seed: u8) -> PublicKey {
        let sk = SigningKey::from_bytes(&[seed; 32]);
        PublicKey::from_bytes(sk.verifying_key().to_bytes())
    }

    fn deriver(prefix: &str) -> AccountDeriver {
        AccountDeriver::new(
            AddressCodec::new(prefix).unwrap(),
            VestingSchedule::default(),
        )
    }

    #[test]
    fn derivation_is_deterministic() {
        let d = deriver(MAINNET_HRP);
        let keys = [key(1), key(2)];
        assert_eq!(d.derive(&keys, 2, 1_000), d.derive(&keys, 2, 1_000));
    }

    #[test]
    fn key_order_changes_vesting_address() {
        let d = deriver(MAINNET_HRP);
        let a = d.derive(&[key(1), key(2)], 2, 1_000);
        let b = d.derive(&[key(2), key(1)], 2, 1_000);
        assert_ne!(a.vesting, b.vesting);
        assert_ne!(a.vault, b.vault);
    }

    #[test]
    fn threshold_changes_vesting_address() {
        let d = deriver(MAINNET_HRP);
        let keys = [key(1), key(2)];
        assert_ne!(d.derive(&keys, 1, 1_000).vesting, d.derive(&keys, 2, 1_000).vesting);
    }

    #[test]
    fn vesting_address_ignores_amount() {
        let d = deriver(MAINNET_HRP);
        let keys = [key(1)];
        let a = d.derive(&keys, 1, 1_000);
        let b = d.derive(&keys, 1, 2_000);
        assert_eq!(a.vesting, b.vesting);
        assert_ne!(a.vault, b.vault);
    }

    #[test]
    fn vault_depends_on_schedule() {
        let keys = [key(1)];
        let a = deriver(MAINNET_HRP).derive(&keys, 1, 1_000);
        let other = AccountDeriver::new(
            AddressCodec::new(MAINNET_HRP).unwrap(),
            VestingSchedule::new(LayerId::new(1), LayerId::new(2)).unwrap(),
        );
        let b = other.derive(&keys, 1, 1_000);
        assert_eq!(a.vesting, b.vesting);
        assert_ne!(a.vault, b.vault);
    }

    #[test]
    fn vault_depends_on_owner_and_initial_unlock() {
        let schedule = VestingSchedule::default();
        let owner = compute_principal(
            &VESTING_TEMPLATE,
            &MultisigSpawnArgs {
                required: 1,
                public_keys: vec![key(1)],
            },
        );
        let base = Vault::new(owner, 1_000, schedule);
        let mut other_initial = base.clone();
        other_initial.initial += 1;
        let mut other_owner = base.clone();
        other_owner.owner = Address::from_bytes([9; 24]);

        let addr = |v: &Vault| compute_principal(&VAULT_TEMPLATE, &v.spawn_args());
        assert_eq!(addr(&base), deriver(MAINNET_HRP).derive(&[key(1)], 1, 1_000).vault);
        assert_ne!(addr(&base), addr(&other_initial));
        assert_ne!(addr(&base), addr(&other_owner));
    }

    #[test]
    fn split_and_schedule_are_reported() {
        let d = deriver(MAINNET_HRP);
        let out = d.derive(&[key(1)], 1, 1_000 * ONE_SMESH);
        assert_eq!(out.amount_total, 1_000 * ONE_SMESH);
        assert_eq!(out.amount_initial, 250 * ONE_SMESH);
        assert_eq!(out.vest_start, VestingSchedule::default().start);
        assert_eq!(out.vest_end, VestingSchedule::default().end);
        assert_eq!(out.template, VESTING_TEMPLATE);
    }

    #[test]
    fn zero_total_is_legal() {
        let out = deriver(MAINNET_HRP).derive(&[key(1)], 1, 0);
        assert_eq!(out.amount_initial, 0);
    }

    #[test]
    fn prefixes_render_independently() {
        let main = deriver(MAINNET_HRP);
        let test = deriver(TESTNET_HRP);
        let keys = [key(1)];
        let a = main.derive(&keys, 1, 5);
        let b = test.derive(&keys, 1, 5);
        assert_eq!(a, b);
        let ra = main.render(&a).unwrap();
        let rb = test.render(&b).unwrap();
        assert!(ra.vesting.starts_with("sm1"));
        assert!(rb.vesting.starts_with("stest1"));
        assert_eq!(main.codec().decode(&ra.vault).unwrap(), a.vault);
    }

    #[test]
    fn multisig_args_encode_keys_in_order() {
        let args = MultisigSpawnArgs {
            required: 2,
            public_keys: vec![key(1), key(2)],
        };
        let bytes = args.encode();
        // compact(2), compact(len = 2), then the raw keys
        assert_eq!(bytes.len(), 1 + 1 + 64);
        assert_eq!(bytes[0], 2 << 2);
        assert_eq!(bytes[1], 2 << 2);
        assert_eq!(&bytes[2..34], key(1).as_bytes());
    }
}
