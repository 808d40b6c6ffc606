//! vaultgen-genesis
//!
//! Turns a sheet of genesis grants into vesting and vault accounts.
//!
//! For each row:
//!
//! 1. `record`  — parse the amount, convert SMH to smidge, decode the keys
//! 2. `policy`  — check m/n against the keys; the threshold is the key count
//! 3. `deriver` — vesting = principal(vesting template, {threshold, keys});
//!    vault = principal(vault template, {vesting, total, total/4, start, end})
//! 4. `batch`   — write the row out, add the amount to the audit total
//!
//! After the last row the audit total is compared against the expected
//! vaulted issuance.

pub mod batch;
pub mod deriver;
pub mod params;
pub mod policy;
pub mod record;

pub use batch::{record_label, Batch, BatchSummary, OutputRow, OUTPUT_HEADER};
pub use deriver::{AccountDeriver, DerivedAccounts, MultisigSpawnArgs, RenderedAccounts};
pub use params::{BatchParams, ColumnLayout};
pub use policy::check_policy;
pub use record::{validate, GrantRecord, RowOutcome, ValidatedGrant};
