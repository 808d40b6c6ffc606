//! Well-known template addresses. A principal is always derived from one of
//! these plus the template's spawn arguments.

use crate::types::Address;

pub const WALLET_TEMPLATE: Address = Address::template(1);
pub const MULTISIG_TEMPLATE: Address = Address::template(2);
pub const VESTING_TEMPLATE: Address = Address::template(3);
pub const VAULT_TEMPLATE: Address = Address::template(4);
