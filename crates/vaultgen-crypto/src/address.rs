use bech32::{Bech32, Hrp};
use vaultgen_core::constants::ADDRESS_LENGTH;
use vaultgen_core::error::VaultgenError;
use vaultgen_core::types::Address;

/// Renders addresses as bech32 strings under one network prefix.
///
/// Each deriver owns its codec, so several networks can be served from the
/// same process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressCodec {
    hrp: Hrp,
}

impl AddressCodec {
    /// Build a codec for `prefix` (e.g. `"sm"` or `"stest"`).
    pub fn new(prefix: &str) -> Result<Self, VaultgenError> {
        let hrp = Hrp::parse(prefix).map_err(|e| VaultgenError::InvalidNetworkPrefix {
            prefix: prefix.to_string(),
            reason: e.to_string(),
        })?;
        if prefix.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(VaultgenError::InvalidNetworkPrefix {
                prefix: prefix.to_string(),
                reason: "must be lowercase".into(),
            });
        }
        Ok(Self { hrp })
    }

    pub fn prefix(&self) -> &str {
        self.hrp.as_str()
    }

    pub fn encode(&self, address: &Address) -> Result<String, VaultgenError> {
        bech32::encode::<Bech32>(self.hrp, address.as_bytes())
            .map_err(|e| VaultgenError::AddressEncoding(e.to_string()))
    }

    /// Parse a bech32 address, requiring it to carry this codec's prefix.
    pub fn decode(&self, s: &str) -> Result<Address, VaultgenError> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| VaultgenError::AddressEncoding(e.to_string()))?;
        if hrp != self.hrp {
            return Err(VaultgenError::AddressEncoding(format!(
                "wrong network prefix {}, expected {}",
                hrp.as_str(),
                self.hrp.as_str()
            )));
        }
        let bytes: [u8; ADDRESS_LENGTH] = data.as_slice().try_into().map_err(|_| {
            VaultgenError::AddressEncoding(format!(
                "expected {ADDRESS_LENGTH} bytes, got {}",
                data.len()
            ))
        })?;
        Ok(Address::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultgen_core::constants::{MAINNET_HRP, TESTNET_HRP};
    use vaultgen_core::templates::VESTING_TEMPLATE;

    #[test]
    fn encodes_with_prefix() {
        let codec = AddressCodec::new(MAINNET_HRP).unwrap();
        let s = codec.encode(&VESTING_TEMPLATE).unwrap();
        assert!(s.starts_with("sm1"), "{s}");
        assert_eq!(codec.decode(&s).unwrap(), VESTING_TEMPLATE);
    }

    #[test]
    fn prefixes_are_independent() {
        let main = AddressCodec::new(MAINNET_HRP).unwrap();
        let test = AddressCodec::new(TESTNET_HRP).unwrap();
        let a = main.encode(&VESTING_TEMPLATE).unwrap();
        let b = test.encode(&VESTING_TEMPLATE).unwrap();
        assert_ne!(a, b);
        assert!(b.starts_with("stest1"));
        assert!(main.decode(&b).is_err());
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(AddressCodec::new("").is_err());
        assert!(AddressCodec::new("SM").is_err());
    }
}
