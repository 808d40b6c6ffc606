use codec::Encode;
use vaultgen_core::types::Address;

/// Compute BLAKE3 hash of arbitrary bytes → 32-byte array.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Derive the address of an account spawned from `template` with `args`.
///
/// address = 0x00000000 || BLAKE3(scale(template) || scale(args))[12..32]
pub fn compute_principal<A: Encode>(template: &Address, args: &A) -> Address {
    let mut hasher = blake3::Hasher::new();
    template.using_encoded(|bytes| hasher.update(bytes));
    args.using_encoded(|bytes| hasher.update(bytes));
    Address::from_digest_tail(hasher.finalize().as_bytes())
}
