pub mod address;
pub mod hash;

pub use address::AddressCodec;
pub use hash::{blake3_hash, compute_principal};
