pub mod constants;
pub mod error;
pub mod templates;
pub mod types;

pub use constants::*;
pub use error::{KeyRejection, RowRejection, VaultgenError};
pub use types::*;
