use thiserror::Error;

/// Run-level failures. Any of these stops the batch.
#[derive(Debug, Error)]
pub enum VaultgenError {
    #[error("math overflow: {amount} SMH × {multiplier} does not fit in 64 bits")]
    AmountOverflow { amount: u64, multiplier: u64 },

    #[error("csv error: {0}")]
    Csv(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("address encoding failed: {0}")]
    AddressEncoding(String),

    #[error("invalid network prefix {prefix:?}: {reason}")]
    InvalidNetworkPrefix { prefix: String, reason: String },

    #[error("invalid vesting schedule: start {start} must be before end {end}")]
    InvalidSchedule { start: u32, end: u32 },

    #[error("invalid batch parameters: {0}")]
    InvalidParams(String),
}

/// Why a single input row was skipped. Never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowRejection {
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("column {column} is not valid UTF-8")]
    InvalidEncoding { column: usize },

    #[error("no valid keys")]
    NoKeys,

    #[error("only one of m or n is specified")]
    IncompletePolicy,

    #[error("invalid m {0:?}")]
    InvalidThreshold(String),

    #[error("invalid n {0:?}")]
    InvalidKeyCount(String),

    #[error("n ({n}) does not match the number of keys ({keys})")]
    KeyCountMismatch { n: u8, keys: usize },

    #[error("m ({m}) must be between 1 and n ({n})")]
    ThresholdOutOfRange { m: u8, n: u8 },

    #[error("too many keys ({0}) for a single multisig")]
    TooManyKeys(usize),
}

/// Why a single key column was dropped from an otherwise valid row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyRejection {
    #[error("not hex: {0}")]
    InvalidHex(String),

    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

impl From<std::io::Error> for VaultgenError {
    fn from(e: std::io::Error) -> Self {
        VaultgenError::Io(e.to_string())
    }
}
