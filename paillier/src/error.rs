#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("bit length {got} is below the minimum of {min}")]
    BitLengthTooSmall { got: u32, min: u32 },

    #[error("plaintext is outside [0, n)")]
    PlaintextOutOfRange,

    #[error("ciphertext is outside [0, n^2)")]
    CiphertextOutOfRange,

    #[error("ciphertext is not invertible modulo n^2")]
    CiphertextNotUnit,

    #[error("malformed {what}: {input:?}")]
    Parse { what: &'static str, input: String },

    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
}

impl Error {
    /// Whether the error comes from the requested parameters rather than the data.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::BitLengthTooSmall { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
