#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("modulus size {0} bits is not a positive multiple of 8")]
    ModulusNotByteAligned(usize),

    #[error("modulus size {modulus_bits} bits cannot hold a {value_bits}-bit value behind the guard bits")]
    ModulusTooSmall { modulus_bits: usize, value_bits: usize },

    #[error("value {value} at index {index} does not fit in {value_bits} bits")]
    ValueTooWide { index: usize, value: u64, value_bits: usize },

    #[error("block {index} holds {got} bytes, expected {expected}")]
    BlockLength { index: usize, got: usize, expected: usize },

    #[error("block {index} has non-zero guard bits")]
    GuardBitsSet { index: usize },

    #[error("integer of {bits} bits does not fit in a {bytes}-byte block")]
    IntegerTooWide { bits: u32, bytes: usize },
}

impl Error {
    /// Whether the error comes from the packing parameters rather than the data.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::ModulusNotByteAligned(_) | Error::ModulusTooSmall { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
