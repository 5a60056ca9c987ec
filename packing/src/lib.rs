//! Bit-packing of small non-negative counts into fixed-width plaintext blocks.
//!
//! Counts of `value_bits` bits each are written MSB first behind a run of zero
//! guard bits, so every block read as a big-endian unsigned integer stays
//! below any modulus of `modulus_bits - 1` or `modulus_bits` bits.

pub mod bits;
pub mod error;
pub mod layout;
pub mod packer;

pub use bits::{BitReader, BitWriter};
pub use error::{Error, Result};
pub use layout::{MIN_GUARD_BITS, PackingLayout};
pub use packer::{block_from_integer, block_to_integer, pack, unpack};
