//! Paillier's additively homomorphic public-key cryptosystem over `rug`
//! integers.
//!
//! An encrypt-only party holds a [`PublicKey`]; the issuer holds the full
//! [`KeyPair`] and is the only one able to decrypt. All randomness is drawn
//! from a caller-supplied [`sampling::Source`].

pub mod ciphertext;
pub mod decryption;
pub mod encryption;
pub mod error;
pub mod keygen;
pub mod keys;

pub use ciphertext::Ciphertext;
pub use error::{Error, Result};
pub use keygen::{MIN_BIT_LENGTH, miller_rabin_rounds};
pub use keys::{KeyPair, PrivateKey, PublicKey};

use std::cmp::Ordering;

use rug::Integer;

/// `base^exp mod modulus`.
///
/// # Panics
///
/// If `exp` is negative. Every exponent here is a key component or a
/// plaintext that was range-checked first.
pub(crate) fn pow_mod(base: &Integer, exp: &Integer, modulus: &Integer) -> Integer {
    assert!(exp.cmp0() != Ordering::Less, "negative exponent {exp}");
    // a non-negative exponent always has a result
    Integer::from(base.pow_mod_ref(exp, modulus).expect("pow_mod with non-negative exponent"))
}

/// Paillier's `L(x) = (x - 1) / n`.
pub(crate) fn l_function(x: &Integer, n: &Integer) -> Integer {
    Integer::from(x - 1u32) / n
}
