use rug::Integer;
use sampling::Source;

use crate::error::{Error, Result};
use crate::keys::{KeyPair, PublicKey};
use crate::{l_function, pow_mod};

/// Smallest modulus size accepted by [`KeyPair::generate`].
pub const MIN_BIT_LENGTH: u32 = 128;

/// Miller-Rabin rounds for an error probability of at most `2^-certainty`.
///
/// Each round lets a composite through with probability at most `1/4`.
pub fn miller_rabin_rounds(certainty: u32) -> u32 {
    certainty.div_ceil(2).max(1)
}

impl KeyPair {
    /// Generates a key pair whose modulus `n = p * q` has `bit_length` bits
    /// (`bit_length - 1` for odd sizes).
    pub fn generate(bit_length: u32, certainty: u32, source: &mut Source) -> Result<KeyPair> {
        if bit_length < MIN_BIT_LENGTH {
            return Err(Error::BitLengthTooSmall {
                got: bit_length,
                min: MIN_BIT_LENGTH,
            });
        }

        let reps: u32 = miller_rabin_rounds(certainty);
        let prime_bits: u32 = bit_length / 2;
        tracing::debug!(bit_length, reps, "generating paillier key pair");

        let p: Integer = source.next_prime_bits(prime_bits, reps);
        let mut q: Integer = source.next_prime_bits(prime_bits, reps);
        while q == p {
            tracing::trace!("second prime equals the first, redrawing");
            q = source.next_prime_bits(prime_bits, reps);
        }

        let n: Integer = Integer::from(&p * &q);
        let n_square: Integer = Integer::from(n.square_ref());
        let p_minus_one: Integer = p - 1u32;
        let q_minus_one: Integer = q - 1u32;
        let lambda: Integer = Integer::from(p_minus_one.lcm_ref(&q_minus_one));

        let mut attempts: usize = 0;
        let (g, u) = loop {
            attempts += 1;
            let g: Integer = source.next_unit_mod(&n_square);
            let l: Integer = l_function(&pow_mod(&g, &lambda, &n_square), &n);
            // No inverse exactly when gcd(L(g^lambda mod n^2), n) != 1.
            match l.invert(&n) {
                Ok(u) => break (g, u),
                Err(_) => tracing::trace!(attempts, "generator rejected, redrawing"),
            }
        };

        let public: PublicKey = PublicKey::new(n, g, bit_length)?;
        tracing::debug!(n_bits = public.n().significant_bits(), attempts, "generated paillier key pair");
        Ok(KeyPair::from_parts(public, lambda, u))
    }
}
