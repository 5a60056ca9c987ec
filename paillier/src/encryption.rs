use std::cmp::Ordering;

use rug::Integer;
use sampling::Source;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keys::PublicKey;
use crate::pow_mod;

impl PublicKey {
    /// Encrypts `m`, which must lie in `[0, n)`, as `g^m * r^n mod n^2` for a
    /// fresh random unit `r` of `Z*_n`.
    pub fn encrypt(&self, m: &Integer, source: &mut Source) -> Result<Ciphertext> {
        if m.cmp0() == Ordering::Less || m >= self.n() {
            return Err(Error::PlaintextOutOfRange);
        }
        let r: Integer = source.next_unit_mod(self.n());
        let gm: Integer = pow_mod(self.g(), m, self.n_square());
        let rn: Integer = pow_mod(&r, self.n(), self.n_square());
        Ok(Ciphertext::new(Integer::from(&gm * &rn) % self.n_square()))
    }

    /// Homomorphic addition: the result decrypts to `m1 + m2 mod n`.
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
        self.check_range(c1)?;
        self.check_range(c2)?;
        Ok(Ciphertext::new(
            Integer::from(c1.as_integer() * c2.as_integer()) % self.n_square(),
        ))
    }

    pub(crate) fn check_range(&self, c: &Ciphertext) -> Result<()> {
        let c: &Integer = c.as_integer();
        if c.cmp0() == Ordering::Less || c >= self.n_square() {
            return Err(Error::CiphertextOutOfRange);
        }
        Ok(())
    }
}
