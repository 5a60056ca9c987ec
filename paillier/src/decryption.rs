use rug::Integer;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keys::{KeyPair, PublicKey};
use crate::{l_function, pow_mod};

impl KeyPair {
    /// Recovers `m = L(c^lambda mod n^2) * u mod n`.
    ///
    /// `c` must lie in `[0, n^2)` and be a unit modulo `n^2`.
    pub fn decrypt(&self, c: &Ciphertext) -> Result<Integer> {
        let public: &PublicKey = self.public();
        public.check_range(c)?;
        let c: &Integer = c.as_integer();
        if Integer::from(c.gcd_ref(public.n_square())) != 1 {
            return Err(Error::CiphertextNotUnit);
        }
        let l: Integer = l_function(&pow_mod(c, self.private().lambda(), public.n_square()), public.n());
        Ok(Integer::from(&l * self.private().u()) % public.n())
    }
}
