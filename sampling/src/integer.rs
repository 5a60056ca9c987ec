use std::cmp::Ordering;

use rand_core::RngCore;
use rug::integer::{IsPrime, Order};
use rug::Integer;

use crate::source::Source;

impl Source {
    /// Returns a uniform integer in `[0, 2^bits)`.
    pub fn next_integer_bits(&mut self, bits: u32) -> Integer {
        let mut buf: Vec<u8> = vec![0u8; (bits as usize).div_ceil(8)];
        self.fill_bytes(&mut buf);
        Integer::from_digits(&buf, Order::Msf).keep_bits(bits)
    }

    /// Returns a uniform integer in `[0, bound)` by rejection sampling.
    pub fn next_integer_below(&mut self, bound: &Integer) -> Integer {
        assert!(bound.cmp0() == Ordering::Greater, "invalid bound: {} <= 0", bound);
        let bits: u32 = bound.significant_bits();
        loop {
            let x: Integer = self.next_integer_bits(bits);
            if x < *bound {
                return x;
            }
        }
    }

    /// Returns a uniform element of `Z*_m`: non-zero and coprime to `m`.
    pub fn next_unit_mod(&mut self, m: &Integer) -> Integer {
        assert!(*m > 1, "invalid modulus: {} <= 1", m);
        loop {
            let x: Integer = self.next_integer_below(m);
            if x.cmp0() == Ordering::Greater && Integer::from(x.gcd_ref(m)) == 1 {
                return x;
            }
        }
    }

    /// Returns a probable prime of exactly `bits` bits whose two leading bits
    /// are set, so the product of two such primes has exactly `2 * bits` bits.
    ///
    /// `reps` is the number of Miller-Rabin rounds run on each candidate.
    pub fn next_prime_bits(&mut self, bits: u32, reps: u32) -> Integer {
        assert!(bits >= 3, "invalid prime size: {} < 3 bits", bits);
        loop {
            let mut candidate: Integer = self.next_integer_bits(bits);
            candidate.set_bit(bits - 1, true);
            candidate.set_bit(bits - 2, true);
            candidate.set_bit(0, true);
            if candidate.is_probably_prime(reps) != IsPrime::No {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rug::integer::IsPrime;
    use rug::Integer;

    use crate::source::Source;

    #[test]
    fn integer_bits_fit() {
        let mut source: Source = Source::new([0u8; 32]);
        [1u32, 7, 8, 9, 63, 64, 65, 512].iter().for_each(|&bits| {
            (0..32).for_each(|_| {
                assert!(source.next_integer_bits(bits).significant_bits() <= bits);
            })
        });
    }

    #[test]
    fn integer_below_bound() {
        let mut source: Source = Source::new([1u8; 32]);
        let bound: Integer = Integer::from(1000);
        (0..1000).for_each(|_| {
            let x: Integer = source.next_integer_below(&bound);
            assert!(x >= 0 && x < bound);
        });
    }

    #[test]
    fn unit_is_coprime() {
        let mut source: Source = Source::new([2u8; 32]);
        let m: Integer = Integer::from(2 * 3 * 5 * 7 * 11);
        (0..200).for_each(|_| {
            let x: Integer = source.next_unit_mod(&m);
            assert!(x > 0 && x < m);
            assert_eq!(Integer::from(x.gcd_ref(&m)), 1);
        });
    }

    #[test]
    fn prime_has_requested_size() {
        let mut source: Source = Source::new([3u8; 32]);
        [16u32, 64, 128, 256].iter().for_each(|&bits| {
            let p: Integer = source.next_prime_bits(bits, 25);
            assert_eq!(p.significant_bits(), bits);
            assert!(p.get_bit(bits - 2));
            assert_ne!(p.is_probably_prime(40), IsPrime::No);
        });
    }
}
