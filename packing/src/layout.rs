use crate::error::{Error, Result};

/// Fewest leading zero bits of a block.
pub const MIN_GUARD_BITS: usize = 2;

/// Geometry of a packed plaintext block.
///
/// A block is `modulus_bits / 8` bytes: `guard_bits` leading zero bits
/// followed by `values_per_block` fields of `value_bits` bits each. The guard
/// is at least [`MIN_GUARD_BITS`] wide, so a block read as a big-endian
/// integer is below `2^(modulus_bits - 2)` and hence below any modulus of
/// `modulus_bits - 1` or `modulus_bits` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackingLayout {
    value_bits: usize,
    values_per_block: usize,
    modulus_bits: usize,
}

impl PackingLayout {
    /// Layout for counts bounded by `max_value` under a `modulus_bits` modulus.
    pub fn new(max_value: u64, modulus_bits: usize) -> Result<Self> {
        if modulus_bits == 0 || modulus_bits % 8 != 0 {
            return Err(Error::ModulusNotByteAligned(modulus_bits));
        }

        // floor(log2(max)) + 1, with a 1-bit floor for an all-zero input
        let value_bits: usize = (u64::BITS - max_value.leading_zeros()).max(1) as usize;

        // Give up trailing values until the leading slack is wide enough.
        let mut values_per_block: usize = modulus_bits / value_bits;
        while values_per_block > 0 && modulus_bits - values_per_block * value_bits < MIN_GUARD_BITS {
            values_per_block -= 1;
        }
        if values_per_block == 0 {
            return Err(Error::ModulusTooSmall { modulus_bits, value_bits });
        }

        let layout: PackingLayout = Self {
            value_bits,
            values_per_block,
            modulus_bits,
        };
        tracing::debug!(
            value_bits,
            values_per_block,
            guard_bits = layout.guard_bits(),
            modulus_bits,
            "packing layout"
        );
        Ok(layout)
    }

    pub fn value_bits(&self) -> usize {
        self.value_bits
    }

    pub fn values_per_block(&self) -> usize {
        self.values_per_block
    }

    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Leading zero bits of every block.
    pub fn guard_bits(&self) -> usize {
        self.modulus_bits - self.values_per_block * self.value_bits
    }

    pub fn block_bytes(&self) -> usize {
        self.modulus_bits / 8
    }

    /// Largest value a field can hold.
    pub fn max_value(&self) -> u64 {
        u64::MAX >> (64 - self.value_bits)
    }

    /// Number of blocks needed for `len` values.
    pub fn block_count(&self, len: usize) -> usize {
        len.div_ceil(self.values_per_block)
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_GUARD_BITS, PackingLayout};
    use crate::error::Error;

    #[test]
    fn reference_geometry() {
        // 64x64 cells under a 512-bit modulus
        let layout: PackingLayout = PackingLayout::new(4096, 512).unwrap();
        assert_eq!(layout.value_bits(), 13);
        assert_eq!(layout.values_per_block(), 39);
        assert_eq!(layout.guard_bits(), 5);
        assert_eq!(layout.block_bytes(), 64);
        assert_eq!(layout.block_count(16 * 59), 25);
        assert_eq!(layout.max_value(), 8191);
    }

    #[test]
    fn even_split_gives_up_one_value() {
        // 8-bit values divide 512 evenly: one slot becomes a whole guard byte
        let layout: PackingLayout = PackingLayout::new(255, 512).unwrap();
        assert_eq!(layout.value_bits(), 8);
        assert_eq!(layout.values_per_block(), 63);
        assert_eq!(layout.guard_bits(), 8);

        // 16-bit values: two guard bytes
        let layout: PackingLayout = PackingLayout::new(40000, 1024).unwrap();
        assert_eq!(layout.value_bits(), 16);
        assert_eq!(layout.values_per_block(), 63);
        assert_eq!(layout.guard_bits(), 16);
    }

    #[test]
    fn one_bit_slack_gives_up_one_value() {
        // 11 x 13 bits would leave a single leading bit in a 144-bit block
        let layout: PackingLayout = PackingLayout::new(4096, 144).unwrap();
        assert_eq!(layout.values_per_block(), 10);
        assert_eq!(layout.guard_bits(), 14);

        // 1-bit values: 127 would fit behind one guard bit
        let layout: PackingLayout = PackingLayout::new(1, 128).unwrap();
        assert_eq!(layout.values_per_block(), 126);
        assert_eq!(layout.guard_bits(), MIN_GUARD_BITS);
    }

    #[test]
    fn value_bits_is_bit_length_of_max() {
        [(0u64, 1usize), (1, 1), (2, 2), (3, 2), (4095, 12), (4096, 13), (u64::MAX, 64)]
            .iter()
            .for_each(|&(max, bits)| {
                assert_eq!(PackingLayout::new(max, 1024).unwrap().value_bits(), bits, "max={max}");
            });
    }

    #[test]
    fn rejects_bad_modulus() {
        assert_eq!(PackingLayout::new(10, 0), Err(Error::ModulusNotByteAligned(0)));
        assert_eq!(PackingLayout::new(10, 100), Err(Error::ModulusNotByteAligned(100)));
        assert_eq!(
            PackingLayout::new(u64::MAX, 64),
            Err(Error::ModulusTooSmall {
                modulus_bits: 64,
                value_bits: 64
            })
        );
        assert!(PackingLayout::new(u64::MAX, 64).unwrap_err().is_config());
    }
}
