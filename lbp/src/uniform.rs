use std::sync::OnceLock;

/// Number of histogram bins: 58 uniform codes plus one shared bin.
pub const BINS: usize = 59;

/// Bin shared by every non-uniform code.
pub const NON_UNIFORM_BIN: u8 = (BINS - 1) as u8;

/// Codes with at most this many transitions are uniform.
const MAX_UNIFORM_TRANSITIONS: u32 = 2;

static SHARED: OnceLock<UniformPatterns> = OnceLock::new();

/// Lookup from an 8-bit neighbourhood code to its histogram bin.
///
/// Uniformity is counted sequentially, bit 1 against bit 0 up to bit 7
/// against bit 6, with no wrap from bit 7 back to bit 0. The circular count
/// of the LBP literature adds the bit 7 / bit 0 flip and is always even, so
/// both counts agree on which codes have at most two transitions: the table
/// holds the usual 58 uniform codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformPatterns {
    bins: [u8; 256],
}

impl UniformPatterns {
    /// Builds the table: uniform codes get ascending bins in code order,
    /// starting with code 0, every other code gets [`NON_UNIFORM_BIN`].
    pub fn build() -> Self {
        let mut bins: [u8; 256] = [NON_UNIFORM_BIN; 256];
        let mut next: u8 = 0;
        (0..=u8::MAX).for_each(|code| {
            if transitions(code) <= MAX_UNIFORM_TRANSITIONS {
                bins[code as usize] = next;
                next += 1;
            }
        });
        debug_assert_eq!(next, NON_UNIFORM_BIN);
        Self { bins }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::build)
    }

    #[inline(always)]
    pub fn bin(&self, code: u8) -> u8 {
        self.bins[code as usize]
    }

    pub fn is_uniform(&self, code: u8) -> bool {
        self.bin(code) != NON_UNIFORM_BIN
    }

    pub fn as_slice(&self) -> &[u8; 256] {
        &self.bins
    }
}

/// Number of bit flips met scanning `code` from bit 0 to bit 7.
pub fn transitions(code: u8) -> u32 {
    (code ^ (code >> 1)).count_ones() - ((code >> 7) & 1) as u32
}
