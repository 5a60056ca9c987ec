use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{OsError, OsRng, RngCore, TryRngCore};

/// Draws a fresh 32 byte seed from the operating system.
pub fn os_seed() -> Result<[u8; 32], OsError> {
    let mut seed: [u8; 32] = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(seed)
}

/// Seedable cryptographic randomness source.
///
/// Every randomized operation of the workspace (prime search, generator
/// sampling, encryption nonces) takes a `&mut Source`. Production callers seed
/// it with [`Source::from_os`]; tests use a fixed seed to replay a run.
pub struct Source {
    source: ChaCha20Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha20Rng::from_seed(seed),
        }
    }

    pub fn from_os() -> Result<Source, OsError> {
        Ok(Source::new(os_seed()?))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Derives an independent child source. Branching in a fixed order gives
    /// every child the same stream regardless of how the children are later
    /// scheduled.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
