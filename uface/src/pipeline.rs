use lbp::{GrayImage, GridLayout, Histogram, UniformPatterns, build_histogram};
use packing::{PackingLayout, block_to_integer, pack};
use paillier::{Ciphertext, PublicKey};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rug::Integer;
use sampling::Source;

use crate::config::PipelineConfig;
use crate::descriptor::EncryptedDescriptor;
use crate::error::{Error, Result};
use crate::token::IdentityToken;

/// Packing layout for histograms of `grid` under `public_key`.
pub fn packing_layout(grid: &GridLayout, public_key: &PublicKey) -> Result<PackingLayout> {
    Ok(PackingLayout::new(
        grid.max_cell_pixels() as u64,
        public_key.bit_length() as usize,
    )?)
}

/// Image to encrypted descriptor: histogram, pack, then encrypt the identity
/// token followed by every block.
pub struct EncryptionPipeline {
    config: PipelineConfig,
    grid: GridLayout,
    patterns: &'static UniformPatterns,
}

impl EncryptionPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let grid: GridLayout = config.validate()?;
        Ok(Self {
            config,
            grid,
            patterns: UniformPatterns::shared(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn histogram(&self, image: &GrayImage) -> Result<Histogram> {
        if image.width() != self.config.width || image.height() != self.config.height {
            return Err(Error::ImageSize {
                got_width: image.width(),
                got_height: image.height(),
                width: self.config.width,
                height: self.config.height,
            });
        }
        Ok(build_histogram(image, self.config.grid_size, self.config.bins, self.patterns)?)
    }

    /// Runs the whole pipeline. Nothing is returned unless every step succeeds.
    pub fn run(
        &self,
        image: &GrayImage,
        public_key: &PublicKey,
        token: &IdentityToken,
        source: &mut Source,
    ) -> Result<EncryptedDescriptor> {
        tracing::info!(
            width = image.width(),
            height = image.height(),
            bit_length = public_key.bit_length(),
            "encrypting face descriptor"
        );

        let histogram: Histogram = self.histogram(image)?;
        let layout: PackingLayout = packing_layout(&self.grid, public_key)?;
        let plaintexts: Vec<Integer> = pack(histogram.flat(), &layout)?
            .iter()
            .map(|block| block_to_integer(block))
            .collect();

        let token: Ciphertext = public_key.encrypt(token.as_integer(), source)?;
        let blocks: Vec<Ciphertext> = encrypt_blocks(public_key, &plaintexts, source)?;

        tracing::info!(ciphertexts = blocks.len() + 1, "encrypted face descriptor");
        Ok(EncryptedDescriptor::new(token, blocks))
    }
}

/// Encrypts `plaintexts` in order. Every block gets its own source branched
/// from `source` up front, so the output only depends on the seed.
fn encrypt_blocks(public_key: &PublicKey, plaintexts: &[Integer], source: &mut Source) -> Result<Vec<Ciphertext>> {
    let sources: Vec<Source> = plaintexts.iter().map(|_| source.branch()).collect();
    let encrypt = |(m, mut block_source): (&Integer, Source)| public_key.encrypt(m, &mut block_source);

    #[cfg(feature = "parallel")]
    let ciphertexts = plaintexts
        .par_iter()
        .zip(sources.into_par_iter())
        .map(encrypt)
        .collect::<paillier::Result<Vec<Ciphertext>>>();
    #[cfg(not(feature = "parallel"))]
    let ciphertexts = plaintexts
        .iter()
        .zip(sources)
        .map(encrypt)
        .collect::<paillier::Result<Vec<Ciphertext>>>();

    tracing::debug!(blocks = plaintexts.len(), "encrypted blocks");
    Ok(ciphertexts?)
}
