use lbp::{BINS, GridLayout, Histogram};
use packing::{PackingLayout, block_from_integer, unpack};
use paillier::KeyPair;
use rug::Integer;

use crate::config::PipelineConfig;
use crate::descriptor::EncryptedDescriptor;
use crate::error::{Error, Result};
use crate::pipeline::packing_layout;

/// Plaintext content of an [`EncryptedDescriptor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovered {
    pub token: Integer,
    pub histogram: Histogram,
}

/// Decrypts a descriptor produced under `keys` with `config`.
pub fn recover(keys: &KeyPair, descriptor: &EncryptedDescriptor, config: &PipelineConfig) -> Result<Recovered> {
    let grid: GridLayout = config.validate()?;
    let layout: PackingLayout = packing_layout(&grid, keys.public())?;
    let len: usize = grid.cells() * BINS;

    let expected: usize = layout.block_count(len);
    if descriptor.blocks().len() != expected {
        return Err(Error::malformed(
            "descriptor",
            format!("{} blocks, expected {}", descriptor.blocks().len(), expected),
        ));
    }

    let token: Integer = keys.decrypt(descriptor.token())?;
    let blocks: Vec<Vec<u8>> = descriptor
        .blocks()
        .iter()
        .map(|c| -> Result<Vec<u8>> { Ok(block_from_integer(&keys.decrypt(c)?, layout.block_bytes())?) })
        .collect::<Result<_>>()?;

    let mut values: Vec<u64> = unpack(&blocks, &layout)?;
    if values[len..].iter().any(|&v| v != 0) {
        return Err(Error::malformed("descriptor", "non-zero padding after the last count"));
    }
    values.truncate(len);

    let counts: Vec<u32> = values
        .into_iter()
        .map(|v| u32::try_from(v).map_err(|_| Error::malformed("descriptor", format!("count {v} out of range"))))
        .collect::<Result<_>>()?;
    let histogram: Histogram = Histogram::from_flat(grid.cells(), counts)
        .ok_or_else(|| Error::malformed("descriptor", "histogram shape"))?;

    tracing::debug!(cells = grid.cells(), blocks = blocks.len(), "recovered descriptor");
    Ok(Recovered { token, histogram })
}

#[cfg(test)]
mod tests {
    use lbp::GrayImage;
    use paillier::{Ciphertext, KeyPair};
    use sampling::Source;

    use super::{Recovered, recover};
    use crate::config::PipelineConfig;
    use crate::descriptor::EncryptedDescriptor;
    use crate::error::{Error, ErrorKind};
    use crate::pipeline::EncryptionPipeline;
    use crate::token::IdentityToken;

    fn config() -> PipelineConfig {
        PipelineConfig {
            width: 48,
            height: 40,
            grid_size: 9,
            bins: 59,
        }
    }

    #[test]
    fn recovers_histogram_and_token() {
        let mut source: Source = Source::new([0u8; 32]);
        let kp: KeyPair = KeyPair::generate(256, 20, &mut source).unwrap();
        let pipeline: EncryptionPipeline = EncryptionPipeline::new(config()).unwrap();
        let image: GrayImage = GrayImage::from_fn(48, 40, |r, c| ((r * r + 3 * c) % 256) as u8);
        let token: IdentityToken = IdentityToken::from_device(9, 123_456_789);

        let descriptor: EncryptedDescriptor = pipeline.run(&image, kp.public(), &token, &mut source).unwrap();
        let recovered: Recovered = recover(&kp, &descriptor, &config()).unwrap();
        assert_eq!(&recovered.token, token.as_integer());
        assert_eq!(recovered.histogram, pipeline.histogram(&image).unwrap());
    }

    #[test]
    fn rejects_wrong_block_count() {
        let mut source: Source = Source::new([1u8; 32]);
        let kp: KeyPair = KeyPair::generate(256, 20, &mut source).unwrap();
        let pipeline: EncryptionPipeline = EncryptionPipeline::new(config()).unwrap();
        let descriptor: EncryptedDescriptor = pipeline
            .run(&GrayImage::filled(48, 40, 3), kp.public(), &IdentityToken::from_device(0, 1), &mut source)
            .unwrap();

        let truncated: EncryptedDescriptor = EncryptedDescriptor::new(
            descriptor.token().clone(),
            descriptor.blocks()[1..].to_vec(),
        );
        let err: Error = recover(&kp, &truncated, &config()).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn rejects_foreign_ciphertext() {
        let mut source: Source = Source::new([2u8; 32]);
        let kp: KeyPair = KeyPair::generate(256, 20, &mut source).unwrap();
        let pipeline: EncryptionPipeline = EncryptionPipeline::new(config()).unwrap();
        let descriptor: EncryptedDescriptor = pipeline
            .run(&GrayImage::filled(48, 40, 3), kp.public(), &IdentityToken::from_device(0, 1), &mut source)
            .unwrap();

        let mut blocks: Vec<Ciphertext> = descriptor.blocks().to_vec();
        blocks[0] = Ciphertext::new(kp.public().n_square().clone());
        let tampered: EncryptedDescriptor = EncryptedDescriptor::new(descriptor.token().clone(), blocks);
        assert!(matches!(
            recover(&kp, &tampered, &config()),
            Err(Error::Paillier(paillier::Error::CiphertextOutOfRange))
        ));
    }
}
