//! Encrypted Local Binary Pattern descriptors of face crops.
//!
//! [`EncryptionPipeline::run`] turns a grayscale crop into an
//! [`EncryptedDescriptor`]: an encrypted identity token followed by the
//! Paillier encryptions of the bit-packed grid histogram. The key issuer can
//! [`recover`] the token and the histogram.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod pgm;
pub mod pipeline;
pub mod recover;
pub mod token;

pub use config::{CONFIG_ENV, PipelineConfig};
pub use descriptor::EncryptedDescriptor;
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{EncryptionPipeline, packing_layout};
pub use recover::{Recovered, recover};
pub use token::IdentityToken;
