use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use paillier::Ciphertext;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Output of one pipeline run: the encrypted identity token followed by the
/// encrypted histogram blocks.
///
/// The text form is one decimal ciphertext per line, token first. Any
/// whitespace separates ciphertexts when parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedDescriptor {
    token: Ciphertext,
    blocks: Vec<Ciphertext>,
}

impl EncryptedDescriptor {
    pub fn new(token: Ciphertext, blocks: Vec<Ciphertext>) -> Self {
        Self { token, blocks }
    }

    pub fn token(&self) -> &Ciphertext {
        &self.token
    }

    pub fn blocks(&self) -> &[Ciphertext] {
        &self.blocks
    }

    /// Number of ciphertexts, token included.
    pub fn ciphertext_count(&self) -> usize {
        self.blocks.len() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ciphertext> {
        std::iter::once(&self.token).chain(self.blocks.iter())
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut ciphertexts = text.split_whitespace().map(|s| s.parse::<Ciphertext>());
        let token: Ciphertext = match ciphertexts.next() {
            Some(token) => token?,
            None => return Err(Error::malformed("descriptor", "no ciphertexts")),
        };
        let blocks: Vec<Ciphertext> = ciphertexts.collect::<paillier::Result<_>>()?;
        Ok(Self { token, blocks })
    }

    /// Writes the descriptor to `path`. The text goes to a temporary file in
    /// the same directory which is then renamed over `path`, so `path` never
    /// holds a partial descriptor.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let dir: &Path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file: NamedTempFile = NamedTempFile::new_in(dir)?;
        write!(file, "{}", self)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        tracing::info!(path = %path.display(), ciphertexts = self.ciphertext_count(), "wrote encrypted descriptor");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }
}

impl fmt::Display for EncryptedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|c| writeln!(f, "{}", c))
    }
}

impl FromStr for EncryptedDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
