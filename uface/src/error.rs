use std::fmt;

/// Coarse classification of a failed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grid, bins, image dimensions, key size or packing parameters.
    Config,
    /// Out-of-range or malformed numbers and artifacts.
    Domain,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Config => "configuration error",
            ErrorKind::Domain => "domain error",
            ErrorKind::Io => "i/o error",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lbp(#[from] lbp::Error),

    #[error(transparent)]
    Packing(#[from] packing::Error),

    #[error(transparent)]
    Paillier(#[from] paillier::Error),

    #[error("image is {got_width}x{got_height}, configured for {width}x{height}")]
    ImageSize {
        got_width: usize,
        got_height: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid configuration file: {0}")]
    ConfigFile(#[from] serde_json::Error),

    #[error("malformed {what}: {reason}")]
    Malformed { what: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("operating system randomness is unavailable: {0}")]
    Entropy(#[from] sampling::OsError),
}

impl Error {
    pub(crate) fn malformed(what: &'static str, reason: impl Into<String>) -> Self {
        Error::Malformed {
            what,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lbp(_) | Error::ImageSize { .. } | Error::ConfigFile(_) => ErrorKind::Config,
            Error::Packing(e) if e.is_config() => ErrorKind::Config,
            Error::Paillier(e) if e.is_config() => ErrorKind::Config,
            Error::Packing(_) | Error::Paillier(_) | Error::Malformed { .. } => ErrorKind::Domain,
            Error::Io(_) | Error::Entropy(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
