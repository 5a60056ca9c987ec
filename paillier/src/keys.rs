use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rug::Integer;

use crate::ciphertext::parse_decimal;
use crate::error::{Error, Result};

/// Encryption key `(n, g)` together with the nominal modulus size.
///
/// `bit_length` is the size the key was generated for; plaintext blocks are
/// sized from it. A key generated here always has `n` of exactly that many
/// bits (even sizes); externally supplied keys may have `n` one bit shorter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: Integer,
    n_square: Integer,
    g: Integer,
    bit_length: u32,
}

impl PublicKey {
    pub fn new(n: Integer, g: Integer, bit_length: u32) -> Result<Self> {
        if n <= 1 {
            return Err(Error::InvalidKey("modulus must be greater than 1"));
        }
        let n_square: Integer = Integer::from(n.square_ref());
        if g.cmp0() != Ordering::Greater || g >= n_square {
            return Err(Error::InvalidKey("generator must lie in (0, n^2)"));
        }
        Ok(Self {
            n,
            n_square,
            g,
            bit_length,
        })
    }

    /// Builds a key from its decimal components, as served by a key store.
    pub fn from_components(n: &str, g: &str, bit_length: &str) -> Result<Self> {
        let n: Integer = parse_decimal(n, "modulus")?;
        let g: Integer = parse_decimal(g, "generator")?;
        let bit_length: u32 = bit_length.trim().parse().map_err(|_| Error::Parse {
            what: "bit length",
            input: bit_length.to_string(),
        })?;
        Self::new(n, g, bit_length)
    }

    pub fn n(&self) -> &Integer {
        &self.n
    }

    pub fn n_square(&self) -> &Integer {
        &self.n_square
    }

    pub fn g(&self) -> &Integer {
        &self.g
    }

    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }
}

/// Single line `"n g bit_length"`.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.n, self.g, self.bit_length)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_whitespace().collect::<Vec<&str>>().as_slice() {
            [n, g, bit_length] => Self::from_components(n, g, bit_length),
            _ => Err(Error::Parse {
                what: "public key",
                input: s.to_string(),
            }),
        }
    }
}

/// Decryption key `(lambda, u)` with `lambda = lcm(p - 1, q - 1)` and
/// `u = L(g^lambda mod n^2)^-1 mod n`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    lambda: Integer,
    u: Integer,
}

impl PrivateKey {
    pub fn lambda(&self) -> &Integer {
        &self.lambda
    }

    pub fn u(&self) -> &Integer {
        &self.u
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey { .. }")
    }
}

/// Single line `"lambda u"`.
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lambda, self.u)
    }
}

/// Issuer key material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    pub(crate) fn from_parts(public: PublicKey, lambda: Integer, u: Integer) -> Self {
        Self {
            public,
            private: PrivateKey { lambda, u },
        }
    }

    /// Restores an issuer key from its components.
    pub fn from_components(n: Integer, g: Integer, bit_length: u32, lambda: Integer, u: Integer) -> Result<Self> {
        let public: PublicKey = PublicKey::new(n, g, bit_length)?;
        if lambda.cmp0() != Ordering::Greater {
            return Err(Error::InvalidKey("lambda must be positive"));
        }
        if u.cmp0() != Ordering::Greater || u >= public.n {
            return Err(Error::InvalidKey("u must lie in (0, n)"));
        }
        Ok(Self::from_parts(public, lambda, u))
    }

    /// Restores an issuer key from a public key line and a private key line.
    pub fn parse(public: &str, private: &str) -> Result<Self> {
        let public: PublicKey = public.parse()?;
        match private.split_whitespace().collect::<Vec<&str>>().as_slice() {
            [lambda, u] => {
                let lambda: Integer = parse_decimal(lambda, "lambda")?;
                let u: Integer = parse_decimal(u, "u")?;
                Self::from_components(public.n, public.g, public.bit_length, lambda, u)
            }
            _ => Err(Error::Parse {
                what: "private key",
                input: private.to_string(),
            }),
        }
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn private(&self) -> &PrivateKey {
        &self.private
    }
}

#[cfg(test)]
mod tests {
    use rug::Integer;

    use super::{KeyPair, PublicKey};
    use crate::error::Error;

    #[test]
    fn public_key_line_round_trips() {
        let pk: PublicKey = PublicKey::from_components("323", "324", "9").unwrap();
        assert_eq!(pk.n_square(), &Integer::from(323 * 323));
        assert_eq!(pk.to_string(), "323 324 9");
        assert_eq!("  323\t324 9\n".parse::<PublicKey>().unwrap(), pk);
    }

    #[test]
    fn malformed_public_key() {
        assert_eq!(
            PublicKey::from_components("32x", "1", "9"),
            Err(Error::Parse {
                what: "modulus",
                input: "32x".to_string()
            })
        );
        assert_eq!(
            PublicKey::from_components("323", "1", "-9"),
            Err(Error::Parse {
                what: "bit length",
                input: "-9".to_string()
            })
        );
        assert!("323 324".parse::<PublicKey>().is_err());
        assert!("323 324 9 1".parse::<PublicKey>().is_err());
        assert!(matches!(PublicKey::from_components("1", "1", "9"), Err(Error::InvalidKey(_))));
        assert!(matches!(PublicKey::from_components("323", "0", "9"), Err(Error::InvalidKey(_))));
        assert!(matches!(PublicKey::from_components("323", "104329", "9"), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn key_pair_lines_round_trip() {
        // p = 17, q = 19, g = n + 1: lambda = lcm(16, 18) = 144, u = 144^-1 mod 323
        let u: Integer = Integer::from(144).invert(&Integer::from(323)).unwrap();
        let kp: KeyPair =
            KeyPair::from_components(Integer::from(323), Integer::from(324), 9, Integer::from(144), u.clone()).unwrap();
        let private: String = kp.private().to_string();
        assert_eq!(private, format!("144 {}", u));
        assert_eq!(KeyPair::parse(&kp.public().to_string(), &private).unwrap(), kp);
        assert!(KeyPair::parse("323 324 9", "144").is_err());
        assert!(matches!(
            KeyPair::from_components(Integer::from(323), Integer::from(324), 9, Integer::from(144), Integer::from(323)),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn private_key_debug_hides_values() {
        let kp: KeyPair =
            KeyPair::from_components(Integer::from(323), Integer::from(324), 9, Integer::from(144), Integer::from(5)).unwrap();
        assert!(!format!("{:?}", kp).contains("144"));
    }
}
