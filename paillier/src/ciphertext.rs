use std::fmt;
use std::str::FromStr;

use rug::Integer;

use crate::error::Error;

/// A Paillier ciphertext, an element of `[0, n^2)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext(Integer);

impl Ciphertext {
    pub fn new(value: Integer) -> Self {
        Self(value)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, "ciphertext").map(Self)
    }
}

pub(crate) fn parse_decimal(s: &str, what: &'static str) -> Result<Integer, Error> {
    Integer::from_str_radix(s.trim(), 10).map_err(|_| Error::Parse {
        what,
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rug::Integer;

    use super::Ciphertext;
    use crate::error::Error;

    #[test]
    fn decimal_text_form() {
        let c: Ciphertext = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(c.as_integer(), &"123456789012345678901234567890".parse::<Integer>().unwrap());
        assert_eq!(c.to_string(), "123456789012345678901234567890");
        assert_eq!(
            "12ab".parse::<Ciphertext>(),
            Err(Error::Parse {
                what: "ciphertext",
                input: "12ab".to_string()
            })
        );
        assert!("".parse::<Ciphertext>().is_err());
    }
}
