/*
 * vDup mail duplication service
 *
 * Copyright (C) 2003 - viridIT SAS
 * Licensed under the Elastic License 2.0
 *
 * You should have received a copy of the Elastic License 2.0 along with
 * this program. If not, see https://www.elastic.co/licensing/elastic-license.
 *
 */

use rand::RngCore;

/// Single-use secret correlating a duplicated message with the shape it was
/// issued for.
///
/// 256 bits from the operating system generator, hex encoded: unique with
/// overwhelming probability, and infeasible to guess within the store ttl
/// window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityToken(String);

impl SecurityToken {
    pub const BYTE_LEN: usize = 32;

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::BYTE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);

        use std::fmt::Write;
        let mut encoded = String::with_capacity(Self::BYTE_LEN * 2);
        for byte in bytes {
            write!(encoded, "{byte:02x}").expect("writing to a string never fails");
        }

        Self(encoded)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecurityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_hex_encoded() {
        let token = SecurityToken::generate();

        assert_eq!(token.as_str().len(), SecurityToken::BYTE_LEN * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_is_fresh() {
        assert_ne!(SecurityToken::generate(), SecurityToken::generate());
    }
}
