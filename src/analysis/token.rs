use std::fmt;
use crate::core::error::{Error, Result};

/// Length in bytes of a derived token (HMAC-SHA-256 output).
pub const TOKEN_LEN: usize = 32;

/// A normalized search term: lowercase, one contiguous run of letters/digits.
///
/// Terms only exist transiently between tokenization and token derivation;
/// nothing in the index holds on to one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(String);

impl Term {
    pub(crate) fn new(text: &str) -> Self {
        Term(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Opaque, fixed-length identifier standing in for a term inside the index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId([u8; TOKEN_LEN]);

impl TokenId {
    pub fn from_bytes(bytes: [u8; TOKEN_LEN]) -> Self {
        TokenId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Lowercase hex; sorts the same way the raw bytes do.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse 64 hex characters (either case) back into a token.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != TOKEN_LEN * 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::malformed_snapshot(format!(
                "token id must be {} hex characters, got {:?}",
                TOKEN_LEN * 2,
                hex
            )));
        }

        let mut bytes = [0u8; TOKEN_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| {
                Error::malformed_snapshot(format!("token id {:?} is not hex", hex))
            })?;
        }
        Ok(TokenId(bytes))
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TokenId({})", self.to_hex())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
