//! Seeds and hashed seeds
//!
//! A [`Seed`] is whatever the caller hands to a generator: an integer, a text
//! string or an opaque byte string. Engines never read the seed directly
//! (apart from the Mersenne Twister's integer path); they draw their initial
//! entropy from the [`HashedSeed`], a 128-bit MD5 digest of the seed bytes.

use std::fmt;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest value an automatically generated seed can take (31-bit)
pub const AUTO_SEED_MAX: i64 = 0x7fff_ffff;

/// Caller-supplied seed
///
/// Integer seeds hash through their decimal text form, so `Seed::Int(42)` and
/// `Seed::Text("42")` share a [`HashedSeed`]. Only the Mersenne Twister tells
/// them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Seed {
    /// Pick a fresh non-negative 31-bit integer seed
    ///
    /// The value comes from the random bits of a v4 UUID, so two calls are
    /// independent of each other and of any generator state.
    pub fn auto() -> Self {
        let bits = Uuid::new_v4().as_u128();
        Seed::Int((bits as i64) & AUTO_SEED_MAX)
    }

    /// Raw bytes fed to the seed digest
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Seed::Int(value) => value.to_string().into_bytes(),
            Seed::Text(text) => text.as_bytes().to_vec(),
            Seed::Bytes(bytes) => bytes.clone(),
        }
    }

    /// Integer value, when the seed is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Seed::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Int(value) => write!(f, "{}", value),
            Seed::Text(text) => write!(f, "{:?}", text),
            Seed::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Int(value)
    }
}

impl From<i32> for Seed {
    fn from(value: i32) -> Self {
        Seed::Int(value as i64)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Int(value as i64)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<Vec<u8>> for Seed {
    fn from(bytes: Vec<u8>) -> Self {
        Seed::Bytes(bytes)
    }
}

impl From<&[u8]> for Seed {
    fn from(bytes: &[u8]) -> Self {
        Seed::Bytes(bytes.to_vec())
    }
}

/// 128-bit MD5 digest of a seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashedSeed([u8; 16]);

impl HashedSeed {
    /// Digest the raw bytes of `seed`
    pub fn new(seed: &Seed) -> Self {
        Self::digest(&seed.to_bytes())
    }

    /// Wrap an existing 16-byte digest
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        HashedSeed(bytes)
    }

    /// MD5 of arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&Md5::digest(data));
        HashedSeed(out)
    }

    /// Digest of the digest itself
    pub fn rehash(&self) -> Self {
        Self::digest(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// The digest as four little-endian 32-bit words `[w1, w2, w3, w4]`
    pub fn words(&self) -> [u32; 4] {
        digest_words(&self.0)
    }
}

impl From<&Seed> for HashedSeed {
    fn from(seed: &Seed) -> Self {
        HashedSeed::new(seed)
    }
}

/// Split a 16-byte digest into four little-endian 32-bit words
pub(crate) fn digest_words(bytes: &[u8; 16]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}
