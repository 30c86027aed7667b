use std::fmt;

use rand::Rng;

/// Length of every model identifier.
pub const MODEL_ID_LEN: usize = 8;

/// Identifier of a trained model: 8 lowercase hexadecimal characters.
///
/// Identifiers are random and never checked for collisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    /// Generates a new random `ModelId`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{:08x}", rng.random::<u32>()))
    }

    /// Parses a `ModelId`, returning `None` if `raw` is not exactly 8 lowercase hex characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == MODEL_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
