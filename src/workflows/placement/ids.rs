use rand::Rng;

use super::error::PlacementError;

pub(crate) const OPPORTUNITY_PREFIX: &str = "ITP";
pub(crate) const APPLICATION_PREFIX: &str = "APP";
pub(crate) const WITHDRAWAL_PREFIX: &str = "WDR";

const TOKEN_LEN: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Generous for a 36^6 space; hitting it means the token source is broken,
// not that the space is crowded.
const MAX_ATTEMPTS: usize = 64;

/// Source of the unpredictable token portion of an identifier. Swapped for a
/// deterministic sequence in tests.
pub trait TokenSource: Send + Sync {
    fn token(&self, len: usize) -> String;
}

/// Uniform draws from the uppercase alphanumeric alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn token(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Allocate a `PREFIX-XXXXXX` identifier, retrying until it does not collide
/// with the live collection.
pub(crate) fn allocate(
    prefix: &str,
    tokens: &dyn TokenSource,
    mut taken: impl FnMut(&str) -> bool,
) -> Result<String, PlacementError> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!("{prefix}-{}", tokens.token(TOKEN_LEN));
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(PlacementError::IdSpaceExhausted)
}
