use anyhow::{Result, bail};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Seed used when no usable token is given.
pub const DEFAULT_SEED: u64 = 1337;

/// A resolved simulation seed and the token it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    /// Original word when the seed was derived from text.
    pub phrase: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, phrase: None }
    }

    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            seed: phrase_seed(phrase),
            phrase: Some(phrase.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match &self.phrase {
            Some(phrase) => format!("{phrase} ({})", self.seed),
            None => self.seed.to_string(),
        }
    }
}

/// Stable seed for a word: the first eight bytes of its SHA-256 digest.
#[must_use]
pub fn phrase_seed(phrase: &str) -> u64 {
    let digest = Sha256::digest(phrase.to_ascii_lowercase().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Resolve CLI seed tokens into canonical seeds.
///
/// Accepts integers (negative values use their magnitude) and plain words made
/// of letters, digits, `-` or `_`, which are hashed. Duplicates are dropped
/// keeping the first occurrence.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut resolved: Vec<SeedInfo> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        let info = if let Ok(value) = token.parse::<u64>() {
            SeedInfo::from_numeric(value)
        } else if let Ok(value) = token.parse::<i64>() {
            SeedInfo::from_numeric(value.unsigned_abs())
        } else if token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            SeedInfo::from_phrase(token)
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if seen.insert(info.seed) {
            resolved.push(info);
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInfo::from_numeric(DEFAULT_SEED));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_numeric_and_words() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "-7", "dealer"])).unwrap();
        assert_eq!(seeds[0], SeedInfo::from_numeric(42));
        assert_eq!(seeds[1], SeedInfo::from_numeric(7));
        assert_eq!(seeds[2].phrase.as_deref(), Some("dealer"));
        assert_eq!(seeds[2].seed, phrase_seed("DEALER"));
    }

    #[test]
    fn dedupes_and_defaults() {
        let seeds = resolve_seed_inputs(&tokens(&["5", "5", "-5"])).unwrap();
        assert_eq!(seeds.len(), 1);
        let seeds = resolve_seed_inputs(&[]).unwrap();
        assert_eq!(seeds, vec![SeedInfo::from_numeric(DEFAULT_SEED)]);
    }

    #[test]
    fn rejects_odd_tokens() {
        let err = resolve_seed_inputs(&tokens(&["two words"])).unwrap_err();
        assert!(err.to_string().contains("Unrecognized seed token"));
    }

    #[test]
    fn labels_show_phrase_and_seed() {
        let info = SeedInfo::from_phrase("bamboo");
        assert!(info.label().starts_with("bamboo ("));
        assert_eq!(SeedInfo::from_numeric(9).label(), "9");
    }
}
