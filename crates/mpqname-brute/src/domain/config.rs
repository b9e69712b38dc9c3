//! Search configuration
//!
//! A search is fully described by the shared path prefix, the constant name
//! suffix, the two alphabets and the target hash pair. The default
//! configuration is the recovery task this tool was written for: a Cathedral DUN file
//! under `levels\l1data\` sorting between `items\wshield.cel` and `hero1.dun`.

use crate::constants::{
    DEFAULT_CHARSET, DEFAULT_FIRST_CHARSET, DEFAULT_NAME_SUFFIX, DEFAULT_PATH_PREFIX,
    DEFAULT_TARGET_HASH_A, DEFAULT_TARGET_HASH_B,
};
use crate::domain::candidate::total_candidates;
use crate::domain::hash::HashPair;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyAlphabet(&'static str),

    #[error("{field} contains non-ASCII byte {byte:#04x}")]
    NonAscii { field: &'static str, byte: u8 },

    #[error("{field} contains '{ch}' more than once")]
    DuplicateChar { field: &'static str, ch: char },
}

/// Parameters of one search run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Path prefix shared by every candidate (e.g. `levels\l1data\`)
    pub prefix: String,
    /// Constant suffix after the name (e.g. `.dun`)
    pub suffix: String,
    /// Alphabet of the first name character, split across workers
    pub first_chars: String,
    /// Alphabet of the remaining name characters
    pub charset: String,
    /// Hash pair the full path must produce
    pub target: HashPair,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PATH_PREFIX.to_string(),
            suffix: DEFAULT_NAME_SUFFIX.to_string(),
            first_chars: DEFAULT_FIRST_CHARSET.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            target: HashPair::new(DEFAULT_TARGET_HASH_A, DEFAULT_TARGET_HASH_B),
        }
    }
}

impl SearchConfig {
    /// Set the target pair
    pub fn with_target(mut self, target: HashPair) -> Self {
        self.target = target;
        self
    }

    /// Set both alphabets
    pub fn with_alphabets(
        mut self,
        first_chars: impl Into<String>,
        charset: impl Into<String>,
    ) -> Self {
        self.first_chars = first_chars.into();
        self.charset = charset.into();
        self
    }

    /// Set prefix and suffix
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Check that every field describes a well-formed search space
    ///
    /// All fields must be ASCII so that every candidate is a valid path string.
    /// Alphabets must be non-empty and free of duplicates, otherwise candidates
    /// would repeat.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ascii("prefix", &self.prefix)?;
        check_ascii("suffix", &self.suffix)?;
        check_alphabet("first_chars", &self.first_chars)?;
        check_alphabet("charset", &self.charset)?;
        Ok(())
    }

    /// Number of candidates in the whole search space
    pub fn keyspace(&self) -> Option<u64> {
        total_candidates(self.first_chars.len(), self.charset.len())
    }

    /// Full relative path for a candidate buffer (name followed by suffix)
    pub fn full_path(&self, candidate: &[u8]) -> String {
        let mut path = String::with_capacity(self.prefix.len() + candidate.len());
        path.push_str(&self.prefix);
        path.push_str(&String::from_utf8_lossy(candidate));
        path
    }
}

fn check_ascii(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.bytes().find(|b| !b.is_ascii()) {
        Some(byte) => Err(ConfigError::NonAscii { field, byte }),
        None => Ok(()),
    }
}

fn check_alphabet(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyAlphabet(field));
    }
    check_ascii(field, value)?;

    let mut seen = [false; 128];
    for byte in value.bytes() {
        if seen[byte as usize] {
            return Err(ConfigError::DuplicateChar {
                field,
                ch: byte as char,
            });
        }
        seen[byte as usize] = true;
    }
    Ok(())
}
