//! MPQ crypt table
//!
//! The table is filled once from a linear-congruential generator and is
//! read-only afterwards, so a single instance can be shared by reference
//! across all search workers.

use crate::constants::{
    CRYPT_TABLE_MODULUS, CRYPT_TABLE_ROUNDS, CRYPT_TABLE_SEED, CRYPT_TABLE_SIZE,
};
use crate::domain::hash::HashType;

/// Lookup table of 0x500 pseudo-random words
#[derive(Clone, PartialEq, Eq)]
pub struct CryptTable {
    words: [u32; CRYPT_TABLE_SIZE],
}

impl CryptTable {
    /// Build the table
    ///
    /// Each base index 0..0x100 receives 5 words spaced 0x100 apart.
    /// Every word consumes two generator steps: the first supplies the
    /// high 16 bits, the second the low 16 bits.
    pub fn new() -> Self {
        let mut words = [0u32; CRYPT_TABLE_SIZE];
        let mut seed = CRYPT_TABLE_SEED;

        for base in 0..0x100 {
            for round in 0..CRYPT_TABLE_ROUNDS {
                seed = next_seed(seed);
                let high = (seed & 0xFFFF) << 16;
                seed = next_seed(seed);
                let low = seed & 0xFFFF;
                words[base + round * 0x100] = high | low;
            }
        }

        Self { words }
    }

    /// Word used when hashing `byte` with the given hash type
    #[inline(always)]
    pub fn lookup(&self, hash_type: HashType, byte: u8) -> u32 {
        self.words[hash_type.offset() + byte as usize]
    }

    /// Raw word at `index`
    pub fn get(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    /// All words of the table
    pub fn as_slice(&self) -> &[u32] {
        &self.words
    }
}

impl Default for CryptTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CryptTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptTable")
            .field("len", &self.words.len())
            .field("first", &format_args!("{:#010X}", self.words[0]))
            .finish()
    }
}

#[inline]
fn next_seed(seed: u32) -> u32 {
    // seed < 0x2AAAAB, so seed * 125 + 3 stays well below 2^32
    (seed * 125 + 3) % CRYPT_TABLE_MODULUS
}
