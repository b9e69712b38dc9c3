//! Two-stage candidate matching
//!
//! Hash A is the necessary condition and is computed for every candidate;
//! hash B is only computed for the rare candidates that pass hash A.

use crate::domain::crypt_table::CryptTable;
use crate::domain::hash::{HashPair, HashState, HashType, hash_continue, precompute_prefix};

/// Outcome of checking one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchVerdict {
    /// Hash A differs
    Miss,
    /// Hash A matches, hash B differs
    PartialA,
    /// Both hashes match
    Found,
}

/// Check a candidate suffix against the target pair, resuming from the prefix states
#[inline]
pub fn matches(
    candidate: &[u8],
    prefix_a: HashState,
    prefix_b: HashState,
    target_a: u32,
    target_b: u32,
    table: &CryptTable,
) -> bool {
    let digest_a = hash_continue(prefix_a, candidate, HashType::NameA, table).digest();
    if digest_a != target_a {
        return false;
    }
    hash_continue(prefix_b, candidate, HashType::NameB, table).digest() == target_b
}

/// Matcher bound to one table, one path prefix and one target pair
#[derive(Clone, Copy, Debug)]
pub struct Matcher<'t> {
    table: &'t CryptTable,
    prefix_a: HashState,
    prefix_b: HashState,
    target: HashPair,
}

impl<'t> Matcher<'t> {
    /// Precompute the prefix states for hash A and hash B
    pub fn new(table: &'t CryptTable, prefix: &[u8], target: HashPair) -> Self {
        Self {
            table,
            prefix_a: precompute_prefix(prefix, HashType::NameA, table),
            prefix_b: precompute_prefix(prefix, HashType::NameB, table),
            target,
        }
    }

    /// True if the prefix followed by `candidate` hashes to the target pair
    #[inline]
    pub fn is_match(&self, candidate: &[u8]) -> bool {
        matches(
            candidate,
            self.prefix_a,
            self.prefix_b,
            self.target.hash_a,
            self.target.hash_b,
            self.table,
        )
    }

    /// Like [`Matcher::is_match`], but distinguishes hash A only hits
    #[inline]
    pub fn check(&self, candidate: &[u8]) -> MatchVerdict {
        let digest_a =
            hash_continue(self.prefix_a, candidate, HashType::NameA, self.table).digest();
        if digest_a != self.target.hash_a {
            return MatchVerdict::Miss;
        }

        let digest_b =
            hash_continue(self.prefix_b, candidate, HashType::NameB, self.table).digest();
        if digest_b == self.target.hash_b {
            MatchVerdict::Found
        } else {
            MatchVerdict::PartialA
        }
    }
}
