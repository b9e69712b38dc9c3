//! mpqname-brute - Brute-force recovery of MPQ archive file names
//!
//! This crate provides functionality to:
//! - Build the MPQ crypt table and compute the legacy keyed string hashes
//! - Enumerate fixed-length candidate names over configurable alphabets
//! - Search the candidate space in parallel for a known (hash A, hash B) pair

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::searcher::{
    SearchError, SearchEvent, SearchOptions, SearchOutcome, default_workers, run, run_with_options,
};
pub use constants::*;
pub use domain::config::{ConfigError, SearchConfig};
pub use domain::crypt_table::CryptTable;
pub use domain::hash::{
    HashPair, HashState, HashType, hash, hash_continue, hash_pair, precompute_prefix,
};
