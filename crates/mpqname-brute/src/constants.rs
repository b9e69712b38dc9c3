//! Hash and search related constants

// =============================================================================
// Crypt table parameters
// =============================================================================

/// Number of words in the crypt table (4 hash types x 256 byte values + 256 spare)
pub const CRYPT_TABLE_SIZE: usize = 0x500;

/// Initial seed of the crypt table generator
pub const CRYPT_TABLE_SEED: u32 = 0x0010_0001;

/// Modulus of the crypt table generator
pub const CRYPT_TABLE_MODULUS: u32 = 0x2A_AAAB;

/// Table slots filled per base index
pub const CRYPT_TABLE_ROUNDS: usize = 5;

// =============================================================================
// Hash function parameters
// =============================================================================

/// Initial value of the first accumulator
pub const HASH_SEED1_INIT: u32 = 0x7FED_7FED;

/// Initial value of the second accumulator
pub const HASH_SEED2_INIT: u32 = 0xEEEE_EEEE;

// =============================================================================
// Candidate space
// =============================================================================

/// Number of variable characters in a candidate name
pub const CANDIDATE_LEN: usize = 8;

/// Default path prefix shared by every candidate
pub const DEFAULT_PATH_PREFIX: &str = "levels\\l1data\\";

/// Default suffix appended to every candidate name
pub const DEFAULT_NAME_SUFFIX: &str = ".dun";

/// Default alphabet for the first name character
///
/// The file sorts before "hero1.dun", so its name starts with a character up to 'h'.
pub const DEFAULT_FIRST_CHARSET: &str = "abcdefgh0123456789-_";

/// Default alphabet for the remaining name characters
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789-_";

/// Default target hash A (hash type 0x100)
pub const DEFAULT_TARGET_HASH_A: u32 = 0xB29F_C135;

/// Default target hash B (hash type 0x200)
pub const DEFAULT_TARGET_HASH_B: u32 = 0x2257_5C4A;

// =============================================================================
// Search runtime
// =============================================================================

/// Number of candidates a worker checks between flushes of the shared counter
pub const PROGRESS_FLUSH_INTERVAL: u64 = 1 << 20;

/// Default file the matched path is written to
pub const DEFAULT_OUTPUT_FILE: &str = "found.txt";
