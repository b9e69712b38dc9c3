//! MPQ keyed string hash
//!
//! The hash is a strict left-to-right fold over the ASCII-uppercased input,
//! so a state computed over a prefix can be resumed over any suffix.

use crate::constants::{HASH_SEED1_INIT, HASH_SEED2_INIT};
use crate::domain::crypt_table::CryptTable;

/// Hash types, selecting a quadrant of the crypt table
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashType {
    /// Start index into the archive hash table
    TableIndex = 0x000,
    /// Name hash A, stored in the hash table entry
    NameA = 0x100,
    /// Name hash B, stored in the hash table entry
    NameB = 0x200,
    /// Encryption key of the file
    FileKey = 0x300,
}

impl HashType {
    /// All hash types in table order
    pub const ALL: [HashType; 4] = [
        HashType::TableIndex,
        HashType::NameA,
        HashType::NameB,
        HashType::FileKey,
    ];

    /// Offset of this hash type's quadrant in the crypt table
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self as usize
    }
}

/// Running accumulator pair of the hash function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashState {
    pub seed1: u32,
    pub seed2: u32,
}

impl HashState {
    /// State before any byte has been hashed
    pub const INITIAL: HashState = HashState {
        seed1: HASH_SEED1_INIT,
        seed2: HASH_SEED2_INIT,
    };

    /// Digest of the bytes folded so far
    #[inline(always)]
    pub fn digest(self) -> u32 {
        self.seed1
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Hash A and hash B of one path, as stored in an archive hash table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashPair {
    pub hash_a: u32,
    pub hash_b: u32,
}

impl HashPair {
    pub fn new(hash_a: u32, hash_b: u32) -> Self {
        Self { hash_a, hash_b }
    }
}

/// Continue hashing `bytes` from `state`
///
/// Bytes are uppercased before lookup; all arithmetic wraps modulo 2^32.
#[inline]
pub fn hash_continue(
    state: HashState,
    bytes: &[u8],
    hash_type: HashType,
    table: &CryptTable,
) -> HashState {
    let HashState {
        mut seed1,
        mut seed2,
    } = state;

    for &byte in bytes {
        let v = byte.to_ascii_uppercase();
        seed1 = table.lookup(hash_type, v) ^ seed1.wrapping_add(seed2);
        seed2 = (v as u32)
            .wrapping_add(seed1)
            .wrapping_add(seed2)
            .wrapping_add(seed2 << 5)
            .wrapping_add(3);
    }

    HashState { seed1, seed2 }
}

/// Hash `bytes` from the initial state and return the digest
pub fn hash(bytes: &[u8], hash_type: HashType, table: &CryptTable) -> u32 {
    hash_continue(HashState::INITIAL, bytes, hash_type, table).digest()
}

/// Hash a shared prefix once, for reuse as the starting state of many suffixes
///
/// `hash_continue(precompute_prefix(p), s)` equals hashing `p ++ s` from scratch.
pub fn precompute_prefix(prefix: &[u8], hash_type: HashType, table: &CryptTable) -> HashState {
    hash_continue(HashState::INITIAL, prefix, hash_type, table)
}

/// Compute hash A and hash B of a path
pub fn hash_pair(path: &[u8], table: &CryptTable) -> HashPair {
    HashPair {
        hash_a: hash(path, HashType::NameA, table),
        hash_b: hash(path, HashType::NameB, table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_type_offsets() {
        assert_eq!(HashType::TableIndex.offset(), 0x000);
        assert_eq!(HashType::NameA.offset(), 0x100);
        assert_eq!(HashType::NameB.offset(), 0x200);
        assert_eq!(HashType::FileKey.offset(), 0x300);
    }

    #[test]
    fn test_empty_input_is_initial_state() {
        let table = CryptTable::new();
        for hash_type in HashType::ALL {
            assert_eq!(
                hash_continue(HashState::INITIAL, b"", hash_type, &table),
                HashState::INITIAL
            );
            assert_eq!(hash(b"", hash_type, &table), HASH_SEED1_INIT);
        }
    }

    #[test]
    fn test_hash_listfile_reference() {
        let table = CryptTable::new();
        assert_eq!(hash(b"(listfile)", HashType::TableIndex, &table), 0x5F3D_E859);
        assert_eq!(hash(b"(listfile)", HashType::NameA, &table), 0xFD65_7910);
        assert_eq!(hash(b"(listfile)", HashType::NameB, &table), 0x4E9B_98A7);
    }

    #[test]
    fn test_hash_file_key_reference() {
        let table = CryptTable::new();
        assert_eq!(hash(b"(hash table)", HashType::FileKey, &table), 0xC3AF_3770);
        assert_eq!(hash(b"(block table)", HashType::FileKey, &table), 0xEC83_B3A3);
    }

    #[test]
    fn test_hash_is_case_insensitive() {
        let table = CryptTable::new();
        for hash_type in HashType::ALL {
            assert_eq!(
                hash(b"levels\\l1data\\hero1.dun", hash_type, &table),
                hash(b"LEVELS\\L1DATA\\HERO1.DUN", hash_type, &table)
            );
        }
    }

    #[test]
    fn test_hash_deterministic() {
        let table = CryptTable::new();
        let first = hash(b"items\\wshield.cel", HashType::NameA, &table);
        for _ in 0..10 {
            assert_eq!(hash(b"items\\wshield.cel", HashType::NameA, &table), first);
        }
    }

    #[test]
    fn test_hash_types_differ() {
        let table = CryptTable::new();
        let path = b"levels\\l1data\\hero1.dun";
        let a = hash(path, HashType::NameA, &table);
        let b = hash(path, HashType::NameB, &table);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_pair_reference() {
        let table = CryptTable::new();
        assert_eq!(
            hash_pair(b"levels\\l1data\\hero1.dun", &table),
            HashPair::new(0xBA2C_211D, 0x22AD_1A3C)
        );
    }

    #[test]
    fn test_precompute_prefix_reference_state() {
        let table = CryptTable::new();
        assert_eq!(
            precompute_prefix(b"levels\\l1data\\", HashType::NameA, &table),
            HashState {
                seed1: 0x2E5A_B69A,
                seed2: 0xDB39_7653,
            }
        );
        assert_eq!(
            precompute_prefix(b"levels\\l1data\\", HashType::NameB, &table),
            HashState {
                seed1: 0x1668_FFF4,
                seed2: 0xB36C_783D,
            }
        );
    }

    #[test]
    fn test_precompute_prefix_matches_full_hash() {
        let table = CryptTable::new();
        let prefix = b"levels\\l1data\\";
        let suffixes: [&[u8]; 4] = [b"", b"hero1.dun", b"aaaaaaaa.dun", b"ab_0-zz9.dun"];

        for hash_type in HashType::ALL {
            let state = precompute_prefix(prefix, hash_type, &table);
            for suffix in suffixes {
                let full = [prefix.as_slice(), suffix].concat();
                assert_eq!(
                    hash_continue(state, suffix, hash_type, &table).digest(),
                    hash(&full, hash_type, &table),
                    "mismatch for suffix {:?} with {:?}",
                    String::from_utf8_lossy(suffix),
                    hash_type
                );
            }
        }
    }

    #[test]
    fn test_hash_continue_wraps_without_panic() {
        let table = CryptTable::new();
        let state = HashState {
            seed1: u32::MAX,
            seed2: u32::MAX,
        };
        let _ = hash_continue(state, &[0xFF; 64], HashType::FileKey, &table);
    }
}
