//! MPQ path hash CLI
//!
//! Usage: mpqname_hash <PATH>...
//!
//! Prints the table index, hash A, hash B and file key hashes of each path,
//! e.g. to derive search targets from a known name or to verify a result.
//!
//! Example: mpqname_hash "levels\l1data\hero1.dun"

use mpqname_brute::{CryptTable, HashType, hash};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        let program = args.first().map(String::as_str).unwrap_or("mpqname_hash");
        eprintln!("Usage: {} <PATH>...", program);
        return ExitCode::from(2);
    }

    let table = CryptTable::new();
    for path in &args[1..] {
        println!("{}", path);
        for hash_type in HashType::ALL {
            println!(
                "  {:<10} 0x{:08X}",
                format!("{:?}", hash_type),
                hash(path.as_bytes(), hash_type, &table)
            );
        }
    }

    ExitCode::SUCCESS
}
