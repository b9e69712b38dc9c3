//! MPQ file name search CLI
//!
//! Usage: mpqname_search [options]
//!
//! Options:
//!   --prefix <STR>        Path prefix shared by every candidate
//!   --suffix <STR>        Suffix appended to every name
//!   --first-chars <STR>   Alphabet of the first name character
//!   --charset <STR>       Alphabet of the remaining name characters
//!   --hash-a <N>          Target hash A (decimal or 0x-prefixed hex)
//!   --hash-b <N>          Target hash B (decimal or 0x-prefixed hex)
//!   --threads <N>         Number of workers (default: all processing units)
//!   --samples <N>         Stop after about N candidates in total
//!   --output <PATH>       Result file (default: found.txt)
//!   --help, -h            Show help
//!
//! Example: mpqname_search --threads 8 --samples 1000000000
//!
//! Exit status: 0 if a name was found and written, 1 if the space holds no
//! match, 2 on invalid arguments or I/O errors.

use mpqname_brute::constants::{
    CANDIDATE_LEN, DEFAULT_CHARSET, DEFAULT_FIRST_CHARSET, DEFAULT_NAME_SUFFIX,
    DEFAULT_OUTPUT_FILE, DEFAULT_PATH_PREFIX, DEFAULT_TARGET_HASH_A, DEFAULT_TARGET_HASH_B,
};
use mpqname_brute::infra::result_io::{get_result_path, save_found_path};
use mpqname_brute::{
    HashPair, SearchConfig, SearchEvent, SearchOptions, default_workers, run_with_options,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    config: SearchConfig,
    threads: Option<usize>,
    samples: Option<u64>,
    output: PathBuf,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --prefix <STR>        Path prefix (default: {})", DEFAULT_PATH_PREFIX);
    eprintln!("  --suffix <STR>        Name suffix (default: {})", DEFAULT_NAME_SUFFIX);
    eprintln!(
        "  --first-chars <STR>   First character alphabet (default: {})",
        DEFAULT_FIRST_CHARSET
    );
    eprintln!(
        "  --charset <STR>       Alphabet of characters 2..{} (default: {})",
        CANDIDATE_LEN, DEFAULT_CHARSET
    );
    eprintln!("  --hash-a <N>          Target hash A (default: 0x{:08X})", DEFAULT_TARGET_HASH_A);
    eprintln!("  --hash-b <N>          Target hash B (default: 0x{:08X})", DEFAULT_TARGET_HASH_B);
    eprintln!("  --threads <N>         Number of workers (default: all processing units)");
    eprintln!("  --samples <N>         Stop after about N candidates in total");
    eprintln!("  --output <PATH>       Result file (default: {})", DEFAULT_OUTPUT_FILE);
    eprintln!("  --help, -h            Show this help message");
}

/// Parse u32 from string (supports hex with 0x prefix)
fn parse_u32(value: &str) -> Result<u32, String> {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value '{}': {}", value, e))
    } else {
        value
            .parse::<u32>()
            .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
    }
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut config = SearchConfig::default();
    let mut hash_a = DEFAULT_TARGET_HASH_A;
    let mut hash_b = DEFAULT_TARGET_HASH_B;
    let mut threads = None;
    let mut samples = None;
    let mut output = get_result_path(".");

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" || flag == "-h" {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| format!("{} requires a value", flag))?;

        match flag {
            "--prefix" => config.prefix = value.clone(),
            "--suffix" => config.suffix = value.clone(),
            "--first-chars" => config.first_chars = value.clone(),
            "--charset" => config.charset = value.clone(),
            "--hash-a" => hash_a = parse_u32(value)?,
            "--hash-b" => hash_b = parse_u32(value)?,
            "--threads" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid thread count: {}", value))?;
                if n == 0 {
                    return Err("Thread count must be at least 1".to_string());
                }
                threads = Some(n);
            }
            "--samples" => {
                samples = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid sample count: {}", value))?,
                );
            }
            "--output" => output = PathBuf::from(value),
            _ => return Err(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    config.target = HashPair::new(hash_a, hash_b);

    Ok(Args {
        config,
        threads,
        samples,
        output,
    })
}

fn print_event(event: &SearchEvent) {
    match event {
        SearchEvent::WorkerStarted {
            worker,
            first_chars,
            first_candidate,
        } => match first_candidate {
            Some(path) => println!(
                "[Worker {}] first chars '{}', first candidate: {}",
                worker, first_chars, path
            ),
            None => println!("[Worker {}] empty partition", worker),
        },
        SearchEvent::Progress { worker, lead } => {
            println!("[Worker {}] at '{}'", worker, lead);
        }
        SearchEvent::PartialMatch { worker, candidate } => {
            println!("[Worker {}] hash A matched: {}", worker, candidate);
        }
        SearchEvent::Found { worker, candidate } => {
            println!("[Worker {}] FOUND: {}", worker, candidate);
        }
        SearchEvent::WorkerFinished {
            worker,
            checked,
            stopped,
        } => {
            let how = if *stopped { "stopped" } else { "done" };
            println!("[Worker {}] {} after {} candidates", worker, how, checked);
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&env::args().next().unwrap_or_default());
            return ExitCode::from(2);
        }
    };

    let threads = args.threads.unwrap_or_else(default_workers);

    let mut options = SearchOptions::default()
        .with_workers(threads)
        .with_events(print_event);
    if let Some(total) = args.samples {
        options = options.with_sample_limit(total.div_ceil(threads as u64));
    }

    let config = &args.config;
    println!(
        "Searching {}{}{} for hash A 0x{:08X}, hash B 0x{:08X}",
        config.prefix,
        "?".repeat(CANDIDATE_LEN),
        config.suffix,
        config.target.hash_a,
        config.target.hash_b
    );
    match config.keyspace() {
        Some(n) => println!("Search space: {} candidates", n),
        None => println!("Search space: more than {} candidates", u64::MAX),
    }
    println!("Workers: {}", threads);
    if let Some(limit) = options.sample_limit {
        println!("Sample limit: {} candidates per worker", limit);
    }

    let outcome = match run_with_options(config, options) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    println!(
        "Checked {} candidates in {:.2} seconds ({:.2} M/s)",
        outcome.candidates_checked,
        outcome.elapsed.as_secs_f64(),
        outcome.candidates_per_second() / 1_000_000.0
    );

    match outcome.found {
        Some(found) => {
            println!("Found: {}", found);
            println!("Writing result to {}...", args.output.display());
            match save_found_path(&args.output, &found) {
                Ok(()) => {
                    println!("Result saved successfully.");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: unable to write {}: {}", args.output.display(), e);
                    ExitCode::from(2)
                }
            }
        }
        None => {
            println!("No match found.");
            ExitCode::from(1)
        }
    }
}
