//! Parallel search workflow
//!
//! The first-character alphabet is partitioned statically, one slice per
//! worker, and every worker runs its own odometer on a dedicated rayon pool.
//! Workers share only the crypt table, the prefix states and two atomics: a
//! stop flag checked before every candidate and a candidate counter.

use crate::constants::PROGRESS_FLUSH_INTERVAL;
use crate::domain::candidate::CandidateOdometer;
use crate::domain::config::{ConfigError, SearchConfig};
use crate::domain::crypt_table::CryptTable;
use crate::domain::matcher::{MatchVerdict, Matcher};
use crate::domain::partition::partition;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Search errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Progress and diagnostic events emitted by workers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A worker begins its partition
    WorkerStarted {
        worker: usize,
        first_chars: String,
        /// Full path of the first candidate (None for an empty partition)
        first_candidate: Option<String>,
    },
    /// The two leading name characters of a worker changed
    Progress { worker: usize, lead: String },
    /// A candidate matched hash A but not hash B
    PartialMatch { worker: usize, candidate: String },
    /// A candidate matched both hashes; emitted once per run
    Found { worker: usize, candidate: String },
    /// A worker left its loop
    WorkerFinished {
        worker: usize,
        checked: u64,
        /// True if the worker was cancelled before exhausting its partition
        stopped: bool,
    },
}

/// Options for a search run
#[derive(Clone)]
pub struct SearchOptions<F = fn(&SearchEvent)> {
    /// Number of workers (default: [`default_workers`])
    pub workers: Option<usize>,
    /// Maximum candidates per worker (default: exhaustive)
    pub sample_limit: Option<u64>,
    /// Event callback
    pub on_event: Option<F>,
}

impl Default for SearchOptions<fn(&SearchEvent)> {
    fn default() -> Self {
        Self {
            workers: None,
            sample_limit: None,
            on_event: None,
        }
    }
}

impl<F> SearchOptions<F> {
    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Cap the number of candidates each worker checks
    pub fn with_sample_limit(mut self, limit: u64) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    /// Set the event callback
    pub fn with_events<G>(self, callback: G) -> SearchOptions<G> {
        SearchOptions {
            workers: self.workers,
            sample_limit: self.sample_limit,
            on_event: Some(callback),
        }
    }
}

/// Result of a search run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Matched full path, if any
    pub found: Option<String>,
    /// Candidates checked across all workers
    pub candidates_checked: u64,
    /// Number of workers launched
    pub workers: usize,
    /// Wall time of the run
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Average throughput in candidates per second
    pub fn candidates_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.candidates_checked as f64 / secs
        } else {
            0.0
        }
    }
}

/// Number of processing units available to this process (at least 1)
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Search the whole space with one worker per processing unit
pub fn run(config: &SearchConfig) -> Result<SearchOutcome, SearchError> {
    run_with_options(config, SearchOptions::default())
}

/// Search with explicit options
///
/// The first worker to match both hashes wins; every other worker stops
/// before its next candidate. Without a match, returns only after every
/// partition is exhausted (or its sample limit is reached).
pub fn run_with_options<F>(
    config: &SearchConfig,
    options: SearchOptions<F>,
) -> Result<SearchOutcome, SearchError>
where
    F: Fn(&SearchEvent) + Sync,
{
    config.validate()?;

    let SearchOptions {
        workers,
        sample_limit,
        on_event,
    } = options;
    let workers = workers.unwrap_or_else(default_workers).max(1);

    let start = Instant::now();

    let table = CryptTable::new();
    let ctx = WorkerContext {
        config,
        matcher: Matcher::new(&table, config.prefix.as_bytes(), config.target),
        stop: AtomicBool::new(false),
        checked: AtomicU64::new(0),
        sample_limit,
        on_event: on_event.as_ref(),
    };
    let slices = partition(config.first_chars.as_bytes(), workers);

    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    // Every worker is run (and reports) even when another has already matched
    let found = pool.install(|| {
        slices
            .par_iter()
            .enumerate()
            .with_max_len(1)
            .filter_map(|(worker, slice)| search_partition(worker, slice, &ctx))
            .collect::<Vec<String>>()
    });

    Ok(SearchOutcome {
        found: found.into_iter().next(),
        candidates_checked: ctx.checked.load(Ordering::Relaxed),
        workers,
        elapsed: start.elapsed(),
    })
}

/// State shared by all workers of one run
struct WorkerContext<'a, F> {
    config: &'a SearchConfig,
    matcher: Matcher<'a>,
    stop: AtomicBool,
    checked: AtomicU64,
    sample_limit: Option<u64>,
    on_event: Option<&'a F>,
}

impl<F> WorkerContext<'_, F>
where
    F: Fn(&SearchEvent),
{
    #[inline]
    fn emit(&self, event: impl FnOnce() -> SearchEvent) {
        if let Some(callback) = self.on_event {
            callback(&event());
        }
    }
}

/// Enumerate one partition until exhaustion, the sample limit, or cancellation
fn search_partition<F>(
    worker: usize,
    slice: &[u8],
    ctx: &WorkerContext<'_, F>,
) -> Option<String>
where
    F: Fn(&SearchEvent),
{
    let config = ctx.config;
    let mut odometer =
        CandidateOdometer::new(slice, config.charset.as_bytes(), config.suffix.as_bytes())
            .with_limit(ctx.sample_limit);

    ctx.emit(|| SearchEvent::WorkerStarted {
        worker,
        first_chars: String::from_utf8_lossy(slice).into_owned(),
        first_candidate: odometer.first_candidate().map(|c| config.full_path(&c)),
    });

    let mut local: u64 = 0;
    let mut stopped = false;
    let mut found = None;

    loop {
        if ctx.stop.load(Ordering::Relaxed) {
            stopped = true;
            break;
        }
        let Some(candidate) = odometer.next_candidate() else {
            break;
        };
        local += 1;
        if local % PROGRESS_FLUSH_INTERVAL == 0 {
            ctx.checked.fetch_add(PROGRESS_FLUSH_INTERVAL, Ordering::Relaxed);
        }

        match ctx.matcher.check(candidate) {
            MatchVerdict::Miss => {}
            MatchVerdict::PartialA => {
                ctx.emit(|| SearchEvent::PartialMatch {
                    worker,
                    candidate: config.full_path(candidate),
                });
            }
            MatchVerdict::Found => {
                let path = config.full_path(candidate);
                if ctx
                    .stop
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
                    .is_ok()
                {
                    ctx.emit(|| SearchEvent::Found {
                        worker,
                        candidate: path.clone(),
                    });
                    found = Some(path);
                } else {
                    stopped = true;
                }
                break;
            }
        }

        if odometer.last_changed() <= 1 {
            ctx.emit(|| SearchEvent::Progress {
                worker,
                lead: String::from_utf8_lossy(&odometer.name()[..2]).into_owned(),
            });
        }
    }

    ctx.checked.fetch_add(local % PROGRESS_FLUSH_INTERVAL, Ordering::Relaxed);
    ctx.emit(|| SearchEvent::WorkerFinished {
        worker,
        checked: local,
        stopped,
    });

    found
}
