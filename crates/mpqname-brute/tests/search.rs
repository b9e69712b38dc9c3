//! End-to-end search tests
//!
//! Targets are planted by hashing a chosen name, so every run has a known
//! answer (or a known absence of one) in a small search space.

use mpqname_brute::infra::result_io::{load_found_path, save_found_path};
use mpqname_brute::{
    CryptTable, HashPair, SearchConfig, SearchEvent, SearchOptions, hash_pair, run_with_options,
};
use serial_test::serial;
use std::sync::{Condvar, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn planted(first: &str, charset: &str, name: &str) -> SearchConfig {
    let table = CryptTable::new();
    let base = SearchConfig::default().with_alphabets(first, charset);
    let path = format!("{}{}{}", base.prefix, name, base.suffix);
    base.with_target(hash_pair(path.as_bytes(), &table))
}

fn collect_events(
    config: &SearchConfig,
    workers: usize,
) -> (Option<String>, u64, Vec<SearchEvent>) {
    let events = Mutex::new(Vec::new());
    let options = SearchOptions::default()
        .with_workers(workers)
        .with_events(|event: &SearchEvent| events.lock().unwrap().push(event.clone()));
    let outcome = run_with_options(config, options).unwrap();
    (
        outcome.found,
        outcome.candidates_checked,
        events.into_inner().unwrap(),
    )
}

#[test]
#[serial]
fn finds_planted_name_in_every_partition() {
    let first = "abcdefgh";
    for lead in first.chars() {
        let name = format!("{}b_0a_b0", lead);
        let config = planted(first, "ab0_", &name);
        let options = SearchOptions::default().with_workers(3);
        let outcome = run_with_options(&config, options).unwrap();

        assert_eq!(
            outcome.found,
            Some(format!("levels\\l1data\\{}.dun", name)),
            "planted {}",
            name
        );
    }
}

#[test]
#[serial]
fn exhaustive_miss_visits_every_candidate() {
    let config = SearchConfig::default()
        .with_alphabets("abcd", "abc")
        .with_target(HashPair::new(0, 0));
    let (found, checked, events) = collect_events(&config, 3);

    assert_eq!(found, None);
    assert_eq!(Some(checked), config.keyspace());

    let finished: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SearchEvent::WorkerFinished {
                checked, stopped, ..
            } => Some((*checked, *stopped)),
            _ => None,
        })
        .collect();
    assert_eq!(finished.len(), 3);
    assert!(finished.iter().all(|(_, stopped)| !stopped));
    assert_eq!(finished.iter().map(|(c, _)| c).sum::<u64>(), checked);
    assert!(!events.iter().any(|e| matches!(e, SearchEvent::Found { .. })));
}

#[test]
#[serial]
fn match_stops_other_workers() {
    // The answer is the first candidate of worker 0; the other partitions
    // hold 38^7 candidates each and only finish if cancellation works.
    let config = planted(
        "abcd",
        "abcdefghijklmnopqrstuvwxyz0123456789-_",
        "aaaaaaaa",
    );
    let (found, checked, events) = collect_events(&config, 4);

    assert_eq!(found.as_deref(), Some("levels\\l1data\\aaaaaaaa.dun"));
    assert!(checked < config.keyspace().unwrap() / 4);

    let found_events = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::Found { .. }))
        .count();
    assert_eq!(found_events, 1);

    let mut finished = 0;
    for event in &events {
        if let SearchEvent::WorkerFinished {
            worker, stopped, ..
        } = event
        {
            finished += 1;
            if *worker != 0 {
                assert!(*stopped, "worker {} ran to exhaustion", worker);
            }
        }
    }
    assert_eq!(finished, 4);
}

#[test]
#[serial]
fn running_workers_check_no_candidate_after_the_match() {
    // Workers 1..4 pause after their first candidate until the match is
    // reported, so each is mid-partition when worker 0 finds its second
    // candidate. None of them may check another candidate afterwards.
    let config = planted("abcd", "ab", "aaaaaaab");
    let found_seen = Mutex::new(false);
    let found_cv = Condvar::new();
    let finished = Mutex::new(Vec::new());

    let options = SearchOptions::default()
        .with_workers(4)
        .with_events(|event: &SearchEvent| match event {
            SearchEvent::Progress { worker, .. } if *worker != 0 => {
                let guard = found_seen.lock().unwrap();
                let _ = found_cv
                    .wait_timeout_while(guard, Duration::from_secs(30), |seen| !*seen)
                    .unwrap();
            }
            SearchEvent::Found { .. } => {
                *found_seen.lock().unwrap() = true;
                found_cv.notify_all();
            }
            SearchEvent::WorkerFinished {
                worker,
                checked,
                stopped,
            } => finished
                .lock()
                .unwrap()
                .push((*worker, *checked, *stopped)),
            _ => {}
        });
    let outcome = run_with_options(&config, options).unwrap();

    assert_eq!(outcome.found.as_deref(), Some("levels\\l1data\\aaaaaaab.dun"));
    assert!(*found_seen.lock().unwrap());

    let mut finished = finished.into_inner().unwrap();
    finished.sort();
    assert_eq!(
        finished,
        vec![(0, 2, false), (1, 1, true), (2, 1, true), (3, 1, true)]
    );
    assert_eq!(outcome.candidates_checked, 5);
}

#[test]
#[serial]
fn more_workers_than_first_chars() {
    let config = planted("ab", "xyz", "bzyxzyxz");
    let (found, _, events) = collect_events(&config, 6);

    assert_eq!(found.as_deref(), Some("levels\\l1data\\bzyxzyxz.dun"));

    let empty_starts = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SearchEvent::WorkerStarted {
                    first_candidate: None,
                    ..
                }
            )
        })
        .count();
    assert_eq!(empty_starts, 4);
}

#[test]
#[serial]
fn sample_limit_bounds_the_run() {
    let config = planted("ab", "abc", "bccccccc");
    let options = SearchOptions::default().with_workers(2).with_sample_limit(100);
    let outcome = run_with_options(&config, options).unwrap();

    // The answer is the last candidate of worker 1, beyond the limit
    assert_eq!(outcome.found, None);
    assert_eq!(outcome.candidates_checked, 200);
}

#[test]
#[serial]
fn partial_match_is_reported_without_stopping() {
    let table = CryptTable::new();
    let path = "levels\\l1data\\abbaabba.dun";
    let real = hash_pair(path.as_bytes(), &table);
    let config = SearchConfig::default()
        .with_alphabets("ab", "ab")
        .with_target(HashPair::new(real.hash_a, real.hash_b ^ 0x8000_0000));

    let (found, checked, events) = collect_events(&config, 2);

    assert_eq!(found, None);
    assert_eq!(checked, 256);
    assert!(events.contains(&SearchEvent::PartialMatch {
        worker: 0,
        candidate: path.to_string(),
    }));
}

#[test]
#[serial]
fn found_path_round_trips_through_result_file() {
    let config = planted("0123", "-_9", "2-_9-_9-");
    let outcome = run_with_options(&config, SearchOptions::default().with_workers(2)).unwrap();
    let found = outcome.found.expect("planted name must be found");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("found.txt");
    save_found_path(&path, &found).unwrap();

    assert_eq!(
        load_found_path(&path).unwrap(),
        "levels\\l1data\\2-_9-_9-.dun"
    );
}
