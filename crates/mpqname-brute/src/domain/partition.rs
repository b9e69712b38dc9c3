//! Static work partitioning
//!
//! The first-character alphabet is split into contiguous slices, one per
//! worker. Each worker then owns every candidate starting with a character
//! of its slice.

/// Split `alphabet` into `worker_count` contiguous slices of `ceil(len / worker_count)` bytes
///
/// Always returns `max(worker_count, 1)` slices. The last non-empty slice may be
/// shorter, and when there are more workers than characters the trailing
/// slices are empty.
pub fn partition(alphabet: &[u8], worker_count: usize) -> Vec<&[u8]> {
    let worker_count = worker_count.max(1);
    let chunk = alphabet.len().div_ceil(worker_count);

    (0..worker_count)
        .map(|i| {
            let start = (i * chunk).min(alphabet.len());
            let end = ((i + 1) * chunk).min(alphabet.len());
            &alphabet[start..end]
        })
        .collect()
}
