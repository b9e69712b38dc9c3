//! Candidate name enumeration
//!
//! Candidates are produced by an odometer: one digit per name position, the
//! last position turning fastest. Position 0 draws from a worker-specific
//! alphabet, positions 1.. from the full charset. The suffix bytes follow the
//! name in the same buffer and are never rewritten.

use crate::constants::CANDIDATE_LEN;

/// Number of candidates for a first alphabet of `first_len` and a charset of `charset_len`
///
/// Returns `None` if the count does not fit in a u64.
pub fn total_candidates(first_len: usize, charset_len: usize) -> Option<u64> {
    let tail = (charset_len as u64).checked_pow((CANDIDATE_LEN - 1) as u32)?;
    (first_len as u64).checked_mul(tail)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OdometerState {
    Fresh,
    Running,
    Exhausted,
}

/// Lexicographic odometer over candidate names
///
/// The odometer lends its internal buffer on every step, so it is driven with
/// [`CandidateOdometer::next_candidate`] rather than `Iterator`.
#[derive(Clone, Debug)]
pub struct CandidateOdometer<'a> {
    first_chars: &'a [u8],
    charset: &'a [u8],
    digits: [usize; CANDIDATE_LEN],
    buf: Vec<u8>,
    remaining: Option<u64>,
    last_changed: usize,
    state: OdometerState,
}

impl<'a> CandidateOdometer<'a> {
    /// Create an odometer over `first_chars` x `charset`^7, each name followed by `suffix`
    pub fn new(first_chars: &'a [u8], charset: &'a [u8], suffix: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(CANDIDATE_LEN + suffix.len());
        buf.resize(CANDIDATE_LEN, 0);
        buf.extend_from_slice(suffix);

        let state = if first_chars.is_empty() || charset.is_empty() {
            OdometerState::Exhausted
        } else {
            OdometerState::Fresh
        };

        Self {
            first_chars,
            charset,
            digits: [0; CANDIDATE_LEN],
            buf,
            remaining: None,
            last_changed: 0,
            state,
        }
    }

    /// Stop after `limit` candidates (`None` = run to exhaustion)
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.remaining = limit;
        self
    }

    /// The first candidate this odometer produces, without advancing it
    ///
    /// `None` if the odometer produces nothing (empty alphabet or a zero limit).
    pub fn first_candidate(&self) -> Option<Vec<u8>> {
        if self.first_chars.is_empty() || self.charset.is_empty() || self.remaining == Some(0) {
            return None;
        }

        let mut first = self.buf.clone();
        first[0] = self.first_chars[0];
        first[1..CANDIDATE_LEN].fill(self.charset[0]);
        Some(first)
    }

    /// Advance and return the next candidate (name followed by suffix)
    pub fn next_candidate(&mut self) -> Option<&[u8]> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                self.state = OdometerState::Exhausted;
                return None;
            }
            *remaining -= 1;
        }

        match self.state {
            OdometerState::Exhausted => return None,
            OdometerState::Fresh => {
                self.buf[0] = self.first_chars[0];
                self.buf[1..CANDIDATE_LEN].fill(self.charset[0]);
                self.last_changed = 0;
                self.state = OdometerState::Running;
            }
            OdometerState::Running => {
                if !self.step() {
                    self.state = OdometerState::Exhausted;
                    return None;
                }
            }
        }

        Some(&self.buf)
    }

    /// Lowest name position rewritten by the last step
    ///
    /// 0 on the first candidate and whenever the first character changed.
    pub fn last_changed(&self) -> usize {
        self.last_changed
    }

    /// Name part of the current candidate, without the suffix
    pub fn name(&self) -> &[u8] {
        &self.buf[..CANDIDATE_LEN]
    }

    /// Roll the odometer by one, rewriting only the positions that changed
    ///
    /// Returns false once every position has wrapped.
    fn step(&mut self) -> bool {
        let mut pos = CANDIDATE_LEN - 1;
        loop {
            let alphabet = self.alphabet(pos);
            let digit = self.digits[pos] + 1;
            if digit < alphabet.len() {
                self.digits[pos] = digit;
                self.buf[pos] = alphabet[digit];
                self.last_changed = pos;
                return true;
            }
            if pos == 0 {
                return false;
            }
            self.digits[pos] = 0;
            self.buf[pos] = alphabet[0];
            pos -= 1;
        }
    }

    #[inline(always)]
    fn alphabet(&self, pos: usize) -> &'a [u8] {
        if pos == 0 {
            self.first_chars
        } else {
            self.charset
        }
    }
}
