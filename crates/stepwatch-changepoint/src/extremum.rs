//! Windowed extremum tracking
//!
//! Computes the centered sliding-window maximum and minimum of a series.
//! Each window is symmetric around its position; positions where the full
//! window does not fit are left undefined rather than partially computed.
//!
//! The sliding extremum uses a monotonic deque, so a whole series costs
//! O(N) regardless of the window size.

use std::collections::VecDeque;
use stepwatch_core::{DetectorParameters, Direction};

/// Which extremum a window tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    /// Whether `candidate` makes `held` redundant for every later window
    #[inline]
    fn supersedes(self, candidate: f64, held: f64) -> bool {
        match self {
            Extremum::Max => candidate >= held,
            Extremum::Min => candidate <= held,
        }
    }
}

/// Trailing sliding-window extremum over a stream of values
#[derive(Debug, Clone)]
pub struct SlidingExtremum {
    extremum: Extremum,
    width: usize,
    /// (index, value) pairs, monotonic in value from front to back
    deque: VecDeque<(usize, f64)>,
    /// Number of values pushed so far
    seen: usize,
}

impl SlidingExtremum {
    /// Create a tracker over windows of `width` values
    pub fn new(extremum: Extremum, width: usize) -> Self {
        Self {
            extremum,
            width: width.max(1),
            deque: VecDeque::with_capacity(width.max(1)),
            seen: 0,
        }
    }

    /// Push the next value; returns the extremum of the last `width` values
    /// once at least `width` values have been seen
    pub fn push(&mut self, x: f64) -> Option<f64> {
        let idx = self.seen;
        self.seen += 1;

        while let Some(&(i, _)) = self.deque.front() {
            if i + self.width <= idx {
                self.deque.pop_front();
            } else {
                break;
            }
        }
        while let Some(&(_, v)) = self.deque.back() {
            if self.extremum.supersedes(x, v) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((idx, x));

        if self.seen >= self.width {
            self.deque.front().map(|&(_, v)| v)
        } else {
            None
        }
    }

    /// Get window size
    pub fn width(&self) -> usize {
        self.width
    }

    /// Reset state
    pub fn reset(&mut self) {
        self.deque.clear();
        self.seen = 0;
    }
}

/// Centered sliding extremum of `values` over windows of `window_size`
///
/// Position `i` covers `values[i - (W-1)/2 ..= i + (W-1)/2]` and is `None`
/// whenever that range does not fit inside the series.
pub fn centered(values: &[f64], window_size: usize, extremum: Extremum) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window_size == 0 || n < window_size {
        return out;
    }

    let lag = (window_size - 1) / 2;
    let mut tracker = SlidingExtremum::new(extremum, window_size);
    for (j, &x) in values.iter().enumerate() {
        // The trailing window ending at j is the centered window of j - lag
        if let Some(v) = tracker.push(x) {
            out[j - lag] = Some(v);
        }
    }
    out
}

/// Centered sliding maximum
pub fn centered_max(values: &[f64], window_size: usize) -> Vec<Option<f64>> {
    centered(values, window_size, Extremum::Max)
}

/// Centered sliding minimum
pub fn centered_min(values: &[f64], window_size: usize) -> Vec<Option<f64>> {
    centered(values, window_size, Extremum::Min)
}

/// The established worst and best case around every position of a series
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub worst: Vec<Option<f64>>,
    pub best: Vec<Option<f64>>,
}

impl Envelope {
    pub fn len(&self) -> usize {
        self.worst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worst.is_empty()
    }
}

/// Track the established worst and best case of a series
///
/// When higher results are worse the worst case is the window maximum and
/// the best case the window minimum; the roles swap for higher-is-better.
pub fn track(values: &[f64], params: &DetectorParameters) -> Envelope {
    let upper = centered_max(values, params.window_size);
    let lower = centered_min(values, params.window_size);
    match params.direction {
        Direction::HigherIsWorse => Envelope {
            worst: upper,
            best: lower,
        },
        Direction::HigherIsBetter => Envelope {
            worst: lower,
            best: upper,
        },
    }
}
