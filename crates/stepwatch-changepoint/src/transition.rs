//! Transition detection
//!
//! Turns an extremum envelope into regression onset flags in three steps:
//!
//! 1. **Candidates**: the worst case of the window a full `W` positions back
//!    is still better than `tolerance` times the best case of the current
//!    window. This only holds once performance got durably worse.
//! 2. **Onsets**: every run of candidates collapses to its first position.
//! 3. **Realignment**: onsets shift back by the half window, the lag the
//!    centered window needed to settle on the new level.
//!
//! Undefined extrema never produce a flag.

use crate::extremum::Envelope;
use stepwatch_core::{DetectorParameters, Direction, Error, Result};

/// Raw candidate flags: lagged worst case beats the tolerance-scaled best case
pub fn candidates(envelope: &Envelope, params: &DetectorParameters) -> Result<Vec<bool>> {
    let Envelope { worst, best } = envelope;
    if worst.len() != best.len() {
        return Err(Error::size_mismatch(worst.len(), best.len(), "extremum envelope"));
    }

    let lookback = params.window_size;
    let tol = params.tolerance;
    let flags = best
        .iter()
        .enumerate()
        .map(|(i, &current_best)| {
            let lagged_worst = i.checked_sub(lookback).and_then(|j| worst[j]);
            match (lagged_worst, current_best) {
                (Some(w), Some(b)) => match params.direction {
                    Direction::HigherIsWorse => w < tol * b,
                    Direction::HigherIsBetter => tol * w > b,
                },
                _ => false,
            }
        })
        .collect();
    Ok(flags)
}

/// Keep only the first position of every run of `true`
pub fn onsets(candidates: &[bool]) -> Vec<bool> {
    let mut previous = false;
    candidates
        .iter()
        .map(|&current| {
            let onset = current && !previous;
            previous = current;
            onset
        })
        .collect()
}

/// Shift flags back by `lag` positions; positions reading past the end are `false`
pub fn realign(onsets: &[bool], lag: usize) -> Vec<bool> {
    (0..onsets.len())
        .map(|i| onsets.get(i + lag).copied().unwrap_or(false))
        .collect()
}

/// Full transition detection over an envelope
pub fn detect_transitions(envelope: &Envelope, params: &DetectorParameters) -> Result<Vec<bool>> {
    let raw = candidates(envelope, params)?;
    Ok(realign(&onsets(&raw), params.half_window()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extremum::track;

    fn params(window_size: usize) -> DetectorParameters {
        DetectorParameters::default().with_window_size(window_size)
    }

    #[test]
    fn test_onsets_collapse_runs() {
        let raw = [false, true, true, true, false, true, true];
        assert_eq!(onsets(&raw), vec![false, true, false, false, false, true, false]);
    }

    #[test]
    fn test_onset_at_first_position() {
        assert_eq!(onsets(&[true, true]), vec![true, false]);
        assert!(onsets(&[]).is_empty());
    }

    #[test]
    fn test_realign_shifts_back_and_pads() {
        let flags = [false, false, false, true, false];
        assert_eq!(realign(&flags, 2), vec![false, true, false, false, false]);
        assert_eq!(realign(&flags, 10), vec![false; 5]);
        assert_eq!(realign(&flags, 0), flags.to_vec());
    }

    #[test]
    fn test_candidates_need_full_lookback() {
        let envelope = Envelope {
            worst: vec![Some(1.0); 4],
            best: vec![Some(10.0); 4],
        };
        let p = params(3);
        assert_eq!(candidates(&envelope, &p).unwrap(), vec![false, false, false, true]);
    }

    #[test]
    fn test_candidates_undefined_operands_are_false() {
        let envelope = Envelope {
            worst: vec![None, Some(1.0), None, Some(1.0)],
            best: vec![Some(10.0), Some(10.0), None, Some(10.0)],
        };
        let p = params(1);
        assert_eq!(candidates(&envelope, &p).unwrap(), vec![false, false, false, false]);

        let envelope = Envelope {
            worst: vec![Some(1.0), Some(1.0), None],
            best: vec![Some(10.0), Some(10.0), Some(10.0)],
        };
        assert_eq!(candidates(&envelope, &p).unwrap(), vec![false, true, true]);
    }

    #[test]
    fn test_tolerance_scales_best_case() {
        let envelope = Envelope {
            worst: vec![Some(9.6), Some(9.6)],
            best: vec![Some(10.0), Some(10.0)],
        };
        // 9.6 < 0.95 * 10.0 is false, 9.6 < 1.0 * 10.0 is true
        let p = params(1);
        assert_eq!(candidates(&envelope, &p).unwrap(), vec![false, false]);
        let p = p.with_tolerance(1.0);
        assert_eq!(candidates(&envelope, &p).unwrap(), vec![false, true]);
    }

    #[test]
    fn test_higher_is_better_flags_drops() {
        let mut values = vec![100.0; 10];
        values.extend(vec![50.0; 10]);
        let p = params(5).with_direction(Direction::HigherIsBetter);
        let flags = detect_transitions(&track(&values, &p), &p).unwrap();
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
        assert!(flags[10]);

        // The same drop is an improvement when higher is worse
        let p = params(5);
        let flags = detect_transitions(&track(&values, &p), &p).unwrap();
        assert!(flags.iter().all(|&f| !f));
    }

    #[test]
    fn test_size_mismatch_is_error() {
        let envelope = Envelope {
            worst: vec![None; 3],
            best: vec![None; 2],
        };
        assert!(candidates(&envelope, &params(3)).is_err());
    }
}
