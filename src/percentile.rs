// MIT License
//
// Copyright (c) 2026 Raja Lehtihet & Wael El Oraiby
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//
//! Empirical thresholds and profit-rate search over a sorted sample.
//!
//! These functions hold no state. [`crate::rolling::RollingDistribution`]
//! calls them on a private sorted copy of its storage taken under the read
//! lock.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DistributionError;

/// Result of a profit-maximizing rate search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prediction {
    /// Fill rate in `[0, 1)` at which the expected profit peaks.
    pub rate: f64,
    /// Expected profit `spread * rate` at that rate.
    pub profit: f64,
}

/// Returns a sorted copy of `values`, ascending or descending.
///
/// NaN values sort before every number when ascending and after every number
/// when descending.
pub fn sorted_copy(values: &[f64], descending: bool) -> Vec<f64> {
    let mut sorted = values.to_vec();
    if descending {
        sorted.sort_unstable_by(|left, right| nan_first(right, left));
    } else {
        sorted.sort_unstable_by(nan_first);
    }
    sorted
}

fn nan_first(left: &f64, right: &f64) -> Ordering {
    left.is_nan()
        .cmp(&right.is_nan())
        .reverse()
        .then_with(|| left.total_cmp(right))
}

/// Returns the empirical cut value of `sorted` at cumulative `probability`.
///
/// The point `floor(len * probability)` is located and the value right after
/// it is returned. `0.0` is returned for an empty sample and when no value
/// lies past the point.
///
/// `probability` is expected in `[0, 1]`; see [`clamp_probability`].
///
/// # Example
/// ```rust
/// use fill_forecast::percentile::threshold_in;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(threshold_in(&sorted, 0.5), 4.0);
/// assert_eq!(threshold_in(&sorted, 0.75), 0.0);
/// ```
pub fn threshold_in(sorted: &[f64], probability: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let point = (sorted.len() as f64 * probability).floor() as usize;
    let next = point.saturating_add(1);
    if sorted.len() <= next {
        return 0.0;
    }
    sorted[next]
}

/// Searches the fill rate that maximizes `spread(rate) * rate`.
///
/// `descending` must be sorted from the widest spread to the narrowest.
/// Candidate rates are `i / len` for `i` in `0..len`; the spread at each rate
/// is [`threshold_in`] of that rate. Spreads below `target_threshold` earn
/// nothing, and ties keep the lowest rate.
///
/// Returns `None` for an empty sample.
pub fn best_rate_in(descending: &[f64], target_threshold: f64) -> Option<Prediction> {
    if descending.is_empty() {
        return None;
    }

    let base = 1.0 / descending.len() as f64;
    let mut best = Prediction::default();
    let mut best_index = 0usize;

    for index in 0..descending.len() {
        let ratio = index as f64 * base;
        let spread = threshold_in(descending, ratio);
        if spread < target_threshold {
            continue;
        }

        let profit = spread * ratio;
        if best.profit < profit {
            best.profit = profit;
            best_index = index;
        }
    }

    best.rate = best_index as f64 * base;
    Some(best)
}

/// Checks that `probability` is finite and within `[0, 1]`.
///
/// # Errors
/// Returns [`DistributionError::InvalidProbability`] otherwise.
pub fn validate_probability(probability: f64) -> Result<f64, DistributionError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(DistributionError::InvalidProbability(probability));
    }
    Ok(probability)
}

/// Clamps `probability` into `[0, 1]`, or `None` when it is NaN.
pub fn clamp_probability(probability: f64) -> Option<f64> {
    if probability.is_nan() {
        return None;
    }
    Some(probability.clamp(0.0, 1.0))
}


#[cfg(test)]
mod proptests {
    use super::{best_rate_in, sorted_copy, threshold_in};
    use proptest::prelude::*;

    fn spreads(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1_000.0_f64..1_000.0, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn ascending_threshold_is_non_decreasing(
            values in spreads(2, 200),
            a in 0.0_f64..=1.0,
            b in 0.0_f64..=1.0,
        ) {
            let sorted = sorted_copy(&values, false);
            // keep both points inside the range that has a tail value
            let limit = (values.len() - 2) as f64 / values.len() as f64;
            let (low, high) = if a <= b { (a * limit, b * limit) } else { (b * limit, a * limit) };
            prop_assert!(threshold_in(&sorted, low) <= threshold_in(&sorted, high));
        }

        #[test]
        fn descending_threshold_is_non_increasing(
            values in spreads(2, 200),
            a in 0.0_f64..=1.0,
            b in 0.0_f64..=1.0,
        ) {
            let sorted = sorted_copy(&values, true);
            let limit = (values.len() - 2) as f64 / values.len() as f64;
            let (low, high) = if a <= b { (a * limit, b * limit) } else { (b * limit, a * limit) };
            prop_assert!(threshold_in(&sorted, low) >= threshold_in(&sorted, high));
        }

        #[test]
        fn spreads_below_target_earn_nothing(values in spreads(1, 200)) {
            let sorted = sorted_copy(&values, true);
            let best = best_rate_in(&sorted, 1_000.0).unwrap();
            prop_assert_eq!(best.profit, 0.0);
            prop_assert_eq!(best.rate, 0.0);
        }

        #[test]
        fn best_rate_stays_in_unit_interval(
            values in spreads(1, 200),
            target in -10.0_f64..10.0,
        ) {
            let sorted = sorted_copy(&values, true);
            let best = best_rate_in(&sorted, target).unwrap();
            prop_assert!((0.0..1.0).contains(&best.rate));
            prop_assert!(best.profit >= 0.0);
        }
    }
}
