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
//! Thread-safe rolling distribution of observed spreads.
//!
//! Observations are grouped into generations separated by
//! [`RollingDistribution::roll_window`]. The first roll after an empty start
//! keeps the finished generation, so queries issued right after it still see
//! the period that just ended. Every later roll trims as many values from the
//! front as the closing generation appended, which bounds storage to two
//! generations' worth of observations.

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::DistributionError;
use crate::config::DistributionConfig;
use crate::percentile::{
    Prediction, best_rate_in, clamp_probability, sorted_copy, threshold_in,
    validate_probability,
};

#[derive(Debug, Default)]
struct Generations {
    // Arrival order, oldest first.
    values: Vec<f64>,
    // Values appended since the last roll. Always <= values.len().
    current: usize,
}

/// Rolling empirical distribution of spreads with two-generation retention.
///
/// All methods take `&self`; share the distribution across threads with
/// [`std::sync::Arc`]. Writers (`append`, `extend`, `roll_window`, `clear`)
/// take an exclusive lock and readers take a shared one.
///
/// # Example
/// ```rust
/// use fill_forecast::rolling::RollingDistribution;
///
/// let spreads = RollingDistribution::new();
/// spreads.append(1.0);
/// spreads.append(2.0);
/// spreads.roll_window();
///
/// // The finished generation is still visible until the next roll.
/// assert_eq!(spreads.count(), 0);
/// assert_eq!(spreads.storage_size(), 2);
/// assert_eq!(spreads.threshold(false, 0.0), 2.0);
///
/// spreads.append(3.0);
/// spreads.append(4.0);
/// spreads.roll_window();
/// assert_eq!(spreads.snapshot(), vec![3.0, 4.0]);
/// ```
#[derive(Debug)]
pub struct RollingDistribution {
    config: DistributionConfig,
    inner: RwLock<Generations>,
}

impl Default for RollingDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingDistribution {
    /// Creates an empty distribution with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(DistributionConfig::default())
    }

    /// Creates an empty distribution from `config`.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidParameter`] when the configuration
    /// does not validate.
    pub fn with_config(config: DistributionConfig) -> Result<Self, DistributionError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DistributionConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Generations {
                values: Vec::with_capacity(config.capacity_hint),
                current: 0,
            }),
        }
    }

    /// Returns the configuration the distribution was built with.
    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Appends one observation to the current generation.
    ///
    /// Values are stored as given, including NaN and infinities.
    pub fn append(&self, value: f64) {
        let mut inner = self.inner.write();
        inner.values.push(value);
        inner.current += 1;
    }

    /// Appends every value from an iterator under a single write lock.
    ///
    /// The iterator is drained before the lock is taken, so it may read this
    /// distribution, and a panic inside it leaves storage untouched.
    pub fn extend<I>(&self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        let mut inner = self.inner.write();
        inner.current += values.len();
        inner.values.extend(values);
    }

    /// Returns the number of observations in the current generation.
    pub fn count(&self) -> usize {
        self.inner.read().current
    }

    /// Returns the number of retained observations across generations.
    pub fn storage_size(&self) -> usize {
        self.inner.read().values.len()
    }

    /// Returns `true` when no observation is retained.
    pub fn is_empty(&self) -> bool {
        self.inner.read().values.is_empty()
    }

    /// Closes the current measurement period.
    ///
    /// When every retained value belongs to the current generation, all of
    /// them are kept. Otherwise the [`Self::count`] oldest values are dropped,
    /// returning storage to the size it had when the generation began. Either
    /// way the current generation count restarts at zero.
    pub fn roll_window(&self) {
        let mut inner = self.inner.write();
        let current = inner.current;

        if current == inner.values.len() {
            inner.current = 0;
            debug!(retained = current, "rolled window, previous generation kept");
            return;
        }

        inner.values.drain(..current);
        inner.current = 0;
        debug!(
            purged = current,
            retained = inner.values.len(),
            "rolled window, oldest values purged"
        );
    }

    /// Drops every observation and restarts the generation count.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.values.clear();
        inner.current = 0;
    }

    /// Returns a copy of the retained observations in arrival order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.inner.read().values.clone()
    }

    /// Returns the empirical spread threshold at cumulative `probability`.
    ///
    /// Retained values are sorted ascending, or descending when `descending`
    /// is set, and the value just past index `floor(len * probability)` is
    /// returned. `0.0` is returned when storage is empty or no value lies past
    /// that index.
    ///
    /// Out-of-range probabilities are clamped into `[0, 1]`; NaN yields
    /// `0.0`. Use [`Self::try_threshold`] to reject them instead.
    pub fn threshold(&self, descending: bool, probability: f64) -> f64 {
        let Some(clamped) = clamp_probability(probability) else {
            warn!("threshold requested with NaN probability");
            return 0.0;
        };
        if clamped != probability {
            warn!(probability, clamped, "threshold probability clamped");
        }

        self.threshold_unchecked(descending, clamped)
    }

    /// Same as [`Self::threshold`] but rejects invalid probabilities.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidProbability`] when `probability`
    /// is not finite or outside `[0, 1]`.
    pub fn try_threshold(
        &self,
        descending: bool,
        probability: f64,
    ) -> Result<f64, DistributionError> {
        let probability = validate_probability(probability)?;
        Ok(self.threshold_unchecked(descending, probability))
    }

    fn threshold_unchecked(&self, descending: bool, probability: f64) -> f64 {
        let inner = self.inner.read();
        if inner.values.is_empty() {
            return 0.0;
        }
        let sorted = sorted_copy(&inner.values, descending);
        threshold_in(&sorted, probability)
    }

    /// Finds the fill rate that maximizes `spread(rate) * rate`.
    ///
    /// `spread(rate)` is the descending threshold at `rate`; spreads below
    /// `target_threshold` earn nothing.
    ///
    /// Storage is copied and sorted under a single read lock, which is then
    /// released. Every candidate rate is evaluated against that copy, so
    /// concurrent writers cannot change the sample mid-search.
    ///
    /// # Errors
    /// Returns [`DistributionError::EmptyDistribution`] when no observation is
    /// retained, and [`DistributionError::InsufficientObservations`] when
    /// fewer than `config.min_observations` are.
    pub fn predict(&self, target_threshold: f64) -> Result<Prediction, DistributionError> {
        let sorted = {
            let inner = self.inner.read();
            let available = inner.values.len();
            if available == 0 {
                return Err(DistributionError::EmptyDistribution);
            }
            if available < self.config.min_observations {
                return Err(DistributionError::InsufficientObservations {
                    available,
                    required: self.config.min_observations,
                });
            }
            sorted_copy(&inner.values, true)
        };

        let prediction = best_rate_in(&sorted, target_threshold)
            .ok_or(DistributionError::EmptyDistribution)?;
        trace!(
            samples = sorted.len(),
            min_spread = target_threshold,
            rate = prediction.rate,
            profit = prediction.profit,
            "predicted fill rate"
        );
        Ok(prediction)
    }
}


#[cfg(test)]
mod proptests {
    use super::RollingDistribution;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn storage_is_bounded_by_two_generations(
            generations in proptest::collection::vec(0_usize..50, 1..20),
        ) {
            let spreads = RollingDistribution::new();
            let largest = generations.iter().copied().max().unwrap_or(0);

            for size in generations {
                spreads.extend((0..size).map(|value| value as f64));
                prop_assert!(spreads.count() <= spreads.storage_size());
                prop_assert!(spreads.storage_size() <= 2 * largest);
                spreads.roll_window();
                prop_assert!(spreads.storage_size() <= 2 * largest);
            }
        }
    }
}
