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
//! Construction-time configuration for [`crate::rolling::RollingDistribution`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DistributionError;

/// Tuning knobs for a rolling distribution.
///
/// With the `serde` feature enabled the struct can be loaded from a host
/// configuration file; missing fields fall back to [`Default`].
///
/// # Example
/// ```rust
/// use fill_forecast::config::DistributionConfig;
///
/// let config = DistributionConfig::default()
///     .with_capacity_hint(1_024)
///     .with_min_observations(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DistributionConfig {
    /// Number of observations to pre-allocate storage for.
    pub capacity_hint: usize,
    /// Smallest retained sample for which rate prediction answers.
    pub min_observations: usize,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 0,
            min_observations: 1,
        }
    }
}

impl DistributionConfig {
    /// Sets the storage pre-allocation hint.
    #[must_use]
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Sets the minimum sample size required by rate prediction.
    #[must_use]
    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations;
        self
    }

    /// Checks that every field is in range.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidParameter`] when
    /// `min_observations == 0`.
    pub fn validate(&self) -> Result<(), DistributionError> {
        if self.min_observations == 0 {
            return Err(DistributionError::InvalidParameter(
                "min_observations must be greater than zero",
            ));
        }
        Ok(())
    }
}
