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
//! Rolling empirical spread distributions for fill-probability forecasting.
//!
//! The crate currently exposes:
//! - [`rolling::RollingDistribution`], a thread-safe store of observed spreads
//!   with a two-generation retention policy.
//! - [`percentile`] helpers that compute empirical thresholds and the
//!   profit-maximizing fill rate over a sorted sample.
//! - [`config::DistributionConfig`] for construction-time tuning.
//!
//! # Example
//! ```rust
//! use fill_forecast::rolling::RollingDistribution;
//!
//! let spreads = RollingDistribution::new();
//! spreads.extend([0.5, 1.0, 1.5, 2.0, 2.5]);
//!
//! // Spread that roughly 40% of the observed periods exceeded.
//! let spread = spreads.threshold(true, 0.4);
//! assert_eq!(spread, 1.0);
//!
//! let best = spreads.predict(0.0).unwrap();
//! assert!(best.profit > 0.0);
//! ```

use thiserror::Error;

pub mod config;
pub mod percentile;
pub mod rolling;

/// Errors returned by distribution constructors and queries.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DistributionError {
    /// Returned when a configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Returned when a probability is not finite or falls outside `[0, 1]`.
    #[error("invalid probability {0}: must be finite and in [0, 1]")]
    InvalidProbability(f64),
    /// Returned by rate prediction when no observation is retained.
    #[error("distribution is empty")]
    EmptyDistribution,
    /// Returned by rate prediction when fewer observations are retained than
    /// the configured minimum.
    #[error("insufficient observations: {available} retained, {required} required")]
    InsufficientObservations {
        /// Observations currently retained.
        available: usize,
        /// Configured minimum.
        required: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::DistributionError;

    #[test]
    fn errors_render_context() {
        assert_eq!(
            DistributionError::InvalidProbability(1.5).to_string(),
            "invalid probability 1.5: must be finite and in [0, 1]"
        );
        assert_eq!(
            DistributionError::InsufficientObservations {
                available: 3,
                required: 10,
            }
            .to_string(),
            "insufficient observations: 3 retained, 10 required"
        );
        assert_eq!(
            DistributionError::EmptyDistribution.to_string(),
            "distribution is empty"
        );
    }
}
