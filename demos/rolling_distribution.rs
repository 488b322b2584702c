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
use std::sync::Arc;
use std::thread;

use fill_forecast::config::DistributionConfig;
use fill_forecast::rolling::RollingDistribution;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Require a reasonable sample before predicting a fill rate.
    let config = DistributionConfig::default()
        .with_capacity_hint(4_096)
        .with_min_observations(100);
    let spreads = Arc::new(RollingDistribution::with_config(config)?);

    // Two feeders record synthetic per-period spreads in ticks.
    let feeders: Vec<_> = (0_u32..2)
        .map(|feeder| {
            let spreads = Arc::clone(&spreads);
            thread::spawn(move || {
                for step in 0_u32..500 {
                    let spread = 1.0 + f64::from((step * 7 + feeder * 3) % 40) * 0.25;
                    spreads.append(spread);
                }
            })
        })
        .collect();
    for feeder in feeders {
        feeder
            .join()
            .map_err(|_| "spread feeder thread panicked")?;
    }

    // Close the measurement period; the data stays visible until the next roll.
    spreads.roll_window();
    println!("Retained spreads: {}", spreads.storage_size());

    let p90 = spreads.threshold(true, 0.10);
    let p50 = spreads.threshold(true, 0.50);
    println!("Spread exceeded ~10% of periods: {:.2}", p90);
    println!("Spread exceeded ~50% of periods: {:.2}", p50);

    let best = spreads.predict(2.0)?;
    println!(
        "Best fill rate: {:.3} (expected profit {:.3} per period)",
        best.rate, best.profit
    );

    Ok(())
}
