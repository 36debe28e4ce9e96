//! Large-scale data generation for stress tests and benchmarks
//!
//! All generators are deterministic: the same parameters always produce the
//! same bars, so failures reproduce exactly.

use super::constants;
use crate::price::{Price, SCALE};
use crate::types::Bar;

/// Linear congruential step shared by all generators
fn next_rand(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(1103515245).wrapping_add(12345);
    *state
}

/// Random-walk bar sequence with varying spreads
///
/// The level drifts by up to one unit per bar and never falls below 1.0, so
/// every bar is well formed and positive. Timestamps advance one interval
/// per bar.
pub fn random_walk_bars(count: usize, seed: u64) -> Vec<Bar> {
    let tick = SCALE / 100; // 0.01
    let mut rng = seed;
    let mut level: i64 = 100 * SCALE;
    let mut bars = Vec::with_capacity(count);

    for i in 0..count {
        let drift = ((next_rand(&mut rng) >> 16) % 201) as i64 - 100;
        level = (level + drift * tick).max(SCALE);
        let spread = (((next_rand(&mut rng) >> 16) % 50) as i64 + 10) * tick;

        bars.push(Bar {
            timestamp: constants::BASE_TIMESTAMP + i as i64 * constants::BAR_INTERVAL_MS,
            open: Price(level),
            high: Price(level + spread),
            low: Price(level - spread),
            close: Price(level),
        });
    }

    bars
}

/// Strictly ascending disjoint bars: the merger emits one candle per bar
pub fn ascending_bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let low = (100 + 10 * i as i64) * SCALE;
            let high = low + 5 * SCALE;
            Bar {
                timestamp: constants::BASE_TIMESTAMP + i as i64 * constants::BAR_INTERVAL_MS,
                open: Price(low),
                high: Price(high),
                low: Price(low),
                close: Price(high),
            }
        })
        .collect()
}

/// Strictly nested bars: the merger folds the whole sequence into one candle.
/// Supports counts up to 50,000.
pub fn nested_bars(count: usize) -> Vec<Bar> {
    let tick = SCALE / 1000; // 0.001
    (0..count)
        .map(|i| {
            let high = 200 * SCALE - i as i64 * tick;
            let low = 100 * SCALE + i as i64 * tick;
            Bar {
                timestamp: constants::BASE_TIMESTAMP + i as i64 * constants::BAR_INTERVAL_MS,
                open: Price(low),
                high: Price(high),
                low: Price(low),
                close: Price(high),
            }
        })
        .collect()
}
