//! Test utilities for consistent test data creation across the codebase
//!
//! Centralized bar fixtures so individual tests do not scatter hardcoded
//! OHLC values.
//!
//! ## Module Organization
//!
//! - `mod.rs`: Small-scale unit test utilities (builders, scenarios)
//! - `generators.rs`: Large-scale data generators for stress tests and benches

pub mod generators;

use crate::price::Price;
use crate::types::Bar;

/// Creates a well-formed test bar from decimal strings
pub fn create_test_bar(timestamp: i64, open: &str, high: &str, low: &str, close: &str) -> Bar {
    Bar {
        timestamp,
        open: Price::from_str(open).unwrap(),
        high: Price::from_str(high).unwrap(),
        low: Price::from_str(low).unwrap(),
        close: Price::from_str(close).unwrap(),
    }
}

/// Standard test constants for consistent testing
pub mod constants {
    pub const BASE_PRICE: &str = "100.00000000";
    pub const BASE_TIMESTAMP: i64 = 1640995200000; // 2022-01-01 00:00:00 UTC
    pub const BAR_INTERVAL_MS: i64 = 60_000; // One minute between bars
}

/// Builder for bar sequences with automatically advancing timestamps
pub struct BarSequenceBuilder {
    base_timestamp: i64,
    interval_ms: i64,
    bars: Vec<Bar>,
}

impl Default for BarSequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BarSequenceBuilder {
    pub fn new() -> Self {
        Self {
            base_timestamp: constants::BASE_TIMESTAMP,
            interval_ms: constants::BAR_INTERVAL_MS,
            bars: Vec::new(),
        }
    }

    pub fn with_base_timestamp(mut self, timestamp: i64) -> Self {
        self.base_timestamp = timestamp;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: i64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Append a bar given high and low; opens at the low, closes at the high
    pub fn add_bar(mut self, high: &str, low: &str) -> Self {
        let timestamp = self.base_timestamp + self.bars.len() as i64 * self.interval_ms;
        self.bars.push(create_test_bar(timestamp, low, high, low, high));
        self
    }

    /// Append a bar with all four prices spelled out
    pub fn add_ohlc(mut self, open: &str, high: &str, low: &str, close: &str) -> Self {
        let timestamp = self.base_timestamp + self.bars.len() as i64 * self.interval_ms;
        self.bars.push(create_test_bar(timestamp, open, high, low, close));
        self
    }

    pub fn build(self) -> Vec<Bar> {
        self.bars
    }
}

/// Common test scenarios
pub mod scenarios {
    use super::*;

    /// Bars each strictly inside the previous one; the merger folds them into
    /// a single candle. Supports counts up to 49.
    pub fn nested_sequence(count: usize) -> Vec<Bar> {
        let mut builder = BarSequenceBuilder::new();
        for i in 0..count {
            let high = format!("{}.0", 200 - i);
            let low = format!("{}.0", 100 + i);
            builder = builder.add_bar(&high, &low);
        }
        builder.build()
    }

    /// Three bars forming a clean V: a down breakout then an up breakout,
    /// no inclusion anywhere. Merging yields three candles with a bottom
    /// fractal at merged index 1.
    pub fn v_shape() -> Vec<Bar> {
        BarSequenceBuilder::new()
            .add_bar("110.0", "100.0")
            .add_bar("99.0", "90.0")
            .add_bar("105.0", "95.0")
            .build()
    }

    /// Strictly ascending bars with disjoint ranges: one candle per bar
    pub fn ascending_run(count: usize) -> Vec<Bar> {
        let mut builder = BarSequenceBuilder::new();
        for i in 0..count {
            let high = format!("{}.0", 105 + 10 * i);
            let low = format!("{}.0", 100 + 10 * i);
            builder = builder.add_bar(&high, &low);
        }
        builder.build()
    }

    /// Strictly descending bars with disjoint ranges: one candle per bar.
    /// Supports counts up to 999.
    pub fn descending_run(count: usize) -> Vec<Bar> {
        let mut builder = BarSequenceBuilder::new();
        for i in 0..count {
            let high = format!("{}.0", 10_005 - 10 * i as i64);
            let low = format!("{}.0", 10_000 - 10 * i as i64);
            builder = builder.add_bar(&high, &low);
        }
        builder.build()
    }

    /// Alternating breakouts starting upward; every odd merged index becomes
    /// a top fractal candidate
    pub fn zigzag(count: usize) -> Vec<Bar> {
        let mut builder = BarSequenceBuilder::new();
        for i in 0..count {
            builder = if i % 2 == 0 {
                builder.add_bar("105.0", "95.0")
            } else {
                builder.add_bar("120.0", "110.0")
            };
        }
        builder.build()
    }

    /// Nine bars exercising both merge directions and both breakout kinds.
    ///
    /// Merges to six candles: bars 0-1 fold upward while undetermined,
    /// bars 3-4 fold upward, bars 6-7 fold downward; detection then finds a
    /// top at merged index 2 and a bottom at merged index 4.
    pub fn mixed_sequence() -> Vec<Bar> {
        BarSequenceBuilder::new()
            .add_bar("110.0", "100.0")
            .add_bar("108.0", "102.0") // nested: undetermined merge, resolves up
            .add_bar("120.0", "112.0") // up breakout
            .add_bar("122.0", "113.0") // up breakout
            .add_bar("121.0", "114.0") // overlap: upward merge
            .add_bar("100.0", "90.0") // down breakout
            .add_bar("98.0", "85.0") // down breakout
            .add_bar("99.0", "84.0") // overlap: downward merge
            .add_bar("105.0", "95.0") // up breakout
            .build()
    }

    /// Valid bars except for a timestamp regression at position 2
    pub fn unsorted_sequence() -> Vec<Bar> {
        use super::constants::{BAR_INTERVAL_MS, BASE_TIMESTAMP};
        vec![
            create_test_bar(BASE_TIMESTAMP, "100.0", "105.0", "100.0", "105.0"),
            create_test_bar(
                BASE_TIMESTAMP + BAR_INTERVAL_MS,
                "110.0",
                "115.0",
                "110.0",
                "115.0",
            ),
            // Regression: earlier than its predecessor
            create_test_bar(
                BASE_TIMESTAMP + BAR_INTERVAL_MS / 2,
                "120.0",
                "125.0",
                "120.0",
                "125.0",
            ),
            create_test_bar(
                BASE_TIMESTAMP + 3 * BAR_INTERVAL_MS,
                "130.0",
                "135.0",
                "130.0",
                "135.0",
            ),
        ]
    }

    /// Valid bars except for inverted high/low bounds at position 2
    pub fn malformed_sequence() -> Vec<Bar> {
        use super::constants::{BAR_INTERVAL_MS, BASE_TIMESTAMP};
        vec![
            create_test_bar(BASE_TIMESTAMP, "100.0", "105.0", "100.0", "105.0"),
            create_test_bar(
                BASE_TIMESTAMP + BAR_INTERVAL_MS,
                "110.0",
                "115.0",
                "110.0",
                "115.0",
            ),
            Bar {
                timestamp: BASE_TIMESTAMP + 2 * BAR_INTERVAL_MS,
                open: Price::from_str("120.0").unwrap(),
                high: Price::from_str("118.0").unwrap(), // below the low
                low: Price::from_str("122.0").unwrap(),
                close: Price::from_str("120.0").unwrap(),
            },
            create_test_bar(
                BASE_TIMESTAMP + 3 * BAR_INTERVAL_MS,
                "130.0",
                "135.0",
                "130.0",
                "135.0",
            ),
        ]
    }

    /// Empty bar sequence for validation testing
    pub fn empty_sequence() -> Vec<Bar> {
        Vec::new()
    }
}
