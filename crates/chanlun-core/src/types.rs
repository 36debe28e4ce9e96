//! Type definitions for candle merging and fractal detection

use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend direction established while merging candles
///
/// Governs how an inclusion merge combines bounds: Up keeps the pairwise
/// maxima, Down keeps the pairwise minima. Undetermined only ever applies to
/// the first candle of a sequence, before any directional decision exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Direction {
    /// Strictly higher on both high and low than the reference candle
    Up,
    /// Strictly lower on both high and low than the reference candle
    Down,
    /// No directional decision made yet
    #[default]
    Undetermined,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Kind of turning point a fractal marks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FractalKind {
    /// Local maximum: middle candle's high strictly above both neighbors
    Top,
    /// Local minimum: middle candle's low strictly below both neighbors
    Bottom,
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractalKind::Top => write!(f, "top"),
            FractalKind::Bottom => write!(f, "bottom"),
        }
    }
}

/// A single OHLC price bar as supplied by the bar source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bar {
    /// Timestamp in milliseconds; sequences must be strictly increasing
    pub timestamp: i64,

    /// Opening price
    pub open: Price,

    /// Highest price in bar
    pub high: Price,

    /// Lowest price in bar
    pub low: Price,

    /// Closing price
    pub close: Price,
}

impl Bar {
    /// Whether the bar's OHLC bounds are internally consistent
    ///
    /// Requires `high >= low`, `high >= max(open, close)` and
    /// `low <= min(open, close)`. A flat bar (all four equal) is well formed.
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Strict two-bound comparison shared by bar-vs-candle and candle-vs-candle
/// relations: both bounds higher, both lower, or no strict separation.
fn strict_relation(high: Price, low: Price, ref_high: Price, ref_low: Price) -> Option<Direction> {
    if high > ref_high && low > ref_low {
        Some(Direction::Up)
    } else if high < ref_high && low < ref_low {
        Some(Direction::Down)
    } else {
        None
    }
}

/// One or more source bars merged under the inclusion rule
///
/// Index fields reference positions in the consumed bar sequence. Emitted
/// candles cover that sequence contiguously: each candle's `start_index` is
/// the previous candle's `end_index + 1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergedCandle {
    /// Index of the first absorbed bar (inclusive)
    pub start_index: usize,

    /// Index of the last absorbed bar (inclusive)
    pub end_index: usize,

    /// Highest price across all absorbed bars kept by the merge rule
    pub high: Price,

    /// Lowest price across all absorbed bars kept by the merge rule
    pub low: Price,

    /// Trend relative to the previously finalized candle, fixed at finalization
    pub direction: Direction,
}

impl MergedCandle {
    /// Create a new candle seeded from a single bar
    pub fn from_bar(index: usize, bar: &Bar) -> Self {
        Self {
            start_index: index,
            end_index: index,
            high: bar.high,
            low: bar.low,
            direction: Direction::Undetermined,
        }
    }

    /// Number of source bars absorbed into this candle
    pub fn bar_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Position of a bar relative to this candle
    ///
    /// `Some(Up)` when the bar is strictly higher on both bounds, `Some(Down)`
    /// when strictly lower on both, `None` when the two are in inclusion.
    /// An equal high or equal low always lands in the `None` case.
    pub fn relation_to(&self, bar: &Bar) -> Option<Direction> {
        strict_relation(bar.high, bar.low, self.high, self.low)
    }

    /// Whether a bar is in inclusion with this candle and must be merged
    pub fn is_inclusive_with(&self, bar: &Bar) -> bool {
        self.relation_to(bar).is_none()
    }

    /// Trend of this candle relative to an earlier candle
    ///
    /// `None` when the bounds overlap (neither strictly above nor below),
    /// which cannot occur between adjacent candles produced by the merger.
    pub fn trend_from(&self, prev: &MergedCandle) -> Option<Direction> {
        strict_relation(self.high, self.low, prev.high, prev.low)
    }
}

/// A local turning point in the merged candle sequence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fractal {
    /// Index of the middle candle within the merged sequence
    pub merged_index: usize,

    /// Top (local maximum) or Bottom (local minimum)
    pub kind: FractalKind,

    /// The extreme price: the candle's high for a top, its low for a bottom
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(high: &str, low: &str) -> Bar {
        Bar {
            timestamp: 0,
            open: Price::from_str(low).unwrap(),
            high: Price::from_str(high).unwrap(),
            low: Price::from_str(low).unwrap(),
            close: Price::from_str(high).unwrap(),
        }
    }

    #[test]
    fn test_bar_well_formed() {
        let valid = Bar {
            timestamp: 1,
            open: Price::from_str("10.5").unwrap(),
            high: Price::from_str("11.0").unwrap(),
            low: Price::from_str("10.0").unwrap(),
            close: Price::from_str("10.8").unwrap(),
        };
        assert!(valid.is_well_formed());

        // Flat bar: all four prices equal
        let flat = bar("10.0", "10.0");
        assert!(flat.is_well_formed());

        let inverted = Bar {
            timestamp: 1,
            open: Price::from_str("10.5").unwrap(),
            high: Price::from_str("10.0").unwrap(),
            low: Price::from_str("11.0").unwrap(),
            close: Price::from_str("10.5").unwrap(),
        };
        assert!(!inverted.is_well_formed());

        let open_above_high = Bar {
            timestamp: 1,
            open: Price::from_str("12.0").unwrap(),
            high: Price::from_str("11.0").unwrap(),
            low: Price::from_str("10.0").unwrap(),
            close: Price::from_str("10.5").unwrap(),
        };
        assert!(!open_above_high.is_well_formed());

        let close_below_low = Bar {
            timestamp: 1,
            open: Price::from_str("10.5").unwrap(),
            high: Price::from_str("11.0").unwrap(),
            low: Price::from_str("10.0").unwrap(),
            close: Price::from_str("9.5").unwrap(),
        };
        assert!(!close_below_low.is_well_formed());
    }

    #[test]
    fn test_from_bar_seeds_bounds_and_indices() {
        let b = bar("11.0", "10.0");
        let candle = MergedCandle::from_bar(7, &b);

        assert_eq!(candle.start_index, 7);
        assert_eq!(candle.end_index, 7);
        assert_eq!(candle.high, b.high);
        assert_eq!(candle.low, b.low);
        assert_eq!(candle.direction, Direction::Undetermined);
        assert_eq!(candle.bar_count(), 1);
    }

    #[test]
    fn test_relation_strictly_above() {
        let candle = MergedCandle::from_bar(0, &bar("11.0", "10.0"));
        let above = bar("12.0", "10.5");

        assert_eq!(candle.relation_to(&above), Some(Direction::Up));
        assert!(!candle.is_inclusive_with(&above));
    }

    #[test]
    fn test_relation_strictly_below() {
        let candle = MergedCandle::from_bar(0, &bar("11.0", "10.0"));
        let below = bar("10.5", "9.0");

        assert_eq!(candle.relation_to(&below), Some(Direction::Down));
        assert!(!candle.is_inclusive_with(&below));
    }

    #[test]
    fn test_relation_nested_is_inclusion() {
        let candle = MergedCandle::from_bar(0, &bar("11.0", "10.0"));

        // Bar inside the candle's range
        assert!(candle.is_inclusive_with(&bar("10.8", "10.2")));
        // Bar engulfing the candle's range
        assert!(candle.is_inclusive_with(&bar("12.0", "9.0")));
    }

    #[test]
    fn test_relation_equal_bound_is_inclusion() {
        let candle = MergedCandle::from_bar(0, &bar("11.0", "10.0"));

        // Higher high but equal low: no strict separation
        assert!(candle.is_inclusive_with(&bar("12.0", "10.0")));
        // Equal high, lower low
        assert!(candle.is_inclusive_with(&bar("11.0", "9.0")));
        // Identical bounds
        assert!(candle.is_inclusive_with(&bar("11.0", "10.0")));
    }

    #[test]
    fn test_trend_from_previous_candle() {
        let prev = MergedCandle::from_bar(0, &bar("11.0", "10.0"));
        let higher = MergedCandle::from_bar(1, &bar("12.0", "10.5"));
        let lower = MergedCandle::from_bar(1, &bar("10.5", "9.0"));
        let overlapping = MergedCandle::from_bar(1, &bar("12.0", "9.5"));

        assert_eq!(higher.trend_from(&prev), Some(Direction::Up));
        assert_eq!(lower.trend_from(&prev), Some(Direction::Down));
        assert_eq!(overlapping.trend_from(&prev), None);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::Undetermined.to_string(), "undetermined");
        assert_eq!(Direction::default(), Direction::Undetermined);
    }

    #[test]
    fn test_fractal_kind_display() {
        assert_eq!(FractalKind::Top.to_string(), "top");
        assert_eq!(FractalKind::Bottom.to_string(), "bottom");
    }

    #[test]
    fn test_merged_candle_serde_round_trip() {
        let candle = MergedCandle {
            start_index: 3,
            end_index: 5,
            high: Price::from_str("11.5").unwrap(),
            low: Price::from_str("10.5").unwrap(),
            direction: Direction::Up,
        };

        let json = serde_json::to_string(&candle).unwrap();
        let back: MergedCandle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle, back);
    }

    #[test]
    fn test_fractal_serde_round_trip() {
        let fractal = Fractal {
            merged_index: 4,
            kind: FractalKind::Bottom,
            price: Price::from_str("10.25").unwrap(),
        };

        let json = serde_json::to_string(&fractal).unwrap();
        let back: Fractal = serde_json::from_str(&json).unwrap();
        assert_eq!(fractal, back);
    }
}
