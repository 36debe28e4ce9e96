//! Fractal detection over merged candle sequences

use crate::types::{Fractal, FractalKind, MergedCandle};

/// Scan a merged candle sequence for top and bottom fractals
///
/// Slides a three-candle window: the middle candle is a top when its high is
/// strictly above both neighbors' highs, a bottom when its low is strictly
/// below both lows. Equal extremes never qualify. After a hit the window
/// restarts past the recorded middle, so consecutive fractals always have at
/// least one candle between them. Fewer than three candles yield an empty
/// list.
///
/// Pure and read-only; feeding a sequence that did not come out of the merger
/// is a contract violation, not a recoverable error.
pub fn detect_fractals(merged: &[MergedCandle]) -> Vec<Fractal> {
    if merged.len() < 3 {
        return Vec::new();
    }

    let mut fractals = Vec::new();
    let mut left = 0;
    while left + 2 < merged.len() {
        let (a, b, c) = (&merged[left], &merged[left + 1], &merged[left + 2]);
        let middle = left + 1;

        if b.high > a.high && b.high > c.high {
            fractals.push(Fractal {
                merged_index: middle,
                kind: FractalKind::Top,
                price: b.high,
            });
            left = middle + 1;
        } else if b.low < a.low && b.low < c.low {
            fractals.push(Fractal {
                merged_index: middle,
                kind: FractalKind::Bottom,
                price: b.low,
            });
            left = middle + 1;
        } else {
            left += 1;
        }
    }

    fractals
}
