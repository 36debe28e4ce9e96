//! Core candle merging and fractal detection algorithms
//!
//! Preprocessing stages of candlestick ("K-line") trend analysis: fold an
//! ordered OHLC bar sequence into merged candles under the inclusion rule,
//! then scan the merged sequence for fractal turning points.
//!
//! ## Features
//!
//! - Inclusion merging: Equal bounds merge; only strict two-bound breakouts split
//! - Directional bounds: Upward merges keep maxima, downward merges keep minima
//! - Fixed-point prices: Exact comparisons, no floating point drift
//! - Batch and streaming paths with identical output
//! - Injectable decision trace: Inspect every merge without touching results

pub mod errors;
pub mod fractal;
pub mod merge;
pub mod price;
pub mod trace;
pub mod types;

// Test utilities (only available in test builds or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use errors::InvalidInputError;
pub use fractal::detect_fractals;
pub use merge::{merge_bars, merge_bars_traced, CandleMerger};
pub use price::{Price, PriceError, SCALE};
pub use trace::{DebugTrace, MergeDecision, NullTrace, TraceLog, TraceSink};
pub use types::{Bar, Direction, Fractal, FractalKind, MergedCandle};

/// Merge a bar sequence and detect fractals over the result
///
/// The one-call entry point: equivalent to [`merge_bars`] followed by
/// [`detect_fractals`]. With `debug` set, every merge decision is narrated to
/// the `tracing` subscriber at debug level; the returned values are identical
/// either way. If `max_count` is given, only the first `max_count` bars are
/// consumed.
///
/// # Example
///
/// ```
/// use chanlun_core::{compute, Bar, Price, SCALE};
///
/// let bar = |ts: i64, high: i64, low: i64| Bar {
///     timestamp: ts,
///     open: Price(low * SCALE),
///     high: Price(high * SCALE),
///     low: Price(low * SCALE),
///     close: Price(high * SCALE),
/// };
/// // A clean V: down breakout, then up breakout
/// let bars = vec![bar(1, 110, 100), bar(2, 99, 90), bar(3, 105, 95)];
///
/// let (merged, fractals) = compute(&bars, None, false).unwrap();
/// assert_eq!(merged.len(), 3);
/// assert_eq!(fractals.len(), 1);
/// assert_eq!(fractals[0].merged_index, 1);
/// ```
pub fn compute(
    bars: &[Bar],
    max_count: Option<usize>,
    debug: bool,
) -> Result<(Vec<MergedCandle>, Vec<Fractal>), InvalidInputError> {
    let merged = if debug {
        merge_bars_traced(bars, max_count, &mut DebugTrace)
    } else {
        merge_bars(bars, max_count)
    }?;
    let fractals = detect_fractals(&merged);
    Ok((merged, fractals))
}
