//! Chan-theory candle merging and fractal detection.
//!
//! This crate folds ordered OHLC bar sequences into merged candles under the
//! inclusion rule and scans the result for fractal turning points, the
//! preprocessing stages of Chan-style ("K-line") trend analysis.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chanlun = "0.3"
//! ```
//!
//! ## Meta-Crate
//!
//! This is a meta-crate that re-exports the `chanlun-core` engine. Code that
//! only needs the algorithms can depend on `chanlun-core` directly.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chanlun::{compute, Bar, Price};
//!
//! // Three bars forming a clean V shape
//! let bars = vec![
//!     Bar {
//!         timestamp: 1,
//!         open: Price::from_str("100.0").unwrap(),
//!         high: Price::from_str("110.0").unwrap(),
//!         low: Price::from_str("100.0").unwrap(),
//!         close: Price::from_str("110.0").unwrap(),
//!     },
//!     Bar {
//!         timestamp: 2,
//!         open: Price::from_str("99.0").unwrap(),
//!         high: Price::from_str("99.0").unwrap(),
//!         low: Price::from_str("90.0").unwrap(),
//!         close: Price::from_str("90.0").unwrap(),
//!     },
//!     Bar {
//!         timestamp: 3,
//!         open: Price::from_str("95.0").unwrap(),
//!         high: Price::from_str("105.0").unwrap(),
//!         low: Price::from_str("95.0").unwrap(),
//!         close: Price::from_str("105.0").unwrap(),
//!     },
//! ];
//!
//! let (merged, fractals) = compute(&bars, None, false).unwrap();
//! assert_eq!(merged.len(), 3);
//! assert_eq!(fractals.len(), 1); // Bottom fractal at the middle candle
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use chanlun::{Bar, CandleMerger, Price};
//!
//! let mut merger = CandleMerger::new();
//! let bar = Bar {
//!     timestamp: 1,
//!     open: Price::from_str("100.0").unwrap(),
//!     high: Price::from_str("110.0").unwrap(),
//!     low: Price::from_str("100.0").unwrap(),
//!     close: Price::from_str("110.0").unwrap(),
//! };
//! assert!(merger.process_bar(&bar).unwrap().is_none());
//! assert_eq!(merger.finish().unwrap().bar_count(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/chanlun/0.3.0")]

// Re-export the engine crate
pub use chanlun_core as core;

// Re-export commonly used types at crate root for convenience
pub use chanlun_core::{
    compute, detect_fractals, merge_bars, merge_bars_traced, Bar, CandleMerger, DebugTrace,
    Direction, Fractal, FractalKind, InvalidInputError, MergeDecision, MergedCandle, NullTrace,
    Price, PriceError, TraceLog, TraceSink, SCALE,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Library initialization and configuration
pub fn init() {
    // Future: install a default tracing subscriber for the debug trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_types_export() {
        // Exported types are usable from the crate root
        let price = Price::from_str("123.456").unwrap();
        assert_eq!(price.to_string(), "123.45600000");
        assert_eq!(Direction::default(), Direction::Undetermined);
    }

    #[test]
    fn test_core_module_path() {
        // The engine stays reachable under the `core` path
        let price = crate::core::Price::from_str("100.0").unwrap();
        assert_eq!(price.to_string(), "100.00000000");
    }
}
