//! Injectable trace of merge decisions
//!
//! The merger reports every decision it takes to a [`TraceSink`]. Sinks never
//! influence merge output; they exist for debugging and for tests that assert
//! on the decision stream.

use crate::types::{Direction, MergedCandle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decision taken by the candle merger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MergeDecision {
    /// A bar was absorbed into the candle under construction
    Merged {
        /// The candle after absorbing the bar
        into: MergedCandle,
    },

    /// The candle under construction was emitted
    Finalized {
        /// The emitted candle with its direction fixed
        candle: MergedCandle,

        /// Direction governing merges into the successor candle; at
        /// end-of-input, where no successor exists, the candle's own direction
        next_direction: Direction,
    },
}

impl fmt::Display for MergeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeDecision::Merged { into } => write!(
                f,
                "merged bars {}..={} into candle high={} low={}",
                into.start_index, into.end_index, into.high, into.low
            ),
            MergeDecision::Finalized {
                candle,
                next_direction,
            } => write!(
                f,
                "finalized {} candle over bars {}..={} high={} low={}, next merge direction {}",
                candle.direction,
                candle.start_index,
                candle.end_index,
                candle.high,
                candle.low,
                next_direction
            ),
        }
    }
}

/// Sink receiving merge decisions in emission order
pub trait TraceSink {
    /// Record one decision
    fn record(&mut self, event: MergeDecision);
}

/// Sink that discards every decision (the default path)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _event: MergeDecision) {}
}

/// In-memory collector for programmatic inspection of the decision stream
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Vec<MergeDecision>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All decisions recorded so far, in order
    pub fn events(&self) -> &[MergeDecision] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: MergeDecision) {
        self.events.push(event);
    }
}

/// Sink forwarding each decision to the `tracing` subscriber at debug level
///
/// This is the only place the crate logs; the algorithms themselves stay
/// silent so library users control narration entirely through sink choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugTrace;

impl TraceSink for DebugTrace {
    fn record(&mut self, event: MergeDecision) {
        match &event {
            MergeDecision::Merged { into } => tracing::debug!(
                start_index = into.start_index,
                end_index = into.end_index,
                high = %into.high,
                low = %into.low,
                "bar merged by inclusion"
            ),
            MergeDecision::Finalized {
                candle,
                next_direction,
            } => tracing::debug!(
                start_index = candle.start_index,
                end_index = candle.end_index,
                high = %candle.high,
                low = %candle.low,
                direction = %candle.direction,
                next_direction = %next_direction,
                "candle finalized"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn sample_candle() -> MergedCandle {
        MergedCandle {
            start_index: 2,
            end_index: 4,
            high: Price::from_str("11.5").unwrap(),
            low: Price::from_str("10.5").unwrap(),
            direction: Direction::Up,
        }
    }

    #[test]
    fn test_merged_narration() {
        let event = MergeDecision::Merged {
            into: sample_candle(),
        };
        assert_eq!(
            event.to_string(),
            "merged bars 2..=4 into candle high=11.50000000 low=10.50000000"
        );
    }

    #[test]
    fn test_finalized_narration() {
        let event = MergeDecision::Finalized {
            candle: sample_candle(),
            next_direction: Direction::Down,
        };
        assert_eq!(
            event.to_string(),
            "finalized up candle over bars 2..=4 high=11.50000000 low=10.50000000, \
             next merge direction down"
        );
    }

    #[test]
    fn test_trace_log_keeps_order() {
        let mut log = TraceLog::new();
        assert!(log.is_empty());

        let merged = MergeDecision::Merged {
            into: sample_candle(),
        };
        let finalized = MergeDecision::Finalized {
            candle: sample_candle(),
            next_direction: Direction::Up,
        };
        log.record(merged);
        log.record(finalized);

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0], merged);
        assert_eq!(log.events()[1], finalized);
    }

    #[test]
    fn test_null_trace_accepts_events() {
        let mut sink = NullTrace;
        sink.record(MergeDecision::Merged {
            into: sample_candle(),
        });
    }
}
