//! Core inclusion-merge algorithm
//!
//! Folds an ordered bar sequence into merged candles. Each incoming bar either
//! merges into the candle under construction (the two are in inclusion) or
//! finalizes it and seeds the next candle (strict breakout on both bounds).

use crate::errors::InvalidInputError;
use crate::trace::{MergeDecision, NullTrace, TraceSink};
use crate::types::{Bar, Direction, MergedCandle};

/// Internal state for the candle under construction
#[derive(Debug, Clone)]
struct MergeState {
    /// Candle being built
    current: MergedCandle,

    /// Direction governing inclusion merges into `current`: the relation the
    /// candle's seed bar had to the previously finalized candle
    established: Direction,

    /// Previously finalized candle, for the finalization trend comparison
    prev: Option<MergedCandle>,
}

impl MergeState {
    /// Seed construction state from the first bar of a sequence
    fn new(index: usize, bar: &Bar) -> Self {
        Self {
            current: MergedCandle::from_bar(index, bar),
            established: Direction::Undetermined,
            prev: None,
        }
    }

    /// Fold one bar into the state
    ///
    /// Returns the finalized candle when the bar breaks out of inclusion and
    /// seeds its successor, `None` when the bar was absorbed.
    fn advance(
        &mut self,
        index: usize,
        bar: &Bar,
        trace: &mut dyn TraceSink,
    ) -> Option<MergedCandle> {
        match self.current.relation_to(bar) {
            None => {
                // Inclusion: combine bounds by the established direction
                match self.established {
                    Direction::Up => {
                        self.current.high = self.current.high.max(bar.high);
                        self.current.low = self.current.low.max(bar.low);
                    }
                    Direction::Down => {
                        self.current.high = self.current.high.min(bar.high);
                        self.current.low = self.current.low.min(bar.low);
                    }
                    Direction::Undetermined => {
                        // First directional decision of the sequence: treat as up
                        self.current.high = self.current.high.max(bar.high);
                        self.current.low = self.current.low.max(bar.low);
                        self.established = Direction::Up;
                    }
                }
                self.current.end_index = index;
                trace.record(MergeDecision::Merged { into: self.current });
                None
            }
            Some(next_direction) => {
                self.current.direction = self.resolved_direction();
                trace.record(MergeDecision::Finalized {
                    candle: self.current,
                    next_direction,
                });

                let finalized = self.current;
                self.prev = Some(finalized);
                self.current = MergedCandle::from_bar(index, bar);
                self.established = next_direction;
                Some(finalized)
            }
        }
    }

    /// Finalize the candle under construction at end of input
    fn finish(mut self, trace: &mut dyn TraceSink) -> MergedCandle {
        self.current.direction = self.resolved_direction();
        // No successor exists, so the reported next direction is the candle's own
        trace.record(MergeDecision::Finalized {
            candle: self.current,
            next_direction: self.current.direction,
        });
        self.current
    }

    /// Direction the current candle takes when finalized
    ///
    /// Compared against the previously finalized candle: strictly higher on
    /// both bounds is Up, strictly lower is Down, overlap carries the previous
    /// candle's direction forward. The first candle of a sequence keeps the
    /// established direction instead.
    fn resolved_direction(&self) -> Direction {
        match &self.prev {
            Some(prev) => self.current.trend_from(prev).unwrap_or(prev.direction),
            None => self.established,
        }
    }
}

/// Streaming candle merger
///
/// Bars are pushed one at a time; a candle is returned whenever the incoming
/// bar finalizes it by breaking out of inclusion. Ordering and well-formedness
/// are validated incrementally against an internal position counter; a
/// rejected bar leaves state untouched, so processing can continue with a
/// corrected bar. Produces exactly the candles [`merge_bars`] produces for the
/// same accepted sequence.
#[derive(Debug, Default)]
pub struct CandleMerger {
    /// Candle construction state; None before the first accepted bar
    state: Option<MergeState>,

    /// Position the next accepted bar will occupy in the consumed sequence
    next_index: usize,

    /// Timestamp of the last accepted bar
    last_timestamp: Option<i64>,
}

impl CandleMerger {
    /// Create a merger with no bars consumed
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single bar and return the candle it finalized, if any
    pub fn process_bar(&mut self, bar: &Bar) -> Result<Option<MergedCandle>, InvalidInputError> {
        self.process_bar_traced(bar, &mut NullTrace)
    }

    /// Process a single bar, reporting each decision to the given sink
    pub fn process_bar_traced(
        &mut self,
        bar: &Bar,
        trace: &mut dyn TraceSink,
    ) -> Result<Option<MergedCandle>, InvalidInputError> {
        let position = self.next_index;
        if !bar.is_well_formed() {
            return Err(InvalidInputError::MalformedBar {
                position,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            });
        }
        if let Some(prev_timestamp) = self.last_timestamp {
            if bar.timestamp <= prev_timestamp {
                return Err(InvalidInputError::UnsortedTimestamps {
                    position,
                    prev_timestamp,
                    curr_timestamp: bar.timestamp,
                });
            }
        }
        self.last_timestamp = Some(bar.timestamp);
        self.next_index = position + 1;

        match &mut self.state {
            None => {
                // First bar seeds the initial candle; no decision to report yet
                self.state = Some(MergeState::new(position, bar));
                Ok(None)
            }
            Some(state) => Ok(state.advance(position, bar, trace)),
        }
    }

    /// The candle currently under construction
    ///
    /// Its direction is still Undetermined; the direction is fixed when the
    /// candle is finalized by a breakout or by [`finish`](Self::finish).
    pub fn pending_candle(&self) -> Option<MergedCandle> {
        self.state.as_ref().map(|state| state.current)
    }

    /// Finalize and return the candle under construction at end of input
    pub fn finish(&mut self) -> Option<MergedCandle> {
        self.finish_traced(&mut NullTrace)
    }

    /// Finalize at end of input, reporting the decision to the given sink
    pub fn finish_traced(&mut self, trace: &mut dyn TraceSink) -> Option<MergedCandle> {
        self.state.take().map(|state| state.finish(trace))
    }

    /// Number of bars accepted so far
    pub fn bars_seen(&self) -> usize {
        self.next_index
    }
}

/// Merge an ordered bar sequence into candles
///
/// If `max_count` is given, only the first `max_count` bars are consumed; the
/// rest are ignored. Fails with [`InvalidInputError`] if the consumed sequence
/// is empty, is not strictly increasing in timestamp, or contains a bar whose
/// OHLC bounds are inconsistent. Validation completes before any merging
/// starts, so a failed call produces no partial output.
pub fn merge_bars(
    bars: &[Bar],
    max_count: Option<usize>,
) -> Result<Vec<MergedCandle>, InvalidInputError> {
    merge_bars_traced(bars, max_count, &mut NullTrace)
}

/// Merge an ordered bar sequence, reporting each decision to the given sink
///
/// Identical output to [`merge_bars`]; the sink observes one `Merged` event
/// per absorbed bar and one `Finalized` event per emitted candle, in order.
pub fn merge_bars_traced(
    bars: &[Bar],
    max_count: Option<usize>,
    trace: &mut dyn TraceSink,
) -> Result<Vec<MergedCandle>, InvalidInputError> {
    let bars = match max_count {
        Some(n) => &bars[..bars.len().min(n)],
        None => bars,
    };
    validate_bars(bars)?;

    let mut state: Option<MergeState> = None;
    let mut candles = Vec::with_capacity(bars.len() / 2); // Heuristic capacity

    for (index, bar) in bars.iter().enumerate() {
        match state {
            None => {
                state = Some(MergeState::new(index, bar));
            }
            Some(ref mut merge_state) => {
                if let Some(finalized) = merge_state.advance(index, bar, trace) {
                    candles.push(finalized);
                }
            }
        }
    }

    // Validation guarantees at least one bar, so construction state exists
    if let Some(merge_state) = state {
        candles.push(merge_state.finish(trace));
    }

    Ok(candles)
}

/// Validate a bar sequence before merging
///
/// Checks run per position, malformedness before ordering, so the earliest
/// offending bar always names the error.
fn validate_bars(bars: &[Bar]) -> Result<(), InvalidInputError> {
    if bars.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    for (position, bar) in bars.iter().enumerate() {
        if !bar.is_well_formed() {
            return Err(InvalidInputError::MalformedBar {
                position,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            });
        }
        if position > 0 {
            let prev = &bars[position - 1];
            if bar.timestamp <= prev.timestamp {
                return Err(InvalidInputError::UnsortedTimestamps {
                    position,
                    prev_timestamp: prev.timestamp,
                    curr_timestamp: bar.timestamp,
                });
            }
        }
    }

    Ok(())
}
