//! Input validation error types

use crate::price::Price;
use thiserror::Error;

/// Errors raised while validating a bar sequence
///
/// All variants are detected before any merge state is created, so a failed
/// call never produces partial output.
#[derive(Error, Debug)]
pub enum InvalidInputError {
    #[error("Empty bar sequence")]
    Empty,

    #[error(
        "Bars not in strictly increasing time order at position {position}: prev={prev_timestamp}, curr={curr_timestamp}"
    )]
    UnsortedTimestamps {
        position: usize,
        prev_timestamp: i64,
        curr_timestamp: i64,
    },

    #[error(
        "Bar at position {position} violates OHLC bounds: open={open} high={high} low={low} close={close}"
    )]
    MalformedBar {
        position: usize,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_positions() {
        let unsorted = InvalidInputError::UnsortedTimestamps {
            position: 3,
            prev_timestamp: 2000,
            curr_timestamp: 1500,
        };
        let msg = unsorted.to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("prev=2000"));
        assert!(msg.contains("curr=1500"));

        let malformed = InvalidInputError::MalformedBar {
            position: 5,
            open: Price(10_000_000_000),
            high: Price(9_000_000_000),
            low: Price(11_000_000_000),
            close: Price(10_000_000_000),
        };
        let msg = malformed.to_string();
        assert!(msg.contains("position 5"));
        assert!(msg.contains("high=90.00000000"));

        assert_eq!(InvalidInputError::Empty.to_string(), "Empty bar sequence");
    }
}
