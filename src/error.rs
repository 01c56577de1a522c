// Error types for the filter pipeline.
//
// Encoding is total and never fails. Decoding assumes its input came from a
// prior encode, so the only failures are streams that end in the middle of a
// record or carry a record the encoder can never produce.

use std::fmt;

use thiserror::Error;

/// Which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Signed-difference stage.
    Delta,
    /// Run-length stage.
    RunLength,
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => f.write_str("delta"),
            Self::RunLength => f.write_str("run-length"),
        }
    }
}

/// Error returned when decoding fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A record started at `offset` but the stream ends before its last byte.
    #[error(
        "truncated {filter} stream: record at offset {offset} needs {needed} bytes, \
         {available} available"
    )]
    TruncatedStream {
        filter: Filter,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A complete record that no encoder output can contain.
    #[error("malformed {filter} stream at offset {offset}: {reason}")]
    MalformedInput {
        filter: Filter,
        offset: usize,
        reason: &'static str,
    },
}

impl Error {
    /// The stage that produced this error.
    pub fn filter(&self) -> Filter {
        match self {
            Self::TruncatedStream { filter, .. } | Self::MalformedInput { filter, .. } => *filter,
        }
    }

    /// Byte offset of the offending record within the stage's input.
    pub fn offset(&self) -> usize {
        match self {
            Self::TruncatedStream { offset, .. } | Self::MalformedInput { offset, .. } => *offset,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_stage_and_offset() {
        let e = Error::TruncatedStream {
            filter: Filter::RunLength,
            offset: 7,
            needed: 5,
            available: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("run-length"), "{msg}");
        assert!(msg.contains("offset 7"), "{msg}");
        assert_eq!(e.filter(), Filter::RunLength);
        assert_eq!(e.offset(), 7);

        let e = Error::MalformedInput {
            filter: Filter::Delta,
            offset: 3,
            reason: "zero magnitude",
        };
        assert_eq!(
            e.to_string(),
            "malformed delta stream at offset 3: zero magnitude"
        );
    }
}
