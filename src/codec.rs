// Codec: composes the two filters.
//
//   shrink   = run_length::encode ∘ delta::encode
//   unshrink = delta::decode ∘ run_length::decode
//
// Delta encoding first turns gradients and constant regions into runs of
// equal differences, which the run-length stage then collapses.

use crate::error::Result;
use crate::filter::{MIN_SHRINK_LEN, delta, run_length};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Sizes observed while running one direction of the transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Bytes handed to the transform.
    pub input_size: u64,
    /// Bytes between the two filters (equal to `input_size` on passthrough).
    pub intermediate_size: u64,
    /// Bytes produced.
    pub output_size: u64,
    /// True when the input was below `MIN_SHRINK_LEN` and copied unchanged.
    pub passthrough: bool,
}

impl TransformStats {
    fn passthrough(len: usize) -> Self {
        let len = len as u64;
        Self {
            input_size: len,
            intermediate_size: len,
            output_size: len,
            passthrough: true,
        }
    }

    /// `output_size / input_size`, or 1.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            1.0
        } else {
            self.output_size as f64 / self.input_size as f64
        }
    }
}

// ---------------------------------------------------------------------------
// shrink / unshrink
// ---------------------------------------------------------------------------

/// Compress `input`. Inputs shorter than three bytes are returned unchanged.
///
/// # Example
/// ```
/// let data = vec![42u8; 1000];
/// let packed = shrinker::shrink(&data);
/// assert!(packed.len() < 16);
/// assert_eq!(shrinker::unshrink(&packed).unwrap(), data);
/// ```
pub fn shrink(input: &[u8]) -> Vec<u8> {
    shrink_with_stats(input).0
}

/// Reverse [`shrink`].
///
/// Returns an error if `input` is not a well-formed output of `shrink`
/// (a record cut short, or a record the encoder never emits).
pub fn unshrink(input: &[u8]) -> Result<Vec<u8>> {
    unshrink_with_stats(input).map(|(out, _)| out)
}

/// [`shrink`], also reporting the size after each stage.
pub fn shrink_with_stats(input: &[u8]) -> (Vec<u8>, TransformStats) {
    if input.len() < MIN_SHRINK_LEN {
        return (input.to_vec(), TransformStats::passthrough(input.len()));
    }

    let deltas = delta::encode(input);
    let out = run_length::encode(&deltas);
    log::debug!(
        "shrink: {} -> {} (delta) -> {} bytes",
        input.len(),
        deltas.len(),
        out.len()
    );

    let stats = TransformStats {
        input_size: input.len() as u64,
        intermediate_size: deltas.len() as u64,
        output_size: out.len() as u64,
        passthrough: false,
    };
    (out, stats)
}

/// [`unshrink`], also reporting the size after each stage.
pub fn unshrink_with_stats(input: &[u8]) -> Result<(Vec<u8>, TransformStats)> {
    if input.len() < MIN_SHRINK_LEN {
        return Ok((input.to_vec(), TransformStats::passthrough(input.len())));
    }

    let deltas = run_length::decode(input)?;
    let out = delta::decode(&deltas)?;
    log::debug!(
        "unshrink: {} -> {} (delta) -> {} bytes",
        input.len(),
        deltas.len(),
        out.len()
    );

    let stats = TransformStats {
        input_size: input.len() as u64,
        intermediate_size: deltas.len() as u64,
        output_size: out.len() as u64,
        passthrough: false,
    };
    Ok((out, stats))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
