// Byte-level filters composed by the codec.
//
// - `delta`: signed differences between consecutive bytes
// - `run_length`: runs of 3+ identical bytes collapsed into tagged records
//
// Both stages reserve one byte value as an escape. The markers live here so
// encoder and decoder always agree on them.

pub mod delta;
pub mod run_length;

pub use run_length::{Record, RecordIter};

// ---------------------------------------------------------------------------
// Run-length markers
// ---------------------------------------------------------------------------

/// Escape byte of the run-length stage. Followed by `RUN_ESCAPE` it means a
/// literal zero; followed by anything else it starts a run record.
pub const RUN_ESCAPE: u8 = 0;

/// Second byte of a 5-byte run record (count >= `RUN_RADIX`).
pub const LARGE_RUN_MARKER: u8 = 1;

/// Shortest run worth a record. A record costs 3 bytes.
pub const MIN_RUN: usize = 3;

/// Base of the `(quotient, remainder)` count in large run records.
pub const RUN_RADIX: usize = 255;

/// Longest run a single record can describe: quotient 255, remainder 254.
pub const MAX_RUN: usize = 255 * RUN_RADIX + (RUN_RADIX - 1);

/// Width of `RUN_ESCAPE, count, value`.
pub const SMALL_RUN_LEN: usize = 3;

/// Width of `RUN_ESCAPE, LARGE_RUN_MARKER, quotient, remainder, value`.
pub const LARGE_RUN_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Delta markers
// ---------------------------------------------------------------------------

/// Escape byte of the delta stage. `DELTA_ESCAPE, DELTA_ESCAPE` is a
/// difference of +255; `DELTA_ESCAPE, m` is a difference of `-m`.
pub const DELTA_ESCAPE: u8 = 255;

// ---------------------------------------------------------------------------
// Codec threshold
// ---------------------------------------------------------------------------

/// Inputs shorter than this pass through `shrink`/`unshrink` untouched.
pub const MIN_SHRINK_LEN: usize = 3;
