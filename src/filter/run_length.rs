// Run-length filter.
//
// Record layout (RUN_ESCAPE = 0, LARGE_RUN_MARKER = 1):
//
//   b                    literal byte b (b != 0)
//   0 0                  literal zero
//   0 n v                n copies of v, 3 <= n < 255
//   0 1 q r v            q*255 + r copies of v, 255 <= count <= MAX_RUN
//
// Small counts start at MIN_RUN, so the second byte of a record is never
// ambiguous. Runs longer than MAX_RUN are split across several records.

use crate::error::{Error, Filter, Result};

use super::{
    LARGE_RUN_LEN, LARGE_RUN_MARKER, MAX_RUN, MIN_RUN, RUN_ESCAPE, RUN_RADIX, SMALL_RUN_LEN,
};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One decoded unit of a run-length stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// A single byte copied through.
    Literal(u8),
    /// `count` copies of `value`.
    Run { value: u8, count: usize },
}

impl Record {
    /// Number of bytes this record expands to.
    #[inline]
    pub fn decoded_len(&self) -> usize {
        match *self {
            Self::Literal(_) => 1,
            Self::Run { count, .. } => count,
        }
    }

    /// Number of bytes the encoder spends on this record.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        match *self {
            Self::Literal(RUN_ESCAPE) => 2,
            Self::Literal(_) => 1,
            Self::Run { count, .. } if count < RUN_RADIX => SMALL_RUN_LEN,
            Self::Run { .. } => LARGE_RUN_LEN,
        }
    }

    fn emit(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Literal(RUN_ESCAPE) => out.extend_from_slice(&[RUN_ESCAPE, RUN_ESCAPE]),
            Self::Literal(byte) => out.push(byte),
            Self::Run { value, count } if count < RUN_RADIX => {
                out.extend_from_slice(&[RUN_ESCAPE, count as u8, value]);
            }
            Self::Run { value, count } => {
                debug_assert!(count <= MAX_RUN, "run of {count} overflows a record");
                out.extend_from_slice(&[
                    RUN_ESCAPE,
                    LARGE_RUN_MARKER,
                    (count / RUN_RADIX) as u8,
                    (count % RUN_RADIX) as u8,
                    value,
                ]);
            }
        }
    }
}

/// A record together with where it sits in the encoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    /// Offset of the record's first byte.
    pub offset: usize,
    /// Number of encoded bytes the record occupies.
    pub width: usize,
    pub record: Record,
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Run-length encode `input`. Never fails.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let value = input[pos];
        let run = run_length(&input[pos..], MAX_RUN);
        let record = if run >= MIN_RUN {
            if run == MAX_RUN && input.get(pos + run) == Some(&value) {
                log::trace!("splitting run of {value:#04x} at offset {pos}");
            }
            Record::Run { value, count: run }
        } else {
            Record::Literal(value)
        };
        record.emit(&mut out);
        pos += record.decoded_len();
    }

    out
}

/// Length of the run of `data[0]` at the start of `data`, at most `limit`.
#[inline]
fn run_length(data: &[u8], limit: usize) -> usize {
    match data.first() {
        Some(&value) => data.iter().take(limit).take_while(|&&b| b == value).count(),
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Reverse [`encode`].
///
/// Fails with [`Error::TruncatedStream`] if the stream ends inside a record,
/// and with [`Error::MalformedInput`] for a large run record of length zero.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len().saturating_mul(2));
    for span in RecordIter::new(input) {
        match span?.record {
            Record::Literal(byte) => out.push(byte),
            Record::Run { value, count } => out.resize(out.len() + count, value),
        }
    }
    Ok(out)
}

/// Iterator over the records of an encoded run-length stream.
///
/// Yields one `Err` at the first bad record and then stops.
pub struct RecordIter<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            failed: false,
        }
    }

    /// Offset of the next record to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn truncated(&self, needed: usize) -> Error {
        Error::TruncatedStream {
            filter: Filter::RunLength,
            offset: self.pos,
            needed,
            available: self.data.len() - self.pos,
        }
    }

    fn read_record(&self) -> Result<(usize, Record)> {
        match self.data[self.pos..] {
            [RUN_ESCAPE, RUN_ESCAPE, ..] => Ok((2, Record::Literal(RUN_ESCAPE))),
            [RUN_ESCAPE, LARGE_RUN_MARKER, quotient, remainder, value, ..] => {
                let count = usize::from(quotient) * RUN_RADIX + usize::from(remainder);
                if count == 0 {
                    return Err(Error::MalformedInput {
                        filter: Filter::RunLength,
                        offset: self.pos,
                        reason: "run record of length zero",
                    });
                }
                Ok((LARGE_RUN_LEN, Record::Run { value, count }))
            }
            [RUN_ESCAPE, LARGE_RUN_MARKER, ..] => Err(self.truncated(LARGE_RUN_LEN)),
            [RUN_ESCAPE, count, value, ..] => Ok((
                SMALL_RUN_LEN,
                Record::Run {
                    value,
                    count: usize::from(count),
                },
            )),
            [RUN_ESCAPE] => Err(self.truncated(2)),
            [RUN_ESCAPE, _] => Err(self.truncated(SMALL_RUN_LEN)),
            [byte, ..] => Ok((1, Record::Literal(byte))),
            [] => Err(self.truncated(1)),
        }
    }
}

impl Iterator for RecordIter<'_> {
    type Item = Result<RecordSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }

        match self.read_record() {
            Ok((width, record)) => {
                let span = RecordSpan {
                    offset: self.pos,
                    width,
                    record,
                };
                self.pos += width;
                Some(Ok(span))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
