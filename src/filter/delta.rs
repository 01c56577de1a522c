// Delta filter: each byte is replaced by its difference from the previous one.
//
// Wire form of one difference `d` (first byte of the stream is stored as-is):
//
//   0..=254      d
//   +255         DELTA_ESCAPE DELTA_ESCAPE
//   -254..=-1    DELTA_ESCAPE -d
//   -255         1               (congruent mod 256, only from 255 -> 0)
//
// Decoding works modulo 256, so `-255` and `+1` reconstruct the same byte.

use crate::error::{Error, Filter, Result};

use super::DELTA_ESCAPE;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Delta-encode `input`. Never fails; an empty input yields an empty output.
///
/// The output is at least as long as the input: each negative difference or
/// difference of +255 costs two bytes.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let Some(&first) = input.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(input.len() + input.len() / 4);
    out.push(first);
    for pair in input.windows(2) {
        push_diff(&mut out, i16::from(pair[1]) - i16::from(pair[0]));
    }
    out
}

#[inline]
fn push_diff(out: &mut Vec<u8>, diff: i16) {
    match diff {
        255 => out.extend_from_slice(&[DELTA_ESCAPE, DELTA_ESCAPE]),
        -255 => out.push(1),
        d if d < 0 => {
            let magnitude = -d;
            debug_assert!(
                (1..255).contains(&magnitude),
                "negative delta magnitude {magnitude} collides with DELTA_ESCAPE"
            );
            out.extend_from_slice(&[DELTA_ESCAPE, magnitude as u8]);
        }
        d => out.push(d as u8),
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Reverse [`encode`].
///
/// Fails with [`Error::TruncatedStream`] when the stream ends right after an
/// escape byte, and with [`Error::MalformedInput`] for a negative difference
/// of zero.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let Some(&first) = input.first() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(input.len());
    let mut last = first;
    out.push(last);

    let mut pos = 1;
    while pos < input.len() {
        let byte = input[pos];
        if byte == DELTA_ESCAPE {
            let Some(&next) = input.get(pos + 1) else {
                return Err(Error::TruncatedStream {
                    filter: Filter::Delta,
                    offset: pos,
                    needed: 2,
                    available: input.len() - pos,
                });
            };
            last = match next {
                DELTA_ESCAPE => last.wrapping_add(DELTA_ESCAPE),
                0 => {
                    return Err(Error::MalformedInput {
                        filter: Filter::Delta,
                        offset: pos,
                        reason: "negative difference of zero",
                    });
                }
                magnitude => last.wrapping_sub(magnitude),
            };
            pos += 2;
        } else {
            last = last.wrapping_add(byte);
            pos += 1;
        }
        out.push(last);
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
