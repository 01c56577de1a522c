// Integration tests for the public codec API: shrink/unshrink over realistic
// data shapes, run boundaries, and corrupted streams.

use shrinker::filter::{DELTA_ESCAPE, LARGE_RUN_MARKER, MAX_RUN, RUN_ESCAPE, delta, run_length};
use shrinker::{Error, Filter, shrink, shrink_with_stats, unshrink};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn roundtrip(input: &[u8]) -> Vec<u8> {
    let packed = shrink(input);
    let restored = unshrink(&packed).unwrap();
    assert_eq!(
        restored,
        input,
        "roundtrip mismatch (input={}, packed={})",
        input.len(),
        packed.len()
    );
    packed
}

fn generate_data(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        data.push((state >> 33) as u8);
    }
    data
}

/// 8-bit PCM-like signal: silence, a stepped triangle wave, then silence.
fn audio_like(len: usize) -> Vec<u8> {
    let mut data = vec![128u8; len / 4];
    let mut level = 128i32;
    let mut step = 1i32;
    while data.len() < len * 3 / 4 {
        level += step;
        if !(64..=192).contains(&level) {
            step = -step;
        }
        data.extend(std::iter::repeat_n(level as u8, 16));
    }
    data.resize(len, 128);
    data
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn short_inputs() {
    let cases: [&[u8]; 5] = [&[], &[0], &[255], &[5, 0], &[0, 255]];
    for input in cases {
        assert_eq!(shrink(input), input);
        assert_eq!(unshrink(input).unwrap(), input);
    }
}

#[test]
fn zero_bytes_anywhere_survive() {
    let mut base = generate_data(64, 3);
    base.iter_mut().for_each(|b| *b |= 1);
    for pos in 0..base.len() {
        let mut input = base.clone();
        input[pos] = 0;
        roundtrip(&input);
    }
}

#[test]
fn leading_zero_pair() {
    roundtrip(&[0, 0, 7]);
    roundtrip(&[0, 0, 0]);
    roundtrip(&[7, 0, 0]);
}

#[test]
fn delta_escape_collision() {
    roundtrip(&[0, 255, 0, 255, 0, 255]);
    roundtrip(&[255, 0, 255, 0, 255, 0]);
    assert_eq!(
        delta::encode(&[0, 255]),
        vec![0, DELTA_ESCAPE, DELTA_ESCAPE]
    );
}

#[test]
fn random_data() {
    for seed in 0..16 {
        roundtrip(&generate_data(10_000, seed));
    }
}

#[test]
fn every_three_byte_input() {
    // Covers every pair of adjacent deltas, including both escape forms.
    for a in (0..=255u8).step_by(3) {
        for b in 0..=255u8 {
            for c in [0u8, 1, a, b, 254, 255] {
                roundtrip(&[a, b, c]);
            }
        }
    }
}

#[test]
fn audio_like_signal_shrinks() {
    let input = audio_like(64 * 1024);
    let packed = roundtrip(&input);
    assert!(
        packed.len() * 4 < input.len(),
        "packed={} input={}",
        packed.len(),
        input.len()
    );
}

// ---------------------------------------------------------------------------
// Run boundaries
// ---------------------------------------------------------------------------

#[test]
fn run_boundaries_reconstruct_exact_counts() {
    for count in [3usize, 4, 254, 255, 256, 509, 510, 511, MAX_RUN - 1, MAX_RUN] {
        let input = vec![11u8; count];
        let encoded = run_length::encode(&input);
        let expected_len = if count < 255 { 3 } else { 5 };
        assert_eq!(encoded.len(), expected_len, "count {count}");
        assert_eq!(run_length::decode(&encoded).unwrap(), input, "count {count}");
    }
}

#[test]
fn run_255_has_quotient_one_remainder_zero() {
    let encoded = run_length::encode(&[6u8; 255]);
    assert_eq!(encoded, vec![RUN_ESCAPE, LARGE_RUN_MARKER, 1, 0, 6]);
}

#[test]
fn run_256_has_quotient_one_remainder_one() {
    let encoded = run_length::encode(&[6u8; 256]);
    assert_eq!(encoded, vec![RUN_ESCAPE, LARGE_RUN_MARKER, 1, 1, 6]);
}

#[test]
fn runs_beyond_record_limit() {
    for extra in [1usize, 2, 3, 254, 255, MAX_RUN] {
        let input = vec![200u8; MAX_RUN + extra];
        roundtrip(&input);
        assert_eq!(
            run_length::decode(&run_length::encode(&input)).unwrap(),
            input
        );
    }
}

#[test]
fn long_constant_region_is_fixed_size() {
    let small = shrink(&vec![42u8; 1000]);
    let large = shrink(&vec![42u8; 60_000]);
    assert_eq!(small.len(), 6);
    assert_eq!(large.len(), 6);

    let (_, stats) = shrink_with_stats(&vec![42u8; 1000]);
    assert!(stats.ratio() < 0.01);
}

// ---------------------------------------------------------------------------
// Corruption
// ---------------------------------------------------------------------------

#[test]
fn truncated_streams_are_rejected() {
    let packed = shrink(&vec![9u8; 1000]);
    for cut in 3..packed.len() {
        let err = unshrink(&packed[..cut]).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedStream { .. }),
            "cut {cut}: {err}"
        );
    }
}

#[test]
fn dangling_run_escape() {
    let err = unshrink(&[1, 2, 3, RUN_ESCAPE]).unwrap_err();
    assert_eq!(
        err,
        Error::TruncatedStream {
            filter: Filter::RunLength,
            offset: 3,
            needed: 2,
            available: 1,
        }
    );
}

#[test]
fn dangling_delta_escape() {
    let err = unshrink(&[1, 2, 3, DELTA_ESCAPE]).unwrap_err();
    assert_eq!(err.filter(), Filter::Delta);
    assert_eq!(err.offset(), 3);
}

#[test]
fn empty_large_run_is_malformed() {
    let err = unshrink(&[1, RUN_ESCAPE, LARGE_RUN_MARKER, 0, 0, 4]).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedInput {
            filter: Filter::RunLength,
            offset: 1,
            ..
        }
    ));
}
