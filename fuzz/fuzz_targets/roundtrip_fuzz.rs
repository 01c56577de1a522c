#![no_main]
use libfuzzer_sys::fuzz_target;
use shrinker::filter::{delta, run_length};

fuzz_target!(|data: &[u8]| {
    let packed = shrinker::shrink(data);
    let restored = shrinker::unshrink(&packed).unwrap();
    assert_eq!(restored, data);

    // Each stage must also round-trip on its own.
    let deltas = delta::encode(data);
    assert_eq!(delta::decode(&deltas).unwrap(), data);
    assert_eq!(run_length::decode(&run_length::encode(data)).unwrap(), data);
});
