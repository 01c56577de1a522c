#![no_main]
use libfuzzer_sys::fuzz_target;
use shrinker::filter::{delta, run_length};

fuzz_target!(|data: &[u8]| {
    // Decoders must never panic, only return errors.
    let _ = shrinker::unshrink(data);
    let _ = run_length::decode(data);
    let _ = delta::decode(data);

    // Every record the iterator accepts must fit inside the input.
    for span in run_length::RecordIter::new(data) {
        match span {
            Ok(span) => assert!(span.offset + span.width <= data.len()),
            Err(_) => break,
        }
    }
});
