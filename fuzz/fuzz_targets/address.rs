#![no_main]
use isemail::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // No panics, and the worst diagnosis is always a real code in [0, 255].
    let diagnosis = parse(data);
    let _ = diagnosis.code();
    let _ = diagnosis.message();
});
