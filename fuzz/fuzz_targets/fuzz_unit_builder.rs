#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the unit builder with arbitrary bytes
    // This tests byte cleaning, lexing and payload encoding together
    let unit = beeline::unit::build("fuzz/input", data);
    for pair in unit.encoded_tokens.split(' ').filter(|s| !s.is_empty()) {
        let (_, payload) = pair.rsplit_once('|').expect("pair has payload");
        let payload: u32 = payload.parse().expect("payload is an integer");
        let _ = beeline::payload::Payload::decode(payload);
    }
});
