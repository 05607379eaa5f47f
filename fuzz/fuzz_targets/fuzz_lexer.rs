#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz the line lexer with arbitrary strings
    // This should not panic or cause undefined behavior
    for line in data.split(['\r', '\n']) {
        let _ = beeline::lexer::lex(line);
    }
});
