#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, bool)| {
    let (source, strict) = data;
    let mut engine = xmlate::Engine::new();
    engine.set_strict(strict);
    let _ = engine.add_template("fuzz", source);
});
