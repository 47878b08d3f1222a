#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde::Serialize;

#[derive(Debug, Serialize, Arbitrary)]
#[serde(untagged)]
enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fuzz_target!(|data: (&str, Vec<(&str, &str)>, Value, bool)| {
    let (source, vars, value, strict) = data;
    let mut engine = xmlate::Engine::new();
    engine.set_strict(strict);
    engine.set_max_depth(64);
    let Ok(template) = engine.compile(source) else {
        return;
    };
    let _ = template.convert_with(&value, vars);
});
