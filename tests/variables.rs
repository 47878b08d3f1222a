use serde_json::json;
use xmlate::{Engine, Value};

const TEMPLATE: &str = "
root: r
variables:
  GREETING: hello
  LIMIT: 10
  DOUBLE: =PROD($${LIMIT}, 2)
elements:
  greeting: $${GREETING} ${name}
  double: $${DOUBLE}
  extra: '[$${EXTRA}]'
  over: =GT(${count}, $${LIMIT})
";

#[test]
fn variables_from_template() {
    let result = Engine::new()
        .compile(TEMPLATE)
        .unwrap()
        .convert(json!({ "name": "Ada", "count": 11 }))
        .unwrap();
    assert_eq!(
        result,
        "<r><greeting>hello Ada</greeting><double>20</double><extra>[$${EXTRA}]</extra><over>true</over></r>"
    );
}

#[test]
fn variables_template_accessor() {
    let engine = Engine::new();
    let template = engine.compile(TEMPLATE).unwrap();
    let vars = template.variables();
    assert_eq!(vars.len(), 3);
    assert_eq!(vars.get("GREETING"), Some(&Value::from("hello")));
    assert_eq!(vars.get("LIMIT"), Some(&Value::Integer(10)));
    assert_eq!(vars.get("DOUBLE"), Some(&Value::Float(20.0)));
    assert_eq!(vars.get("EXTRA"), None);
}

#[test]
fn variables_at_runtime() {
    let result = Engine::new()
        .compile(TEMPLATE)
        .unwrap()
        .convert_with(json!({ "name": "Ada", "count": 1 }), [("EXTRA", "more")])
        .unwrap();
    assert_eq!(
        result,
        "<r><greeting>hello Ada</greeting><double>20</double><extra>[more]</extra><over>false</over></r>"
    );
}

#[test]
fn variables_template_takes_precedence() {
    let result = Engine::new()
        .compile(TEMPLATE)
        .unwrap()
        .convert_with(json!({ "name": "Ada" }), [("GREETING", "bye"), ("LIMIT", "0")])
        .unwrap();
    assert!(result.starts_with("<r><greeting>hello Ada</greeting><double>20</double>"));
}

#[test]
fn variables_runtime_can_be_referenced_by_template() {
    let result = Engine::new()
        .compile(
            "
root: r
variables:
  TOTAL: =SUM($${BASE}, 1)
elements:
  total: $${TOTAL}
",
        )
        .unwrap()
        .render(json!({}))
        .with_variables([("BASE", 41)])
        .to_string()
        .unwrap();
    assert_eq!(result, "<r><total>42</total></r>");
}

#[test]
fn variables_do_not_leak_between_calls() {
    let engine = Engine::new();
    let template = engine.compile(TEMPLATE).unwrap();

    let with = template
        .convert_with(json!({}), [("EXTRA", "once")])
        .unwrap();
    assert!(with.contains("<extra>[once]</extra>"));

    let without = template.convert(json!({})).unwrap();
    assert!(without.contains("<extra>[$${EXTRA}]</extra>"));
    assert_eq!(template.variables().get("EXTRA"), None);
}

#[test]
fn variables_are_evaluated_without_data() {
    let result = Engine::new()
        .compile(
            "
root: r
variables:
  NAME: '[${name}]'
elements:
  name: $${NAME}
",
        )
        .unwrap()
        .convert(json!({ "name": "ignored" }))
        .unwrap();
    assert_eq!(result, "<r><name>[]</name></r>");
}

#[test]
fn variables_without_value_are_empty() {
    let result = Engine::new()
        .compile(
            "
root: r
variables:
  NOTHING: ~
  INERT: =FOO(1)
elements:
  a: '[$${NOTHING}][$${INERT}]'
",
        )
        .unwrap()
        .convert(json!({}))
        .unwrap();
    assert_eq!(result, "<r><a>[][]</a></r>");
}
