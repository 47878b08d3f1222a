fn main() -> xmlate::Result<()> {
    let engine = xmlate::Engine::new();

    let out = engine
        .compile(
            r#"
root: greeting
variables:
  PUNCT: "!"
elements:
  message: Hello ${name}$${PUNCT}
"#,
        )?
        .convert(serde_json::json!({ "name": "World" }))?;

    println!("{out}");

    Ok(())
}
