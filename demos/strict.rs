use std::io;

const TEMPLATE: &str = r#"
root: invoice
variables:
  VAT: 0.2
elements:
  number: ${number}
  lines:
    - line:
        value: =PROD(${qty}, ${price})
        attributes:
          - name: sku
            value: ${sku}
  vat: =PROD(${net}, $${VAT})
"#;

fn main() -> xmlate::Result<()> {
    let mut engine = xmlate::Engine::new();
    engine.set_strict(true);
    engine.set_max_depth(8);
    engine.add_template("invoice", TEMPLATE)?;

    let template = engine
        .get_template("invoice")
        .expect("template was just added");

    let data = serde_json::json!({
        "number": "2024-001",
        "net": 30,
        "lines": [
            { "sku": "A1", "qty": 2, "price": 10 },
            { "sku": "B2", "qty": 1, "price": 10 },
        ],
    });
    template.render(&data).to_writer(io::stdout())?;
    println!();

    // This line is missing its price.
    let data = serde_json::json!({
        "number": "2024-002",
        "net": 10,
        "lines": [{ "sku": "A1", "qty": 1 }],
    });
    if let Err(err) = template.convert(&data) {
        eprintln!("error: {err:#}");
    }

    Ok(())
}
