use rand::Rng;

#[derive(serde::Serialize)]
pub struct Order {
    pub number: String,
    pub net: f64,
    pub customer: Customer,
    pub lines: Vec<Line>,
}

#[derive(serde::Serialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

#[derive(serde::Serialize)]
pub struct Line {
    pub sku: String,
    pub qty: u32,
    pub price: f64,
}

fn word(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| rng.gen_range('a'..='z')).collect()
}

/// Generate an order with `n` random lines.
pub fn random(n: usize) -> Order {
    let mut rng = rand::thread_rng();
    let lines: Vec<_> = (0..n)
        .map(|_| Line {
            sku: word(&mut rng, 8),
            qty: rng.gen_range(1..20),
            price: f64::from(rng.gen_range(100..10_000)) / 100.0,
        })
        .collect();
    let net = lines.iter().map(|l| f64::from(l.qty) * l.price).sum();
    Order {
        number: word(&mut rng, 10),
        net,
        customer: Customer {
            name: word(&mut rng, 12),
            email: format!("{}@example.com", word(&mut rng, 8)),
        },
        lines,
    }
}
