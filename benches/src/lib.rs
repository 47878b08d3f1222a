pub mod context;

/// The template used by the benchmarks.
pub const ORDER: &str = include_str!("../benchdata/order.yaml");
