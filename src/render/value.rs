use crate::Value;

/// Look up a dotted path such as `order.customer.name` in the data.
///
/// Each segment selects a field of a map. Lists cannot be indexed, so a
/// numeric segment is just another field name. Returns `None` as soon as a
/// segment cannot be resolved.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |value, key| match value {
        Value::Map(map) => map.get(key),
        _ => None,
    })
}
