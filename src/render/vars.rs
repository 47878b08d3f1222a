use std::collections::btree_map;

use crate::compile::join;
use crate::render::Evaluator;
use crate::value::Map;
use crate::{Result, Value};

/// A table of evaluated variables, referenced in templates as `$${name}`.
///
/// Every value is evaluated once, when the table is built, and never
/// re-evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    map: Map<String, Value>,
}

impl Variables {
    /// Returns the value of the variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Returns the number of variables in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if there are no variables in the table.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over the variables ordered by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.map.iter()
    }

    /// Evaluate each raw expression in order and add it to the table.
    ///
    /// Expressions have no data to refer to, only the variables evaluated
    /// before them. A variable referring to itself sees its previous value, if
    /// any.
    pub(crate) fn extend(mut self, strict: bool, exprs: &[(String, Value)]) -> Result<Self> {
        for (name, expr) in exprs {
            let value = Evaluator::new(&self, strict)
                .evaluate(expr, &Value::None)
                .map_err(|err| err.with_path(join("variables", name)))?;
            self.map.insert(name.clone(), value);
        }
        Ok(self)
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merge runtime variables with the template declared variables.
///
/// Runtime variables come first in the order given. A template variable with
/// the same name replaces the runtime expression in place, the rest are
/// appended in declaration order.
pub(crate) fn merge(
    runtime: Vec<(String, Value)>,
    template: &[(String, Value)],
) -> Vec<(String, Value)> {
    let mut merged: Vec<(String, Value)> = Vec::with_capacity(runtime.len() + template.len());
    for (name, expr) in runtime.into_iter().chain(template.iter().cloned()) {
        match merged.iter_mut().find(|(n, _)| *n == name) {
            Some((_, e)) => *e = expr,
            None => merged.push((name, expr)),
        }
    }
    merged
}
