use std::sync::LazyLock;

use regex::Regex;

use crate::render::value::lookup_path;
use crate::render::Variables;
use crate::{Error, Result, Value};

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$\{[^}]+\}").expect("valid variable pattern"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]+\}").expect("valid placeholder pattern"));

/// Resolves template expressions against the data and a variable table.
///
/// An expression is one of:
/// - a non-string literal, returned as is;
/// - `=NAME(arg, ...)`, a function call, see [`Evaluator::call`];
/// - text with `$${variable}` and `${data.path}` placeholders.
pub struct Evaluator<'a> {
    vars: &'a Variables,
    pub(super) strict: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(vars: &'a Variables, strict: bool) -> Self {
        Self { vars, strict }
    }

    pub fn evaluate(&self, expr: &Value, data: &Value) -> Result<Value> {
        match expr {
            Value::String(s) => self.evaluate_str(s, data),
            value => Ok(value.clone()),
        }
    }

    pub fn evaluate_str(&self, expr: &str, data: &Value) -> Result<Value> {
        match expr.strip_prefix('=') {
            Some(body) => self.call(body, data),
            None => self.substitute(expr, data).map(Value::String),
        }
    }

    /// Replaces variable placeholders and then data placeholders.
    ///
    /// Text inserted for a variable is itself scanned for data placeholders.
    /// An unknown variable placeholder is kept verbatim and is not rescanned.
    fn substitute(&self, text: &str, data: &Value) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut pending = String::new();
        let mut last = 0;
        for m in VARIABLE.find_iter(text) {
            pending.push_str(&text[last..m.start()]);
            let name = &text[m.start() + 3..m.end() - 1];
            match self.vars.get(name) {
                Some(value) => pending.push_str(&value.to_string()),
                None => {
                    if self.strict {
                        return Err(Error::new(format!("unknown variable `{name}`")));
                    }
                    log::trace!("leaving unknown variable `{name}` unresolved");
                    self.substitute_data(&pending, data, &mut out)?;
                    pending.clear();
                    out.push_str(m.as_str());
                }
            }
            last = m.end();
        }
        pending.push_str(&text[last..]);
        self.substitute_data(&pending, data, &mut out)?;
        Ok(out)
    }

    fn substitute_data(&self, text: &str, data: &Value, out: &mut String) -> Result<()> {
        let mut last = 0;
        for m in PLACEHOLDER.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let path = text[m.start() + 2..m.end() - 1].trim();
            match lookup_path(data, path) {
                Some(value @ (Value::List(_) | Value::Map(_))) if self.strict => {
                    return Err(Error::new(format!(
                        "data path `{path}` evaluated to unformattable type {}",
                        value.human()
                    )));
                }
                Some(value) => out.push_str(&value.to_string()),
                None if self.strict => {
                    return Err(Error::new(format!("unresolved data path `{path}`")));
                }
                None => log::trace!("data path `{path}` not found, substituting nothing"),
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        Ok(())
    }
}
