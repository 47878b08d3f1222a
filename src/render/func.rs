//! The builtin function language.
//!
//! | name   | result                                      |
//! |--------|---------------------------------------------|
//! | `SUM`  | `a + b`                                     |
//! | `DIFF` | `a - b`                                     |
//! | `PROD` | `a * b`                                     |
//! | `QUOT` | `a / b`                                     |
//! | `EQ`   | `a` and `b` are equal without coercion      |
//! | `LT`   | `a < b`                                     |
//! | `LTE`  | `a <= b`                                    |
//! | `GT`   | `a > b`                                     |
//! | `GTE`  | `a > b`, exactly like `GT`                  |
//! | `IF`   | `then` if `cond` is truthy, else `otherwise` |
//! | `NOT`  | `then` if `cond` is falsy, else `otherwise`  |
//!
//! Arithmetic and ordering cast both operands with [`Value::to_number`].

use std::sync::LazyLock;

use regex::Regex;

use crate::render::Evaluator;
use crate::{Error, Result, Value};

static CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)\((.*)\)$").expect("valid call pattern"));

impl Evaluator<'_> {
    /// Execute a function call, `body` is the expression without the leading
    /// `=`.
    ///
    /// Arguments are evaluated as expressions themselves so they may contain
    /// placeholders and nested calls. Anything that does not look like a call
    /// or names an unknown function evaluates to `None`.
    pub fn call(&self, body: &str, data: &Value) -> Result<Value> {
        let Some(caps) = CALL.captures(body) else {
            if self.strict {
                return Err(Error::new(format!("malformed function call `={body}`")));
            }
            log::trace!("`={body}` is not a function call");
            return Ok(Value::None);
        };
        let (_, [name, args]) = caps.extract();

        let Some(func) = Func::from_name(name) else {
            if self.strict {
                return Err(Error::new(format!("unknown function `{name}`")));
            }
            log::trace!("unknown function `{name}`");
            return Ok(Value::None);
        };

        let args = split_args(args)
            .into_iter()
            .map(|arg| self.evaluate_str(arg, data))
            .collect::<Result<Vec<_>>>()?;

        if self.strict && args.len() != func.arity() {
            return Err(Error::new(format!(
                "function `{name}` expects {} arguments, found {}",
                func.arity(),
                args.len()
            )));
        }

        // Missing arguments behave as an undefined value: NaN as a number,
        // falsy as a condition, and `None` when returned.
        let num = |i: usize| args.get(i).map_or(f64::NAN, Value::to_number);
        let truthy = |i: usize| args.get(i).is_some_and(Value::is_truthy);
        let pick = |i: usize| args.get(i).cloned().unwrap_or(Value::None);

        let value = match func {
            Func::Sum => Value::Float(num(0) + num(1)),
            Func::Diff => Value::Float(num(0) - num(1)),
            Func::Prod => Value::Float(num(0) * num(1)),
            Func::Quot => Value::Float(num(0) / num(1)),
            Func::Eq => Value::Bool(match (args.first(), args.get(1)) {
                (Some(a), Some(b)) => a.strict_eq(b),
                (a, b) => a.is_none() && b.is_none(),
            }),
            Func::Lt => Value::Bool(num(0) < num(1)),
            Func::Lte => Value::Bool(num(0) <= num(1)),
            // GTE is strictly greater, just like GT. Existing templates depend
            // on this.
            Func::Gt | Func::Gte => Value::Bool(num(0) > num(1)),
            Func::If if truthy(0) => pick(1),
            Func::If => pick(2),
            Func::Not if truthy(0) => pick(2),
            Func::Not => pick(1),
        };
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Sum,
    Diff,
    Prod,
    Quot,
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    If,
    Not,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "SUM" => Self::Sum,
            "DIFF" => Self::Diff,
            "PROD" => Self::Prod,
            "QUOT" => Self::Quot,
            "EQ" => Self::Eq,
            "LT" => Self::Lt,
            "LTE" => Self::Lte,
            "GT" => Self::Gt,
            "GTE" => Self::Gte,
            "IF" => Self::If,
            "NOT" => Self::Not,
            _ => return None,
        };
        Some(func)
    }

    fn arity(self) -> usize {
        match self {
            Self::If | Self::Not => 3,
            _ => 2,
        }
    }
}

/// Split the argument text on commas outside of parentheses.
///
/// Every argument is trimmed. A trailing empty argument is dropped, so
/// `a,` is a single argument but `a, ` is two.
fn split_args(args: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                result.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let rest = &args[start..];
    if !rest.is_empty() {
        result.push(rest.trim());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Variables;

    fn call(body: &str) -> Value {
        let vars = Variables::default();
        Evaluator::new(&vars, false)
            .call(body, &Value::from([("a", 4), ("b", 2)]))
            .unwrap()
    }

    fn call_strict(body: &str) -> Result<Value> {
        let vars = Variables::default();
        Evaluator::new(&vars, true).call(body, &Value::None)
    }

    #[test]
    fn split_args_nested() {
        assert_eq!(split_args("a, b"), ["a", "b"]);
        assert_eq!(split_args("SUM(1, 2), 3"), ["SUM(1, 2)", "3"]);
        assert_eq!(split_args("=IF(=EQ(a, b), x, y), z"), ["=IF(=EQ(a, b), x, y)", "z"]);
        assert_eq!(split_args(""), Vec::<&str>::new());
        assert_eq!(split_args("a,"), ["a"]);
        assert_eq!(split_args("a, "), ["a", ""]);
        assert_eq!(split_args(",a"), ["", "a"]);
    }

    #[test]
    fn call_arithmetic() {
        assert_eq!(call("SUM(${a}, ${b})"), Value::Float(6.0));
        assert_eq!(call("DIFF(${a}, ${b})"), Value::Float(2.0));
        assert_eq!(call("PROD(${a}, ${b})"), Value::Float(8.0));
        assert_eq!(call("QUOT(${a}, ${b})"), Value::Float(2.0));
        assert_eq!(call("SUM(0.1, 0.2)"), Value::Float(0.1 + 0.2));
    }

    #[test]
    fn call_arithmetic_nan_and_infinity() {
        assert!(matches!(call("SUM(x, 1)"), Value::Float(n) if n.is_nan()));
        assert!(matches!(call("SUM(1)"), Value::Float(n) if n.is_nan()));
        assert_eq!(call("QUOT(1, 0)"), Value::Float(f64::INFINITY));
        assert_eq!(call("SUM(, 1)"), Value::Float(1.0));
    }

    #[test]
    fn call_comparison() {
        assert_eq!(call("LT(${a}, ${b})"), Value::Bool(false));
        assert_eq!(call("LTE(2, 2)"), Value::Bool(true));
        assert_eq!(call("GT(${a}, ${b})"), Value::Bool(true));
        assert_eq!(call("GT(10, 9)"), Value::Bool(true));
        assert_eq!(call("LT(x, 1)"), Value::Bool(false));
    }

    #[test]
    fn call_gte_is_gt() {
        assert_eq!(call("GTE(2, 2)"), Value::Bool(false));
        assert_eq!(call("GTE(3, 2)"), Value::Bool(true));
    }

    #[test]
    fn call_eq_does_not_coerce() {
        assert_eq!(call("EQ(${a}, 4)"), Value::Bool(true));
        assert_eq!(call("EQ(4, 4.0)"), Value::Bool(false));
        assert_eq!(call("EQ(=SUM(1, 1), 2)"), Value::Bool(false));
        assert_eq!(call("EQ(=SUM(1, 1), =SUM(0, 2))"), Value::Bool(true));
        assert_eq!(call("EQ()"), Value::Bool(true));
        assert_eq!(call("EQ(a)"), Value::Bool(false));
    }

    #[test]
    fn call_conditionals() {
        assert_eq!(call("IF(${a}, yes, no)"), Value::from("yes"));
        assert_eq!(call("IF(${missing}, yes, no)"), Value::from("no"));
        assert_eq!(call("IF(false, yes, no)"), Value::from("yes"));
        assert_eq!(call("IF(=GT(${b}, ${a}), yes, no)"), Value::from("no"));
        assert_eq!(call("NOT(${missing}, yes, no)"), Value::from("yes"));
        assert_eq!(call("NOT(${a}, yes, no)"), Value::from("no"));
        assert_eq!(call("IF(1, =SUM(1, 2), no)"), Value::Float(3.0));
        assert_eq!(call("IF(1)"), Value::None);
    }

    #[test]
    fn call_inert() {
        assert_eq!(call("SUM"), Value::None);
        assert_eq!(call("sum(1, 2)"), Value::None);
        assert_eq!(call("SUM(1, 2) "), Value::None);
        assert_eq!(call("MAX(1, 2)"), Value::None);
    }

    #[test]
    fn call_strict_errors() {
        let err = call_strict("MAX(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "unknown function `MAX`");

        let err = call_strict("SUM 1").unwrap_err();
        assert_eq!(err.to_string(), "malformed function call `=SUM 1`");

        let err = call_strict("IF(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "function `IF` expects 3 arguments, found 2");

        assert_eq!(call_strict("SUM(1, 2)").unwrap(), Value::Float(3.0));
    }
}
