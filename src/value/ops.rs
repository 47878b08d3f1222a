//! Coercions used by the builtin functions.

use crate::Value;

impl Value {
    /// Returns whether the value counts as true in a condition.
    ///
    /// `None`, `false`, zero, `NaN` and the empty string are falsy, everything
    /// else is truthy. Notably the *strings* `"false"` and `"0"` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }

    /// Cast the value to a number for arithmetic and comparisons.
    ///
    /// Values that have no numeric interpretation become `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::None => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Integer(n) => *n as f64,
            Value::Float(n) => *n,
            Value::String(s) => parse_number(s),
            Value::List(_) | Value::Map(_) => f64::NAN,
        }
    }

    /// Equality without any coercion between kinds.
    ///
    /// Integers and floats are both numbers so compare numerically. Lists and
    /// maps are never equal, not even to themselves.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                self.to_number() == other.to_number()
            }
            _ => false,
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    match s {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // `f64::from_str` also accepts words like "inf" and "nan", so only
        // hand it plain decimal literals.
        s if s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) =>
        {
            s.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        let falsy = [
            Value::None,
            Value::Bool(false),
            Value::Integer(0),
            Value::Float(0.0),
            Value::Float(f64::NAN),
            Value::from(""),
        ];
        for v in falsy {
            assert!(!v.is_truthy(), "{v:?} should be falsy");
        }
        let truthy = [
            Value::Bool(true),
            Value::Integer(-1),
            Value::Float(0.5),
            Value::from("false"),
            Value::from("0"),
            Value::from(" "),
            Value::List(vec![]),
            Value::Map(Default::default()),
        ];
        for v in truthy {
            assert!(v.is_truthy(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn string_to_number() {
        let tests = [
            ("4", 4.0),
            ("  2.5\n", 2.5),
            ("", 0.0),
            ("   ", 0.0),
            ("-3", -3.0),
            ("+3", 3.0),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("0x1F", 31.0),
            ("0b101", 5.0),
            ("0o17", 15.0),
            ("Infinity", f64::INFINITY),
            ("-Infinity", f64::NEG_INFINITY),
        ];
        for (s, exp) in tests {
            assert_eq!(Value::from(s).to_number(), exp, "parsing {s:?}");
        }
        for s in ["abc", "4px", "inf", "nan", "0x", "0xZZ", "1e", "."] {
            assert!(Value::from(s).to_number().is_nan(), "parsing {s:?}");
        }
    }

    #[test]
    fn other_to_number() {
        assert_eq!(Value::None.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::Bool(false).to_number(), 0.0);
        assert_eq!(Value::Integer(7).to_number(), 7.0);
        assert!(Value::List(vec![]).to_number().is_nan());
    }

    #[test]
    fn strict_equality_does_not_coerce() {
        assert!(Value::from("4").strict_eq(&Value::from("4")));
        assert!(!Value::from("4").strict_eq(&Value::Float(4.0)));
        assert!(!Value::from("true").strict_eq(&Value::Bool(true)));
        assert!(Value::Integer(2).strict_eq(&Value::Float(2.0)));
        assert!(!Value::Float(f64::NAN).strict_eq(&Value::Float(f64::NAN)));
        assert!(Value::None.strict_eq(&Value::None));
        assert!(!Value::List(vec![]).strict_eq(&Value::List(vec![])));
    }
}
