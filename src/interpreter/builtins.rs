//! Built-in function implementations
//!
//! These functions live in the root frame of every run and are called like
//! user functions.
//!
//! # Supported Built-ins
//!
//! - `print(value)`: writes the textual form of `value` and a newline, returns `NIL`
//! - `logarithm(decimal)`: natural logarithm, computed through `f64`

use crate::interpreter::engine::BuiltinFn;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::terminal::Terminal;
use crate::memory::Value;
use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// Every built-in with its name. All of them take exactly one argument.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[("print", builtin_print), ("logarithm", builtin_logarithm)];

pub(crate) fn builtin_print(terminal: &mut Terminal, args: Vec<Value>, offset: usize) -> Result<Value, RuntimeError> {
    let text = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    terminal.print_line(text, offset);
    Ok(Value::Nil)
}

pub(crate) fn builtin_logarithm(_: &mut Terminal, args: Vec<Value>, offset: usize) -> Result<Value, RuntimeError> {
    let value = match args.as_slice() {
        [Value::Decimal(value)] => value,
        [other] => return Err(RuntimeError::type_error("Decimal", other, offset)),
        _ => {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: "logarithm".to_string(),
                expected: 1,
                got: args.len(),
                offset,
            })
        }
    };

    let invalid = || RuntimeError::InvalidLogarithm {
        value: value.to_string(),
        offset,
    };
    let ln = value
        .to_f64()
        .map(f64::ln)
        .filter(|ln| ln.is_finite())
        .ok_or_else(invalid)?;
    let ln = BigDecimal::from_str(&ln.to_string()).map_err(|_| invalid())?;
    Ok(Value::Decimal(ln))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(text: &str) -> Value {
        Value::Decimal(BigDecimal::from_str(text).unwrap())
    }

    #[test]
    fn test_print_writes_textual_form() {
        let mut terminal = Terminal::captured();
        let result = builtin_print(&mut terminal, vec![Value::from(42)], 0).unwrap();

        assert_eq!(result, Value::Nil);
        assert_eq!(terminal.get_output(), vec!["42"]);
    }

    #[test]
    fn test_logarithm() {
        let mut terminal = Terminal::captured();
        let result = builtin_logarithm(&mut terminal, vec![decimal("1.0")], 0).unwrap();
        assert_eq!(result, decimal("0"));

        let e = builtin_logarithm(&mut terminal, vec![decimal("2.718281828459045")], 0).unwrap();
        match e {
            Value::Decimal(d) => assert!((d.to_f64().unwrap() - 1.0).abs() < 1e-12),
            other => panic!("Expected decimal, got {:?}", other),
        }
    }

    #[test]
    fn test_logarithm_errors() {
        let mut terminal = Terminal::captured();
        assert!(matches!(
            builtin_logarithm(&mut terminal, vec![decimal("0.0")], 7),
            Err(RuntimeError::InvalidLogarithm { offset: 7, .. })
        ));
        assert!(matches!(
            builtin_logarithm(&mut terminal, vec![decimal("-1.0")], 0),
            Err(RuntimeError::InvalidLogarithm { .. })
        ));
        assert!(matches!(
            builtin_logarithm(&mut terminal, vec![Value::from(1)], 0),
            Err(RuntimeError::TypeError { .. })
        ));
    }
}
