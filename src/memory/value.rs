//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! of a PLC program. Values are tagged; operators check the tag at run time.
//!
//! # Value Types
//!
//! - [`Value::Nil`]: the absence of a value (`NIL`, and the result of `print`)
//! - [`Value::Boolean`]
//! - [`Value::Integer`]: arbitrary precision
//! - [`Value::Decimal`]: arbitrary precision with a scale
//! - [`Value::Character`] and [`Value::String`]
//! - [`Value::List`]: a shared, mutable handle
//!
//! # Lists
//!
//! Lists are reference values. Reading a list variable clones the handle, not
//! the elements, so `LET ys = xs ;` aliases the same storage.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    List(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(elements)))
    }

    /// Name of the value's class, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Character(_) => "Character",
            Value::String(_) => "String",
            Value::List(_) => "List",
        }
    }

    /// Whether `list` can be reached from this value, itself included.
    ///
    /// Storing a value into a list it can reach would make the list contain
    /// itself.
    pub fn reaches_list(&self, list: &Rc<RefCell<Vec<Value>>>) -> bool {
        match self {
            Value::List(elements) => {
                Rc::ptr_eq(elements, list) || elements.borrow().iter().any(|value| value.reaches_list(list))
            }
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("NIL"),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Character(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(BigInt::from(value))
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "NIL");
        assert_eq!(Value::from(true).to_string(), "TRUE");
        assert_eq!(Value::from(-7).to_string(), "-7");
        assert_eq!(
            Value::from(BigDecimal::from_str("1.50").unwrap()).to_string(),
            "1.50"
        );
        assert_eq!(Value::Character('c').to_string(), "c");
        assert_eq!(Value::list(vec![Value::from(1), Value::from("a")]).to_string(), "[1, a]");
    }

    #[test]
    fn test_lists_share_storage() {
        let a = Value::list(vec![Value::from(1)]);
        let b = a.clone();
        if let Value::List(elements) = &b {
            elements.borrow_mut()[0] = Value::from(2);
        }
        assert_eq!(a, Value::list(vec![Value::from(2)]));
    }

    #[test]
    fn test_reaches_list() {
        let inner = Value::list(vec![Value::from(1)]);
        let outer = Value::list(vec![Value::from(0), inner.clone()]);
        let Value::List(inner_handle) = &inner else {
            unreachable!()
        };
        let Value::List(outer_handle) = &outer else {
            unreachable!()
        };

        assert!(inner.reaches_list(inner_handle));
        assert!(outer.reaches_list(inner_handle));
        assert!(!inner.reaches_list(outer_handle));
        assert!(!Value::from(1).reaches_list(inner_handle));
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(Value::list(vec![Value::from(1)]), Value::list(vec![Value::from(1)]));
        assert_ne!(Value::from(1), Value::from("1"));
    }
}
