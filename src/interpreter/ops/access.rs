use crate::interpreter::engine::{Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::Expr;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

impl Interpreter {
    /// Read a variable, or one element of a list variable.
    ///
    /// Lists come back as handles; the elements are not copied.
    pub(crate) fn evaluate_access(
        &mut self,
        env: &mut Env<'_>,
        name: &str,
        index: Option<&Expr>,
        offset: usize,
    ) -> Result<Value, RuntimeError> {
        let value = env
            .lookup_variable(name)
            .map(|variable| variable.value.clone())
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                offset,
            })?;

        let Some(index) = index else {
            return Ok(value);
        };

        let position = self.evaluate_index(env, index)?;
        match &value {
            Value::List(elements) => {
                let elements = elements.borrow();
                let i = checked_index(&position, elements.len(), index.offset)?;
                Ok(elements[i].clone())
            }
            other => Err(RuntimeError::type_error("List", other, offset)),
        }
    }

    /// Evaluate an index expression, which must produce an integer.
    pub(crate) fn evaluate_index(&mut self, env: &mut Env<'_>, index: &Expr) -> Result<BigInt, RuntimeError> {
        match self.evaluate(env, index)? {
            Value::Integer(n) => Ok(n),
            other => Err(RuntimeError::type_error("Integer", &other, index.offset)),
        }
    }
}

/// Convert `index` to a position inside a list of length `len`.
pub(crate) fn checked_index(index: &BigInt, len: usize, offset: usize) -> Result<usize, RuntimeError> {
    index
        .to_usize()
        .filter(|&i| i < len)
        .ok_or_else(|| RuntimeError::IndexOutOfBounds {
            index: index.to_string(),
            len,
            offset,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_index() {
        assert_eq!(checked_index(&BigInt::from(0), 3, 0), Ok(0));
        assert_eq!(checked_index(&BigInt::from(2), 3, 0), Ok(2));
        assert!(matches!(
            checked_index(&BigInt::from(3), 3, 5),
            Err(RuntimeError::IndexOutOfBounds { len: 3, offset: 5, .. })
        ));
        assert!(matches!(
            checked_index(&BigInt::from(-1), 3, 0),
            Err(RuntimeError::IndexOutOfBounds { .. })
        ));
    }
}
