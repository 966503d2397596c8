use crate::interpreter::engine::{Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{BinOp, Expr};
use bigdecimal::RoundingMode;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;

impl Interpreter {
    pub(crate) fn evaluate_binary(
        &mut self,
        env: &mut Env<'_>,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        offset: usize,
    ) -> Result<Value, RuntimeError> {
        match op {
            // Short-circuit: the right operand is only evaluated when needed
            BinOp::And | BinOp::Or => {
                let left_val = self.evaluate_condition(env, left)?;
                if left_val == (op == BinOp::Or) {
                    return Ok(Value::Boolean(left_val));
                }
                let right_val = self.evaluate_condition(env, right)?;
                Ok(Value::Boolean(right_val))
            }

            _ => {
                let left_val = self.evaluate(env, left)?;
                let right_val = self.evaluate(env, right)?;
                binary_op(op, &left_val, &right_val, offset)
            }
        }
    }
}

/// Apply a non-logical operator to two evaluated operands.
pub(crate) fn binary_op(op: BinOp, left: &Value, right: &Value, offset: usize) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Eq => Ok(Value::Boolean(left == right)),
        BinOp::Ne => Ok(Value::Boolean(left != right)),
        BinOp::Lt => compare_values(left, right, offset).map(|ord| Value::Boolean(ord == Ordering::Less)),
        BinOp::Gt => compare_values(left, right, offset).map(|ord| Value::Boolean(ord == Ordering::Greater)),
        BinOp::Add => checked_add_values(left, right, offset),
        BinOp::Sub | BinOp::Mul => arithmetic(op, left, right, offset),
        BinOp::Div => checked_div_values(left, right, offset),
        BinOp::Pow => checked_pow_values(left, right, offset),
        BinOp::And | BinOp::Or => Err(RuntimeError::type_error("Boolean", left, offset)),
    }
}

/// Order two values of the same class.
fn compare_values(left: &Value, right: &Value, offset: usize) -> Result<Ordering, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        _ => Err(RuntimeError::type_error(left.type_name(), right, offset)),
    }
}

fn checked_add_values(left: &Value, right: &Value, offset: usize) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{left}{right}"))),
        _ => arithmetic(BinOp::Add, left, right, offset),
    }
}

/// `+ - *` on two integers or two decimals; the left operand picks the class.
fn arithmetic(op: BinOp, left: &Value, right: &Value, offset: usize) -> Result<Value, RuntimeError> {
    match left {
        Value::Integer(a) => {
            let b = right
                .as_integer()
                .ok_or_else(|| RuntimeError::type_error("Integer", right, offset))?;
            Ok(Value::Integer(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                _ => a * b,
            }))
        }
        Value::Decimal(a) => {
            let b = right
                .as_decimal()
                .ok_or_else(|| RuntimeError::type_error("Decimal", right, offset))?;
            Ok(Value::Decimal(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                _ => a * b,
            }))
        }
        other => Err(RuntimeError::type_error("Integer or Decimal", other, offset)),
    }
}

/// Integer division truncates toward zero. Decimal division keeps the
/// dividend's scale, rounding half to even.
fn checked_div_values(left: &Value, right: &Value, offset: usize) -> Result<Value, RuntimeError> {
    match left {
        Value::Integer(a) => {
            let b = right
                .as_integer()
                .ok_or_else(|| RuntimeError::type_error("Integer", right, offset))?;
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero { offset });
            }
            Ok(Value::Integer(a / b))
        }
        Value::Decimal(a) => {
            let b = right
                .as_decimal()
                .ok_or_else(|| RuntimeError::type_error("Decimal", right, offset))?;
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero { offset });
            }
            let (_, scale) = a.as_bigint_and_exponent();
            Ok(Value::Decimal((a / b).with_scale_round(scale, RoundingMode::HalfEven)))
        }
        other => Err(RuntimeError::type_error("Integer or Decimal", other, offset)),
    }
}

fn checked_pow_values(left: &Value, right: &Value, offset: usize) -> Result<Value, RuntimeError> {
    let base = left
        .as_integer()
        .ok_or_else(|| RuntimeError::type_error("Integer", left, offset))?;
    let exponent = right
        .as_integer()
        .ok_or_else(|| RuntimeError::type_error("Integer", right, offset))?;
    let exponent = exponent.to_u32().ok_or_else(|| RuntimeError::InvalidExponent {
        exponent: exponent.to_string(),
        offset,
    })?;
    Ok(Value::Integer(base.pow(exponent)))
}
