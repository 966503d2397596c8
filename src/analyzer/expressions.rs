//! Expression typing
//!
//! Every visited expression gets its `ty` slot filled with the type returned
//! here.
//!
//! # Binary operator rules
//!
//! - `&&` `||`: both operands `Boolean`, result `Boolean`
//! - `<` `>` `==` `!=`: operands must be comparable and the left operand
//!   assignable to the right one's type; result `Boolean`
//! - `+`: `String` when either side is a `String`; otherwise both sides the
//!   same `Integer` or `Decimal` type
//! - `-` `*` `/`: both sides the same `Integer` or `Decimal` type
//! - `^`: both operands `Integer`, result `Integer`

use crate::analyzer::checker::{require_assignable, Analyzer, TypeScope};
use crate::analyzer::errors::AnalysisError;
use crate::parser::ast::*;
use num_traits::ToPrimitive;

impl Analyzer {
    pub(crate) fn check_expr(&self, scope: &TypeScope, expr: &mut Expr) -> Result<Type, AnalysisError> {
        let offset = expr.offset;
        let established = expr.ty;
        let mut function = None;

        let ty = match &mut expr.kind {
            ExprKind::Literal(literal) => check_literal(literal, offset)?,

            ExprKind::Group(inner) => {
                if !matches!(inner.kind, ExprKind::Binary { .. }) {
                    return Err(AnalysisError::InvalidGroup { offset });
                }
                self.check_expr(scope, inner)?
            }

            ExprKind::Binary { op, left, right } => {
                let left_ty = self.check_expr(scope, left)?;
                let right_ty = self.check_expr(scope, right)?;
                check_binary(*op, left_ty, right_ty, offset)?
            }

            ExprKind::Access { name, index } => {
                let variable = scope
                    .lookup_variable(name)
                    .ok_or_else(|| AnalysisError::UndefinedVariable {
                        name: name.clone(),
                        offset,
                    })?;
                let ty = variable.ty;

                if let Some(index) = index {
                    let index_ty = self.check_expr(scope, index)?;
                    require_assignable(Type::Integer, index_ty, Some(index.offset))?;
                }
                ty
            }

            ExprKind::Call { name, args } => {
                let signature = scope.lookup_function(name, args.len()).ok_or_else(|| {
                    AnalysisError::UndefinedFunction {
                        name: name.clone(),
                        arity: args.len(),
                        offset,
                    }
                })?;

                for (arg, parameter) in args.iter_mut().zip(&signature.parameters) {
                    let arg_ty = self.check_expr(scope, arg)?;
                    require_assignable(*parameter, arg_ty, Some(arg.offset))?;
                }
                function = Some(signature.clone());
                signature.returns
            }

            ExprKind::List(elements) => {
                let element_ty = established.unwrap_or(Type::Any);
                for element in elements.iter_mut() {
                    let ty = self.check_expr(scope, element)?;
                    require_assignable(element_ty, ty, Some(element.offset))?;
                }
                element_ty
            }
        };

        expr.ty = Some(ty);
        expr.function = function;
        Ok(ty)
    }
}

fn check_literal(literal: &Literal, offset: usize) -> Result<Type, AnalysisError> {
    Ok(match literal {
        Literal::Nil => Type::Nil,
        Literal::Boolean(_) => Type::Boolean,
        Literal::Character(_) => Type::Character,
        Literal::String(_) => Type::String,
        Literal::Integer(n) => {
            if n.to_i32().is_none() {
                return Err(AnalysisError::IntegerOutOfRange {
                    literal: n.to_string(),
                    offset,
                });
            }
            Type::Integer
        }
        Literal::Decimal(d) => {
            let in_range = d
                .to_f64()
                .is_some_and(|f| f.is_finite() && f.abs() != f64::MAX);
            if !in_range {
                return Err(AnalysisError::DecimalOutOfRange {
                    literal: d.to_string(),
                    offset,
                });
            }
            Type::Decimal
        }
    })
}

fn check_binary(op: BinOp, left: Type, right: Type, offset: usize) -> Result<Type, AnalysisError> {
    let invalid = || AnalysisError::InvalidOperands {
        op,
        left,
        right,
        offset,
    };

    match op {
        BinOp::And | BinOp::Or => {
            require_assignable(Type::Boolean, left, Some(offset))?;
            require_assignable(Type::Boolean, right, Some(offset))?;
            Ok(Type::Boolean)
        }
        BinOp::Lt | BinOp::Gt | BinOp::Eq | BinOp::Ne => {
            require_assignable(Type::Comparable, left, Some(offset))?;
            require_assignable(Type::Comparable, right, Some(offset))?;
            if !right.accepts(left) {
                return Err(invalid());
            }
            Ok(Type::Boolean)
        }
        BinOp::Add if left == Type::String || right == Type::String => Ok(Type::String),
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
            if matches!(left, Type::Integer | Type::Decimal) && left == right {
                Ok(left)
            } else {
                Err(invalid())
            }
        }
        BinOp::Pow => {
            if left == Type::Integer && right == Type::Integer {
                Ok(Type::Integer)
            } else {
                Err(invalid())
            }
        }
    }
}
