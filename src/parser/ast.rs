// AST (Abstract Syntax Tree) definitions for PLC programs
//
// Expressions record the byte offset of their first token and carry a type
// slot the analyzer fills in. Structural equality (`PartialEq`) ignores both,
// so a re-parsed program compares equal to the original regardless of layout.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::fmt;

/// The closed set of PLC types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Any,
    Nil,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    Comparable,
}

impl Type {
    pub const ALL: [Type; 8] = [
        Type::Any,
        Type::Nil,
        Type::Boolean,
        Type::Integer,
        Type::Decimal,
        Type::Character,
        Type::String,
        Type::Comparable,
    ];

    /// Resolve a type name as written in source.
    pub fn from_name(name: &str) -> Option<Type> {
        Type::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::Nil => "Nil",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::Comparable => "Comparable",
        }
    }

    /// Name of the matching type on the JVM, used by the Java generator.
    pub fn jvm_name(self) -> &'static str {
        match self {
            Type::Any => "Object",
            Type::Nil => "void",
            Type::Boolean => "boolean",
            Type::Integer => "int",
            Type::Decimal => "double",
            Type::Character => "char",
            Type::String => "String",
            Type::Comparable => "Comparable",
        }
    }

    /// A value of type `other` may be stored where `self` is expected.
    ///
    /// `Any` and `Comparable` accept every type.
    pub fn accepts(self, other: Type) -> bool {
        self == other || matches!(self, Type::Any | Type::Comparable)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved function signature, attached by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Type>,
    pub returns: Type,
    /// Name the function is called by in generated Java
    pub jvm_name: String,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    And,
    Or,
    // Comparison
    Lt,
    Gt,
    Eq,
    Ne,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        Some(match symbol {
            "&&" => BinOp::And,
            "||" => BinOp::Or,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "^" => BinOp::Pow,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal values, already decoded (escapes resolved, numbers parsed).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
}

/// An expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub offset: usize,
    pub ty: Option<Type>,
    /// The function a call resolved to, attached by the analyzer.
    pub function: Option<Signature>,
}

impl Expr {
    pub fn new(kind: ExprKind, offset: usize) -> Self {
        Expr {
            kind,
            offset,
            ty: None,
            function: None,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Group(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Access {
        name: String,
        index: Option<Box<Expr>>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    List(Vec<Expr>),
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Declaration {
        name: String,
        type_name: Option<String>,
        value: Option<Expr>,
    },
    Assignment {
        receiver: Expr,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    Switch {
        condition: Expr,
        cases: Vec<Case>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Return(Expr),
}

/// One arm of a `SWITCH`. The default arm is the last one and has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// Top-level variable (`VAR`, `VAL` or `LIST`).
#[derive(Debug, Clone)]
pub struct Global {
    pub name: String,
    pub type_name: String,
    pub mutable: bool,
    pub value: Option<Expr>,
    pub offset: usize,
    pub ty: Option<Type>,
}

impl PartialEq for Global {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.mutable == other.mutable
            && self.value == other.value
    }
}

/// Function definition
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_types: Vec<String>,
    pub return_type: Option<String>,
    pub body: Vec<Stmt>,
    pub offset: usize,
    pub signature: Option<Signature>,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.parameter_types == other.parameter_types
            && self.return_type == other.return_type
            && self.body == other.body
    }
}

/// A complete program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self, name: &str, arity: usize) -> Option<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name && f.parameters.len() == arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        for ty in Type::ALL {
            assert_eq!(Type::from_name(ty.name()), Some(ty));
        }
        assert_eq!(Type::from_name("Real"), None);
        assert_eq!(Type::from_name("integer"), None);
    }

    #[test]
    fn test_accepts() {
        assert!(Type::Integer.accepts(Type::Integer));
        assert!(!Type::Integer.accepts(Type::String));
        assert!(Type::Any.accepts(Type::Nil));
        assert!(Type::Comparable.accepts(Type::Boolean));
        assert!(!Type::Decimal.accepts(Type::Integer));
    }

    #[test]
    fn test_equality_ignores_offsets_and_types() {
        let a = Expr::new(ExprKind::Literal(Literal::Boolean(true)), 0);
        let mut b = Expr::new(ExprKind::Literal(Literal::Boolean(true)), 42);
        b.ty = Some(Type::Boolean);
        assert_eq!(a, b);
    }
}
