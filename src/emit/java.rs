//! Java code generation
//!
//! Renders an analyzed [`Source`] as a single `public class Main`. Globals
//! become fields, functions become methods, and a `main(String[])` bootstrap
//! exits with the value of the program's own `main`.
//!
//! Types come from the analyzer's annotations. On a program that was never
//! analyzed, the written type names are used and untyped declarations fall
//! back to `Object` and calls keep their written name.

use super::{plain_decimal, quote};
use crate::parser::ast::*;

const INDENT: &str = "    ";

/// Generate the Java class for a program.
pub fn generate(source: &Source) -> String {
    let mut generator = Generator::default();
    generator.source(source);
    generator.out
}

#[derive(Default)]
struct Generator {
    out: String,
    indent: usize,
}

/// Resolve the type of a declaration from its annotation, if any.
fn declared_type(annotated: Option<Type>, type_name: Option<&str>) -> Type {
    annotated
        .or_else(|| type_name.and_then(Type::from_name))
        .unwrap_or(Type::Any)
}

impl Generator {
    fn source(&mut self, source: &Source) {
        self.out.push_str("public class Main {\n\n");
        self.indent += 1;

        for global in &source.globals {
            self.global(global);
        }
        if !source.globals.is_empty() {
            self.out.push('\n');
        }

        self.line("public static void main(String[] args) {");
        self.indent += 1;
        self.line("System.exit(new Main().main());");
        self.indent -= 1;
        self.line("}");

        for function in &source.functions {
            self.out.push('\n');
            self.function(function);
        }

        self.indent -= 1;
        self.out.push_str("\n}\n");
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn global(&mut self, global: &Global) {
        let ty = declared_type(global.ty, Some(&global.type_name));
        let mut text = String::new();
        if !global.mutable {
            text.push_str("final ");
        }
        text.push_str(ty.jvm_name());

        match &global.value {
            Some(value) => {
                if matches!(value.kind, ExprKind::List(_)) {
                    text.push_str("[]");
                }
                text.push_str(&format!(" {} = {};", global.name, expr(value)));
            }
            None => text.push_str(&format!(" {};", global.name)),
        }
        self.line(&text);
    }

    fn function(&mut self, function: &Function) {
        let (parameter_types, returns) = match &function.signature {
            Some(signature) => (signature.parameters.clone(), signature.returns),
            None => (
                function
                    .parameter_types
                    .iter()
                    .map(|name| declared_type(None, Some(name)))
                    .collect(),
                function
                    .return_type
                    .as_deref()
                    .and_then(Type::from_name)
                    .unwrap_or(Type::Nil),
            ),
        };

        let parameters = function
            .parameters
            .iter()
            .zip(parameter_types)
            .map(|(name, ty)| format!("{} {name}", ty.jvm_name()))
            .collect::<Vec<_>>()
            .join(", ");
        let header = format!("{} {}({parameters}) {{", returns.jvm_name(), function.name);

        if function.body.is_empty() {
            self.line(&format!("{header}}}"));
            return;
        }
        self.line(&header);
        self.block(&function.body);
        self.line("}");
    }

    fn block(&mut self, stmts: &[Stmt]) {
        self.indent += 1;
        for stmt in stmts {
            self.statement(stmt);
        }
        self.indent -= 1;
    }

    fn statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(value) => self.line(&format!("{};", expr(value))),

            Stmt::Declaration { name, type_name, value } => {
                let ty = declared_type(
                    type_name
                        .as_deref()
                        .and_then(Type::from_name)
                        .or(value.as_ref().and_then(|v| v.ty)),
                    None,
                );
                match value {
                    Some(value) => self.line(&format!("{} {name} = {};", ty.jvm_name(), expr(value))),
                    None => self.line(&format!("{} {name};", ty.jvm_name())),
                }
            }

            Stmt::Assignment { receiver, value } => self.line(&format!("{} = {};", expr(receiver), expr(value))),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(&format!("if ({}) {{", expr(condition)));
                self.block(then_branch);
                if else_branch.is_empty() {
                    self.line("}");
                } else {
                    self.line("} else {");
                    self.block(else_branch);
                    self.line("}");
                }
            }

            Stmt::Switch { condition, cases } => {
                self.line(&format!("switch ({}) {{", expr(condition)));
                self.indent += 1;
                for case in cases {
                    match &case.value {
                        Some(value) => {
                            self.line(&format!("case {}:", expr(value)));
                            self.block(&case.body);
                            self.indent += 1;
                            self.line("break;");
                            self.indent -= 1;
                        }
                        None => {
                            self.line("default:");
                            self.block(&case.body);
                        }
                    }
                }
                self.indent -= 1;
                self.line("}");
            }

            Stmt::While { condition, body } => {
                if body.is_empty() {
                    self.line(&format!("while ({}) {{}}", expr(condition)));
                    return;
                }
                self.line(&format!("while ({}) {{", expr(condition)));
                self.block(body);
                self.line("}");
            }

            Stmt::Return(value) => self.line(&format!("return {};", expr(value))),
        }
    }
}

/// Render an expression as Java.
pub fn expr(expr_: &Expr) -> String {
    match &expr_.kind {
        ExprKind::Literal(literal) => match literal {
            Literal::Nil => "null".to_string(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Integer(n) => n.to_string(),
            Literal::Decimal(d) => plain_decimal(d),
            Literal::Character(c) => quote(&c.to_string(), '\''),
            Literal::String(s) => quote(s, '"'),
        },
        ExprKind::Group(inner) => format!("({})", expr(inner)),
        ExprKind::Binary {
            op: BinOp::Pow,
            left,
            right,
        } => format!("Math.pow({}, {})", expr(left), expr(right)),
        ExprKind::Binary { op, left, right } => format!("{} {op} {}", expr(left), expr(right)),
        ExprKind::Access { name, index } => match index {
            Some(index) => format!("{name}[{}]", expr(index)),
            None => name.clone(),
        },
        ExprKind::Call { name, args } => {
            let callee = expr_.function.as_ref().map_or(name.as_str(), |function| function.jvm_name.as_str());
            format!("{callee}({})", list(args))
        }
        ExprKind::List(elements) => format!("{{{}}}", list(elements)),
    }
}

fn list(exprs: &[Expr]) -> String {
    exprs.iter().map(expr).collect::<Vec<_>>().join(", ")
}
