//! PLC source formatter
//!
//! Renders a [`Source`] back into PLC syntax, one statement per line with
//! four-space indentation. Every token is separated by a space, since the
//! lexer requires whitespace after identifiers and numbers. Parsing the
//! output yields a program structurally equal to the input.

use super::{plain_decimal, quote};
use crate::parser::ast::*;

const INDENT: &str = "    ";

/// Format a whole program.
pub fn format(source: &Source) -> String {
    let mut formatter = Formatter::default();
    formatter.format_source(source);
    formatter.out
}

/// Format a single expression.
pub fn format_expr(expr: &Expr) -> String {
    let mut formatter = Formatter::default();
    formatter.expr(expr);
    formatter.out
}

#[derive(Default)]
struct Formatter {
    out: String,
    indent: usize,
}

impl Formatter {
    fn format_source(&mut self, source: &Source) {
        for global in &source.globals {
            self.global(global);
        }
        for function in &source.functions {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.function(function);
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn global(&mut self, global: &Global) {
        let keyword = match (&global.value, global.mutable) {
            (Some(Expr { kind: ExprKind::List(_), .. }), _) => "LIST",
            (_, true) => "VAR",
            (_, false) => "VAL",
        };
        let mut text = format!("{keyword} {} : {}", global.name, global.type_name);
        if let Some(value) = &global.value {
            text.push_str(" = ");
            text.push_str(&format_expr(value));
        }
        text.push_str(" ;");
        self.line(&text);
    }

    fn function(&mut self, function: &Function) {
        let parameters = function
            .parameters
            .iter()
            .zip(&function.parameter_types)
            .map(|(name, ty)| format!("{name} : {ty}"))
            .collect::<Vec<_>>();

        let mut header = format!("FUN {} (", function.name);
        if !parameters.is_empty() {
            header.push(' ');
            header.push_str(&parameters.join(" , "));
        }
        header.push_str(" )");
        if let Some(ty) = &function.return_type {
            header.push_str(" : ");
            header.push_str(ty);
        }
        header.push_str(" DO");

        self.line(&header);
        self.block(&function.body);
        self.line("END");
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
            Stmt::Expression(expr) => self.line(&format!("{} ;", format_expr(expr))),

            Stmt::Declaration { name, type_name, value } => {
                let mut text = format!("LET {name}");
                if let Some(ty) = type_name {
                    text.push_str(" : ");
                    text.push_str(ty);
                }
                if let Some(value) = value {
                    text.push_str(" = ");
                    text.push_str(&format_expr(value));
                }
                text.push_str(" ;");
                self.line(&text);
            }

            Stmt::Assignment { receiver, value } => {
                self.line(&format!("{} = {} ;", format_expr(receiver), format_expr(value)))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(&format!("IF {} DO", format_expr(condition)));
                self.block(then_branch);
                if !else_branch.is_empty() {
                    self.line("ELSE");
                    self.block(else_branch);
                }
                self.line("END");
            }

            Stmt::Switch { condition, cases } => {
                self.line(&format!("SWITCH {}", format_expr(condition)));
                self.indent += 1;
                for case in cases {
                    match &case.value {
                        Some(value) => self.line(&format!("CASE {} :", format_expr(value))),
                        None => self.line("DEFAULT"),
                    }
                    self.block(&case.body);
                }
                self.indent -= 1;
                self.line("END");
            }

            Stmt::While { condition, body } => {
                self.line(&format!("WHILE {} DO", format_expr(condition)));
                self.block(body);
                self.line("END");
            }

            Stmt::Return(value) => self.line(&format!("RETURN {} ;", format_expr(value))),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(literal) => self.literal(literal),
            ExprKind::Group(inner) => {
                self.out.push_str("( ");
                self.expr(inner);
                self.out.push_str(" )");
            }
            ExprKind::Binary { op, left, right } => {
                self.expr(left);
                self.out.push(' ');
                self.out.push_str(op.symbol());
                self.out.push(' ');
                self.expr(right);
            }
            ExprKind::Access { name, index } => {
                self.out.push_str(name);
                if let Some(index) = index {
                    self.out.push_str(" [ ");
                    self.expr(index);
                    self.out.push_str(" ]");
                }
            }
            ExprKind::Call { name, args } => {
                self.out.push_str(name);
                self.out.push_str(" (");
                self.separated(args);
                self.out.push_str(" )");
            }
            ExprKind::List(elements) => {
                self.out.push('[');
                self.separated(elements);
                self.out.push_str(" ]");
            }
        }
    }

    fn separated(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            self.out.push_str(if i == 0 { " " } else { " , " });
            self.expr(expr);
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Nil => self.out.push_str("NIL"),
            Literal::Boolean(true) => self.out.push_str("TRUE"),
            Literal::Boolean(false) => self.out.push_str("FALSE"),
            Literal::Integer(n) => self.out.push_str(&n.to_string()),
            Literal::Decimal(d) => self.out.push_str(&plain_decimal(d)),
            Literal::Character(c) => self.out.push_str(&quote(&c.to_string(), '\'')),
            Literal::String(s) => self.out.push_str(&quote(s, '"')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;
    use indoc::indoc;

    fn parse(source: &str) -> Source {
        Parser::new(source).unwrap().parse_source().unwrap()
    }

    #[test]
    fn test_format_layout() {
        let program = parse("VAR x : Integer = 1 ; FUN main ( ) : Integer DO IF x == 1 DO RETURN x ; END RETURN 0 ; END");
        assert_eq!(
            format(&program),
            indoc! {"
                VAR x : Integer = 1 ;

                FUN main ( ) : Integer DO
                    IF x == 1 DO
                        RETURN x ;
                    END
                    RETURN 0 ;
                END
            "}
        );
    }

    #[test]
    fn test_format_round_trips() {
        let program = parse(indoc! {r#"
            LIST xs : Decimal = [ 1.50 , -0.25 ] ;
            VAL greeting : String = "hi\t\"there\"" ;
            FUN pick ( n : Integer , c : Character ) : Any DO
                LET i = n ^ 2 / ( n - -1 ) ;
                SWITCH c
                CASE '\n' :
                    RETURN xs [ 0 ] ;
                CASE '\'' :
                DEFAULT
                    xs [ 1 ] = 2.0 ;
                END
                WHILE i > 0 && TRUE || FALSE DO
                    i = i - 1 ;
                END
                IF i != 0 DO
                    print ( NIL ) ;
                ELSE
                    LET unused : Boolean ;
                END
                RETURN pick ( i , 'x' ) ;
            END
            FUN main ( ) DO
            END
        "#});

        let formatted = format(&program);
        assert_eq!(parse(&formatted), program, "formatted as:\n{}", formatted);
    }
}
