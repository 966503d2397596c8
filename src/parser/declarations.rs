//! Top-level declaration parsing
//!
//! ```text
//! global   ::= ( 'VAR' name ':' type ( '=' expr )?
//!              | 'VAL' name ':' type '=' expr
//!              | 'LIST' name ':' type '=' '[' expr ( ',' expr )* ']' ) ';'
//! function ::= 'FUN' name '(' ( name ':' type ( ',' name ':' type )* )? ')'
//!              ( ':' type )? 'DO' block 'END'
//! ```

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a `VAR`, `VAL` or `LIST` global.
    pub(crate) fn parse_global(&mut self) -> Result<Global, ParseError> {
        let offset = self.current_offset();

        let global = if self.match_token("LIST") {
            self.parse_list_global(offset)?
        } else if self.match_token("VAR") {
            let (name, type_name) = self.parse_typed_name("in variable declaration")?;
            let value = if self.match_token("=") {
                Some(self.parse_expression()?)
            } else {
                None
            };
            Global {
                name,
                type_name,
                mutable: true,
                value,
                offset,
                ty: None,
            }
        } else {
            self.expect_token("VAL", "at start of global")?;
            let (name, type_name) = self.parse_typed_name("in value declaration")?;
            self.expect_token("=", "after immutable value name")?;
            let value = self.parse_expression()?;
            Global {
                name,
                type_name,
                mutable: false,
                value: Some(value),
                offset,
                ty: None,
            }
        };

        self.expect_token(";", "after global declaration")?;
        Ok(global)
    }

    fn parse_list_global(&mut self, offset: usize) -> Result<Global, ParseError> {
        let (name, type_name) = self.parse_typed_name("in list declaration")?;
        self.expect_token("=", "after list name")?;

        let list_offset = self.current_offset();
        self.expect_token("[", "to open list literal")?;
        let mut elements = vec![self.parse_expression()?];
        while self.match_token(",") {
            elements.push(self.parse_expression()?);
        }
        self.expect_token("]", "to close list literal")?;

        Ok(Global {
            name,
            type_name,
            mutable: true,
            value: Some(Expr::new(ExprKind::List(elements), list_offset)),
            offset,
            ty: None,
        })
    }

    /// `name ':' type`
    fn parse_typed_name(&mut self, context: &str) -> Result<(String, String), ParseError> {
        let name = self.expect_identifier(context)?;
        self.expect_token(":", &format!("before type of '{name}'"))?;
        let type_name = self.expect_identifier(&format!("as type of '{name}'"))?;
        Ok((name, type_name))
    }

    /// Parse a `FUN` definition.
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        let offset = self.current_offset();
        self.expect_token("FUN", "at start of function")?;
        let name = self.expect_identifier("after 'FUN'")?;
        self.expect_token("(", "after function name")?;

        let mut parameters = Vec::new();
        let mut parameter_types = Vec::new();
        if !self.check(")") {
            loop {
                let (param, type_name) = self.parse_typed_name("in parameter list")?;
                parameters.push(param);
                parameter_types.push(type_name);
                if !self.match_token(",") {
                    break;
                }
            }
        }
        self.expect_token(")", "after parameters")?;

        let return_type = if self.match_token(":") {
            Some(self.expect_identifier("as return type")?)
        } else {
            None
        };

        self.expect_token("DO", "before function body")?;
        let body = self.parse_block()?;
        self.expect_token("END", "after function body")?;

        Ok(Function {
            name,
            parameters,
            parameter_types,
            return_type,
            body,
            offset,
            signature: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Source, ParseError> {
        Parser::new(source)?.parse_source()
    }

    #[test]
    fn test_global_forms() {
        let program = parse("VAR a : Integer ; VAR b : Boolean = TRUE ; VAL c : String = \"c\" ;").unwrap();

        assert_eq!(program.globals[0].value, None);
        assert_eq!(
            program.globals[1].value.as_ref().map(|e| &e.kind),
            Some(&ExprKind::Literal(Literal::Boolean(true)))
        );
        assert_eq!(program.globals[2].type_name, "String");
    }

    #[test]
    fn test_val_requires_initializer() {
        assert!(parse("VAL c : String ;").is_err());
    }

    #[test]
    fn test_list_global() {
        let program = parse("LIST nums : Integer = [ 1 , 2 , 3 ] ;").unwrap();
        let global = &program.globals[0];

        match &global.value.as_ref().unwrap().kind {
            ExprKind::List(elements) => assert_eq!(elements.len(), 3),
            other => panic!("Expected list literal, got {:?}", other),
        }
        assert_eq!(global.value.as_ref().unwrap().offset, 22);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(parse("LIST nums : Integer = [ ] ;").is_err());
    }

    #[test]
    fn test_function_parameters() {
        let program = parse("FUN add ( a : Integer , b : Integer ) : Integer DO RETURN a + b ; END").unwrap();
        let add = &program.functions[0];

        assert_eq!(add.parameters, vec!["a", "b"]);
        assert_eq!(add.parameter_types, vec!["Integer", "Integer"]);
        assert_eq!(add.return_type.as_deref(), Some("Integer"));
    }

    #[test]
    fn test_function_without_return_type() {
        let program = parse("FUN noop ( ) DO END").unwrap();
        assert_eq!(program.functions[0].return_type, None);
        assert!(program.functions[0].body.is_empty());
    }

    #[test]
    fn test_function_missing_end() {
        let err = parse("FUN f ( ) DO").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEnd { .. }));
    }
}
