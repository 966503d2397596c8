//! Code emitters
//!
//! - [`java`]: renders an analyzed program as a Java class
//! - [`source`]: renders any program back into PLC concrete syntax
//!
//! Both walk the same AST the interpreter runs; neither can fail.

pub mod java;
pub mod source;

use bigdecimal::BigDecimal;
use num_bigint::Sign;

/// Quote a character or string literal, re-escaping what the lexer decodes.
///
/// Java accepts the same escape set, so both emitters share this.
pub(crate) fn quote(text: &str, delimiter: char) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for ch in text.chars() {
        match ch {
            '\u{8}' => quoted.push_str("\\b"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\\' => quoted.push_str("\\\\"),
            '\'' | '"' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            _ => quoted.push(ch),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// Render a decimal in positional notation with at least one fraction digit.
///
/// `BigDecimal`'s `Display` may switch to exponent form, which the lexer
/// does not accept.
pub(crate) fn plain_decimal(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let sign = if digits.sign() == Sign::Minus { "-" } else { "" };
    let magnitude = digits.magnitude().to_string();

    if scale <= 0 {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        return format!("{sign}{magnitude}{zeros}.0");
    }

    let scale = scale as usize;
    let padded = format!("{magnitude:0>width$}", width = scale + 1);
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{sign}{whole}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_quote() {
        assert_eq!(quote("a\tb\"", '"'), r#""a\tb\"""#);
        assert_eq!(quote("'", '\''), r"'\''");
        assert_eq!(quote("\\", '\''), r"'\\'");
    }

    #[test]
    fn test_plain_decimal() {
        let cases = [("2.50", "2.50"), ("0.5", "0.5"), ("-0.001", "-0.001"), ("1e3", "1000.0")];
        for (input, expected) in cases {
            assert_eq!(plain_decimal(&BigDecimal::from_str(input).unwrap()), expected);
        }
    }
}
