//! Operand literals and the one-operator line form used by the CLI and REPL.

use std::fmt;

use quill_value::{BinaryOp, CompareOp, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Result of an arithmetic operator or `neg`.
    Value(Value),
    /// Result of a relational or equality operator.
    Bool(bool),
    /// A lone operand: its kind and each view.
    Views(Views),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Views {
    pub value: Value,
    pub number: Result<f32, quill_value::Error>,
    pub boolean: Result<bool, quill_value::Error>,
    pub text: Result<String, quill_value::Error>,
}

#[derive(Debug)]
pub enum LineError {
    /// The line itself could not be read.
    Syntax(String),
    /// The value core rejected the operation.
    Value(quill_value::Error),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Syntax(msg) => write!(f, "{}", msg),
            LineError::Value(e) => write!(f, "{}", e),
        }
    }
}

impl From<quill_value::Error> for LineError {
    fn from(e: quill_value::Error) -> Self {
        LineError::Value(e)
    }
}

pub type LineResult<T> = Result<T, LineError>;

fn syntax<T>(msg: impl Into<String>) -> LineResult<T> {
    Err(LineError::Syntax(msg.into()))
}

/// Reads one operand literal.
pub fn parse_operand(word: &str) -> Value {
    match word {
        "undefined" => return Value::UNDEFINED,
        "null" => return Value::NULL,
        "true" | "True" => return Value::TRUE,
        "false" | "False" => return Value::FALSE,
        _ => {}
    }
    if let Some(name) = word.strip_prefix('$') {
        return Value::variable(name);
    }
    for q in ['"', '\''] {
        if word.len() >= 2 && word.starts_with(q) && word.ends_with(q) {
            return Value::from(&word[1..word.len() - 1]);
        }
    }
    match word.parse::<f64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(word),
    }
}

/// Splits a line on whitespace, keeping quoted text (quotes included) together.
pub fn split_words(line: &str) -> LineResult<Vec<String>> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut word = String::new();
        if c == '"' || c == '\'' {
            word.push(c);
            chars.next();
            let mut closed = false;
            for ch in chars.by_ref() {
                word.push(ch);
                if ch == c {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return syntax(format!("Unterminated string starting with {}", c));
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                word.push(ch);
                chars.next();
            }
        }
        words.push(word);
    }
    Ok(words)
}

/// Evaluates `<a> <op> <b>`, `neg <a>` or a single operand.
pub fn eval_words(words: &[String]) -> LineResult<Outcome> {
    eval_words_with(words, parse_operand)
}

/// Like [`eval_words`], but each operand word is read through `operand`.
pub fn eval_words_with(words: &[String], operand: impl Fn(&str) -> Value) -> LineResult<Outcome> {
    match words {
        [] => syntax("Expected an operand"),
        [only] => Ok(Outcome::Views(views(operand(only)))),
        [cmd, arg] if cmd == "neg" => Ok(Outcome::Value(operand(arg).neg())),
        [lhs, op, rhs] => {
            let (lhs, rhs) = (operand(lhs), operand(rhs));
            if let Some(op) = BinaryOp::from_symbol(op) {
                return Ok(Outcome::Value(op.apply(&lhs, &rhs)?));
            }
            if let Some(op) = CompareOp::from_symbol(op) {
                return Ok(Outcome::Bool(op.apply(&lhs, &rhs)?));
            }
            match op.as_str() {
                "==" => Ok(Outcome::Bool(lhs == rhs)),
                "!=" => Ok(Outcome::Bool(lhs != rhs)),
                other => syntax(format!("Unknown operator '{}'", other)),
            }
        }
        _ => syntax(format!(
            "Expected '<a> <op> <b>', 'neg <a>' or a single operand, got {} words",
            words.len()
        )),
    }
}

pub fn eval_line(line: &str) -> LineResult<Outcome> {
    eval_words(&split_words(line)?)
}

pub fn views(value: Value) -> Views {
    Views {
        number: value.as_number(),
        boolean: value.as_bool(),
        text: value.as_string(),
        value,
    }
}

/// Value with strings quoted, so `"1"` and `1` read differently.
pub fn show_value(v: &Value) -> String {
    match v {
        Value::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(line: &str) -> Outcome {
        eval_line(line).unwrap_or_else(|e| panic!("'{}' failed: {}", line, e))
    }

    #[test]
    fn operand_literals() {
        assert_eq!(parse_operand("undefined"), Value::UNDEFINED);
        assert_eq!(parse_operand("null"), Value::NULL);
        assert_eq!(parse_operand("True"), Value::TRUE);
        assert_eq!(parse_operand("-2.5"), Value::from(-2.5));
        assert_eq!(parse_operand("\"7\""), Value::from("7"));
        assert_eq!(parse_operand("'a b'"), Value::from("a b"));
        assert_eq!(parse_operand("word"), Value::from("word"));
        assert_eq!(parse_operand("$hp"), Value::variable("hp"));
    }

    #[test]
    fn split_keeps_quotes_together() {
        let words = split_words(r#""a b" + 'c'"#).unwrap();
        assert_eq!(words, vec!["\"a b\"", "+", "'c'"]);
        assert!(split_words("\"open").is_err());
    }

    #[test]
    fn evaluates_each_form() {
        assert_eq!(eval("1 + 2"), Outcome::Value(Value::from(3)));
        assert_eq!(eval("\"a\" + 5"), Outcome::Value(Value::from("a")));
        assert_eq!(eval("1 < 2"), Outcome::Bool(true));
        assert_eq!(eval("1 == true"), Outcome::Bool(false));
        assert_eq!(eval("neg 4"), Outcome::Value(Value::from(-4)));
        match eval("'12'") {
            Outcome::Views(v) => {
                assert_eq!(v.number, Ok(12.0));
                assert_eq!(v.boolean, Ok(true));
                assert_eq!(v.text, Ok("12".to_string()));
            }
            other => panic!("expected views, got {:?}", other),
        }
    }

    #[test]
    fn reports_errors() {
        assert!(matches!(eval_line("true - 1"), Err(LineError::Value(_))));
        assert!(matches!(eval_line("1 ^ 2"), Err(LineError::Syntax(_))));
        assert!(matches!(eval_line("1 + 2 + 3"), Err(LineError::Syntax(_))));
        assert!(matches!(eval_line(""), Err(LineError::Syntax(_))));
    }

    #[test]
    fn shows_strings_quoted() {
        assert_eq!(show_value(&Value::from("1")), "\"1\"");
        assert_eq!(show_value(&Value::from(1)), "1");
    }
}
