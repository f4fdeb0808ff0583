use owo_colors::OwoColorize;
use quill_value::{Error, Kind};

use crate::line::{show_value, LineError, Outcome};

pub fn render_error(kind: &str, err: &LineError) {
    eprintln!("{}: {}", kind.red().bold(), err.to_string().red());
    match err {
        LineError::Value(e) => provide_error_suggestions(e),
        LineError::Syntax(msg) => {
            if msg.contains("Unterminated string") {
                eprintln!("{}", "Help: Text operands need a closing quote.".yellow());
            } else {
                eprintln!("{}", "Help: Write '<a> <op> <b>', 'neg <a>', or a single operand.".yellow());
                eprintln!("    {}", "Operators: + - * / % < > <= >= == !=".bright_black());
            }
        }
    }
}

pub fn provide_error_suggestions(err: &Error) {
    match err {
        Error::InvalidCoercion { name, .. } => {
            eprintln!("{}", "Help: Variable references have no value of their own.".yellow());
            eprintln!("    {}", format!("Resolve '${}' to a concrete value before using it.", name).bright_black());
        }
        Error::IncompatibleOperandTypes { lhs, rhs, .. } if *lhs == Kind::String || *rhs == Kind::String => {
            eprintln!("{}", "Help: Only '+' accepts text operands.".yellow());
        }
        Error::IncompatibleOperandTypes { .. } => {
            eprintln!("{}", "Help: Arithmetic needs a number on at least one side.".yellow());
            eprintln!("    {}", "• '+' also sums bool+bool and null+null".bright_black());
            eprintln!("    {}", "• '- * / %' accept number with number, null or undefined".bright_black());
        }
        Error::IncomparableTypes { .. } => {
            eprintln!("{}", "Help: Ordering is only defined between values of the same kind.".yellow());
            eprintln!("    {}", "Use '==' to test values of different kinds.".bright_black());
        }
        Error::UnsupportedValueType { .. } => {
            eprintln!("{}", "Help: Values hold none, text, numbers or bools.".yellow());
        }
    }
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Value(v) => format!("{} {}", show_value(v).bright_blue(), format!(": {}", v.kind()).bright_black()),
        Outcome::Bool(b) => format!("{}", b.bright_blue()),
        Outcome::Views(views) => {
            let view = |r: String| r.bright_blue().to_string();
            let failed = |e: &Error| format!("<{}>", e).red().to_string();
            let number = views.number.as_ref().map(|n| view(n.to_string())).unwrap_or_else(failed);
            let boolean = views.boolean.as_ref().map(|b| view(b.to_string())).unwrap_or_else(failed);
            let text = views.text.as_ref().map(|s| view(format!("{:?}", s))).unwrap_or_else(failed);
            format!(
                "{} {}\n  {} {}\n  {} {}\n  {} {}",
                show_value(&views.value).bright_blue(),
                format!(": {}", views.value.kind()).bright_black(),
                "number".yellow(),
                number,
                "bool  ".yellow(),
                boolean,
                "string".yellow(),
                text,
            )
        }
    }
}
