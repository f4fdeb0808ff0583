use std::io::{self, Write};

use owo_colors::OwoColorize;
use quill_value::Value;

use crate::common::{render_error, render_outcome};
use crate::line::{self, LineResult, Outcome};

pub fn start_repl() {
    println!("{}", "Quill value REPL. Type :help for help, :quit to exit.".bold().green());

    // Result of the last successful line, reachable as `_`.
    let mut last = Value::default();

    loop {
        print!("{}", "quill> ".cyan());
        let _ = io::stdout().flush();

        let mut input = String::new();
        let n = match io::stdin().read_line(&mut input) {
            Ok(n) => n,
            Err(_) => { println!("<input error>"); break; }
        };
        if n == 0 { // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => { println!("Goodbye."); break; }
                ":help" | ":h" => { print_help(); continue; }
                ":last" => { println!("{}", render_outcome(&Outcome::Value(last.clone()))); continue; }
                ":reset" => { last.set(Value::UNDEFINED); println!("{}", "State reset.".yellow()); continue; }
                _ => { println!("{}", "Unknown command. Type :help.".red()); continue; }
            }
        }

        let words = match line::split_words(trimmed) {
            Ok(words) => words,
            Err(e) => { render_error("Syntax error", &e); continue; }
        };
        match eval_with_last(&words, &last) {
            Ok(outcome) => {
                println!("{}", render_outcome(&outcome));
                match outcome {
                    Outcome::Value(v) => last.set(v),
                    Outcome::Bool(b) => last.set(b),
                    Outcome::Views(views) => last.set(views.value),
                }
            }
            Err(e) => render_error("Error", &e),
        }
    }
}

fn print_help() {
    println!("{}\n  {}  {}\n  {}  {}\n  {}  {}\n  {}  {}",
        "Commands:".bold(),
        ":help".yellow(), "Show this help",
        ":last".yellow(), "Show the last result (also usable as '_')",
        ":reset".yellow(), "Forget the last result",
        ":quit".yellow(), "Exit the REPL");
    println!("{}\n  {}\n  {}\n  {}",
        "Input:".bold(),
        "<a> <op> <b>   op is one of + - * / % < > <= >= == !=",
        "neg <a>        unary minus",
        "<a>            show the number, bool and string views of a");
    println!("{}",
        "Operands: undefined null true false 1.5 \"text\" 'text' word $variable".bright_black());
}

/// Evaluates a line where the bare word `_` stands for `last` as-is.
fn eval_with_last(words: &[String], last: &Value) -> LineResult<Outcome> {
    line::eval_words_with(words, |w| if w == "_" { last.clone() } else { line::parse_operand(w) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        line::split_words(line).unwrap()
    }

    #[test]
    fn underscore_is_the_last_result() {
        let outcome = eval_with_last(&words("_ + 1"), &Value::from(4)).unwrap();
        assert_eq!(outcome, Outcome::Value(Value::from(5)));
        let outcome = eval_with_last(&words("neg _"), &Value::from(4)).unwrap();
        assert_eq!(outcome, Outcome::Value(Value::from(-4)));
    }

    #[test]
    fn last_result_is_reused_unchanged() {
        for s in ["say \"hi\"", "a\\b", "tab\\there", "two words", "'single'"] {
            let outcome = eval_with_last(&words("_ + ''"), &Value::from(s)).unwrap();
            assert_eq!(outcome, Outcome::Value(Value::from(s)));
        }
        for v in [
            Value::NULL,
            Value::UNDEFINED,
            Value::variable("gold"),
            Value::from(f32::NEG_INFINITY),
        ] {
            match eval_with_last(&words("_"), &v).unwrap() {
                Outcome::Views(views) => assert_eq!(views.value, v),
                other => panic!("expected views, got {:?}", other),
            }
        }
    }

    #[test]
    fn quoted_underscore_is_text() {
        let outcome = eval_with_last(&words("\"_\" + ''"), &Value::from(4)).unwrap();
        assert_eq!(outcome, Outcome::Value(Value::from("_")));
    }
}
