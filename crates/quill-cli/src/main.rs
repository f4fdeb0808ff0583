mod common;
mod line;
mod repl;

use std::fs;
use std::process;

use owo_colors::OwoColorize;

use crate::common::{render_error, render_outcome};
use crate::line::{eval_words, LineError};

const USAGE: &str = "\
Usage:
  quill                       start the REPL
  quill eval <a> <op> <b>     apply one operator
  quill neg <a>               unary minus
  quill coerce <a>            show the number, bool and string views
  quill batch <file>          evaluate one line per expression ('#' comments)";

fn usage_error(msg: &str) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    eprintln!("{}", USAGE.bright_black());
    process::exit(2);
}

fn normalize_path(p: &str) -> std::path::PathBuf {
    let pb = std::path::PathBuf::from(p);
    if pb.exists() {
        return pb;
    }
    #[cfg(windows)]
    {
        let alt = p.replace('/', std::path::MAIN_SEPARATOR_STR);
        let altpb = std::path::PathBuf::from(&alt);
        if altpb.exists() { return altpb; }
    }
    pb
}

fn run_words(words: &[String]) -> Result<(), LineError> {
    let outcome = eval_words(words)?;
    println!("{}", render_outcome(&outcome));
    Ok(())
}

/// Evaluates every line of `path`; returns the number of failed lines.
fn run_batch(path_str: &str) -> usize {
    let path_buf = normalize_path(path_str);
    if !path_buf.exists() {
        eprintln!(
            "{}: {}",
            "error".red().bold(),
            format!("File not found: {}", path_str).red()
        );
        process::exit(1);
    }
    let src = match fs::read_to_string(&path_buf) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path_buf.display(), e).red()
            );
            process::exit(1);
        }
    };

    let mut failures = 0;
    for (i, text) in src.lines().enumerate() {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        match line::eval_line(text) {
            Ok(outcome) => println!("{} {} {}", text, "=>".bright_black(), render_outcome(&outcome)),
            Err(e) => {
                eprintln!("  --> line {}: {}", i + 1, text);
                render_error("Error", &e);
                failures += 1;
            }
        }
    }
    failures
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        repl::start_repl();
        return;
    }

    let rest = &args[1..];
    let result = match args[0].as_str() {
        "-h" | "--help" | "help" => {
            println!("{}", USAGE);
            return;
        }
        "eval" if rest.len() == 3 => run_words(rest),
        "eval" => usage_error("eval takes exactly three arguments: <a> <op> <b>"),
        "neg" if rest.len() == 1 => run_words(&args),
        "neg" => usage_error("neg takes exactly one argument"),
        "coerce" if rest.len() == 1 => run_words(rest),
        "coerce" => usage_error("coerce takes exactly one argument"),
        "batch" if rest.len() == 1 => {
            let failures = run_batch(&rest[0]);
            if failures > 0 {
                eprintln!("{}", format!("{} line(s) failed", failures).red());
                process::exit(1);
            }
            return;
        }
        "batch" => usage_error("batch takes exactly one file path"),
        other => usage_error(&format!("Unknown command '{}'", other)),
    };

    if let Err(e) = result {
        render_error("Error", &e);
        process::exit(1);
    }
}
