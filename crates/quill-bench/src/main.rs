use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser};
use serde::Serialize;

use quill_value::{BinaryOp, CompareOp, Result, Value};

#[derive(Parser, Debug)]
#[command(name = "quill-bench", about = "Time Quill value operators")]
struct Cli {
    /// Specific case(s) to run (by name, e.g. add_numbers). If omitted, runs all cases.
    #[arg(short = 'c', long = "case", action = ArgAction::Append)]
    cases: Vec<String>,

    /// Measured iterations per case
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Operations per iteration
    #[arg(long = "ops", default_value_t = 100_000)]
    ops: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// List cases and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    ops_per_iteration: u32,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_ns_per_op: f64,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    quill_version: String,
    benchmarks: Vec<BenchResult>,
}

struct Case {
    name: &'static str,
    lhs: Value,
    rhs: Value,
    run: fn(&Value, &Value) -> Result<u64>,
}

fn kind_code(v: Value) -> u64 {
    v.kind() as u64
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "add_numbers",
            lhs: Value::from(1.5),
            rhs: Value::from(2),
            run: |a, b| BinaryOp::Add.apply(a, b).map(kind_code),
        },
        Case {
            name: "add_strings",
            lhs: Value::from("hello, "),
            rhs: Value::from("world"),
            run: |a, b| BinaryOp::Add.apply(a, b).map(kind_code),
        },
        Case {
            name: "add_unknown",
            lhs: Value::UNDEFINED,
            rhs: Value::NULL,
            run: |a, b| BinaryOp::Add.apply(a, b).map(kind_code),
        },
        Case {
            name: "sub_null",
            lhs: Value::from(9),
            rhs: Value::NULL,
            run: |a, b| BinaryOp::Sub.apply(a, b).map(kind_code),
        },
        Case {
            name: "div_zero",
            lhs: Value::from(1),
            rhs: Value::from(0),
            run: |a, b| BinaryOp::Div.apply(a, b).map(kind_code),
        },
        Case {
            name: "rem_numbers",
            lhs: Value::from(17),
            rhs: Value::from(5),
            run: |a, b| BinaryOp::Rem.apply(a, b).map(kind_code),
        },
        Case {
            name: "compare_numbers",
            lhs: Value::from(1),
            rhs: Value::from(2),
            run: |a, b| CompareOp::Lt.apply(a, b).map(u64::from),
        },
        Case {
            name: "compare_strings",
            lhs: Value::from("12.5"),
            rhs: Value::from("3"),
            run: |a, b| CompareOp::Ge.apply(a, b).map(u64::from),
        },
        Case {
            name: "equals_strings",
            lhs: Value::from("line"),
            rhs: Value::from("line"),
            run: |a, b| Ok(u64::from(a == b)),
        },
        Case {
            name: "hash_string",
            lhs: Value::from("a longer dialogue line"),
            rhs: Value::NULL,
            run: |a, _| Ok(hash_of(a)),
        },
        Case {
            name: "number_as_string",
            lhs: Value::from(1234.5),
            rhs: Value::NULL,
            run: |a, _| a.as_string().map(|s| s.len() as u64),
        },
        Case {
            name: "string_as_number",
            lhs: Value::from("1234.5"),
            rhs: Value::NULL,
            run: |a, _| a.as_number().map(|n| n as u64),
        },
        Case {
            name: "neg_text",
            lhs: Value::from("   "),
            rhs: Value::NULL,
            run: |a, _| Ok(kind_code(a.neg())),
        },
    ]
}


fn hash_of(v: &Value) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

fn workspace_root() -> PathBuf {
    // crates/quill-bench -> crates -> root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent().unwrap()
        .parent().unwrap()
        .to_path_buf()
}

fn measure_case(case: &Case, iterations: u32, warmup: u32, ops: u32) -> Result<Vec<f64>> {
    for _ in 0..warmup {
        for _ in 0..ops {
            black_box((case.run)(black_box(&case.lhs), black_box(&case.rhs))?);
        }
    }

    let mut totals = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let t0 = Instant::now();
        for _ in 0..ops {
            black_box((case.run)(black_box(&case.lhs), black_box(&case.rhs))?);
        }
        totals.push(dur_ms(t0.elapsed()));
    }
    Ok(totals)
}

fn dur_ms(d: std::time::Duration) -> f64 { d.as_secs_f64() * 1000.0 }

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = if vals.is_empty() { 0.0 } else { vals.iter().sum::<f64>() / (vals.len() as f64) };
    (avg, min, max)
}

fn ensure_dir(p: &Path) {
    if let Err(e) = fs::create_dir_all(p) {
        panic!("Failed to create {}: {}", p.display(), e);
    }
}

fn main() {
    let cli = Cli::parse();

    let mut cases = cases();

    if cli.list {
        println!("Cases:");
        for c in &cases { println!("- {} ({:?}, {:?})", c.name, c.lhs, c.rhs); }
        return;
    }

    if !cli.cases.is_empty() {
        let wanted: std::collections::HashSet<_> = cli.cases.iter().map(|s| s.to_lowercase()).collect();
        cases.retain(|c| wanted.contains(c.name));
        if cases.is_empty() {
            eprintln!("No matching cases. Use --list to see available.");
            std::process::exit(2);
        }
    }

    let mut results = Vec::new();

    for case in &cases {
        let totals = match measure_case(case, cli.iterations, cli.warmup, cli.ops) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{}: {}", case.name, e);
                std::process::exit(1);
            }
        };
        let (avg_t, min_t, max_t) = stats(&totals);
        let ns_per_op = if cli.ops == 0 { 0.0 } else { avg_t * 1_000_000.0 / cli.ops as f64 };

        println!(
            "{:>18}: avg={:.3}ms min={:.3}ms max={:.3}ms | {:.1}ns/op",
            case.name, avg_t, min_t, max_t, ns_per_op
        );

        results.push(BenchResult {
            name: case.name.to_string(),
            iterations: cli.iterations,
            ops_per_iteration: cli.ops,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_ns_per_op: ns_per_op,
        });
    }

    let out_path = if let Some(p) = cli.output.clone() {
        p
    } else {
        let results_dir = workspace_root().join("benchmark/results");
        ensure_dir(&results_dir);
        let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
        results_dir.join(format!("{}.json", ts_file))
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        quill_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = serde_json::to_string_pretty(&doc).expect("serialize json");
    if let Some(parent) = out_path.parent() { ensure_dir(parent); }
    fs::write(&out_path, json).expect("write results json");

    println!("\nSaved results to {}", out_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_case_succeeds() {
        for case in cases() {
            let totals = measure_case(&case, 1, 0, 3)
                .unwrap_or_else(|e| panic!("{} failed: {}", case.name, e));
            assert_eq!(totals.len(), 1);
        }
    }

    #[test]
    fn case_names_are_unique() {
        let names: std::collections::HashSet<_> = cases().iter().map(|c| c.name).collect();
        assert_eq!(names.len(), cases().len());
    }

    #[test]
    fn stats_of_samples() {
        assert_eq!(stats(&[1.0, 3.0, 2.0]), (2.0, 1.0, 3.0));
        assert_eq!(stats(&[]).0, 0.0);
    }
}
