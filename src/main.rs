use std::{
    fs,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use tinycalc::{logging, run};

const PROMPT: &str = "calc > ";

/// tinycalc evaluates arithmetic expressions over integers and floats.
///
/// With no expression it starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat `contents` as a path and evaluate the file one line at a time.
    #[arg(short, long, requires = "contents")]
    file: bool,

    /// Label used in error messages for a one-shot expression.
    #[arg(short, long, default_value = "<stdin>")]
    source_name: String,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Expression to evaluate, or a file path with `--file`.
    contents: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;

    match (args.contents, args.file) {
        (None, _) => run_prompt(),
        (Some(path), true) => run_file(&path),
        (Some(expression), false) => {
            if !evaluate(&args.source_name, &expression) {
                std::process::exit(1);
            }
            Ok(())
        },
    }
}

/// Prints the result or the formatted error. Returns `true` on success.
fn evaluate(source_name: &str, text: &str) -> bool {
    match run(source_name, text) {
        Ok(value) => {
            println!("{value}");
            true
        },
        Err(e) => {
            println!("{e}");
            false
        },
    }
}

fn run_prompt() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{PROMPT}");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        evaluate("<stdin>", &line?);
        print!("{PROMPT}");
        stdout.flush()?;
    }
    println!();

    Ok(())
}

fn run_file(path: &str) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read the input file '{path}'"))?;

    let mut failed = false;
    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        failed |= !evaluate(path, line);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
