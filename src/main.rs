// cexpr: parse C expressions and print their canonical form

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use tracing_subscriber::EnvFilter;

use cexpr::parser::Lexer;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--tokens] [EXPRESSION...]", program_name);
    eprintln!();
    eprintln!("Parses each EXPRESSION (or each line of stdin when none are given)");
    eprintln!("and prints its fully parenthesized form.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tokens    print the token stream instead of parsing");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} 'a + b * c'          # prints (a+(b*c))", program_name);
    eprintln!("  {} '(int)p->len[2]'     # prints ((int)(p->len)[2])", program_name);
    eprintln!();
    eprintln!("Set RUST_LOG=cexpr=trace to see the parser's decisions.");
}

/// Writes one line, colored when stdout is a terminal.
struct Output {
    stdout: io::Stdout,
    color: bool,
}

impl Output {
    fn line(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            execute!(
                self.stdout,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            )
        } else {
            writeln!(self.stdout, "{}", text)
        }
    }
}

/// Handle one expression. Returns whether it succeeded.
fn process(out: &mut Output, expression: &str, dump_tokens: bool) -> io::Result<bool> {
    if dump_tokens {
        return match Lexer::new(expression).tokenize() {
            Ok(tokens) => {
                for token in tokens {
                    writeln!(out.stdout, "{}", token)?;
                }
                Ok(true)
            }
            Err(err) => {
                out.line(Color::Red, &format!("error: {}", err))?;
                Ok(false)
            }
        };
    }

    match cexpr::parse(expression) {
        Ok(tree) => {
            out.line(Color::Green, &tree.to_string())?;
            Ok(true)
        }
        Err(err) => {
            out.line(Color::Red, &format!("error: {}", err))?;
            Ok(false)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("cexpr");

    let mut dump_tokens = false;
    let mut expressions = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => dump_tokens = true,
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            option if option.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", option);
                eprintln!();
                print_usage(program_name);
                std::process::exit(2);
            }
            _ => expressions.push(arg.clone()),
        }
    }

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = Output { stdout, color };
    let mut failures = 0;

    if expressions.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if !process(&mut out, &line, dump_tokens)? {
                failures += 1;
            }
        }
    } else {
        for expression in &expressions {
            if !process(&mut out, expression, dump_tokens)? {
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
