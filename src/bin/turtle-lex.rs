//! Command-line interface for turtle-lex
//! This binary is used to inspect the token stream the tokenizer produces for
//! a Turtle file, mainly for debugging rules and for wiring up hosts.
//!
//! Usage:
//!   turtle-lex tokens `<path>` [--format `<format>`]  - Dump the token stream
//!   turtle-lex metadata                             - Print registration metadata

use clap::{Arg, Command};

use turtle_lex::{tokenize, METADATA};

fn main() {
    let matches = Command::new("turtle-lex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting Turtle token streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Tokenize a Turtle file and dump the token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the Turtle file to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'lines')")
                        .default_value("lines"),
                ),
        )
        .subcommand(Command::new("metadata").about("Print registration metadata as JSON"))
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        Some(("metadata", _)) => {
            handle_metadata_command();
        }
        _ => unreachable!(),
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    match format {
        "json" => {
            let tokens: Vec<_> = tokenize(&source).collect();
            let output = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error serializing tokens: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        "lines" => {
            for token in tokenize(&source) {
                println!(
                    "{:>5}..{:<5} {:<15} {:?}",
                    token.span.start,
                    token.span.end,
                    token.category.name(),
                    token.text
                );
            }
        }
        other => {
            eprintln!("Error: unknown format '{}', expected 'json' or 'lines'", other);
            std::process::exit(1);
        }
    }
}

/// Handle the metadata command
fn handle_metadata_command() {
    let output = serde_json::to_string_pretty(&METADATA).unwrap_or_else(|e| {
        eprintln!("Error serializing metadata: {}", e);
        std::process::exit(1);
    });
    println!("{}", output);
}
