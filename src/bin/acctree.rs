//! Command-line interface for acctree
//! Inspect OpenACC pragmas: dump the parsed tree, round-trip the text, or
//! report recovered syntax errors.
//!
//! Usage:
//!   acctree parse `<pragma>` [--file]   - Print the tree as JSON
//!   acctree render `<pragma>` [--file]  - Parse and render back (round-trip)
//!   acctree check `<pragma>` [--file]   - Report recovered syntax errors

use acctree::acc::ast::render::render;
use acctree::acc::ast::snapshot::snapshot;
use acctree::acc::ast::Ast;
use clap::{Arg, ArgAction, Command};
use std::process::ExitCode;

fn input_args() -> [Arg; 2] {
    [
        Arg::new("input")
            .help("Pragma text, or a file path with --file")
            .required(true)
            .index(1),
        Arg::new("file")
            .long("file")
            .short('f')
            .help("Treat the input as a file path")
            .action(ArgAction::SetTrue),
    ]
}

fn main() -> ExitCode {
    let matches = Command::new("acctree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting OpenACC directive pragmas")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Print the parsed tree as JSON")
                .args(input_args()),
        )
        .subcommand(
            Command::new("render")
                .about("Parse the pragma and render it back")
                .args(input_args()),
        )
        .subcommand(
            Command::new("check")
                .about("Report syntax errors recovered during parsing")
                .args(input_args()),
        )
        .get_matches();

    let (name, sub) = matches.subcommand().expect("subcommand is required");
    let source = match read_input(sub) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let ast = match Ast::parse_pragma(&source) {
        Ok(ast) => ast,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match name {
        "parse" => match serde_json::to_string_pretty(&snapshot(&ast)) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error: {}", error);
                return ExitCode::FAILURE;
            }
        },
        "render" => println!("{}", render(&ast)),
        "check" => {
            if ast.errors().is_empty() {
                println!("No syntax errors.");
            } else {
                for error in ast.errors() {
                    println!("{}", error);
                }
                return ExitCode::FAILURE;
            }
        }
        _ => unreachable!(),
    }

    ExitCode::SUCCESS
}

fn read_input(matches: &clap::ArgMatches) -> Result<String, String> {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    if matches.get_flag("file") {
        std::fs::read_to_string(input)
            .map_err(|error| format!("could not read '{}': {}", input, error))
    } else {
        Ok(input.clone())
    }
}
