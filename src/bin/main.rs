//! Sift CLI - compile filter expressions to SQL
//!
//! Usage:
//!   sift --fields <fields.json> [--dialect <dialect>] [query.json]
//!
//! Examples:
//!   sift --fields fields.json query.json
//!   echo '{"where": ["=", ["field", 2], "cam"], "limit": 10}' | sift --fields fields.json --dialect mysql

use clap::{Parser, ValueEnum};
use sift::{generate, FieldTable};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Sift - compiles dialect-neutral filter expressions into multi-dialect SQL")]
#[command(version)]
struct Cli {
    /// Path to the query JSON file (reads stdin if not specified)
    query: Option<PathBuf>,

    /// Path to the field table JSON file ({"<field_id>": "<column>", ...})
    #[arg(short, long)]
    fields: PathBuf,

    /// SQL dialect to generate
    #[arg(short, long, default_value = "postgres")]
    dialect: DialectArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Mysql,
    Postgres,
    Sqlserver,
}

impl DialectArg {
    fn name(self) -> &'static str {
        match self {
            DialectArg::Mysql => "mysql",
            DialectArg::Postgres => "postgres",
            DialectArg::Sqlserver => "sqlserver",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let fields_source = match fs::read_to_string(&cli.fields) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading field table '{}': {}", cli.fields.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let fields: FieldTable = match serde_json::from_str(&fields_source) {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Invalid field table '{}': {}", cli.fields.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let query_source = match &cli.query {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading query '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading query from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buffer
        }
    };

    let query: serde_json::Value = match serde_json::from_str(&query_source) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Invalid query JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match generate(cli.dialect.name(), &fields, &query) {
        Ok(sql) => {
            println!("{}", sql);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}
