mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::Parser;
use cli::{print_error, print_finished, print_parsing, print_running};
use ape_core::{
    environment::prelude::Value,
    format::prelude::{Formatter, FormatterConfig},
    interpreter::{parse_file, run},
    utils::prelude::Error,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Prints a source file in canonical formatting
    Fmt {
        /// Path of source file
        path: PathBuf,
        /// Rewrite the file in place instead of printing it
        #[arg(short, long, default_value_t = false)]
        write: bool,
        /// Indent with tabs instead of two spaces
        #[arg(long, default_value_t = false)]
        tabs: bool,
    },
    /// Prints the syntax tree of a source file as JSON
    Ast {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    init_tracing();

    let result = match Command::parse() {
        Command::Run { path } => run_command(path),
        Command::Fmt { path, write, tabs } => fmt_command(path, write, tabs),
        Command::Ast { path } => ast_command(path),
        Command::Repl => repl::start().map_err(|err| Error::StdIo { err: err.kind() }),
        Command::Rlpl => rlpl::start().map_err(|err| Error::StdIo { err: err.kind() }),
        Command::Rppl => rppl::start().map_err(|err| Error::StdIo { err: err.kind() }),
    };

    if let Err(err) = result {
        print_error(&err);
        std::process::exit(1);
    }
}

/// Logging stays off unless `RUST_LOG` asks for it.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(path: PathBuf) -> Result<(), Error> {
    tracing::debug!(path = %path.display(), "run");

    print_parsing(&path.display().to_string());
    let start = std::time::Instant::now();

    let file = parse_file(path)?;

    print_running(&file.path.display().to_string());

    let value = run(&file)?;

    print_finished(std::time::Instant::now() - start);
    tracing::debug!(value_type = %value.value_type(), "finished");

    if value != Value::Null {
        println!("{value}");
    }

    Ok(())
}

fn fmt_command(path: PathBuf, write: bool, tabs: bool) -> Result<(), Error> {
    tracing::debug!(path = %path.display(), write, tabs, "fmt");

    let file = parse_file(path)?;

    let config = if tabs {
        FormatterConfig { indent_char: '\t', indent_size: 1 }
    } else {
        FormatterConfig::default()
    };

    let formatted = Formatter::new(config).format(&file.program);

    if write {
        std::fs::write(&file.path, formatted)
            .map_err(|err| Error::StdIo { err: err.kind() })?;
    } else {
        print!("{formatted}");
    }

    Ok(())
}

fn ast_command(path: PathBuf) -> Result<(), Error> {
    tracing::debug!(path = %path.display(), "ast");

    let file = parse_file(path)?;

    let json = serde_json::to_string_pretty(&file.program)
        .map_err(|err| Error::StdIo { err: std::io::Error::from(err).kind() })?;

    println!("{json}");

    Ok(())
}
