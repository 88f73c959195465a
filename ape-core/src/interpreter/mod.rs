pub mod session;

pub mod prelude {
    pub use super::session::*;
}

use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value},
    eval::prelude::execute,
    parser::prelude::{parse_program, parse_program_from_stream, Program},
    utils::prelude::Error,
};

/// A parsed source file together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub src: String,
    pub program: Program,
}

pub fn parse_source(path: PathBuf, src: String) -> Result<SourceFile, Error> {
    let (program, errors) = parse_program(&src);

    if !errors.is_empty() {
        return Err(Error::Parse { path, src, errors });
    }

    Ok(SourceFile { path, src, program })
}

/// Streams the file into the parser char by char, keeping the text for diagnostics.
pub fn parse_file(path: PathBuf) -> Result<SourceFile, Error> {
    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut failure = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                failure = Some(err.kind());
                None
            }
        });

    let (program, errors) = parse_program_from_stream(stream);

    if let Some(err) = failure {
        return Err(Error::StdIo { err });
    }

    if !errors.is_empty() {
        return Err(Error::Parse { path, src, errors });
    }

    tracing::debug!(path = %path.display(), statements = program.statements.len(), "parsed");

    Ok(SourceFile { path, src, program })
}

/// Evaluates a parsed file in a fresh environment.
pub fn run(file: &SourceFile) -> Result<Value, Error> {
    execute(&file.program, &Environment::new())
        .map_err(|error| Error::Runtime {
            path: file.path.clone(),
            message: error.to_string(),
        })
}

pub fn run_file(path: PathBuf) -> Result<Value, Error> {
    let file = parse_file(path)?;

    run(&file)
}

#[cfg(test)]
mod tests;
