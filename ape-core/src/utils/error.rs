use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::parser::prelude::ParseError;
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("program failed: {message}")]
    Runtime {
        path: PathBuf,
        message: String
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Parse { path, src, errors } => errors
                .iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    Diagnostic {
                        title: "Syntax error".into(),
                        text: extra.join("\n"),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label),
                                span: error.span,
                            },
                        }),
                    }
                })
                .collect(),
            Error::Runtime { path, message } => {
                vec![Diagnostic {
                    title: format!("Runtime error in {}", path.display()),
                    text: message.clone(),
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    location: None,
                }]
            }
        }
    }
}
