use serde::Serialize;

use crate::{
    environment::prelude::{Env, Environment},
    eval::prelude::eval_program,
    format::prelude::{Formatter, FormatterConfig},
    parser::prelude::{parse_program, Program},
};

/// What a host gets back from a session call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Response {
    fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Keeps one root environment alive across `run` calls, like a REPL.
#[derive(Debug)]
pub struct Session {
    env: Env,
    config: FormatterConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            config: FormatterConfig::default(),
        }
    }

    pub fn with_formatter(config: FormatterConfig) -> Self {
        Self {
            env: Environment::new(),
            config,
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn run(&mut self, src: &str) -> Response {
        let program = match parse(src) {
            Ok(program) => program,
            Err(response) => return response,
        };

        let value = eval_program(&program, &self.env);

        Response::new(value.value_type().to_string(), value.to_string())
    }

    pub fn reset(&mut self) {
        tracing::debug!("session environment reset");

        self.env = Environment::new();
    }

    pub fn format(&self, src: &str) -> Response {
        match parse(src) {
            Ok(program) => Response::new("FORMATTED", Formatter::new(self.config).format(&program)),
            Err(response) => response,
        }
    }

    pub fn ast(&self, src: &str) -> Response {
        let program = match parse(src) {
            Ok(program) => program,
            Err(response) => return response,
        };

        match serde_json::to_string_pretty(&program) {
            Ok(json) => Response::new("JSON_AST", json),
            Err(err) => Response::new("JSON_ERROR", err.to_string()),
        }
    }
}

fn parse(src: &str) -> Result<Program, Response> {
    let (program, errors) = parse_program(src);

    if errors.is_empty() {
        return Ok(program);
    }

    let messages = errors.iter()
        .map(|error| error.to_string())
        .collect::<Vec<String>>();

    Err(Response::new("PARSER_ERROR", messages.join("\n")))
}
