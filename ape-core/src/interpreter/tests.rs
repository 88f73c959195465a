use std::path::PathBuf;

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::Value,
    utils::prelude::Error,
};

use super::{parse_file, parse_source, run, run_file, prelude::{Response, Session}};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ape-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp source");
    path
}

#[test]
fn test_parse_source() -> Result<(), Error> {
    let file = parse_source(PathBuf::from("main.ape"), "let a = 1; a".to_string())?;

    assert_eq!(2, file.program.statements.len());
    assert_eq!(Value::Integer { value: 1 }, run(&file)?);

    let result = parse_source(PathBuf::from("main.ape"), "let = 1;".to_string());
    let Err(Error::Parse { errors, .. }) = result else {
        panic!("expected a parse error, got {result:?}");
    };
    assert_eq!(1, errors.len());

    Ok(())
}

#[test]
fn test_run_file() -> Result<(), Error> {
    let path = temp_file("run.ape", "let square = fn(x) { x * x };\n\nsquare(äö_len())");
    let result = run_file(path.clone());
    assert!(matches!(result, Err(Error::Parse { .. })), "got {result:?}");

    std::fs::write(&path, "let square = fn(x) { x * x };\n\nlet s = \"äö\";\nsquare(len(s) + 1)")
        .expect("write temp source");

    let file = parse_file(path.clone())?;
    assert!(file.src.contains("äö"));
    assert_eq!(Value::Integer { value: 9 }, run(&file)?);

    let _ = std::fs::remove_file(path);

    Ok(())
}

#[test]
fn test_runtime_error() {
    let path = temp_file("runtime.ape", "let a = 1;\na + true");

    let result = run_file(path.clone());

    assert_eq!(
        Err(Error::Runtime {
            path: path.clone(),
            message: "type mismatch: INTEGER + BOOLEAN".to_string(),
        }),
        result
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_file() {
    let result = run_file(PathBuf::from("/definitely/not/here.ape"));

    assert_eq!(Err(Error::StdIo { err: std::io::ErrorKind::NotFound }), result);
}

#[test]
fn test_parse_error_spans_from_stream() {
    let path = temp_file("spans.ape", "let a = \"ä\";\nlet = 2;");

    let Err(Error::Parse { errors, src, .. }) = parse_file(path.clone()) else {
        panic!("expected a parse error");
    };

    assert_eq!(1, errors.len());
    assert_eq!(18, errors[0].span.start);
    assert_eq!("=", &src[errors[0].span.start as usize..errors[0].span.end as usize]);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_session_run() {
    let mut session = Session::new();

    assert_eq!(Response { kind: "NULL".into(), value: "null".into() }, session.run("let a = 2;"));
    assert_eq!(Response { kind: "INTEGER".into(), value: "4".into() }, session.run("a * 2"));
    assert_eq!(Response { kind: "STRING".into(), value: "ab".into() }, session.run("\"a\" + \"b\""));
    assert_eq!(Response { kind: "ARRAY".into(), value: "[1, a]".into() }, session.run("[1, \"a\"]"));
    assert_eq!(
        Response { kind: "ERROR".into(), value: "ERROR: identifier not found: b".into() },
        session.run("b")
    );

    session.reset();

    assert_eq!(
        Response { kind: "ERROR".into(), value: "ERROR: identifier not found: a".into() },
        session.run("a")
    );
}

#[test]
fn test_session_parser_errors() {
    let mut session = Session::new();

    assert_eq!(
        Response {
            kind: "PARSER_ERROR".into(),
            value: "expected next token to be IDENT, got = instead\nexpected next token to be =, got INT instead".into(),
        },
        session.run("let = 5; let x 5;")
    );
    assert_eq!("PARSER_ERROR", session.format("let = 5;").kind);
    assert_eq!("PARSER_ERROR", session.ast("let = 5;").kind);
}

#[test]
fn test_session_format_and_ast() {
    let session = Session::new();

    assert_eq!(
        Response { kind: "FORMATTED".into(), value: "let x = 1 + 2;\n".into() },
        session.format("let x=1+2")
    );

    let response = session.ast("x");
    assert_eq!("JSON_AST", response.kind);
    assert_eq!(
        "{\n  \"Statements\": [\n    {\n      \"Type\": \"ExpressionStatement\",\n      \"Expression\": {\n        \"Type\": \"Identifier\",\n        \"Value\": \"x\"\n      }\n    }\n  ]\n}",
        response.value
    );
}

#[test]
fn test_response_json() -> Result<(), serde_json::Error> {
    let response = Response { kind: "INTEGER".into(), value: "3".into() };

    assert_eq!(r#"{"type":"INTEGER","value":"3"}"#, serde_json::to_string(&response)?);

    Ok(())
}
