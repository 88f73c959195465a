use crate::parser::prelude::{
    parse_program, parse_program_from_stream, Expression, InfixOperator, ParseError, ParseErrorType,
    PrefixOperator, Program, Statement,
};
use pretty_assertions::assert_eq;

fn parse(input: &str) -> Result<Program, Vec<ParseError>> {
    let (program, errors) = parse_program(input);

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

fn messages(input: &str) -> Vec<String> {
    let (_, errors) = parse_program(input);

    errors.iter().map(|error| error.to_string()).collect()
}

fn single_expression(program: &Program) -> &Expression {
    assert_eq!(1, program.statements.len(), "{program:?}");

    match &program.statements[0] {
        Statement::Expression(statement) => &statement.expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_let_statements() -> Result<(), Vec<ParseError>> {
    let program = parse("let x = 5;\nlet y = true;\nlet foobar = y;")?;

    let names: Vec<(String, String)> = program.statements.iter()
        .map(|statement| match statement {
            Statement::Let(statement) => (statement.name.value.clone(), statement.value.to_string()),
            other => panic!("expected let statement, got {other:?}"),
        })
        .collect();

    assert_eq!(
        vec![
            ("x".to_string(), "5".to_string()),
            ("y".to_string(), "true".to_string()),
            ("foobar".to_string(), "y".to_string()),
        ],
        names
    );

    Ok(())
}

#[test]
fn test_return_statements() -> Result<(), Vec<ParseError>> {
    let program = parse("return 5; return x + y\nreturn fn(a) { a }")?;

    assert_eq!(3, program.statements.len());
    assert!(program.statements.iter().all(|statement| matches!(statement, Statement::Return(_))));
    assert_eq!("return 5;\nreturn (x + y);\nreturn fn(a) { a };", program.to_string());

    Ok(())
}

#[test]
fn test_operator_precedence() -> Result<(), Vec<ParseError>> {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 <= 4 != 3 >= 4", "((5 <= 4) != (3 >= 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("true != false", "(true != false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        ("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
        ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        ("add(a * b[2], b[1], 2 * [1, 2][1])", "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"),
        ("2 ** 3 ** 2", "(2 ** (3 ** 2))"),
        ("2 * 3 ** 2", "(2 * (3 ** 2))"),
        ("-2 ** 2", "((-2) ** 2)"),
        ("a // b % c", "((a // b) % c)"),
        ("1 << 2 + 3", "(1 << (2 + 3))"),
        ("a ^ b << 1", "(a ^ (b << 1))"),
        ("a < b ^ c", "(a < (b ^ c))"),
        ("a || b && c", "(a || (b && c))"),
        ("a && b == c", "(a && (b == c))"),
        ("x = y || z", "(x = (y || z))"),
        ("x = y = 1", "((x = y) = 1)"),
    ];

    for (input, expected) in cases {
        let program = parse(input)?;

        assert_eq!(expected, program.to_string(), "input {input:?}");
    }

    Ok(())
}

#[test]
fn test_literals() -> Result<(), Vec<ParseError>> {
    let program = parse(r#"5; 010; 2.5; .5; true; "hi\n"; [1, "a"]; ({"k": 1, 2: x})"#)?;

    let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();

    assert_eq!(
        vec!["5", "010", "2.5", ".5", "true", "\"hi\\n\"", "[1, \"a\"]", "{\"k\": 1, 2: x}"],
        rendered
    );

    match &program.statements[1] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::Integer(literal) => assert_eq!(8, literal.value),
            other => panic!("expected integer, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_prefix_and_infix_nodes() -> Result<(), Vec<ParseError>> {
    let program = parse("!true")?;

    match single_expression(&program) {
        Expression::Prefix(prefix) => assert_eq!(PrefixOperator::Bang, prefix.operator),
        other => panic!("expected prefix expression, got {other:?}"),
    }

    let program = parse("a >= b")?;

    match single_expression(&program) {
        Expression::Infix(infix) => {
            assert_eq!(InfixOperator::GreaterThanOrEqual, infix.operator);
            assert_eq!("a", infix.left.to_string());
            assert_eq!("b", infix.right.to_string());
        },
        other => panic!("expected infix expression, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_if_and_while() -> Result<(), Vec<ParseError>> {
    let program = parse("if (x < y) { x } else { y }")?;

    match single_expression(&program) {
        Expression::If(expression) => {
            assert_eq!("(x < y)", expression.condition.to_string());
            assert_eq!(1, expression.consequence.statements.len());
            assert!(expression.alternative.is_some());
        },
        other => panic!("expected if expression, got {other:?}"),
    }

    assert_eq!("if (x < y) { x } else { y }", program.to_string());
    assert_eq!("if x { }", parse("if x {}")?.to_string());
    assert_eq!("while (i > 0) { (i = (i - 1)) }", parse("while (i > 0) { i = i - 1; }")?.to_string());

    Ok(())
}

#[test]
fn test_functions_and_calls() -> Result<(), Vec<ParseError>> {
    let program = parse("fn(x, y) { x + y; }")?;

    match single_expression(&program) {
        Expression::Function(function) => {
            let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();

            assert_eq!(vec!["x", "y"], names);
            assert_eq!("{ (x + y) }", function.body.to_string());
        },
        other => panic!("expected function literal, got {other:?}"),
    }

    assert_eq!("fn() { }", parse("fn() {}")?.to_string());
    assert_eq!("fn(x) { x }(5)", parse("fn(x) { x }(5)")?.to_string());
    assert_eq!("f(g)(h)", parse("f(g)(h)")?.to_string());

    Ok(())
}

#[test]
fn test_blocks_and_blank_lines() -> Result<(), Vec<ParseError>> {
    let program = parse("let a = 1;\n\n{\n  let b = 2;\n\n  b\n}\nlet c = [\n\n1,\n\n2\n\n];")?;

    assert_eq!(4, program.statements.len());
    assert!(matches!(program.statements[1], Statement::Empty(_)));

    match &program.statements[2] {
        Statement::Block(block) => {
            assert_eq!(3, block.statements.len());
            assert!(matches!(block.statements[1], Statement::Empty(_)));
        },
        other => panic!("expected block statement, got {other:?}"),
    }

    assert_eq!("let a = 1;\n{ let b = 2; b }\nlet c = [1, 2];", program.to_string());

    Ok(())
}

#[test]
fn test_error_messages() {
    assert_eq!(vec!["expected next token to be IDENT, got = instead"], messages("let = 5;"));
    assert_eq!(vec!["expected next token to be =, got INT instead"], messages("let x 5;"));
    assert_eq!(vec!["no prefix parse function for ) found"], messages(")"));
    assert_eq!(vec!["no prefix parse function for ILLEGAL found"], messages("a & b"));
    assert_eq!(vec!["expected next token to be ), got EOF instead"], messages("(1 + 2"));
    assert_eq!(vec!["expected next token to be }, got EOF instead"], messages("if (x) { 1"));
    assert_eq!(vec!["could not parse \"09\" as integer"], messages("09"));
    assert_eq!(vec!["could not parse \"99999999999999999999\" as integer"], messages("99999999999999999999"));
}

#[test]
fn test_error_recovery() {
    let (program, errors) = parse_program("let = 1; let x = 2;\nlet y 3;\n\nlet z = 4;");

    assert_eq!(2, errors.len());

    let names: Vec<String> = program.statements.iter()
        .filter_map(|statement| match statement {
            Statement::Let(statement) => Some(statement.name.value.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(vec!["x".to_string(), "z".to_string()], names);

    let (program, errors) = parse_program("let f = fn() { let = 1; };\nlet y = 2;");

    assert_eq!(
        vec!["expected next token to be IDENT, got = instead".to_string()],
        errors.iter().map(|error| error.to_string()).collect::<Vec<_>>()
    );
    assert_eq!("let f = fn() { };\nlet y = 2;", program.to_string());

    let (program, errors) = parse_program("while x { if (y) { let = 1; x }; z = }\nlet w = 1;");

    assert_eq!(
        vec![
            "expected next token to be IDENT, got = instead".to_string(),
            "no prefix parse function for } found".to_string(),
        ],
        errors.iter().map(|error| error.to_string()).collect::<Vec<_>>()
    );
    assert_eq!("while x { if y { x } }\nlet w = 1;", program.to_string());
}

#[test]
fn test_error_spans() {
    let (_, errors) = parse_program("let x = );");

    assert_eq!(1, errors.len());
    assert_eq!(8, errors[0].span.start);
    assert_eq!(9, errors[0].span.end);
    assert!(matches!(errors[0].error, ParseErrorType::NoPrefixParse { .. }));
}

#[test]
fn test_from_stream() {
    let input = "let ü = \"ö\"; ü";
    let (program, errors) = parse_program_from_stream(input.chars());
    let (expected, _) = parse_program(input);

    assert_eq!(expected, program);
    assert_eq!(messages(input), errors.iter().map(|e| e.to_string()).collect::<Vec<_>>());
}

#[test]
fn test_json_shape() -> Result<(), Vec<ParseError>> {
    let program = parse("let y = 10;")?;

    let json = serde_json::to_string_pretty(&program).expect("serializable");

    let expected = r#"{
  "Statements": [
    {
      "Type": "LetStatement",
      "Name": "y",
      "Value": {
        "Type": "IntegerLiteral",
        "Value": 10
      }
    }
  ]
}"#;

    assert_eq!(expected, json);

    Ok(())
}

#[test]
fn test_json_nodes() -> Result<(), Vec<ParseError>> {
    let program = parse("if (!a) { { \"k\" } } \n\nwhile b { return -2.5 }")?;

    let json = serde_json::to_value(&program).expect("serializable");

    let expected = serde_json::json!({
        "Statements": [
            {
                "Type": "ExpressionStatement",
                "Expression": {
                    "Type": "IfExpression",
                    "Condition": {
                        "Type": "PrefixExpression",
                        "Operator": "!",
                        "Right": { "Type": "Identifier", "Value": "a" }
                    },
                    "Consequence": {
                        "Type": "BlockStatement",
                        "Statements": [
                            {
                                "Type": "BlockStatement",
                                "Statements": [
                                    {
                                        "Type": "ExpressionStatement",
                                        "Expression": {
                                            "Type": "StringLiteral",
                                            "Value": "k"
                                        }
                                    }
                                ]
                            }
                        ]
                    },
                    "Alternative": null
                }
            },
            { "Type": "EmptyStatement" },
            {
                "Type": "ExpressionStatement",
                "Expression": {
                    "Type": "WhileExpression",
                    "Condition": { "Type": "Identifier", "Value": "b" },
                    "Body": {
                        "Type": "BlockStatement",
                        "Statements": [
                            {
                                "Type": "ReturnStatement",
                                "ReturnValue": {
                                    "Type": "PrefixExpression",
                                    "Operator": "-",
                                    "Right": { "Type": "FloatLiteral", "Value": 2.5 }
                                }
                            }
                        ]
                    }
                }
            }
        ]
    });

    assert_eq!(expected, json);

    Ok(())
}

#[test]
fn test_json_idempotent() -> Result<(), Vec<ParseError>> {
    let program = parse("let add = fn(a, b) { a + b };\nadd({\"x\": 1}[\"x\"], [2][0]);")?;

    let first = serde_json::to_string(&program).expect("serializable");
    let second = serde_json::to_string(&program.clone()).expect("serializable");

    assert_eq!(first, second);
    assert!(first.starts_with(r#"{"Statements":[{"Type":"LetStatement","Name":"add","Value":{"Type":"FunctionLiteral","Parameters":[{"Type":"Identifier","Value":"a"}"#));

    Ok(())
}
