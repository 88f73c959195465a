use super::prelude::{tokenize, Token};
use pretty_assertions::assert_eq;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = tokenize(input);
    let mut tokens = vec![];

    loop {
        let (_, token, _) = lexer.next_token();
        if token == Token::Eof {
            break;
        }
        tokens.push(token);
    }

    tokens
}

fn ident(name: &str) -> Token {
    Token::Ident(name.to_string())
}

fn int(literal: &str) -> Token {
    Token::Int(literal.to_string())
}

#[test]
fn test_operators() {
    let input = "= == ! != + - * ** / // % < <= << > >= >> ^ && || , ; : ( ) { } [ ]";

    let expected = vec![
        Token::Assign,
        Token::Equal,
        Token::Bang,
        Token::NotEqual,
        Token::Plus,
        Token::Minus,
        Token::Asterisk,
        Token::Exponent,
        Token::Slash,
        Token::DoubleSlash,
        Token::Percent,
        Token::LessThan,
        Token::LessThanOrEqual,
        Token::LeftShift,
        Token::GreaterThan,
        Token::GreaterThanOrEqual,
        Token::RightShift,
        Token::BitXor,
        Token::And,
        Token::Or,
        Token::Comma,
        Token::Semicolon,
        Token::Colon,
        Token::LParen,
        Token::RParen,
        Token::LBrace,
        Token::RBrace,
        Token::LBracket,
        Token::RBracket,
    ];

    assert_eq!(expected, tokens(input));
}

#[test]
fn test_program() {
    let input = r#"
        let five = 5;
        let add = fn(x, y) {
            x + y;
        };
        let result = add(five, 10);
        if (5 < 10) { return true; } else { return false; }
        while (i >= 0) { i = i - 1 }
        {"one": 1}
    "#;

    let expected = vec![
        Token::Let,
        ident("five"),
        Token::Assign,
        int("5"),
        Token::Semicolon,
        Token::Let,
        ident("add"),
        Token::Assign,
        Token::Function,
        Token::LParen,
        ident("x"),
        Token::Comma,
        ident("y"),
        Token::RParen,
        Token::LBrace,
        ident("x"),
        Token::Plus,
        ident("y"),
        Token::Semicolon,
        Token::RBrace,
        Token::Semicolon,
        Token::Let,
        ident("result"),
        Token::Assign,
        ident("add"),
        Token::LParen,
        ident("five"),
        Token::Comma,
        int("10"),
        Token::RParen,
        Token::Semicolon,
        Token::If,
        Token::LParen,
        int("5"),
        Token::LessThan,
        int("10"),
        Token::RParen,
        Token::LBrace,
        Token::Return,
        Token::True,
        Token::Semicolon,
        Token::RBrace,
        Token::Else,
        Token::LBrace,
        Token::Return,
        Token::False,
        Token::Semicolon,
        Token::RBrace,
        Token::While,
        Token::LParen,
        ident("i"),
        Token::GreaterThanOrEqual,
        int("0"),
        Token::RParen,
        Token::LBrace,
        ident("i"),
        Token::Assign,
        ident("i"),
        Token::Minus,
        int("1"),
        Token::RBrace,
        Token::LBrace,
        Token::Str("one".to_string()),
        Token::Colon,
        int("1"),
        Token::RBrace,
    ];

    assert_eq!(expected, tokens(input));
}

#[test]
fn test_numbers() {
    let expected = vec![
        int("10"),
        int("010"),
        Token::Float("1.5".to_string()),
        Token::Float(".25".to_string()),
        Token::Float("3.".to_string()),
        Token::Float("1.2".to_string()),
        Token::Float(".3".to_string()),
    ];

    assert_eq!(expected, tokens("10 010 1.5 .25 3. 1.2.3"));
}

#[test]
fn test_identifiers() {
    let expected = vec![
        ident("snake_case"),
        ident("_"),
        ident("x"),
        int("1"),
        Token::Function,
        ident("fns"),
    ];

    assert_eq!(expected, tokens("snake_case _ x1 fn fns"));
}

#[test]
fn test_strings() {
    let expected = vec![
        Token::Str("foo bar".to_string()),
        Token::Str("line\nnext\ttab \"quoted\" back\\slash".to_string()),
        Token::Str("keep \\q as is".to_string()),
        Token::Str("unicode ✓".to_string()),
        Token::Str("unterminated".to_string()),
    ];

    let input = r#""foo bar" "line\nnext\ttab \"quoted\" back\\slash" "keep \q as is" "unicode ✓" "unterminated"#;

    assert_eq!(expected, tokens(input));
}

#[test]
fn test_illegal() {
    let expected = vec![
        ident("a"),
        Token::Illegal("&".to_string()),
        ident("b"),
        Token::Illegal("|".to_string()),
        ident("c"),
        Token::Illegal("@".to_string()),
        Token::Illegal("#".to_string()),
    ];

    assert_eq!(expected, tokens("a & b | c @#"));
}

#[test]
fn test_blank_lines() {
    let input = "\n\n\nlet a = 1;\n\n  \n\nlet b = 2;\nlet c = 3;\n\n\n";

    let expected = vec![
        Token::Let,
        ident("a"),
        Token::Assign,
        int("1"),
        Token::Semicolon,
        Token::EmptyLine,
        Token::Let,
        ident("b"),
        Token::Assign,
        int("2"),
        Token::Semicolon,
        Token::Let,
        ident("c"),
        Token::Assign,
        int("3"),
        Token::Semicolon,
    ];

    assert_eq!(expected, tokens(input));
}

#[test]
fn test_eof_repeats() {
    let mut lexer = tokenize("x");

    assert_eq!(Some((0, ident("x"), 1)), lexer.next());
    assert_eq!(Some((1, Token::Eof, 1)), lexer.next());
    assert_eq!(Some((1, Token::Eof, 1)), lexer.next());
}

#[test]
fn test_spans() {
    let spans: Vec<(u32, u32)> = tokenize("let ä = \"ö\";")
        .take(5)
        .map(|(start, _, end)| (start, end))
        .collect();

    assert_eq!(vec![(0, 3), (4, 6), (7, 8), (9, 13), (13, 14)], spans);
}
