use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Illegal(String),
    Eof,

    // Identifiers and literals
    Ident(String),
    Int(String),
    Float(String),
    Str(String),

    // Operators
    Assign, // =
    Plus, // +
    Minus, // -
    Bang, // !
    And, // &&
    Or, // ||
    Asterisk, // *
    Slash, // /
    Percent, // %
    DoubleSlash, // //
    Exponent, // **

    LeftShift, // <<
    RightShift, // >>
    BitXor, // ^

    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=
    Equal, // ==
    NotEqual, // !=

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    While,
    Return,

    // Two or more consecutive line breaks
    EmptyLine,
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "fn" => Token::Function,
        "let" => Token::Let,
        "true" => Token::True,
        "false" => Token::False,
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "return" => Token::Return,
        _ => return None,
    })
}

impl Token {
    /// Name of the token kind as it appears in parser diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Illegal(_) => "ILLEGAL",
            Token::Eof => "EOF",
            Token::Ident(_) => "IDENT",
            Token::Int(_) => "INT",
            Token::Float(_) => "FLOAT",
            Token::Str(_) => "STRING",
            Token::Function => "FUNCTION",
            Token::Let => "LET",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::While => "WHILE",
            Token::Return => "RETURN",
            Token::EmptyLine => "EMPTY_LINE",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Bang => "!",
            Token::And => "&&",
            Token::Or => "||",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::DoubleSlash => "//",
            Token::Exponent => "**",
            Token::LeftShift => "<<",
            Token::RightShift => ">>",
            Token::BitXor => "^",
            Token::LessThan => "<",
            Token::LessThanOrEqual => "<=",
            Token::GreaterThan => ">",
            Token::GreaterThanOrEqual => ">=",
            Token::Equal => "==",
            Token::NotEqual => "!=",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Illegal(value)
            | Token::Ident(value)
            | Token::Int(value)
            | Token::Float(value)
            | Token::Str(value) => value.clone(),
            Token::Eof => "".to_string(),
            Token::EmptyLine => "\n".to_string(),
            Token::Function => "fn".to_string(),
            Token::Let => "let".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),
            Token::Return => "return".to_string(),
            token => token.kind_name().to_string(),
        }
    }

    /// Whether both tokens are of the same kind, ignoring any carried text.
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}
