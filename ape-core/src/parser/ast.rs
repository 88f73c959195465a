use std::{fmt::Display, rc::Rc};

use serde::{Serialize, Serializer};

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::{parse_integer, SrcSpan},
};

/// Writes a string literal back in source form, quotes and escapes included.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }

    out.push('"');
    out
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items.iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(separator)
}

// program -> { <statement> }
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Program {
    pub statements: Vec<Statement>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_token.0;
        let mut statements = vec![];

        loop {
            match parser.current_token.1 {
                Token::Eof => break,
                Token::Semicolon => parser.step(),
                _ => match Statement::parse(parser, None) {
                    Ok(statement) => statements.push(statement),
                    Err(error) => {
                        parser.record(error);
                        parser.synchronize(false);
                    }
                }
            }
        }

        let end = parser.current_token.2;

        Ok(Self {
            statements,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .filter(|statement| !matches!(statement, Statement::Empty(_)))
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <let> | <return> | <block> | <expression> | EMPTY_LINE
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Empty(EmptyStatement),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let statement = match parser.current_token.1 {
            Token::EmptyLine => {
                let (start, _, end) = parser.next_token();

                Self::Empty(EmptyStatement { location: SrcSpan::from(start, end) })
            },
            Token::Let => Self::Let(LetStatement::parse(parser, None)?),
            Token::Return => Self::Return(ReturnStatement::parse(parser, None)?),
            Token::LBrace => Self::Block(BlockStatement::parse(parser, None)?),
            _ => Self::Expression(ExpressionStatement::parse(parser, None)?),
        };

        Ok(statement)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Block(statement) => write!(f, "{statement}"),
            Self::Empty(_) => Ok(()),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Let(statement) => statement.location,
            Self::Return(statement) => statement.location,
            Self::Expression(statement) => statement.location,
            Self::Block(statement) => statement.location,
            Self::Empty(statement) => statement.location,
        }
    }
}

fn serialize_name<S: Serializer>(name: &Identifier, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&name.value)
}

// let -> let <identifier> = <expression> [;]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct LetStatement {
    #[serde(serialize_with = "serialize_name")]
    pub name: Identifier,
    pub value: Expression,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for LetStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Let)?;
        let name = parser.expect_ident()?;
        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        parser.skip_optional(&Token::Semicolon);

        Ok(Self {
            name,
            value,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

// return -> return <expression> [;]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct ReturnStatement {
    pub return_value: Expression,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ReturnStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Return)?;

        let return_value = Expression::parse(parser, None)?;
        let end = return_value.location().end;

        parser.skip_optional(&Token::Semicolon);

        Ok(Self {
            return_value,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.return_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct ExpressionStatement {
    pub expression: Expression,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;
        let location = expression.location();

        parser.skip_optional(&Token::Semicolon);

        Ok(Self {
            expression,
            location
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

// block -> "{" { <statement> } "}"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for BlockStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;
        let mut statements = vec![];

        loop {
            match parser.current_token.1 {
                Token::RBrace | Token::Eof => break,
                Token::Semicolon => parser.step(),
                _ => match Statement::parse(parser, None) {
                    Ok(statement) => statements.push(statement),
                    Err(error) => {
                        parser.record(error);
                        parser.synchronize(true);
                    }
                },
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .filter(|statement| !matches!(statement, Statement::Empty(_)))
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        if statements.is_empty() {
            write!(f, "{{ }}")
        } else {
            write!(f, "{{ {} }}", statements.join(" "))
        }
    }
}

/// A blank line kept for the formatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type")]
pub struct EmptyStatement {
    #[serde(skip)]
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Boolean(Boolean),
    String(StringLiteral),
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    While(WhileExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Index(IndexExpression),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.skip_empty_lines();

        let mut expr = match &parser.current_token.1 {
            Token::Ident(_) => Self::Identifier(parser.expect_ident()?),
            Token::Int(_) => Self::Integer(IntegerLiteral::parse(parser, None)?),
            Token::Float(_) => Self::Float(FloatLiteral::parse(parser, None)?),
            Token::True | Token::False => Self::Boolean(Boolean::parse(parser, None)?),
            Token::Str(_) => Self::String(StringLiteral::parse(parser, None)?),
            Token::Bang | Token::Minus => Self::Prefix(PrefixExpression::parse(parser, None)?),
            Token::LBracket => Self::Array(ArrayLiteral::parse(parser, None)?),
            Token::LBrace => Self::Hash(HashLiteral::parse(parser, None)?),
            Token::If => Self::If(IfExpression::parse(parser, None)?),
            Token::While => Self::While(WhileExpression::parse(parser, None)?),
            Token::Function => Self::Function(FunctionLiteral::parse(parser, None)?),
            Token::LParen => {
                parser.step();

                let expression = Expression::parse(parser, None)?;

                parser.skip_empty_lines();
                parser.expect_one(Token::RParen)?;

                expression
            },
            token => return parse_error(
                ParseErrorType::NoPrefixParse {
                    token: token.kind_name().to_string()
                },
                parser.current_span()
            )
        };

        let precedence = precedence.unwrap_or(Precedence::Lowest);

        while precedence < parser.current_precedence() {
            expr = match parser.current_token.1 {
                Token::LParen => Self::Call(CallExpression::parse(parser, expr, None)?),
                Token::LBracket => Self::Index(IndexExpression::parse(parser, expr, None)?),
                _ => Self::Infix(InfixExpression::parse(parser, expr, None)?),
            };
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(expr) => write!(f, "{expr}"),
            Self::Integer(expr) => write!(f, "{expr}"),
            Self::Float(expr) => write!(f, "{expr}"),
            Self::Boolean(expr) => write!(f, "{expr}"),
            Self::String(expr) => write!(f, "{expr}"),
            Self::Array(expr) => write!(f, "{expr}"),
            Self::Hash(expr) => write!(f, "{expr}"),
            Self::Prefix(expr) => write!(f, "{expr}"),
            Self::Infix(expr) => write!(f, "{expr}"),
            Self::If(expr) => write!(f, "{expr}"),
            Self::While(expr) => write!(f, "{expr}"),
            Self::Function(expr) => write!(f, "{expr}"),
            Self::Call(expr) => write!(f, "{expr}"),
            Self::Index(expr) => write!(f, "{expr}"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(expr) => expr.location,
            Self::Integer(expr) => expr.location,
            Self::Float(expr) => expr.location,
            Self::Boolean(expr) => expr.location,
            Self::String(expr) => expr.location,
            Self::Array(expr) => expr.location,
            Self::Hash(expr) => expr.location,
            Self::Prefix(expr) => expr.location,
            Self::Infix(expr) => expr.location,
            Self::If(expr) => expr.location,
            Self::While(expr) => expr.location,
            Self::Function(expr) => expr.location,
            Self::Call(expr) => expr.location,
            Self::Index(expr) => expr.location,
        }
    }
}

// identifier -> (<letter> | _) { <letter> | _ }
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct Identifier {
    pub value: String,
    #[serde(skip)]
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct IntegerLiteral {
    pub value: i64,
    #[serde(skip)]
    pub literal: String,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IntegerLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();
        let literal = token.as_literal();
        let location = SrcSpan::from(start, end);

        match parse_integer(&literal) {
            Some(value) => Ok(Self { value, literal, location }),
            None => parse_error(ParseErrorType::InvalidInteger { literal }, location)
        }
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct FloatLiteral {
    pub value: f64,
    #[serde(skip)]
    pub literal: String,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FloatLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();
        let literal = token.as_literal();
        let location = SrcSpan::from(start, end);

        match literal.parse::<f64>() {
            Ok(value) => Ok(Self { value, literal, location }),
            Err(_) => parse_error(ParseErrorType::InvalidFloat { literal }, location)
        }
    }
}

impl Display for FloatLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct Boolean {
    pub value: bool,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Boolean {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();

        Ok(Self {
            value: token == Token::True,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for Boolean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct StringLiteral {
    pub value: String,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for StringLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();

        Ok(Self {
            value: token.as_literal(),
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", quote(&self.value))
    }
}

// array -> "[" [ <expression> { , <expression> } ] "]"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ArrayLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBracket)?;
        let (elements, end) = parser.parse_list(Token::RBracket, |parser| Expression::parse(parser, None))?;

        Ok(Self {
            elements,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", join(&self.elements, ", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HashLiteralPair {
    pub key: Expression,
    pub value: Expression,
}

impl Display for HashLiteralPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

// hash -> "{" [ <expression> : <expression> { , <expression> : <expression> } ] "}"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct HashLiteral {
    pub pairs: Vec<HashLiteralPair>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for HashLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;
        let (pairs, end) = parser.parse_list(Token::RBrace, |parser| {
            let key = Expression::parse(parser, None)?;

            parser.skip_empty_lines();
            parser.expect_one(Token::Colon)?;

            let value = Expression::parse(parser, None)?;

            Ok(HashLiteralPair { key, value })
        })?;

        Ok(Self {
            pairs,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", join(&self.pairs, ", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Bang,
}

impl PrefixOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Minus => Some(Self::Minus),
            Token::Bang => Some(Self::Bang),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Bang => "!",
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// prefix -> ( - | ! ) <expression>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct PrefixExpression {
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for PrefixExpression {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();

        let Some(operator) = PrefixOperator::from_token(&token) else {
            return parse_error(
                ParseErrorType::NoPrefixParse { token: token.kind_name().to_string() },
                SrcSpan::from(start, end)
            );
        };

        let right = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = right.location().end;

        Ok(Self {
            operator,
            right: Box::new(right),
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "<<")]
    LeftShift,
    #[serde(rename = ">>")]
    RightShift,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Asterisk,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "//")]
    DoubleSlash,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "**")]
    Exponent,
}

impl InfixOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Assign => Self::Assign,
            Token::Or => Self::Or,
            Token::And => Self::And,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::LessThan => Self::LessThan,
            Token::LessThanOrEqual => Self::LessThanOrEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::GreaterThanOrEqual => Self::GreaterThanOrEqual,
            Token::BitXor => Self::BitXor,
            Token::LeftShift => Self::LeftShift,
            Token::RightShift => Self::RightShift,
            Token::Plus => Self::Plus,
            Token::Minus => Self::Minus,
            Token::Asterisk => Self::Asterisk,
            Token::Slash => Self::Slash,
            Token::DoubleSlash => Self::DoubleSlash,
            Token::Percent => Self::Percent,
            Token::Exponent => Self::Exponent,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::DoubleSlash => "//",
            Self::Percent => "%",
            Self::Exponent => "**",
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Assign => Precedence::Assign,
            Self::Or => Precedence::LogicalOr,
            Self::And => Precedence::LogicalAnd,
            Self::Equal | Self::NotEqual => Precedence::Equals,
            Self::LessThan | Self::LessThanOrEqual |
            Self::GreaterThan | Self::GreaterThanOrEqual => Precedence::LessGreater,
            Self::BitXor => Precedence::BitXor,
            Self::LeftShift | Self::RightShift => Precedence::Shift,
            Self::Plus | Self::Minus => Precedence::Sum,
            Self::Asterisk | Self::Slash | Self::DoubleSlash | Self::Percent => Precedence::Product,
            Self::Exponent => Precedence::Exponent,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Self::Exponent)
    }

    /// Precedence the right operand is parsed with. One level lower for
    /// right-associative operators so that an equal operator binds to the right.
    pub fn right_precedence(&self) -> Precedence {
        if self.is_right_associative() {
            Precedence::Product
        } else {
            self.precedence()
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for InfixExpression {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, token, end) = parser.next_token();

        let Some(operator) = InfixOperator::from_token(&token) else {
            return parse_error(
                ParseErrorType::UnexpectedToken {
                    expected: "operator".to_string(),
                    found: token.kind_name().to_string(),
                },
                SrcSpan::from(start, end)
            );
        };

        let right = Expression::parse(parser, Some(operator.right_precedence()))?;
        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

// if -> if <expression> <block> [ else <block> ]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IfExpression {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        let condition = Expression::parse(parser, None)?;
        let consequence = BlockStatement::parse(parser, None)?;
        let mut end = consequence.location.end;

        let alternative = if parser.current_is(&Token::Else) {
            parser.step();

            let alternative = BlockStatement::parse(parser, None)?;
            end = alternative.location.end;

            Some(alternative)
        } else {
            None
        };

        Ok(Self {
            condition: Box::new(condition),
            consequence,
            alternative,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// while -> while <expression> <block>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct WhileExpression {
    pub condition: Box<Expression>,
    pub body: BlockStatement,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for WhileExpression {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let condition = Expression::parse(parser, None)?;
        let body = BlockStatement::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            condition: Box::new(condition),
            body,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for WhileExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} {}", self.condition, self.body)
    }
}

// function -> fn "(" [ <identifier> { , <identifier> } ] ")" <block>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct FunctionLiteral {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Function)?;
        parser.expect_one(Token::LParen)?;

        let (parameters, _) = parser.parse_list(Token::RParen, |parser| parser.expect_ident())?;
        let body = BlockStatement::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            parameters: parameters.into(),
            body: Rc::new(body),
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn({}) {}", join(&self.parameters, ", "), self.body)
    }
}

// call -> <expression> "(" [ <expression> { , <expression> } ] ")"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for CallExpression {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LParen)?;

        let (arguments, end) = parser.parse_list(Token::RParen, |parser| Expression::parse(parser, None))?;
        let start = left.location().start;

        Ok(Self {
            function: Box::new(left),
            arguments,
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.function, join(&self.arguments, ", "))
    }
}

// index -> <expression> "[" <expression> "]"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
    #[serde(skip)]
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for IndexExpression {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LBracket)?;

        let index = Expression::parse(parser, None)?;

        parser.skip_empty_lines();
        let (_, end) = parser.expect_one(Token::RBracket)?;
        let start = left.location().start;

        Ok(Self {
            left: Box::new(left),
            index: Box::new(index),
            location: SrcSpan::from(start, end)
        })
    }
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}
