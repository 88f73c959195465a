use crate::{lexer::prelude::{tokenize, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Identifier, Program};

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Spanned,
    pub next_token: Spanned,
    pub errors: Vec<ParseError>,

    tokens: T,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: (0, Token::Eof, 0),
            next_token: (0, Token::Eof, 0),
            errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Advances by one token and returns the one that was current.
    pub fn next_token(&mut self) -> Spanned {
        let end = self.next_token.2;
        let next = self.tokens.next().unwrap_or((end, Token::Eof, end));

        std::mem::replace(&mut self.current_token, std::mem::replace(&mut self.next_token, next))
    }

    pub fn current_is(&self, token: &Token) -> bool {
        self.current_token.1.same_kind(token)
    }

    pub fn current_span(&self) -> SrcSpan {
        SrcSpan::from(self.current_token.0, self.current_token.2)
    }

    pub fn skip_empty_lines(&mut self) {
        while self.current_is(&Token::EmptyLine) {
            self.step();
        }
    }

    pub fn skip_optional(&mut self, token: &Token) {
        if self.current_is(token) {
            self.step();
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token.1)
    }

    pub fn parse(&mut self) -> Program {
        // Program recovers from its statements' errors by itself
        match Program::parse(self, None) {
            Ok(program) => program,
            Err(error) => {
                self.record(error);
                Program::default()
            }
        }
    }

    pub fn record(&mut self, error: ParseError) {
        tracing::debug!(span = %error.span, "parse error: {}", error.error);

        self.errors.push(error);
    }

    /// Skips the rest of a broken statement: everything up to and including
    /// the next `;`, or up to a blank line or the end of input. Braces opened
    /// while skipping are skipped as a whole. Inside a block the closing `}`
    /// is left for the block to consume.
    pub fn synchronize(&mut self, in_block: bool) {
        let mut depth = 0usize;

        loop {
            match self.current_token.1 {
                Token::Eof => break,
                Token::EmptyLine | Token::Semicolon if depth > 0 => self.step(),
                Token::EmptyLine => break,
                Token::Semicolon => {
                    self.step();
                    break;
                },
                Token::LBrace => {
                    depth += 1;
                    self.step();
                },
                Token::RBrace if depth > 0 => {
                    depth -= 1;
                    self.step();
                },
                Token::RBrace if in_block => break,
                _ => self.step(),
            }
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        if self.current_is(&token) {
            let (start, _, end) = self.next_token();

            return Ok((start, end));
        }

        parse_error(
            ParseErrorType::UnexpectedToken {
                expected: token.kind_name().to_string(),
                found: self.current_token.1.kind_name().to_string(),
            },
            self.current_span()
        )
    }

    pub fn expect_ident(&mut self) -> Result<Identifier, ParseError> {
        match self.current_token.clone() {
            (start, Token::Ident(value), end) => {
                self.step();

                Ok(Identifier {
                    value,
                    location: SrcSpan::from(start, end),
                })
            },
            (start, token, end) => parse_error(
                ParseErrorType::UnexpectedToken {
                    expected: Token::Ident(String::new()).kind_name().to_string(),
                    found: token.kind_name().to_string(),
                },
                SrcSpan::from(start, end)
            )
        }
    }

    /// Parses `item (, item)*` up to the closing token, which is consumed.
    /// Blank lines between items are ignored.
    pub fn parse_list<I>(
        &mut self,
        end: Token,
        mut item: impl FnMut(&mut Self) -> Result<I, ParseError>
    ) -> Result<(Vec<I>, u32), ParseError> {
        let mut items = vec![];

        self.skip_empty_lines();

        if self.current_is(&end) {
            let (_, close) = self.expect_one(end)?;

            return Ok((items, close));
        }

        items.push(item(self)?);
        self.skip_empty_lines();

        while self.current_is(&Token::Comma) {
            self.step();
            self.skip_empty_lines();
            items.push(item(self)?);
            self.skip_empty_lines();
        }

        let (_, close) = self.expect_one(end)?;

        Ok((items, close))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assign,
    LogicalOr,
    LogicalAnd,
    Equals,
    LessGreater,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Sum,
    Product,
    Exponent,
    Prefix,
    Call
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Assign => Self::Assign,
            Token::Or => Self::LogicalOr,
            Token::And => Self::LogicalAnd,
            Token::Equal | Token::NotEqual => Self::Equals,
            Token::LessThan | Token::GreaterThan |
            Token::LessThanOrEqual | Token::GreaterThanOrEqual => Self::LessGreater,
            Token::BitXor => Self::BitXor,
            Token::LeftShift | Token::RightShift => Self::Shift,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Asterisk | Token::Slash | Token::DoubleSlash | Token::Percent => Self::Product,
            Token::Exponent => Self::Exponent,
            Token::LParen | Token::LBracket => Self::Call,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_program(src: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(tokenize(src));
    let program = parser.parse();

    (program, parser.errors)
}

pub fn parse_program_from_stream(stream: impl Iterator<Item = char>) -> (Program, Vec<ParseError>) {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);
    let program = parser.parse();

    (program, parser.errors)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
