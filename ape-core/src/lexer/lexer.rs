use super::token::{str_to_keyword, Token};
use std::fmt::Display;

pub type Spanned = (u32, Token, u32);

/// Lexes a whole in-memory source string.
pub fn tokenize(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	// Set once a real token was produced, blank lines before it are dropped
	emitted: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,
			emitted: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> Spanned {
		loop {
			let Some(ch) = self.ch else {
				return (self.position, Token::Eof, self.position);
			};

			match ch {
				' ' | '\t' | '\r' => {
					self.next_char();
				}
				'\n' => {
					if let Some(span) = self.lex_blank_lines() {
						return span;
					}
				}
				_ => {
					let span = self.lex_token(ch);
					self.emitted = true;

					return span;
				}
			}
		}
	}

	fn lex_token(&mut self, ch: char) -> Spanned {
		match (ch, self.next_ch) {
			('=', Some('=')) => self.eat_two_chars(Token::Equal),
			('=', _) => self.eat_one_char(Token::Assign),
			('!', Some('=')) => self.eat_two_chars(Token::NotEqual),
			('!', _) => self.eat_one_char(Token::Bang),
			('&', Some('&')) => self.eat_two_chars(Token::And),
			('|', Some('|')) => self.eat_two_chars(Token::Or),
			('*', Some('*')) => self.eat_two_chars(Token::Exponent),
			('*', _) => self.eat_one_char(Token::Asterisk),
			('/', Some('/')) => self.eat_two_chars(Token::DoubleSlash),
			('/', _) => self.eat_one_char(Token::Slash),
			('<', Some('=')) => self.eat_two_chars(Token::LessThanOrEqual),
			('<', Some('<')) => self.eat_two_chars(Token::LeftShift),
			('<', _) => self.eat_one_char(Token::LessThan),
			('>', Some('=')) => self.eat_two_chars(Token::GreaterThanOrEqual),
			('>', Some('>')) => self.eat_two_chars(Token::RightShift),
			('>', _) => self.eat_one_char(Token::GreaterThan),
			('+', _) => self.eat_one_char(Token::Plus),
			('-', _) => self.eat_one_char(Token::Minus),
			('%', _) => self.eat_one_char(Token::Percent),
			('^', _) => self.eat_one_char(Token::BitXor),
			(',', _) => self.eat_one_char(Token::Comma),
			(';', _) => self.eat_one_char(Token::Semicolon),
			(':', _) => self.eat_one_char(Token::Colon),
			('(', _) => self.eat_one_char(Token::LParen),
			(')', _) => self.eat_one_char(Token::RParen),
			('{', _) => self.eat_one_char(Token::LBrace),
			('}', _) => self.eat_one_char(Token::RBrace),
			('[', _) => self.eat_one_char(Token::LBracket),
			(']', _) => self.eat_one_char(Token::RBracket),
			('"', _) => self.lex_string(),
			('a'..='z' | 'A'..='Z' | '_', _) => self.lex_ident(),
			('0'..='9', _) => self.lex_number(),
			('.', Some(next)) if next.is_ascii_digit() => self.lex_number(),
			(c, _) => self.eat_one_char(Token::Illegal(c.to_string())),
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, char::len_utf8) as u32;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	/// Consumes a run of line breaks and the blanks between them. Only a run
	/// holding at least two breaks, sitting between two real tokens, is kept.
	fn lex_blank_lines(&mut self) -> Option<Spanned> {
		let start_pos = self.position;
		let mut breaks = 0;

		while let Some(ch @ ('\n' | ' ' | '\t' | '\r')) = self.ch {
			if ch == '\n' {
				breaks += 1;
			}
			self.next_char();
		}

		let end_pos = self.position;

		if breaks >= 2 && self.emitted && self.ch.is_some() {
			Some((start_pos, Token::EmptyLine, end_pos))
		} else {
			None
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphabetic() || ch == '_') {
				break;
			}
			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos),
		}
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		self.eat_digits(&mut value);

		let token = if self.ch == Some('.') {
			value.push('.');
			self.next_char();
			self.eat_digits(&mut value);

			Token::Float(value)
		} else {
			Token::Int(value)
		};

		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}
			value.push(ch);
			self.next_char();
		}
	}

	fn lex_string(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch {
				None => break,
				Some('"') => {
					self.next_char();
					break;
				}
				Some('\\') => {
					self.next_char();

					match self.ch {
						Some('n') => value.push('\n'),
						Some('t') => value.push('\t'),
						Some('"') => value.push('"'),
						Some('\\') => value.push('\\'),
						Some(other) => {
							value.push('\\');
							value.push(other);
						}
						None => {
							value.push('\\');
							break;
						}
					}

					self.next_char();
				}
				Some(ch) => {
					value.push(ch);
					self.next_char();
				}
			}
		}

		let end_pos = self.position;

		(start_pos, Token::Str(value), end_pos)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}
