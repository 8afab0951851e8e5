use std::fmt::{self, Display};

use anyhow::{bail, ensure, Context, Result};

#[derive(PartialEq, Debug)]
pub enum Token<'a> {
    LSquare,
    RSquare,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Bang,
    /// A line break after a token that can end a Go statement, where Go would insert a `;`.
    Semi,
    /// Anything that starts like a number. Whether it really is one is up to `literal`.
    Int(&'a str),
    /// A quoted string, delimiters included.
    String(&'a str),
    Identifier(&'a str),
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LSquare => write!(f, "["),
            Token::RSquare => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Bang => write!(f, "!"),
            Token::Semi => write!(f, "newline"),
            Token::Int(s) | Token::String(s) | Token::Identifier(s) => write!(f, "{s}"),
        }
    }
}

pub struct Tokens<'a> {
    input: &'a str,
    i: usize,
    /// Whether a newline right now would end the statement.
    semi: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokens {
            input,
            i: 0,
            semi: false,
        }
    }

    fn punctuation(&mut self, c: u8, token: Token<'a>) -> Result<Token<'a>> {
        self.consume(c)?;
        Ok(token)
    }

    fn int(&mut self) -> Result<Token<'a>> {
        let start = self.i;
        if self.peek()? == b'-' {
            self.next()?;
        }
        ensure!(
            self.peek().is_ok_and(|c| c.is_ascii_digit()),
            "lexer: expected a digit at {}",
            self.i
        );
        while !self.is_eof() && is_number_continue(self.peek()?) {
            self.next()?;
        }
        Ok(Token::Int(&self.input[start..self.i]))
    }

    fn identifier(&mut self) -> Result<Token<'a>> {
        let start = self.i;
        while !self.is_eof() && is_identifier_continue(self.peek()?) {
            self.next()?;
        }
        Ok(Token::Identifier(&self.input[start..self.i]))
    }

    fn string(&mut self) -> Result<Token<'a>> {
        let start = self.i;
        self.consume(b'"')?;
        loop {
            match self.next()? {
                b'"' => break,
                b'\\' => {
                    self.next()?;
                }
                b'\n' => bail!("lexer: newline in string"),
                _ => (),
            }
        }
        Ok(Token::String(&self.input[start..self.i]))
    }

    fn raw_string(&mut self) -> Result<Token<'a>> {
        let start = self.i;
        self.consume(b'`')?;
        while self.next()? != b'`' {}
        Ok(Token::String(&self.input[start..self.i]))
    }

    /// Skips whitespace and comments, returning whether a line break was among them.
    fn consume_whitespace(&mut self) -> Result<bool> {
        let mut newline = false;
        while !self.is_eof() {
            match self.peek()? {
                b'/' if self.peek_second() == Some(b'/') => {
                    while !self.is_eof() && self.next()? != b'\n' {}
                    newline = true;
                }
                b'/' if self.peek_second() == Some(b'*') => {
                    self.i += 2;
                    while !self.input.as_bytes()[self.i..].starts_with(b"*/") {
                        newline |= self.next().context("lexer: unterminated comment")? == b'\n';
                    }
                    self.i += 2;
                }
                c if c.is_ascii_whitespace() => {
                    newline |= self.next()? == b'\n';
                }
                _ => break,
            }
        }
        Ok(newline)
    }

    fn is_eof(&self) -> bool {
        self.input.as_bytes().get(self.i).is_none()
    }

    fn peek(&self) -> Result<u8> {
        self.input
            .as_bytes()
            .get(self.i)
            .copied()
            .context("lexer: EOF")
    }

    fn peek_second(&self) -> Option<u8> {
        self.input.as_bytes().get(self.i + 1).copied()
    }

    fn next(&mut self) -> Result<u8> {
        let c = self.peek()?;
        self.i += 1;
        Ok(c)
    }

    fn consume(&mut self, expected: u8) -> Result<()> {
        let c = self.next()?;
        ensure!(c == expected, "lexer: expected {expected} but got {c}");
        Ok(())
    }
}

fn is_number_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
}

fn is_identifier_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Result<Token<'a>>> {
        let newline = match self.consume_whitespace() {
            Ok(newline) => newline,
            Err(err) => return Some(Err(err)),
        };

        if self.is_eof() {
            return None;
        }

        if newline && self.semi {
            self.semi = false;
            return Some(Ok(Token::Semi));
        }

        let token = self.peek().and_then(|c| match c {
            b'[' => self.punctuation(c, Token::LSquare),
            b']' => self.punctuation(c, Token::RSquare),
            b'{' => self.punctuation(c, Token::LBrace),
            b'}' => self.punctuation(c, Token::RBrace),
            b'(' => self.punctuation(c, Token::LParen),
            b')' => self.punctuation(c, Token::RParen),
            b',' => self.punctuation(c, Token::Comma),
            b'!' => self.punctuation(c, Token::Bang),
            b'"' => self.string(),
            b'`' => self.raw_string(),
            b'-' | b'0'..=b'9' => self.int(),
            c if c.is_ascii_alphabetic() || c == b'_' => self.identifier(),
            c => bail!("lexer: unexpected {:?} at {}", char::from(c), self.i),
        });
        if let Ok(token) = &token {
            self.semi = matches!(
                token,
                Token::Int(_)
                    | Token::String(_)
                    | Token::Identifier(_)
                    | Token::RSquare
                    | Token::RBrace
                    | Token::RParen
            );
        }
        Some(token)
    }
}
