use std::{iter::Peekable, str};

use anyhow::{anyhow, bail, ensure, Context, Result};
use tracing::debug;

use crate::{
    literal::{self, Byte},
    tokens::{Token, Tokens},
    Error, Syntax,
};

const TRIM: &[u8] = b" \t\n;";
const FIXTURE_HEADER: &[u8] = b"go test fuzz v1\n";

/// Recovers the bytes behind a `[]byte{...}`, `[]byte("...")` or `vec![...]` literal, optionally
/// preceded by a Go fuzz fixture header. Fails with [`Error::Parse`] on anything else.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    let input = trim(input);
    let input = input.strip_prefix(FIXTURE_HEADER).unwrap_or(input);

    str::from_utf8(input)
        .context("input is not UTF-8")
        .and_then(|text| {
            let syntax = Syntax::detect(text);
            debug!(?syntax, "decoding");
            let mut tokens = Tokens::new(text).peekable();
            let bytes = match syntax {
                Syntax::Go => parse_go(&mut tokens)?,
                Syntax::Rust => parse_rust(&mut tokens)?,
            };
            // A literal may end its line, as a Go expression statement would.
            if matches!(tokens.peek(), Some(Ok(Token::Semi))) {
                next(&mut tokens)?;
            }
            if !is_eof(&mut tokens) {
                bail!("unexpected '{}' after literal", peek(&mut tokens)?);
            }
            Ok(bytes)
        })
        .map_err(|err| {
            debug!("{err:#}");
            Error::Parse
        })
}

fn trim(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|c| !TRIM.contains(c));
    let end = input.iter().rposition(|c| !TRIM.contains(c));
    match (start, end) {
        (Some(start), Some(end)) => &input[start..=end],
        _ => &[],
    }
}

/// `[]byte{1, 2, 3}` or `[]byte("...")`.
fn parse_go(tokens: &mut Peekable<Tokens>) -> Result<Vec<u8>> {
    consume(&Token::LSquare, tokens)?;
    consume(&Token::RSquare, tokens)?;
    match next(tokens)? {
        Token::Identifier("byte") => (),
        token => bail!("expected byte but got '{token}'"),
    }

    match next(tokens)? {
        Token::LBrace => parse_elements(tokens, &Token::RBrace, |literal| {
            literal::parse_byte(literal).map(Byte::value)
        }),
        Token::LParen => parse_conversion(tokens),
        token => bail!("unexpected '{token}'"),
    }
}

/// `vec![1, 2, 3]`, where elements may carry a `u8` or `i8` suffix.
fn parse_rust(tokens: &mut Peekable<Tokens>) -> Result<Vec<u8>> {
    match next(tokens)? {
        Token::Identifier("vec") => (),
        token => bail!("expected vec but got '{token}'"),
    }
    consume(&Token::Bang, tokens)?;
    consume(&Token::LSquare, tokens)?;
    parse_elements(tokens, &Token::RSquare, parse_suffixed)
}

fn parse_suffixed(literal: &str) -> Option<u8> {
    if let Some(literal) = literal.strip_suffix("u8") {
        match literal::parse_byte(literal.trim_end_matches('_'))? {
            Byte::Signed(n) if n < 0 => None,
            byte => Some(byte.value()),
        }
    } else if let Some(literal) = literal.strip_suffix("i8") {
        match literal::parse_byte(literal.trim_end_matches('_'))? {
            byte @ Byte::Signed(_) => Some(byte.value()),
            Byte::Unsigned(_) => None,
        }
    } else {
        literal::parse_byte(literal).map(Byte::value)
    }
}

/// Comma separated integer literals up to `close`, with an optional trailing comma.
fn parse_elements(
    tokens: &mut Peekable<Tokens>,
    close: &Token,
    parse: impl Fn(&str) -> Option<u8>,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    loop {
        if peek(tokens)? == close {
            next(tokens)?;
            break;
        }

        match next(tokens)? {
            Token::Int(literal) => {
                bytes.push(parse(literal).with_context(|| format!("invalid byte '{literal}'"))?);
            }
            token => bail!("expected a byte but got '{token}'"),
        }

        match next(tokens)? {
            Token::Comma => (),
            token if &token == close => break,
            token => bail!("unexpected '{token}'"),
        }
    }
    debug!(len = bytes.len(), "parsed elements");
    Ok(bytes)
}

/// The argument list of a `[]byte(...)` conversion: exactly one string literal.
fn parse_conversion(tokens: &mut Peekable<Tokens>) -> Result<Vec<u8>> {
    let bytes = match next(tokens)? {
        Token::String(s) => literal::unquote(s)?,
        token => bail!("expected a string but got '{token}'"),
    };
    if peek(tokens)? == &Token::Comma {
        next(tokens)?;
    }
    consume(&Token::RParen, tokens)?;
    Ok(bytes)
}

fn is_eof(tokens: &mut Peekable<Tokens>) -> bool {
    tokens.peek().is_none()
}

fn peek<'a, 'b>(tokens: &'b mut Peekable<Tokens<'a>>) -> Result<&'b Token<'a>> {
    tokens
        .peek()
        .context("parser: EOF")
        .and_then(|r| r.as_ref().map_err(|err| anyhow!("{err}")))
}

fn next<'a>(tokens: &mut Peekable<Tokens<'a>>) -> Result<Token<'a>> {
    tokens.next().context("parser: EOF")?
}

fn consume(expected: &Token, tokens: &mut Peekable<Tokens>) -> Result<()> {
    let token = next(tokens)?;
    ensure!(&token == expected, "parser: unexpected '{token}'");
    Ok(())
}
