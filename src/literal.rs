use anyhow::{bail, ensure, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// How a numeric literal resolved to a byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Byte {
    /// Fits an `i8`. Negative values keep their two's complement bit pattern.
    Signed(i8),
    /// Too big for an `i8` but fits a `u8`.
    Unsigned(u8),
}

impl Byte {
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            Byte::Signed(n) => u8::from_ne_bytes(n.to_ne_bytes()),
            Byte::Unsigned(n) => n,
        }
    }
}

/// Resolves an integer literal to a byte, first as an `i8` and then as a `u8`. Bases and digit
/// separators follow Go: `0x`, `0b`, `0o`, a leading `0` for octal, and `_` between digits.
/// Only the signed reading accepts a sign.
#[must_use]
pub fn parse_byte(literal: &str) -> Option<Byte> {
    lazy_static! {
        static ref INT: Regex = Regex::new(concat!(
            r"^([+-]?)(?:",
            r"0[xX]((?:_?[0-9a-fA-F])+)",
            r"|0[bB]((?:_?[01])+)",
            r"|0[oO]((?:_?[0-7])+)",
            r"|0((?:_?[0-7])*)",
            r"|([1-9](?:_?[0-9])*)",
            r")$",
        ))
        .unwrap();
    }

    let caps = INT.captures(literal)?;
    let (radix, digits) = [(16, 2), (2, 3), (8, 4), (8, 5), (10, 6)]
        .into_iter()
        .find_map(|(radix, group)| caps.get(group).map(|m| (radix, m.as_str())))?;
    let digits = match digits.replace('_', "") {
        // A bare "0" is the only way the legacy octal group matches nothing.
        d if d.is_empty() => "0".to_string(),
        d => d,
    };
    let sign = &caps[1];

    i8::from_str_radix(&format!("{sign}{digits}"), radix)
        .map(Byte::Signed)
        .ok()
        .or_else(|| {
            if sign.is_empty() {
                u8::from_str_radix(&digits, radix).ok().map(Byte::Unsigned)
            } else {
                None
            }
        })
}

/// Unquotes a string literal as Go does: `"..."` with escapes, or `` `...` `` verbatim minus
/// carriage returns.
pub fn unquote(literal: &str) -> Result<Vec<u8>> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        ensure!(!raw.contains('`'), "unquote: stray '`' in raw string");
        return Ok(raw.bytes().filter(|&c| c != b'\r').collect());
    }

    let body = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .with_context(|| format!("unquote: not a string literal: {literal}"))?;

    let mut res = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escape(&mut chars, &mut res)?,
            '"' | '\n' => bail!("unquote: unexpected {c:?}"),
            c => {
                let mut buf = [0; 4];
                res.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Ok(res)
}

fn escape(chars: &mut std::str::Chars, res: &mut Vec<u8>) -> Result<()> {
    let c = chars.next().context("unquote: EOF in escape")?;
    match c {
        'a' => res.push(0x07),
        'b' => res.push(0x08),
        'f' => res.push(0x0c),
        'n' => res.push(b'\n'),
        'r' => res.push(b'\r'),
        't' => res.push(b'\t'),
        'v' => res.push(0x0b),
        '\\' => res.push(b'\\'),
        '"' => res.push(b'"'),
        'x' => res.push(u8::try_from(digits(chars, 2, 16)?)?),
        '0'..='7' => {
            let rest = digits(chars, 2, 8)?;
            let n = (c.to_digit(8).context("unquote: octal")? << 6) | rest;
            res.push(u8::try_from(n).context("unquote: octal escape out of range")?);
        }
        'u' | 'U' => {
            let n = digits(chars, if c == 'u' { 4 } else { 8 }, 16)?;
            let c = char::from_u32(n).with_context(|| format!("unquote: invalid code point {n:#x}"))?;
            let mut buf = [0; 4];
            res.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        c => bail!("unquote: unknown escape '\\{c}'"),
    }
    Ok(())
}

fn digits(chars: &mut std::str::Chars, n: usize, radix: u32) -> Result<u32> {
    let mut res = 0;
    for _ in 0..n {
        let c = chars.next().context("unquote: EOF in escape")?;
        res = res * radix + c.to_digit(radix).with_context(|| format!("unquote: bad digit {c:?}"))?;
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("0"), Some(Byte::Signed(0)));
        assert_eq!(parse_byte("65"), Some(Byte::Signed(65)));
        assert_eq!(parse_byte("127"), Some(Byte::Signed(127)));
        assert_eq!(parse_byte("128"), Some(Byte::Unsigned(128)));
        assert_eq!(parse_byte("255"), Some(Byte::Unsigned(255)));
        assert_eq!(parse_byte("-1"), Some(Byte::Signed(-1)));
        assert_eq!(parse_byte("-128"), Some(Byte::Signed(-128)));
        assert_eq!(parse_byte("+5"), Some(Byte::Signed(5)));
        assert_eq!(parse_byte("-0"), Some(Byte::Signed(0)));

        assert_eq!(parse_byte("0x7f"), Some(Byte::Signed(0x7f)));
        assert_eq!(parse_byte("0XFF"), Some(Byte::Unsigned(0xff)));
        assert_eq!(parse_byte("-0x80"), Some(Byte::Signed(-128)));
        assert_eq!(parse_byte("0b1010"), Some(Byte::Signed(10)));
        assert_eq!(parse_byte("0o17"), Some(Byte::Signed(15)));
        assert_eq!(parse_byte("017"), Some(Byte::Signed(15)));
        assert_eq!(parse_byte("0377"), Some(Byte::Unsigned(255)));
        assert_eq!(parse_byte("00"), Some(Byte::Signed(0)));
        assert_eq!(parse_byte("1_0"), Some(Byte::Signed(10)));
        assert_eq!(parse_byte("0x_f_f"), Some(Byte::Unsigned(255)));
        assert_eq!(parse_byte("0_7"), Some(Byte::Signed(7)));

        for literal in [
            "", "300", "256", "-129", "+200", "-200", "08", "0x", "0b2", "1__0", "1_", "_1",
            "1.0", "1e2", "a", "0x1g", "65u8", "--1",
        ] {
            assert_eq!(parse_byte(literal), None, "{literal}");
        }
    }

    #[test]
    fn test_byte_value() {
        assert_eq!(Byte::Signed(-1).value(), 0xff);
        assert_eq!(Byte::Signed(-128).value(), 0x80);
        assert_eq!(Byte::Signed(127).value(), 127);
        assert_eq!(Byte::Unsigned(200).value(), 200);
        for n in 0..=255u8 {
            assert_eq!(parse_byte(&n.to_string()).unwrap().value(), n);
        }
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""ABC""#).unwrap(), b"ABC");
        assert_eq!(unquote(r#""""#).unwrap(), b"");
        assert_eq!(
            unquote(r#""\a\b\f\n\r\t\v\\\"""#).unwrap(),
            b"\x07\x08\x0c\n\r\t\x0b\\\""
        );
        assert_eq!(unquote(r#""\x00\xff""#).unwrap(), b"\x00\xff");
        assert_eq!(unquote(r#""\000\101\377""#).unwrap(), b"\x00A\xff");
        assert_eq!(unquote(r#""é""#).unwrap(), "é".as_bytes());
        assert_eq!(unquote(r#""\U0001F600""#).unwrap(), "😀".as_bytes());
        assert_eq!(unquote(r#""héllo""#).unwrap(), "héllo".as_bytes());
        assert_eq!(unquote("`a\\n\r\nb`").unwrap(), b"a\\n\nb");

        for literal in [
            r#""\'""#, r#""\q""#, r#""\x4""#, r#""\400""#, r#""\ud800""#, r#""\U00110000""#,
            "\"a\nb\"", r#""abc"#, "abc", r#""a"b""#,
        ] {
            assert!(unquote(literal).is_err(), "{literal}");
        }
    }
}
