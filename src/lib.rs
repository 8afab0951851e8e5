#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Formats binary data as a Go `[]byte{...}` or Rust `vec![...]` literal, and turns such
//! literals (or Go fuzz fixture files) back into the original bytes.

pub use decode::decode;
pub use encode::encode;
pub use error::Error;
pub use literal::{parse_byte, Byte};

mod decode;
mod encode;
mod error;
pub mod input;
mod literal;
mod tokens;

/// The surface syntax of a literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Syntax {
    /// `[]byte{1, 2, 3}`
    #[default]
    Go,
    /// `vec![1, 2, 3]`
    Rust,
}

impl Syntax {
    /// Which grammar a decoder should try for `text`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.starts_with("vec![") {
            Syntax::Rust
        } else {
            Syntax::Go
        }
    }
}

/// How encoded elements are written.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Radix {
    #[default]
    Decimal,
    /// `0x41`, as Go's `%#v` prints bytes.
    Hex,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Encode { syntax: Syntax, radix: Radix },
    Decode,
}

/// Produces exactly what should be written to stdout for `input`.
pub fn run(mode: Mode, input: &[u8]) -> Result<Vec<u8>, Error> {
    match mode {
        Mode::Encode { syntax, radix } => Ok(encode(input, syntax, radix).into_bytes()),
        Mode::Decode => decode(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: [(Syntax, Radix); 4] = [
        (Syntax::Go, Radix::Decimal),
        (Syntax::Go, Radix::Hex),
        (Syntax::Rust, Radix::Decimal),
        (Syntax::Rust, Radix::Hex),
    ];

    fn round_trip(bytes: &[u8]) {
        for (syntax, radix) in FORMATS {
            let encoded = encode(bytes, syntax, radix);
            assert_eq!(Syntax::detect(&encoded), syntax);
            assert_eq!(decode(encoded.as_bytes()).unwrap(), bytes, "{encoded}");
        }
    }

    #[test]
    fn test_round_trip() {
        let all: Vec<u8> = (0..=255).collect();
        round_trip(&[]);
        round_trip(&all);
        round_trip(&[127, 128, 255, 0]);
        round_trip(b"hello world");
        for byte in all {
            round_trip(&[byte]);
        }
    }

    #[test]
    fn test_round_trip_with_header() {
        let bytes = [0, 1, 127, 128, 254, 255];
        for (syntax, radix) in FORMATS {
            let encoded = format!("go test fuzz v1\n{}", encode(&bytes, syntax, radix));
            assert_eq!(decode(encoded.as_bytes()).unwrap(), bytes);
        }
    }

    #[test]
    fn test_run() {
        let go = Mode::Encode {
            syntax: Syntax::Go,
            radix: Radix::Decimal,
        };
        assert_eq!(run(go, b"ABC").unwrap(), b"[]byte{65, 66, 67}\n");
        assert_eq!(run(Mode::Decode, b"[]byte{65, 66, 67}").unwrap(), b"ABC");
        assert_eq!(run(Mode::Decode, b"[]byte{}").unwrap(), b"");
        assert!(matches!(run(Mode::Decode, b""), Err(Error::Parse)));
    }

    #[test]
    fn test_detect() {
        assert_eq!(Syntax::detect("vec![1]"), Syntax::Rust);
        assert_eq!(Syntax::detect("vec ![1]"), Syntax::Go);
        assert_eq!(Syntax::detect("[]byte{1}"), Syntax::Go);
        assert_eq!(Syntax::detect(""), Syntax::Go);
    }
}
