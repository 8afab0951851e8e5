use crate::{Radix, Syntax};

/// Formats `bytes` as a single line of source, newline included.
#[must_use]
pub fn encode(bytes: &[u8], syntax: Syntax, radix: Radix) -> String {
    let (open, close) = match syntax {
        Syntax::Go => ("[]byte{", "}"),
        Syntax::Rust => ("vec![", "]"),
    };

    let mut res = String::with_capacity(open.len() + bytes.len() * 5 + close.len() + 1);
    res.push_str(open);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            res.push_str(", ");
        }
        res.push_str(&match radix {
            Radix::Decimal => byte.to_string(),
            Radix::Hex => format!("{byte:#x}"),
        });
    }
    res.push_str(close);
    res.push('\n');
    res
}
