use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use bytelit::{input, run, Mode, Radix, Syntax};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "bytes formats binary input as a []byte{} array for use in go code, or a vec![] for rust.

If no file name is provided, bytes reads from stdin.

If -d or --decode is passed the transformation is reversed, and formatted bytes
are output as binary. Supported input formats are valid go []byte{} and []byte(\"...\")
and rust vec![]'s. Surrounding spaces, semicolons and comments are ignored so you can
paste directly from code. As a special case bytes can also decode go fuzz fixture files
containing bytes.";

#[derive(Parser, Debug)]
#[command(name = "bytes", version, about = "Format binary as a byte array literal", long_about = LONG_ABOUT)]
struct Cli {
    /// Read from FILE instead of stdin.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
    /// Decode formatted bytes and output binary.
    #[arg(short = 'd', long = "decode", action = ArgAction::SetTrue)]
    decode: bool,
    /// Output in rust syntax.
    #[arg(long = "rust", action = ArgAction::SetTrue)]
    rust: bool,
    /// Output in go syntax (default).
    #[arg(long = "go", action = ArgAction::SetTrue)]
    go: bool,
    /// Write each byte in hex rather than decimal.
    #[arg(long = "hex", action = ArgAction::SetTrue)]
    hex: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.decode {
            return Mode::Decode;
        }
        // --go is the default anyway, so --rust wins if both are given.
        let syntax = if self.rust { Syntax::Rust } else { Syntax::Go };
        let radix = if self.hex { Radix::Hex } else { Radix::Decimal };
        Mode::Encode { syntax, radix }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BYTES_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let mode = cli.mode();
    tracing::debug!(?mode, file = ?cli.file, "starting");

    let input = input::read(cli.file.as_deref())?;
    let output = run(mode, &input)?;
    io::stdout().write_all(&output)?;

    Ok(())
}
