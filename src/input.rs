use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::Path,
};

use tracing::trace;

use crate::Error;

/// Reads all of `path`, or all of stdin when there's no path. Prompts on stderr first if stdin
/// is a terminal, since the read would otherwise just sit there.
pub fn read(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    let input = match path {
        Some(path) => fs::read(path).map_err(|err| Error::Read {
            origin: path.display().to_string(),
            err,
        })?,
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Reading from stdin... (ctrl+d when done)");
            }
            read_from(stdin.lock(), "stdin")?
        }
    };
    trace!(len = input.len(), "read input");
    Ok(input)
}

pub fn read_from(mut reader: impl Read, origin: &str) -> Result<Vec<u8>, Error> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|err| Error::Read {
            origin: origin.to_string(),
            err,
        })?;
    Ok(input)
}
