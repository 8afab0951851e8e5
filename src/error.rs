use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input couldn't be read. `origin` is the path, or "stdin". The io error is part of the
    /// message rather than a source, so it's reported once.
    #[error("{origin}: {err}")]
    Read { origin: String, err: io::Error },

    /// The input didn't match either literal syntax. Deliberately says nothing about where.
    #[error("expected input to match []byte{{1,2,3}} or vec![1,2,3]")]
    Parse,
}
