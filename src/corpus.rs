// File: src/corpus.rs
use crate::core::engine::AutocompleteProvider;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Trains `provider` on every line of `reader`, returning the words recorded.
///
/// The whole input is read before any training happens, so a read error
/// (including invalid UTF-8) leaves `provider` untouched.
pub fn train_from_reader<R: BufRead>(
    provider: &mut AutocompleteProvider,
    reader: R,
) -> Result<usize> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    Ok(lines.iter().map(|line| provider.train(line)).sum())
}

/// Trains `provider` on the contents of the file at `path`.
pub fn train_from_file(provider: &mut AutocompleteProvider, path: &Path) -> Result<usize> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let recorded = match train_from_reader(provider, BufReader::new(file)) {
        Err(Error::Read(source)) => return Err(io_err(source)),
        result => result?,
    };

    info!(path = %path.display(), words = recorded, "trained corpus file");
    Ok(recorded)
}
