use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;

/// Path meaning standard input
pub const STDIN: &str = "-";

/// Read the whole input into memory
pub fn read_input(path: &str) -> Result<Vec<u8>> {
    let mut reader: Box<dyn Read> = if path == STDIN {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(File::open(path).with_context(|| format!("issue opening input: {}", path))?)
    };

    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .with_context(|| format!("issue reading input: {}", path))?;
    tracing::debug!("read {} bytes from {}", content.len(), path);
    Ok(content)
}
