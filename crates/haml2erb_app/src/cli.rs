use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

/// Batch-convert HAML templates to ERB via the haml2erb.org API.
#[derive(Debug, Parser)]
#[command(name = "haml2erb", version)]
pub struct Cli {
    /// Directory tree to scan for .haml files.
    pub root: PathBuf,
}

/// Ask whether successfully converted sources should be removed. Only an
/// exact `y` (case-sensitive) enables removal; any other answer leaves the
/// sources in place.
pub fn confirm_removal(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    writeln!(output, "remove converted files? (y/n)")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == "y")
}
