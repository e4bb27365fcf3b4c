use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Ask for a save directory until the user supplies one that can be created
/// and written to.
pub fn prompt_save_dir() -> Result<PathBuf> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter a directory to save images: ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line.context("failed to read from stdin")?,
            None => bail!("stdin closed before a save directory was given"),
        };
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let dir = PathBuf::from(raw);
        if let Err(err) = std::fs::create_dir_all(&dir) {
            println!("Could not create directory: {}. Try another path.", err);
            continue;
        }
        match ensure_writable(&dir) {
            Ok(()) => return Ok(dir),
            Err(err) => println!("No write access to that directory: {}. Try another path.", err),
        }
    }
}

/// Read URLs line by line until a blank line or EOF.
pub fn collect_urls() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut urls = Vec::new();

    println!("Enter image URLs, one per line (blank line to finish):");
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let raw = line.trim();
        if raw.is_empty() {
            break;
        }
        urls.push(raw.to_string());
    }
    Ok(urls)
}

// Probe writability with a scratch file; std has no portable access(2) wrapper.
fn ensure_writable(dir: &Path) -> io::Result<()> {
    let probe = dir.join(".imgfetch-write-probe");
    std::fs::write(&probe, b"")?;
    std::fs::remove_file(&probe)
}
