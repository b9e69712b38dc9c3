//! Result file I/O
//!
//! The matched path is written once, as raw bytes without a trailing newline,
//! after the search has finished.

use crate::constants::DEFAULT_OUTPUT_FILE;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Get the result file path inside `dir`
///
/// Format: `{dir}/found.txt`
pub fn get_result_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(DEFAULT_OUTPUT_FILE)
}

/// Save the matched path
pub fn save_found_path(path: impl AsRef<Path>, found: &str) -> io::Result<()> {
    ensure_parent_dir(path.as_ref())?;

    let mut file = File::create(path)?;
    file.write_all(found.as_bytes())?;
    file.flush()
}

/// Load a previously saved path
pub fn load_found_path(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}
