use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Write generated source to `path`, creating parent directories.
pub fn write_source(path: &Path, contents: &str) -> Result<()> {
    let io_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}
