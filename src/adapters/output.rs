//! Output file writing

use std::path::Path;

use tracing::info;

use crate::{Error, Result};

/// Write `contents` to `path`, creating or truncating the file
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| {
        Error::FileAccessError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.env");
        std::fs::write(&path, "OLD=contents that are longer").unwrap();

        write_output(&path, "NEW=1").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEW=1");
    }

    #[test]
    fn missing_directory_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.env");

        let err = write_output(&path, "A=1").unwrap_err();
        assert!(matches!(err, Error::FileAccessError(_)));
    }
}
