use std::fs;
use std::path::{Path, PathBuf};

use crate::formatting::{FormatError, FormatOptions, format_bytes};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot format {path}: {source}")]
    Format { path: PathBuf, source: FormatError },
}

/// Read a diagram source file as raw bytes
pub fn read_source(path: &Path) -> Result<Vec<u8>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(IoError::Io)
}

/// Replace a file's contents in one step.
///
/// Writes a sibling temporary file and renames it over the target, so
/// readers see either the old or the new contents, never a mix.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), IoError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(IoError::Io(e));
    }
    Ok(())
}

/// Format a diagram file in place.
///
/// Returns `Ok(true)` if the file changed. On any error the file is left
/// untouched.
pub fn format_file(path: &Path, options: &FormatOptions) -> Result<bool, IoError> {
    let bytes = read_source(path)?;
    let formatted = format_bytes(&bytes, options).map_err(|source| {
        log::error!("Failed to format {}: {source}", path.display());
        IoError::Format {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if formatted.as_bytes() == bytes.as_slice() {
        return Ok(false);
    }
    write_atomic(path, &formatted)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_missing_file() {
        let result = read_source(Path::new("/this/path/does/not/exist.mmd"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn read_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "flow.mmd", b"graph TD");
        assert_eq!(read_source(&path).unwrap(), b"graph TD");
    }

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "flow.mmd", b"old");

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("flow.mmd.tmp").exists());
    }

    #[test]
    fn format_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "flow.mmd", b"subgraph A\n\nx-->y\nend\n");

        assert!(format_file(&path, &FormatOptions::default()).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "subgraph A\n  x-->y\nend");
    }

    #[test]
    fn format_file_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "flow.mmd", b"group g\n  service s\nend");

        assert!(!format_file(&path, &FormatOptions::default()).unwrap());
    }

    #[test]
    fn format_file_leaves_invalid_input_untouched() {
        let dir = TempDir::new().unwrap();
        let original = b"subgraph A\n\xFF\nend";
        let path = create_test_file(&dir, "bad.mmd", original);

        let result = format_file(&path, &FormatOptions::default());

        assert!(matches!(result, Err(IoError::Format { .. })));
        assert_eq!(fs::read(&path).unwrap(), original);
    }
}
