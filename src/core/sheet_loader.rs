/*
 * Filesystem access for style sheets, behind a trait so the style manager
 * and its tests can swap out where sheet text comes from.
 */
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SheetLoadError {
    NotFound(PathBuf),
    Io(io::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for SheetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetLoadError::NotFound(path) => {
                write!(f, "style sheet not found: {path:?}")
            }
            SheetLoadError::Io(error) => {
                write!(f, "I/O error reading style sheet: {error}")
            }
            SheetLoadError::Utf8(error) => {
                write!(f, "style sheet is not valid UTF-8: {error}")
            }
        }
    }
}

impl std::error::Error for SheetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetLoadError::NotFound(_) => None,
            SheetLoadError::Io(error) => Some(error),
            SheetLoadError::Utf8(error) => Some(error),
        }
    }
}

impl From<io::Error> for SheetLoadError {
    fn from(error: io::Error) -> Self {
        SheetLoadError::Io(error)
    }
}

impl From<std::string::FromUtf8Error> for SheetLoadError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        SheetLoadError::Utf8(error)
    }
}

pub type Result<T> = std::result::Result<T, SheetLoadError>;

pub trait SheetLoaderOperations: Send + Sync {
    fn read_sheet(&self, path: &Path) -> Result<String>;
}

pub struct CoreSheetLoader {}

impl CoreSheetLoader {
    pub fn new() -> Self {
        CoreSheetLoader {}
    }
}

impl Default for CoreSheetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetLoaderOperations for CoreSheetLoader {
    fn read_sheet(&self, path: &Path) -> Result<String> {
        log::debug!("CoreSheetLoader: Reading style sheet from {path:?}");
        if !path.exists() {
            return Err(SheetLoadError::NotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        log::trace!(
            "CoreSheetLoader: Read {} bytes from {path:?}",
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_sheet_returns_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.ess");
        std::fs::write(&path, "x { fore:#112233 }").unwrap();

        let loader = CoreSheetLoader::new();
        assert_eq!(loader.read_sheet(&path).unwrap(), "x { fore:#112233 }");
    }

    #[test]
    fn test_read_sheet_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.ess");

        let loader = CoreSheetLoader::new();
        match loader.read_sheet(&path) {
            Err(SheetLoadError::NotFound(reported)) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_read_sheet_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.ess");
        std::fs::write(&path, [0x66u8, 0x6F, 0xFF, 0xFE]).unwrap();

        let loader = CoreSheetLoader::new();
        assert!(matches!(
            loader.read_sheet(&path),
            Err(SheetLoadError::Utf8(_))
        ));
    }
}
