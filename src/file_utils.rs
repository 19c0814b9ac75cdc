use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::ConvertError;

// @module: File and directory utilities

// @const: Indentation of every JSON file we write
const JSON_INDENT: &[u8] = b"    ";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), ConvertError> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|source| ConvertError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Find files with a specific extension below a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, ConvertError> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(ConvertError::NotFound { path: dir.to_path_buf() });
        }

        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| ConvertError::Read {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                source: e.into_io_error().unwrap_or_else(|| io::Error::other("directory walk failed")),
            })?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a UTF-8 file to a string, dropping a leading byte order mark
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, ConvertError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConvertError::NotFound { path: path.to_path_buf() });
        }

        let bytes = fs::read(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| ConvertError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(ErrorKind::InvalidData, e),
        })?;

        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    /// Write a string to a file, creating the parent directory first
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), ConvertError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content).map_err(|source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize `value` as indented JSON and write it, replacing any existing file
    pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<(), ConvertError> {
        let path = path.as_ref();
        let json = Self::to_pretty_json(value).map_err(|e| ConvertError::Write {
            path: path.to_path_buf(),
            source: io::Error::new(ErrorKind::InvalidData, e),
        })?;
        Self::write_to_file(path, &json)
    }

    /// Render `value` as JSON with four-space indentation, non-ASCII left as is
    pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
