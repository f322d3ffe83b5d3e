//! Resource handles returned by the scanners.

use crate::content;
use cpscan_api::{Charset, Resource, ResourceLoader, ScanError, ScanResult};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A resource on the class path, read through its loader.
#[derive(Clone)]
pub struct ClassPathResource {
    name: String,
    loader: Arc<dyn ResourceLoader>,
}

impl ClassPathResource {
    pub fn new(name: impl Into<String>, loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            name: name.into(),
            loader,
        }
    }

    fn stream(&self) -> ScanResult<Option<Box<dyn Read + Send>>> {
        self.loader.open(&self.name).map_err(|source| ScanError::Decode {
            name: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for ClassPathResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassPathResource")
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ClassPathResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for ClassPathResource {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassPathResource {}

impl Resource for ClassPathResource {
    fn location(&self) -> &str {
        &self.name
    }

    fn open(&self) -> ScanResult<Box<dyn Read + Send>> {
        self.stream()?.ok_or_else(|| ScanError::ResourceUnavailable {
            name: self.name.clone(),
        })
    }

    fn load_as_string(&self, charset: Charset) -> ScanResult<String> {
        let reader = self.open()?;
        content::read_to_string(reader, charset).map_err(|source| ScanError::Decode {
            name: self.name.clone(),
            source,
        })
    }

    /// An unavailable stream yields no lines rather than an error.
    fn load_as_lines(&self, charset: Charset) -> ScanResult<Vec<String>> {
        match self.stream()? {
            Some(reader) => content::read_lines(reader, charset).map_err(|source| {
                ScanError::Decode {
                    name: self.name.clone(),
                    source,
                }
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// A plain file found by the filesystem scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemResource {
    path: PathBuf,
    location: String,
}

impl FileSystemResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.to_string_lossy().replace('\\', "/");
        Self { path, location }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode_error(&self, source: std::io::Error) -> ScanError {
        ScanError::Decode {
            name: self.location.clone(),
            source,
        }
    }
}

impl fmt::Display for FileSystemResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

impl Resource for FileSystemResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn open(&self) -> ScanResult<Box<dyn Read + Send>> {
        let file = File::open(&self.path).map_err(|e| self.decode_error(e))?;
        Ok(Box::new(file))
    }

    fn load_as_string(&self, charset: Charset) -> ScanResult<String> {
        content::read_to_string(self.open()?, charset).map_err(|e| self.decode_error(e))
    }

    fn load_as_lines(&self, charset: Charset) -> ScanResult<Vec<String>> {
        content::read_lines(self.open()?, charset).map_err(|e| self.decode_error(e))
    }
}
