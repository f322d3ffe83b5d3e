use crate::error::ScanResult;
use std::io::{self, Read};

/// Character set used to decode resource content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl Charset {
    pub fn decode(&self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Charset::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

/// A discovered, lazily loaded resource.
///
/// Nothing is read until one of the content accessors is called.
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Location of the resource, always with `/` separators.
    fn location(&self) -> &str;

    /// The file name: everything after the last `/` of the location.
    fn filename(&self) -> &str {
        let location = self.location();
        match location.rfind('/') {
            Some(idx) => &location[idx + 1..],
            None => location,
        }
    }

    /// Opens a fresh byte stream over the content.
    fn open(&self) -> ScanResult<Box<dyn Read + Send>>;

    /// Loads the whole content as a string, stripping a leading UTF-8 BOM.
    fn load_as_string(&self, charset: Charset) -> ScanResult<String>;

    /// Loads the content split into lines.
    fn load_as_lines(&self, charset: Charset) -> ScanResult<Vec<String>>;
}
