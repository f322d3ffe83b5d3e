//! Logical scan locations.
//!
//! A location is written `<prefix>:<path>` where the prefix is either
//! `classpath:` (the default when omitted) or `filesystem:`.

use crate::error::{ScanError, ScanResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const CLASSPATH_PREFIX: &str = "classpath:";
pub const FILESYSTEM_PREFIX: &str = "filesystem:";

/// Origin tag of a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationPrefix {
    /// Namespace path resolved through the class path.
    ClassPath,
    /// Plain path on the local filesystem.
    FileSystem,
}

impl LocationPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPrefix::ClassPath => CLASSPATH_PREFIX,
            LocationPrefix::FileSystem => FILESYSTEM_PREFIX,
        }
    }
}

/// A starting location to scan from.
///
/// Immutable once parsed. Equality, hashing and ordering all follow the
/// reconstructed [`descriptor`](Location::descriptor).
#[derive(Debug, Clone)]
pub struct Location {
    prefix: LocationPrefix,
    path: String,
}

impl Location {
    /// Parses and normalizes a location descriptor.
    pub fn parse(descriptor: &str) -> ScanResult<Self> {
        let normalized = descriptor.trim().replace('\\', "/");

        let (prefix, mut path) = match normalized.find(':') {
            Some(idx) => {
                let prefix = match &normalized[..=idx] {
                    CLASSPATH_PREFIX => LocationPrefix::ClassPath,
                    FILESYSTEM_PREFIX => LocationPrefix::FileSystem,
                    _ => {
                        return Err(ScanError::InvalidLocation {
                            descriptor: normalized,
                        });
                    }
                };
                (prefix, normalized[idx + 1..].to_string())
            }
            None => (LocationPrefix::ClassPath, normalized),
        };

        if prefix == LocationPrefix::ClassPath {
            path = path.replace('.', "/");
            if let Some(stripped) = path.strip_prefix('/') {
                path = stripped.to_string();
            }
        }
        if path.ends_with('/') {
            path.pop();
        }

        Ok(Self { prefix, path })
    }

    pub fn classpath(path: &str) -> ScanResult<Self> {
        Self::parse(&format!("{CLASSPATH_PREFIX}{path}"))
    }

    pub fn is_classpath(&self) -> bool {
        self.prefix == LocationPrefix::ClassPath
    }

    pub fn is_filesystem(&self) -> bool {
        self.prefix == LocationPrefix::FileSystem
    }

    pub fn prefix(&self) -> LocationPrefix {
        self.prefix
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The complete descriptor, e.g. `classpath:db/migration`.
    pub fn descriptor(&self) -> String {
        format!("{}{}", self.prefix.as_str(), self.path)
    }
}

impl FromStr for Location {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.as_str(), self.path)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor() == other.descriptor()
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.descriptor().hash(state);
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.descriptor().cmp(&other.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let location = Location::parse("db/migration").unwrap();
        assert_eq!(location.prefix(), LocationPrefix::ClassPath);
        assert!(location.is_classpath());
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_classpath_prefix() {
        let location = Location::parse("classpath:db/migration").unwrap();
        assert!(location.is_classpath());
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "classpath:db/migration");
    }

    #[test]
    fn test_classpath_dots_and_slashes() {
        let location = Location::parse("classpath:/org.example.dummy/").unwrap();
        assert_eq!(location.path(), "org/example/dummy");

        let location = Location::parse("org\\example\\dummy").unwrap();
        assert_eq!(location.path(), "org/example/dummy");
    }

    #[test]
    fn test_filesystem_prefix() {
        let location = Location::parse("filesystem:db/migration").unwrap();
        assert_eq!(location.prefix(), LocationPrefix::FileSystem);
        assert!(!location.is_classpath());
        assert_eq!(location.path(), "db/migration");
        assert_eq!(location.descriptor(), "filesystem:db/migration");
    }

    #[test]
    fn test_filesystem_absolute_path_keeps_leading_slash() {
        let location = Location::parse("filesystem:/db/migration/").unwrap();
        assert_eq!(location.path(), "/db/migration");
        assert_eq!(location.descriptor(), "filesystem:/db/migration");
    }

    #[test]
    fn test_filesystem_dots_preserved() {
        let location = Location::parse("filesystem:util-2.0.4/db/migration").unwrap();
        assert_eq!(location.path(), "util-2.0.4/db/migration");
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        let err = Location::parse("http:db/migration").unwrap_err();
        assert!(matches!(err, ScanError::InvalidLocation { .. }));
    }

    #[test]
    fn test_reparse_is_idempotent() {
        for descriptor in [
            "db/migration/",
            "classpath:org.example",
            "filesystem:/tmp/x/",
            "classpath:",
        ] {
            let once = Location::parse(descriptor).unwrap();
            let twice = Location::parse(&once.descriptor()).unwrap();
            assert_eq!(once, twice);
            assert_eq!(once.descriptor(), twice.descriptor());
        }
    }

    #[test]
    fn test_equality_and_ordering_by_descriptor() {
        let a = Location::parse("db.migration").unwrap();
        let b = Location::parse("classpath:/db/migration/").unwrap();
        let c = Location::parse("filesystem:db/migration").unwrap();
        assert_eq!(a, b);
        assert!(a < c);
    }
}
