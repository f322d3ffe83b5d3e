//! Optional framework backends.
//!
//! These are implemented by the embedding application when its resources
//! live behind a virtual filesystem or a module bundle system. The scanner
//! only uses them once the matching [`Capability`](crate::Capability) is
//! detected.

use crate::error::BoxError;
use std::io;
use std::sync::Arc;
use url::Url;

/// A framework native file handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    /// Absolute path name inside the virtual filesystem, `/` separated.
    pub path_name: String,
    pub is_file: bool,
}

impl VirtualFile {
    pub fn file(path_name: impl Into<String>) -> Self {
        Self {
            path_name: path_name.into(),
            is_file: true,
        }
    }

    pub fn directory(path_name: impl Into<String>) -> Self {
        Self {
            path_name: path_name.into(),
            is_file: false,
        }
    }
}

/// Virtual filesystem, second generation.
///
/// Its URLs point at proxy objects: [`root`](Self::root) followed by
/// [`real_url`](Self::real_url) dereferences them to plain storage.
pub trait VirtualFileSystemV2: Send + Sync {
    fn root(&self, url: &Url) -> Result<VirtualFile, BoxError>;

    fn real_url(&self, file: &VirtualFile) -> Result<Url, BoxError>;

    /// Every descendant of `file`, files and directories alike.
    fn children_recursively(&self, file: &VirtualFile) -> io::Result<Vec<VirtualFile>>;
}

/// Virtual filesystem, third generation, with filtered recursive listing.
pub trait VirtualFileSystemV3: Send + Sync {
    fn children_recursively(
        &self,
        path: &str,
        filter: &dyn Fn(&VirtualFile) -> bool,
    ) -> io::Result<Vec<VirtualFile>>;
}

/// One bundle of a module bundle framework.
pub trait Bundle: Send + Sync {
    fn id(&self) -> u64;

    /// Entries below `path`, optionally recursing into sub paths.
    fn find_entries(&self, path: &str, recurse: bool) -> io::Result<Vec<Url>>;
}

/// Module bundle framework.
pub trait BundleFramework: Send + Sync {
    /// The bundle the scanner itself belongs to.
    fn current_bundle(&self) -> Arc<dyn Bundle>;

    fn bundle(&self, id: u64) -> Option<Arc<dyn Bundle>>;
}
