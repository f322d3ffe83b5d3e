//! Backend specific enumerators, one per storage kind.

pub mod archive;
pub mod bundle;
pub mod directory;
pub mod vfs;

pub use archive::ArchiveEnumerator;
pub use bundle::BundleEnumerator;
pub use directory::DirectoryEnumerator;
pub use vfs::{VfsV2Enumerator, VfsV3Enumerator};

pub const FILE_SCHEMES: &[&str] = &["file"];
/// `zip` is used by WebLogic, `wsjar` by WebSphere.
pub const ARCHIVE_SCHEMES: &[&str] = &["jar", "zip", "wsjar"];
pub const VFS_V2_SCHEMES: &[&str] = &["vfszip", "vfsfile", "vfsjar", "vfsmemory"];
pub const VFS_V3_SCHEMES: &[&str] = &["vfs"];
/// `bundle` is used by Felix, `bundleresource` by Equinox.
pub const BUNDLE_SCHEMES: &[&str] = &["bundle", "bundleresource"];

/// Root of the namespace for a physical path resolved from `location`,
/// always ending with `/`.
pub(crate) fn namespace_root(path: &str, location: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let mut root = trimmed
        .strip_suffix(location)
        .unwrap_or(trimmed)
        .to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    root
}
