//! Virtual filesystem enumerators.
//!
//! Both generations list through the framework's own recursive listing and
//! turn its file handles into namespace names.

use super::namespace_root;
use crate::util;
use cpscan_api::{
    LocationEnumerator, ResourceNames, ScanError, ScanResult, VirtualFile, VirtualFileSystemV2,
    VirtualFileSystemV3,
};
use std::sync::Arc;
use url::Url;

fn names_below(root: &str, files: Vec<VirtualFile>) -> ResourceNames {
    files
        .into_iter()
        .filter(|file| file.is_file)
        .filter_map(|file| file.path_name.strip_prefix(root).map(str::to_string))
        .collect()
}

/// Lists URLs that the second generation framework keeps in its own
/// storage, i.e. those its indirection maps back onto a `vfs*` scheme.
pub struct VfsV2Enumerator {
    vfs: Arc<dyn VirtualFileSystemV2>,
}

impl VfsV2Enumerator {
    pub fn new(vfs: Arc<dyn VirtualFileSystemV2>) -> Self {
        Self { vfs }
    }
}

impl LocationEnumerator for VfsV2Enumerator {
    fn name(&self) -> &str {
        "vfs-v2"
    }

    fn find_resource_names(&self, location: &str, root_url: &Url) -> ScanResult<ResourceNames> {
        let root = self.vfs.root(root_url).map_err(|source| ScanError::Indirection {
            url: root_url.to_string(),
            source,
        })?;
        let namespace = namespace_root(&root.path_name, location);
        let children = self
            .vfs
            .children_recursively(&root)
            .map_err(|e| ScanError::backend(root_url, e))?;
        Ok(names_below(&namespace, children))
    }
}

/// Lists `vfs:` URLs through the third generation framework.
pub struct VfsV3Enumerator {
    vfs: Arc<dyn VirtualFileSystemV3>,
}

impl VfsV3Enumerator {
    pub fn new(vfs: Arc<dyn VirtualFileSystemV3>) -> Self {
        Self { vfs }
    }
}

impl LocationEnumerator for VfsV3Enumerator {
    fn name(&self) -> &str {
        "vfs-v3"
    }

    fn find_resource_names(&self, location: &str, root_url: &Url) -> ScanResult<ResourceNames> {
        let file_path = util::decoded_path(root_url);
        let namespace = namespace_root(&file_path, location);
        let files = self
            .vfs
            .children_recursively(&file_path, &|file| file.is_file)
            .map_err(|e| ScanError::backend(root_url, e))?;
        Ok(names_below(&namespace, files))
    }
}
