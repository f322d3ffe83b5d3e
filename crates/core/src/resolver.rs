//! Turns located URLs into URLs an enumerator understands.

use cpscan_api::{ScanError, ScanResult, VirtualFileSystemV2};
use std::sync::Arc;
use url::Url;

pub trait UrlResolver: Send + Sync {
    fn to_standard_url(&self, url: &Url) -> ScanResult<Url>;
}

/// Returns URLs unchanged.
pub struct DefaultUrlResolver;

impl UrlResolver for DefaultUrlResolver {
    fn to_standard_url(&self, url: &Url) -> ScanResult<Url> {
        Ok(url.clone())
    }
}

/// Dereferences a virtual filesystem URL to the real URL behind it.
pub struct VfsV2UrlResolver {
    vfs: Arc<dyn VirtualFileSystemV2>,
}

impl VfsV2UrlResolver {
    pub fn new(vfs: Arc<dyn VirtualFileSystemV2>) -> Self {
        Self { vfs }
    }

    /// Whether URLs with this scheme go through the virtual filesystem.
    pub fn handles(scheme: &str) -> bool {
        scheme.starts_with("vfs")
    }
}

impl UrlResolver for VfsV2UrlResolver {
    fn to_standard_url(&self, url: &Url) -> ScanResult<Url> {
        let indirection = |source| ScanError::Indirection {
            url: url.to_string(),
            source,
        };
        let root = self.vfs.root(url).map_err(indirection)?;
        self.vfs.real_url(&root).map_err(indirection)
    }
}
