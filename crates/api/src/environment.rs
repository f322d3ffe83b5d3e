//! Seams to the host environment the scanner runs against.
//!
//! The scanner never touches storage directly to find *where* a namespace
//! lives; it asks a [`ResourceLoader`]. Types are materialized through a
//! [`TypeLoader`], and optional frameworks are detected through a
//! [`CapabilityProbe`].

use crate::error::LoadError;
use crate::types::TypeHandle;
use std::io::{self, Read};
use url::Url;

/// Host variants that need special handling of located URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostFlavor {
    #[default]
    Standard,
    /// Hosts that hand back percent-encoded URLs which must be decoded first.
    PercentEncoded,
}

/// Path lookup over the class path.
pub trait ResourceLoader: Send + Sync + std::fmt::Debug {
    /// Every physical URL backing the namespace `path`, in class path order.
    ///
    /// An absent path is not an error: it yields an empty list.
    fn resources(&self, path: &str) -> io::Result<Vec<Url>>;

    /// Opens the first resource named `name`, or `None` when nothing matches.
    fn open(&self, name: &str) -> io::Result<Option<Box<dyn Read + Send>>>;

    fn flavor(&self) -> HostFlavor {
        HostFlavor::Standard
    }
}

/// Type materialization.
pub trait TypeLoader: Send + Sync {
    /// Loads the type with the given dotted name, resolving its supertypes.
    fn load_type(&self, name: &str) -> Result<TypeHandle, LoadError>;

    fn is_present(&self, name: &str) -> bool {
        self.load_type(name).is_ok()
    }
}

/// Both halves of a class path environment.
pub trait Environment: ResourceLoader + TypeLoader {}

impl<T: ResourceLoader + TypeLoader + ?Sized> Environment for T {}

/// Optional backend capabilities the scanner can take advantage of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Virtual filesystem whose URLs need one indirection to reach real storage.
    VirtualFsV2,
    /// Virtual filesystem with its own recursive listing.
    VirtualFsV3,
    /// Module bundle framework.
    Bundles,
}

impl Capability {
    /// Well-known name probed to detect the capability.
    pub fn marker(&self) -> &'static str {
        match self {
            Capability::VirtualFsV2 => "vfs.v2.VirtualFileSystem",
            Capability::VirtualFsV3 => "vfs.v3.VirtualFileSystem",
            Capability::Bundles => "bundle.BundleFramework",
        }
    }
}

/// Answers whether a named capability exists in the environment.
pub trait CapabilityProbe: Send + Sync {
    fn is_present(&self, marker: &str) -> bool;
}
