pub mod enumerator;
pub mod environment;
pub mod error;
pub mod filter;
pub mod framework;
pub mod location;
pub mod resource;
pub mod types;

// Re-export commonly used types
pub use enumerator::{LocationEnumerator, ResourceNames};
pub use environment::{
    Capability, CapabilityProbe, Environment, HostFlavor, ResourceLoader, TypeLoader,
};
pub use error::{BoxError, LoadError, ScanError, ScanResult};
pub use filter::FilterResource;
pub use framework::{Bundle, BundleFramework, VirtualFile, VirtualFileSystemV2, VirtualFileSystemV3};
pub use location::{Location, LocationPrefix};
pub use resource::{Charset, Resource};
pub use types::TypeHandle;
pub use url::Url;
