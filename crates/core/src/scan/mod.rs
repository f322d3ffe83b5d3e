//! Scanners for namespace and plain filesystem locations.

pub mod classpath;
pub mod filesystem;

pub use classpath::{ClassPathScanner, DiscoveryReport, SkippedUrl};
pub use filesystem::FileSystemScanner;

use cpscan_api::{Location, Resource, ScanResult, TypeHandle};

/// Name predicate applied to discovered resource names.
pub type NamePredicate<'a> = &'a dyn Fn(&str) -> bool;

/// Predicate applied to loaded types.
pub type TypePredicate<'a> = &'a dyn Fn(&TypeHandle) -> bool;

/// Scans one kind of location for resources and classes.
pub trait ResourceAndClassScanner: Send + Sync {
    fn scan_for_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<Box<dyn Resource>>>;

    fn scan_for_classes(
        &self,
        location: &Location,
        predicate: TypePredicate<'_>,
    ) -> ScanResult<Vec<TypeHandle>>;
}
