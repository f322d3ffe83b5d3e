use super::{NamePredicate, ResourceAndClassScanner, TypePredicate};
use crate::resource::FileSystemResource;
use cpscan_api::{Location, Resource, ScanError, ScanResult, TypeHandle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Scans `filesystem:` locations with a plain recursive walk.
#[derive(Debug, Default, Clone)]
pub struct FileSystemScanner;

impl FileSystemScanner {
    pub fn new() -> Self {
        Self
    }

    /// Files below `location` whose full path matches `predicate`, ordered
    /// by path. A location that is not a readable directory yields nothing.
    pub fn find_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> Vec<FileSystemResource> {
        let dir = Path::new(location.path());
        if !dir.is_dir() {
            debug!("Unable to resolve location filesystem:{}", location.path());
            return Vec::new();
        }
        let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        debug!("scanning in path: {}", dir.display());

        // Keyed on the `/` separated path so ordering is by name, not by component.
        let paths: BTreeMap<String, PathBuf> = WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let path = entry.into_path();
                (path.to_string_lossy().replace('\\', "/"), path)
            })
            .collect();

        paths
            .into_values()
            .map(FileSystemResource::new)
            .filter(|resource| predicate(resource.location()))
            .inspect(|resource| debug!("Found filesystem resource: {}", resource.location()))
            .collect()
    }
}

impl ResourceAndClassScanner for FileSystemScanner {
    fn scan_for_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<Box<dyn Resource>>> {
        Ok(self
            .find_resources(location, predicate)
            .into_iter()
            .map(|r| Box::new(r) as Box<dyn Resource>)
            .collect())
    }

    /// Types are only loaded from namespace locations.
    fn scan_for_classes(
        &self,
        location: &Location,
        _predicate: TypePredicate<'_>,
    ) -> ScanResult<Vec<TypeHandle>> {
        Err(ScanError::UnsupportedClassScan {
            location: location.descriptor(),
        })
    }
}
