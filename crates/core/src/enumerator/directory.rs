use crate::config::ScannerConfig;
use crate::util;
use cpscan_api::{LocationEnumerator, ResourceNames, ScanResult};
use std::path::Path;
use tracing::{debug, trace};
use url::Url;
use walkdir::{DirEntry, WalkDir};

/// Lists `file:` roots by walking the directory tree.
pub struct DirectoryEnumerator {
    config: ScannerConfig,
}

impl DirectoryEnumerator {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }
}

/// Namespace name of a walked entry: `location` followed by the entry path
/// relative to the scanned folder.
fn resource_name(folder: &Path, location: &str, entry: &DirEntry) -> Option<String> {
    let relative = entry.path().strip_prefix(folder).ok()?;
    let relative = relative.to_string_lossy().replace('\\', "/");
    Some(if location.is_empty() {
        relative
    } else {
        format!("{location}/{relative}")
    })
}

impl LocationEnumerator for DirectoryEnumerator {
    fn name(&self) -> &str {
        "directory"
    }

    fn find_resource_names(&self, location: &str, root_url: &Url) -> ScanResult<ResourceNames> {
        let folder = util::to_file_path(root_url);
        let mut names = ResourceNames::new();
        if !folder.is_dir() {
            debug!("Not a directory, nothing to scan: {}", folder.display());
            return Ok(names);
        }
        trace!("scan starting at {} ({})", folder.display(), location);

        let walker = WalkDir::new(&folder)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                resource_name(&folder, location, entry)
                    .is_none_or(|name| !self.config.is_ignored(&name))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = resource_name(&folder, location, &entry) {
                names.insert(name);
            }
        }

        Ok(names)
    }
}
