//! File backed class path.
//!
//! An ordered list of directories and archives (`.jar`, `.zip`, `.war`).
//! It plays the role of the host environment: it locates namespace paths,
//! opens resources and loads types from class files.

mod loader;

pub(crate) use loader::CLASS_SUFFIX;

use crate::config::ScannerConfig;
use crate::util::{self, archive_root};
use cpscan_api::{HostFlavor, LoadError, ResourceLoader, TypeHandle};
use dashmap::DashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use url::Url;
use zip::ZipArchive;

/// One root of the class path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl ClassPathEntry {
    /// Classifies `path`: existing directories are directory roots, anything
    /// else is treated as an archive.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        if path.is_dir() {
            ClassPathEntry::Directory(path)
        } else {
            ClassPathEntry::Archive(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClassPathEntry::Directory(p) | ClassPathEntry::Archive(p) => p,
        }
    }
}

#[derive(Debug)]
pub struct ClassPath {
    entries: Vec<ClassPathEntry>,
    flavor: HostFlavor,
    bootstrap_packages: Vec<String>,
    /// Memoized load results, failures included.
    types: DashMap<String, Result<TypeHandle, LoadError>>,
}

impl ClassPath {
    pub fn new(entries: Vec<ClassPathEntry>) -> Self {
        Self {
            entries,
            flavor: HostFlavor::Standard,
            bootstrap_packages: ScannerConfig::default().bootstrap_packages,
            types: DashMap::new(),
        }
    }

    pub fn from_paths<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self::new(paths.into_iter().map(ClassPathEntry::from_path).collect())
    }

    /// Parses a platform path list such as `classes:lib/a.jar`.
    pub fn parse(path_list: &str) -> Self {
        Self::from_paths(std::env::split_paths(path_list))
    }

    pub fn with_flavor(mut self, flavor: HostFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_bootstrap_packages(mut self, packages: Vec<String>) -> Self {
        self.bootstrap_packages = packages;
        self.types.clear();
        self
    }

    pub fn entries(&self) -> &[ClassPathEntry] {
        &self.entries
    }

    fn is_bootstrap(&self, type_name: &str) -> bool {
        self.bootstrap_packages
            .iter()
            .any(|pkg| type_name.starts_with(pkg.as_str()))
    }

    /// Reads the full content of the first resource named `name`.
    fn read_bytes(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match self.open(name)? {
            Some(mut reader) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
            None => Ok(None),
        }
    }
}

/// Whether `name` stays below a class path root once joined to it. Absolute
/// names and `..` segments never resolve to anything.
fn is_contained(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn open_archive(archive: &Path) -> io::Result<ZipArchive<File>> {
    let file = File::open(archive)?;
    ZipArchive::new(file).map_err(io::Error::from)
}

fn archive_contains(archive: &ZipArchive<File>, path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    let dir = format!("{path}/");
    archive.file_names().any(|name| {
        let name = name.replace('\\', "/");
        name == path || name.starts_with(&dir)
    })
}

impl ResourceLoader for ClassPath {
    fn resources(&self, path: &str) -> io::Result<Vec<Url>> {
        let mut urls = Vec::new();
        if !is_contained(path) {
            debug!("{} is outside every class path root", path);
            return Ok(urls);
        }

        for entry in &self.entries {
            match entry {
                ClassPathEntry::Directory(root) => {
                    let target = if path.is_empty() {
                        root.clone()
                    } else {
                        root.join(path)
                    };
                    if target.exists() {
                        let url = Url::from_file_path(&target).map_err(|_| {
                            io::Error::new(
                                io::ErrorKind::InvalidInput,
                                format!("not an absolute path: {}", target.display()),
                            )
                        })?;
                        urls.push(url);
                    }
                }
                ClassPathEntry::Archive(archive) => {
                    if !archive.is_file() {
                        continue;
                    }
                    let zip = match open_archive(archive) {
                        Ok(zip) => zip,
                        Err(e) => {
                            warn!("Skipping unreadable archive {}: {}", archive.display(), e);
                            continue;
                        }
                    };
                    let entry_path = format!("{}{}", archive_root(archive), path);
                    if archive_contains(&zip, entry_path.trim_end_matches('/')) {
                        urls.push(util::archive_url(archive, &entry_path)?);
                    }
                }
            }
        }

        debug!("{} resolved to {} url(s)", path, urls.len());
        Ok(urls)
    }

    fn open(&self, name: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        if !is_contained(name) {
            return Ok(None);
        }
        for entry in &self.entries {
            match entry {
                ClassPathEntry::Directory(root) => {
                    let file = root.join(name);
                    if file.is_file() {
                        return Ok(Some(Box::new(File::open(file)?)));
                    }
                }
                ClassPathEntry::Archive(archive) => {
                    if !archive.is_file() {
                        continue;
                    }
                    let mut zip = match open_archive(archive) {
                        Ok(zip) => zip,
                        Err(e) => {
                            warn!("Skipping unreadable archive {}: {}", archive.display(), e);
                            continue;
                        }
                    };
                    let entry_name = format!("{}{}", archive_root(archive), name);
                    let Ok(mut zip_entry) = zip.by_name(&entry_name) else {
                        continue;
                    };
                    if zip_entry.is_dir() {
                        continue;
                    }
                    let mut bytes = Vec::new();
                    zip_entry.read_to_end(&mut bytes)?;
                    return Ok(Some(Box::new(Cursor::new(bytes))));
                }
            }
        }
        Ok(None)
    }

    fn flavor(&self) -> HostFlavor {
        self.flavor
    }
}
