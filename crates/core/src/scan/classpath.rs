//! Namespace scanning over a class path environment.
//!
//! For every physical URL backing a location the scanner resolves
//! indirection, picks the enumerator registered for the URL scheme and
//! lists the resource names below it. Each of these steps is cached in a
//! [`DiscoveryCache`].

use super::{NamePredicate, ResourceAndClassScanner, TypePredicate};
use crate::cache::DiscoveryCache;
use crate::config::ScannerConfig;
use crate::detect::{EnvironmentDetection, Frameworks};
use crate::enumerator::{
    ARCHIVE_SCHEMES, ArchiveEnumerator, BUNDLE_SCHEMES, BundleEnumerator, DirectoryEnumerator,
    FILE_SCHEMES, VFS_V2_SCHEMES, VFS_V3_SCHEMES, VfsV2Enumerator, VfsV3Enumerator,
};
use crate::materialize::{self, ClassScan};
use crate::resolver::{DefaultUrlResolver, UrlResolver, VfsV2UrlResolver};
use crate::resource::ClassPathResource;
use crate::util;
use cpscan_api::{
    CapabilityProbe, Environment, FilterResource, HostFlavor, Location, LocationEnumerator,
    Resource, ResourceLoader, ResourceNames, ScanError, ScanResult, TypeHandle, TypeLoader,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// A physical URL that contributed nothing to a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUrl {
    pub url: String,
    pub reason: String,
}

/// Resource names found for a location, plus the URLs that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub names: ResourceNames,
    pub skipped: Vec<SkippedUrl>,
}

impl DiscoveryReport {
    fn skip(&mut self, url: &Url, reason: impl ToString) {
        self.skipped.push(SkippedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        });
    }
}

pub struct ClassPathScanner {
    resources: Arc<dyn ResourceLoader>,
    types: Arc<dyn TypeLoader>,
    frameworks: Frameworks,
    detection: EnvironmentDetection,
    config: ScannerConfig,
    registered: HashMap<String, Arc<dyn LocationEnumerator>>,
    cache: DiscoveryCache,
}

impl ClassPathScanner {
    pub fn new<E: Environment + 'static>(environment: Arc<E>) -> Self {
        Self::from_loaders(environment.clone(), environment)
    }

    pub fn from_loaders(resources: Arc<dyn ResourceLoader>, types: Arc<dyn TypeLoader>) -> Self {
        let frameworks = Frameworks::none();
        Self {
            resources,
            types,
            detection: EnvironmentDetection::new(Arc::new(frameworks.clone())),
            frameworks,
            config: ScannerConfig::default(),
            registered: HashMap::new(),
            cache: DiscoveryCache::new(),
        }
    }

    /// Registers the optional frameworks; they also become the capability
    /// probe unless [`with_probe`](Self::with_probe) is called afterwards.
    pub fn with_frameworks(mut self, frameworks: Frameworks) -> Self {
        self.detection = EnvironmentDetection::new(Arc::new(frameworks.clone()));
        self.frameworks = frameworks;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.detection = EnvironmentDetection::new(probe);
        self
    }

    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `enumerator` for URLs with `scheme`, ahead of the built-in ones.
    pub fn register_enumerator(
        mut self,
        scheme: impl Into<String>,
        enumerator: Arc<dyn LocationEnumerator>,
    ) -> Self {
        self.registered.insert(scheme.into(), enumerator);
        self
    }

    pub fn cache(&self) -> &DiscoveryCache {
        &self.cache
    }

    pub fn detection(&self) -> &EnvironmentDetection {
        &self.detection
    }

    fn decodes_urls(&self) -> bool {
        self.config
            .decode_urls
            .unwrap_or(self.resources.flavor() == HostFlavor::PercentEncoded)
    }

    /// Every physical URL backing `location`. An absent location yields an
    /// empty list.
    pub fn location_urls(&self, location: &Location) -> ScanResult<Arc<Vec<Url>>> {
        self.cache.location_urls(location, || {
            debug!("determining location urls for {}", location);
            let urls = self
                .resources
                .resources(location.path())
                .map_err(|e| ScanError::backend(location, e))?;
            if urls.is_empty() {
                debug!("Unable to resolve location {}", location);
            }
            Ok(if self.decodes_urls() {
                urls.iter().map(util::decode_url).collect()
            } else {
                urls
            })
        })
    }

    fn url_resolver(&self, scheme: &str) -> Box<dyn UrlResolver> {
        if VfsV2UrlResolver::handles(scheme) && self.detection.is_vfs_v2() {
            if let Some(vfs) = &self.frameworks.vfs_v2 {
                return Box::new(VfsV2UrlResolver::new(vfs.clone()));
            }
        }
        Box::new(DefaultUrlResolver)
    }

    /// Enumerator for `scheme`, or `None` when the scheme is unsupported in
    /// this environment.
    pub fn enumerator_for(&self, scheme: &str) -> Option<Arc<dyn LocationEnumerator>> {
        self.cache.enumerator(scheme, || self.create_enumerator(scheme))
    }

    fn create_enumerator(&self, scheme: &str) -> Option<Arc<dyn LocationEnumerator>> {
        if let Some(enumerator) = self.registered.get(scheme) {
            return Some(enumerator.clone());
        }
        if FILE_SCHEMES.contains(&scheme) {
            return Some(Arc::new(DirectoryEnumerator::new(self.config.clone())));
        }
        if ARCHIVE_SCHEMES.contains(&scheme) {
            return Some(Arc::new(ArchiveEnumerator));
        }
        if VFS_V2_SCHEMES.contains(&scheme) && self.detection.is_vfs_v2() {
            let vfs = self.frameworks.vfs_v2.clone()?;
            return Some(Arc::new(VfsV2Enumerator::new(vfs)));
        }
        if VFS_V3_SCHEMES.contains(&scheme) && self.detection.is_vfs_v3() {
            let vfs = self.frameworks.vfs_v3.clone()?;
            return Some(Arc::new(VfsV3Enumerator::new(vfs)));
        }
        if BUNDLE_SCHEMES.contains(&scheme) && self.detection.is_bundles() {
            let bundles = self.frameworks.bundles.clone()?;
            return Some(Arc::new(BundleEnumerator::new(bundles)));
        }
        None
    }

    /// Names of every resource below `location` accepted by `predicate`.
    ///
    /// A URL whose scheme is unsupported, or whose indirection or bundle
    /// reference fails, is skipped and reported. A listing failure aborts
    /// the scan.
    pub fn find_resource_names(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<DiscoveryReport> {
        let mut report = DiscoveryReport::default();
        let mut all_names = ResourceNames::new();

        for location_url in self.location_urls(location)?.iter() {
            debug!("scanning URL: {}", location_url);

            let resolved = match self
                .url_resolver(location_url.scheme())
                .to_standard_url(location_url)
            {
                Ok(url) => url,
                Err(e) if e.is_url_local() => {
                    warn!("Skipping {}: {}", location_url, e);
                    report.skip(location_url, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let scheme = resolved.scheme();
            let Some(enumerator) = self.enumerator_for(scheme) else {
                warn!(
                    "Unable to scan location: {} (unsupported protocol: {})",
                    util::to_file_path(&resolved).display(),
                    scheme
                );
                report.skip(&resolved, format!("unsupported protocol: {scheme}"));
                continue;
            };

            let names = self.cache.resource_names(enumerator.name(), &resolved, || {
                enumerator.find_resource_names(location.path(), &resolved)
            });
            match names {
                Ok(names) => all_names.extend(names.iter().cloned()),
                Err(e) if e.is_url_local() => {
                    warn!("Skipping {}: {}", resolved, e);
                    report.skip(&resolved, e);
                }
                Err(e) => return Err(e),
            }
        }

        report.names = all_names.into_iter().filter(|name| predicate(name)).collect();
        Ok(report)
    }

    /// Resources below `location` whose names match `predicate`.
    pub fn find_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<ClassPathResource>> {
        let report = self.find_resource_names(location, predicate)?;
        Ok(materialize::to_resources(&report.names, &self.resources))
    }

    /// Loads every class file below `location` and keeps the types matching
    /// `predicate`, reporting the candidates that failed to load.
    pub fn scan_for_classes_with_report(
        &self,
        location: &Location,
        predicate: TypePredicate<'_>,
    ) -> ScanResult<ClassScan> {
        let class_files = FilterResource::by_suffix(".class");
        let report = self.find_resource_names(location, &class_files)?;
        debug!(
            "scanning for classes at {} found {} resources to check",
            location,
            report.names.len()
        );
        Ok(materialize::to_classes(&report.names, self.types.as_ref(), predicate))
    }
}

impl ResourceAndClassScanner for ClassPathScanner {
    fn scan_for_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<Box<dyn Resource>>> {
        Ok(self
            .find_resources(location, predicate)?
            .into_iter()
            .map(|r| Box::new(r) as Box<dyn Resource>)
            .collect())
    }

    fn scan_for_classes(
        &self,
        location: &Location,
        predicate: TypePredicate<'_>,
    ) -> ScanResult<Vec<TypeHandle>> {
        Ok(self.scan_for_classes_with_report(location, predicate)?.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classpath::ClassPath;
    use cpscan_api::{HostFlavor, LoadError};
    use std::fs;
    use std::io::{self, Read};

    /// Environment handing back fixed URLs for every path.
    #[derive(Debug)]
    struct FixedUrls {
        urls: Vec<Url>,
        flavor: HostFlavor,
    }

    impl ResourceLoader for FixedUrls {
        fn resources(&self, _path: &str) -> io::Result<Vec<Url>> {
            Ok(self.urls.clone())
        }

        fn open(&self, _name: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
            Ok(None)
        }

        fn flavor(&self) -> HostFlavor {
            self.flavor
        }
    }

    impl TypeLoader for FixedUrls {
        fn load_type(&self, name: &str) -> Result<TypeHandle, LoadError> {
            Err(LoadError::NotFound {
                name: name.to_string(),
            })
        }
    }

    #[test]
    fn test_unsupported_scheme_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("db")).unwrap();
        fs::write(temp.path().join("db/V1.sql"), "x").unwrap();

        let env = FixedUrls {
            urls: vec![
                Url::parse("ftp://example.org/db").unwrap(),
                Url::from_directory_path(temp.path().join("db")).unwrap(),
            ],
            flavor: HostFlavor::Standard,
        };
        let scanner = ClassPathScanner::new(Arc::new(env));
        let location = Location::parse("db").unwrap();
        let report = scanner.find_resource_names(&location, &|_| true).unwrap();

        assert_eq!(report.names.into_iter().collect::<Vec<_>>(), vec!["db/V1.sql"]);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("ftp"));
    }

    #[test]
    fn test_bundle_scheme_needs_capability() {
        let scanner = ClassPathScanner::new(Arc::new(ClassPath::new(vec![])));
        assert!(scanner.enumerator_for("bundle").is_none());
        assert!(scanner.enumerator_for("vfs").is_none());
        assert_eq!(scanner.enumerator_for("wsjar").unwrap().name(), "archive");
        assert_eq!(scanner.enumerator_for("file").unwrap().name(), "directory");
    }

    #[test]
    fn test_percent_encoded_host_urls_are_decoded() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("my app/db");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("V1.sql"), "x").unwrap();

        // The host hands back a doubly encoded URL.
        let encoded = Url::from_directory_path(&dir)
            .unwrap()
            .as_str()
            .replace("%20", "%2520");
        let env = FixedUrls {
            urls: vec![Url::parse(&encoded).unwrap()],
            flavor: HostFlavor::PercentEncoded,
        };
        let scanner = ClassPathScanner::new(Arc::new(env));
        let location = Location::parse("db").unwrap();

        let urls = scanner.location_urls(&location).unwrap();
        assert!(urls[0].as_str().contains("my%20app"));
        let report = scanner.find_resource_names(&location, &|_| true).unwrap();
        assert_eq!(report.names.len(), 1);
    }

    #[test]
    fn test_predicate_filters_names() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("db")).unwrap();
        fs::write(temp.path().join("db/V1.sql"), "x").unwrap();
        fs::write(temp.path().join("db/notes.md"), "x").unwrap();

        let classpath = ClassPath::from_paths([temp.path().to_path_buf()]);
        let scanner = ClassPathScanner::new(Arc::new(classpath));
        let location = Location::parse("classpath:db").unwrap();
        let resources = scanner
            .find_resources(&location, &FilterResource::by_suffix(".sql"))
            .unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].location(), "db/V1.sql");
    }
}
