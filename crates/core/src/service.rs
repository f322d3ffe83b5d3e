//! Scanner facade.
//!
//! Dispatches on the location prefix: `filesystem:` locations go to the
//! [`FileSystemScanner`], everything else to the [`ClassPathScanner`].

use crate::classpath::ClassPath;
use crate::config::ScannerConfig;
use crate::detect::Frameworks;
use crate::materialize::ClassScan;
use crate::scan::{
    ClassPathScanner, DiscoveryReport, FileSystemScanner, NamePredicate, ResourceAndClassScanner,
    TypePredicate,
};
use cpscan_api::{
    CapabilityProbe, Environment, Location, LocationEnumerator, Resource, ResourceLoader, ScanError,
    ScanResult, TypeHandle, TypeLoader,
};
use std::sync::Arc;
use tracing::info;

pub struct Scanner {
    classpath: ClassPathScanner,
    filesystem: FileSystemScanner,
}

impl Scanner {
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::default()
    }

    /// Scanner over the given class path with default settings.
    pub fn for_classpath(classpath: ClassPath) -> Self {
        Self::builder().classpath(classpath).build()
    }

    fn scanner_for(&self, location: &Location) -> &dyn ResourceAndClassScanner {
        if location.is_filesystem() {
            &self.filesystem
        } else {
            &self.classpath
        }
    }

    /// Resources below the location `descriptor` whose names match `predicate`.
    pub fn scan_for_resources(
        &self,
        descriptor: &str,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<Box<dyn Resource>>> {
        self.scan_location_for_resources(&Location::parse(descriptor)?, predicate)
    }

    pub fn scan_location_for_resources(
        &self,
        location: &Location,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<Vec<Box<dyn Resource>>> {
        self.scanner_for(location).scan_for_resources(location, predicate)
    }

    /// Loaded types below the location `descriptor` matching `predicate`.
    pub fn scan_for_classes(
        &self,
        descriptor: &str,
        predicate: TypePredicate<'_>,
    ) -> ScanResult<Vec<TypeHandle>> {
        let location = Location::parse(descriptor)?;
        self.scanner_for(&location).scan_for_classes(&location, predicate)
    }

    /// Like [`scan_for_classes`](Self::scan_for_classes), also reporting the
    /// candidates that could not be loaded.
    pub fn scan_for_classes_with_report(
        &self,
        descriptor: &str,
        predicate: TypePredicate<'_>,
    ) -> ScanResult<ClassScan> {
        let location = Location::parse(descriptor)?;
        if location.is_filesystem() {
            return Err(ScanError::UnsupportedClassScan {
                location: location.descriptor(),
            });
        }
        self.classpath.scan_for_classes_with_report(&location, predicate)
    }

    /// Resource names below a namespace location, with the skipped URLs.
    pub fn discover(
        &self,
        descriptor: &str,
        predicate: NamePredicate<'_>,
    ) -> ScanResult<DiscoveryReport> {
        let location = Location::parse(descriptor)?;
        self.classpath.find_resource_names(&location, predicate)
    }

    pub fn classpath_scanner(&self) -> &ClassPathScanner {
        &self.classpath
    }
}

/// Assembles a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    classpath: Option<ClassPath>,
    environment: Option<(Arc<dyn ResourceLoader>, Arc<dyn TypeLoader>)>,
    frameworks: Frameworks,
    probe: Option<Arc<dyn CapabilityProbe>>,
    config: ScannerConfig,
    enumerators: Vec<(String, Arc<dyn LocationEnumerator>)>,
}

impl ScannerBuilder {
    /// Scans the given class path. Its bootstrap packages are taken from the
    /// configuration.
    pub fn classpath(mut self, classpath: ClassPath) -> Self {
        self.classpath = Some(classpath);
        self.environment = None;
        self
    }

    /// Scans a custom environment instead of a [`ClassPath`].
    pub fn environment<E: Environment + 'static>(mut self, environment: Arc<E>) -> Self {
        let resources: Arc<dyn ResourceLoader> = environment.clone();
        let types: Arc<dyn TypeLoader> = environment;
        self.environment = Some((resources, types));
        self.classpath = None;
        self
    }

    pub fn frameworks(mut self, frameworks: Frameworks) -> Self {
        self.frameworks = frameworks;
        self
    }

    /// Overrides capability detection, which defaults to the registered
    /// frameworks.
    pub fn probe(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn register_enumerator(
        mut self,
        scheme: impl Into<String>,
        enumerator: Arc<dyn LocationEnumerator>,
    ) -> Self {
        self.enumerators.push((scheme.into(), enumerator));
        self
    }

    pub fn build(self) -> Scanner {
        let config = self.config;
        let mut classpath = match (self.environment, self.classpath) {
            (Some((resources, types)), _) => ClassPathScanner::from_loaders(resources, types),
            (None, Some(classpath)) => ClassPathScanner::new(Arc::new(
                classpath.with_bootstrap_packages(config.bootstrap_packages.clone()),
            )),
            (None, None) => ClassPathScanner::new(Arc::new(ClassPath::new(Vec::new()))),
        };

        classpath = classpath.with_frameworks(self.frameworks);
        if let Some(probe) = self.probe {
            classpath = classpath.with_probe(probe);
        }
        for (scheme, enumerator) in self.enumerators {
            classpath = classpath.register_enumerator(scheme, enumerator);
        }
        info!(
            "Scanner ready ({} ignored prefixes, {} bootstrap packages)",
            config.ignored_prefixes.len(),
            config.bootstrap_packages.len()
        );

        Scanner {
            classpath: classpath.with_config(config),
            filesystem: FileSystemScanner::new(),
        }
    }
}
