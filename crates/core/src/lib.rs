pub mod logging;
pub mod util;

pub mod cache;
pub mod classpath;
pub mod config;
pub mod content;
pub mod detect;
pub mod enumerator;
pub mod materialize;
pub mod resolver;
pub mod resource;
pub mod scan;
pub mod service;

pub use cache::{CacheStats, DiscoveryCache};
pub use classpath::{ClassPath, ClassPathEntry};
pub use config::ScannerConfig;
pub use detect::{EnvironmentDetection, Frameworks};
pub use materialize::ClassScan;
pub use resource::{ClassPathResource, FileSystemResource};
pub use scan::{
    ClassPathScanner, DiscoveryReport, FileSystemScanner, ResourceAndClassScanner, SkippedUrl,
};
pub use service::{Scanner, ScannerBuilder};
