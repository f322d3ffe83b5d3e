use std::io;

/// Boxed error returned by optional framework implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Unknown prefix, should be either filesystem: or classpath: {descriptor}")]
    InvalidLocation { descriptor: String },
    #[error("Unable to list {url}: {source}")]
    Backend {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("There's no bundle id in host '{host}'")]
    MalformedBundleReference { host: String },
    #[error("Virtual filesystem indirection failed for {url}: {source}")]
    Indirection {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("Unable to obtain a stream for resource: {name}")]
    ResourceUnavailable { name: String },
    #[error("Unable to load resource: {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("Class scanning requires a classpath location, got {location}")]
    UnsupportedClassScan { location: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScanError {
    pub fn backend(url: impl ToString, source: io::Error) -> Self {
        ScanError::Backend {
            url: url.to_string(),
            source,
        }
    }

    /// Whether the failure is confined to a single physical URL.
    ///
    /// Such failures are recorded and skipped; every other failure aborts the scan.
    pub fn is_url_local(&self) -> bool {
        matches!(
            self,
            ScanError::MalformedBundleReference { .. } | ScanError::Indirection { .. }
        )
    }
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Failure to materialize a single type from the class path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("class {name} not found")]
    NotFound { name: String },
    #[error("class {name} could not be loaded: missing dependency {missing}")]
    MissingDependency { name: String, missing: String },
    #[error("class {name} is malformed: {reason}")]
    Malformed { name: String, reason: String },
    #[error("class {name} could not be read: {reason}")]
    Io { name: String, reason: String },
}

impl LoadError {
    /// Name of the type the loader was asked for.
    pub fn name(&self) -> &str {
        match self {
            LoadError::NotFound { name }
            | LoadError::MissingDependency { name, .. }
            | LoadError::Malformed { name, .. }
            | LoadError::Io { name, .. } => name,
        }
    }
}
