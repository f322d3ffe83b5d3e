use cpscan_api::{Bundle, BundleFramework, LocationEnumerator, ResourceNames, ScanError, ScanResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use url::Url;

/// Bundle resource hosts start with the numeric bundle id.
static BUNDLE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+").expect("bundle id pattern is valid"));

/// Lists `bundle:` and `bundleresource:` URLs through the bundle framework.
pub struct BundleEnumerator {
    framework: Arc<dyn BundleFramework>,
}

impl BundleEnumerator {
    pub fn new(framework: Arc<dyn BundleFramework>) -> Self {
        Self { framework }
    }

    fn bundle_id(host: &str) -> ScanResult<u64> {
        BUNDLE_ID
            .find(host)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| ScanError::MalformedBundleReference {
                host: host.to_string(),
            })
    }

    /// Bundle addressed by the URL host, or the current bundle when no
    /// bundle has that id.
    fn target_bundle(&self, root_url: &Url) -> ScanResult<Arc<dyn Bundle>> {
        let id = Self::bundle_id(root_url.host_str().unwrap_or_default())?;
        Ok(self
            .framework
            .bundle(id)
            .unwrap_or_else(|| self.framework.current_bundle()))
    }
}

impl LocationEnumerator for BundleEnumerator {
    fn name(&self) -> &str {
        "bundle"
    }

    fn find_resource_names(&self, _location: &str, root_url: &Url) -> ScanResult<ResourceNames> {
        let bundle = self.target_bundle(root_url)?;
        let entries = bundle
            .find_entries(root_url.path(), true)
            .map_err(|e| ScanError::backend(root_url, e))?;
        Ok(entries
            .iter()
            .map(|entry| {
                let path = entry.path();
                path.strip_prefix('/').unwrap_or(path).to_string()
            })
            .collect())
    }
}
