use crate::error::ScanResult;
use std::collections::BTreeSet;
use url::Url;

/// Ordered, duplicate free set of resource names relative to the namespace root.
pub type ResourceNames = BTreeSet<String>;

/// Lists every resource below a physical location.
///
/// Implementations are stateless; results are cached by the caller.
pub trait LocationEnumerator: Send + Sync {
    /// Stable name, used in logs and as part of the name cache key.
    fn name(&self) -> &str;

    /// Finds every resource name below `root_url`.
    ///
    /// `location` is the namespace path the URL was resolved from, without
    /// leading or trailing separators. Returned names start with it when it
    /// is non-empty.
    fn find_resource_names(&self, location: &str, root_url: &Url) -> ScanResult<ResourceNames>;
}
