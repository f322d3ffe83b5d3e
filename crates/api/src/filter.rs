//! Ready-made resource name predicates.

/// Constructors for the common resource name predicates.
pub struct FilterResource;

impl FilterResource {
    /// Matches names whose file name (text after the last `/`) starts with
    /// `prefix` and ends with `suffix`.
    pub fn by_prefix_suffix(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> impl Fn(&str) -> bool + Clone + Send + Sync {
        let prefix = prefix.into();
        let suffix = suffix.into();
        move |name: &str| {
            let file_name = name.rsplit('/').next().unwrap_or(name);
            file_name.starts_with(&prefix) && file_name.ends_with(&suffix)
        }
    }

    /// Matches names ending with `suffix`.
    pub fn by_suffix(suffix: impl Into<String>) -> impl Fn(&str) -> bool + Clone + Send + Sync {
        let suffix = suffix.into();
        move |name: &str| name.ends_with(&suffix)
    }

    /// Matches names starting with `prefix`.
    pub fn by_prefix(prefix: impl Into<String>) -> impl Fn(&str) -> bool + Clone + Send + Sync {
        let prefix = prefix.into();
        move |name: &str| name.starts_with(&prefix)
    }
}
