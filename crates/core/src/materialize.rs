//! Turns discovered names into resource handles or loaded types.

use crate::classpath::CLASS_SUFFIX;
use crate::resource::ClassPathResource;
use cpscan_api::{LoadError, ResourceLoader, TypeHandle, TypeLoader};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

const MODULE_DESCRIPTOR: &str = "module-info";

/// Dotted type name of a class file resource, `None` for anything that is
/// not a class file or is a module descriptor.
pub fn class_name_of(resource_name: &str) -> Option<String> {
    let stem = resource_name.strip_suffix(CLASS_SUFFIX)?;
    let class_name = stem.replace(['/', '\\'], ".");
    let simple = class_name.rsplit('.').next().unwrap_or(&class_name);
    if simple == MODULE_DESCRIPTOR {
        return None;
    }
    Some(class_name)
}

/// Wraps each name into a lazily loaded handle. No I/O happens here.
pub fn to_resources<'a>(
    names: impl IntoIterator<Item = &'a String>,
    loader: &Arc<dyn ResourceLoader>,
) -> Vec<ClassPathResource> {
    names
        .into_iter()
        .map(|name| {
            trace!("... found resource: {}", name);
            ClassPathResource::new(name.clone(), loader.clone())
        })
        .collect()
}

/// Outcome of a class scan: the matching types and the candidates that
/// could not be loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassScan {
    pub classes: Vec<TypeHandle>,
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<LoadError>,
}

fn serialize_failures<S: serde::Serializer>(
    failures: &[LoadError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(|f| f.to_string()))
}

/// Loads every class file candidate and keeps the types matching
/// `predicate`, in discovery order. A candidate that fails to load is
/// recorded and dropped.
pub fn to_classes<'a>(
    names: impl IntoIterator<Item = &'a String>,
    loader: &dyn TypeLoader,
    predicate: &dyn Fn(&TypeHandle) -> bool,
) -> ClassScan {
    let mut scan = ClassScan::default();
    for name in names {
        let Some(class_name) = class_name_of(name) else {
            continue;
        };
        match loader.load_type(&class_name) {
            Ok(handle) => {
                if predicate(&handle) {
                    trace!("... matched class: {}", class_name);
                    scan.classes.push(handle);
                }
            }
            Err(e) => {
                debug!("... class {} could not be loaded and will be ignored: {}", class_name, e);
                scan.failures.push(e);
            }
        }
    }
    scan
}
