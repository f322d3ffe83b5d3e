use cpscan_api::{LoadError, Resource, TypeHandle};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
pub struct ResourceRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl ResourceRow {
    pub fn from_resource(resource: &dyn Resource) -> Self {
        Self {
            name: resource.filename().to_string(),
            location: resource.location().to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ClassRow {
    #[tabled(rename = "Class")]
    pub name: String,
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Extends")]
    pub super_class: String,
    #[tabled(rename = "Implements")]
    pub interfaces: String,
}

impl ClassRow {
    pub fn from_type(handle: &TypeHandle) -> Self {
        let kind = if handle.is_annotation {
            "annotation"
        } else if handle.is_interface {
            "interface"
        } else if handle.is_enum {
            "enum"
        } else if handle.is_abstract {
            "abstract class"
        } else {
            "class"
        };
        Self {
            name: handle.name.clone(),
            kind,
            super_class: handle.super_class.clone().unwrap_or_else(|| "-".to_string()),
            interfaces: if handle.interfaces.is_empty() {
                "-".to_string()
            } else {
                handle.interfaces.join(", ")
            },
        }
    }
}

#[derive(Tabled)]
pub struct FailureRow {
    #[tabled(rename = "Class")]
    pub name: String,
    #[tabled(rename = "Reason")]
    pub reason: String,
}

impl FailureRow {
    pub fn from_error(error: &LoadError) -> Self {
        Self {
            name: error.name().to_string(),
            reason: error.to_string(),
        }
    }
}
