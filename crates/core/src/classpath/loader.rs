//! Type loading from class files.
//!
//! A type only loads when its whole supertype chain resolves, either from the
//! class path or from a bootstrap package.

use super::ClassPath;
use cpscan_api::{LoadError, TypeHandle, TypeLoader};
use ristretto_classfile::{ClassAccessFlags, ClassFile};
use std::collections::HashSet;
use std::io::Cursor;

pub(crate) const CLASS_SUFFIX: &str = ".class";

/// Class path resource name of a dotted type name.
pub(crate) fn resource_name(type_name: &str) -> String {
    format!("{}{}", type_name.replace('.', "/"), CLASS_SUFFIX)
}

fn class_name(class: &ClassFile, index: u16, owner: &str) -> Result<String, LoadError> {
    class
        .constant_pool
        .try_get_class(index)
        .map(|name| name.replace('/', "."))
        .map_err(|e| LoadError::Malformed {
            name: owner.to_string(),
            reason: format!("bad class reference #{index}: {e:?}"),
        })
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

impl ClassPath {
    fn load_with(
        &self,
        name: &str,
        visiting: &mut HashSet<String>,
    ) -> Result<TypeHandle, LoadError> {
        if let Some(cached) = self.types.get(name) {
            return cached.value().clone();
        }
        if !visiting.insert(name.to_string()) {
            return Err(LoadError::Malformed {
                name: name.to_string(),
                reason: "circular inheritance".to_string(),
            });
        }

        let result = self.define(name, visiting);
        visiting.remove(name);
        self.types.insert(name.to_string(), result.clone());
        result
    }

    fn define(
        &self,
        name: &str,
        visiting: &mut HashSet<String>,
    ) -> Result<TypeHandle, LoadError> {
        let bytes = self
            .read_bytes(&resource_name(name))
            .map_err(|e| LoadError::Io {
                name: name.to_string(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
            })?;

        let class = ClassFile::from_bytes(&mut Cursor::new(bytes)).map_err(|e| {
            LoadError::Malformed {
                name: name.to_string(),
                reason: format!("{e:?}"),
            }
        })?;

        let declared = class_name(&class, class.this_class, name)?;
        if declared != name {
            return Err(LoadError::Malformed {
                name: name.to_string(),
                reason: format!("wrong name: {declared}"),
            });
        }

        let super_class = match class.super_class {
            0 => None,
            index => Some(class_name(&class, index, name)?),
        };
        let interfaces = class
            .interfaces
            .iter()
            .map(|index| class_name(&class, *index, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ancestors = Vec::new();
        for supertype in super_class.iter().chain(interfaces.iter()) {
            push_unique(&mut ancestors, supertype);
            if self.is_bootstrap(supertype) {
                continue;
            }
            match self.load_with(supertype, visiting) {
                Ok(parent) => {
                    for ancestor in &parent.ancestors {
                        push_unique(&mut ancestors, ancestor);
                    }
                }
                Err(LoadError::MissingDependency { missing, .. }) => {
                    return Err(LoadError::MissingDependency {
                        name: name.to_string(),
                        missing,
                    });
                }
                Err(_) => {
                    return Err(LoadError::MissingDependency {
                        name: name.to_string(),
                        missing: supertype.clone(),
                    });
                }
            }
        }

        let flags = class.access_flags;
        Ok(TypeHandle {
            name: declared,
            super_class,
            interfaces,
            ancestors,
            is_interface: flags.contains(ClassAccessFlags::INTERFACE),
            is_abstract: flags.contains(ClassAccessFlags::ABSTRACT),
            is_annotation: flags.contains(ClassAccessFlags::ANNOTATION),
            is_enum: flags.contains(ClassAccessFlags::ENUM),
        })
    }
}

impl TypeLoader for ClassPath {
    fn load_type(&self, name: &str) -> Result<TypeHandle, LoadError> {
        let mut visiting = HashSet::new();
        self.load_with(name, &mut visiting)
    }
}
