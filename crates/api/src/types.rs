use serde::Serialize;

/// A type materialized from a class file on the class path.
///
/// Only produced once the type and every one of its supertypes resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeHandle {
    /// Fully qualified, dot separated name.
    pub name: String,
    pub super_class: Option<String>,
    /// Directly implemented (or extended, for interfaces) interfaces.
    pub interfaces: Vec<String>,
    /// Every transitively resolved supertype, nearest first, without duplicates.
    pub ancestors: Vec<String>,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub is_annotation: bool,
    pub is_enum: bool,
}

impl TypeHandle {
    /// Simple name: the part after the last `.`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    /// Whether a value of this type can be assigned to `name`.
    pub fn is_assignable_to(&self, name: &str) -> bool {
        self.name == name || self.ancestors.iter().any(|a| a == name)
    }

    /// A concrete type that can be assigned to `name`, excluding `name` itself.
    pub fn is_concrete_subtype_of(&self, name: &str) -> bool {
        self.name != name && !self.is_interface && !self.is_abstract && self.is_assignable_to(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str, ancestors: &[&str]) -> TypeHandle {
        TypeHandle {
            name: name.to_string(),
            super_class: Some("java.lang.Object".to_string()),
            interfaces: vec![],
            ancestors: ancestors.iter().map(|a| a.to_string()).collect(),
            is_interface: false,
            is_abstract: false,
            is_annotation: false,
            is_enum: false,
        }
    }

    #[test]
    fn test_names() {
        let h = handle("org.example.dummy.Foo", &[]);
        assert_eq!(h.simple_name(), "Foo");
        assert_eq!(h.package(), "org.example.dummy");
    }

    #[test]
    fn test_assignability() {
        let h = handle(
            "org.example.Impl",
            &["org.example.Base", "java.lang.Object", "org.example.Marker"],
        );
        assert!(h.is_assignable_to("org.example.Marker"));
        assert!(h.is_assignable_to("org.example.Impl"));
        assert!(!h.is_assignable_to("org.example.Other"));
        assert!(h.is_concrete_subtype_of("org.example.Marker"));
        assert!(!h.is_concrete_subtype_of("org.example.Impl"));

        let mut abstract_impl = h.clone();
        abstract_impl.is_abstract = true;
        assert!(!abstract_impl.is_concrete_subtype_of("org.example.Marker"));
    }
}
