use serde::{Deserialize, Serialize};

use super::naming::to_camel_case;

/// The four kinds of schema type, in visitation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeKind {
    Scalar,
    Object,
    Enum,
    Input,
}

/// A named type in the introspected schema.
///
/// Closed union: every consumer matches exhaustively, so a new kind cannot be
/// added without updating each of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDef {
    Scalar(ScalarDef),
    Object(ObjectDef),
    Enum(EnumDef),
    Input(InputDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar(s) => &s.name,
            TypeDef::Object(o) => &o.name,
            TypeDef::Enum(e) => &e.name,
            TypeDef::Input(i) => &i.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Scalar(_) => TypeKind::Scalar,
            TypeDef::Object(_) => TypeKind::Object,
            TypeDef::Enum(_) => TypeKind::Enum,
            TypeDef::Input(_) => TypeKind::Input,
        }
    }
}

/// An opaque scalar handle exposed by the engine (e.g. a content digest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An addressable API object with callable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One callable field on an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub args: Vec<ArgDef>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Usage context: fields marked module-only are rendered only when
    /// generating extension-module code, not a plain client.
    #[serde(default)]
    pub module_only: bool,
}

/// A typed argument to an object field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A closed set of named values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A bag of named typed fields passed into the engine by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<InputFieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFieldDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub optional: bool,
}

/// Reference to a type by name, with list/optional wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub optional: bool,
}

impl TypeRef {
    pub fn named(name: &str) -> Self {
        TypeRef {
            name: name.to_string(),
            list: false,
            optional: false,
        }
    }

    pub fn list_of(name: &str) -> Self {
        TypeRef {
            name: name.to_string(),
            list: true,
            optional: false,
        }
    }

    /// Map the reference to the Rust type it renders as.
    ///
    /// Builtin scalars map to primitives; every other name maps to the
    /// CamelCase type the generator emits for it.
    pub fn rust_type(&self) -> String {
        let base = match self.name.as_str() {
            "String" => "String".to_string(),
            "Int" => "i32".to_string(),
            "Float" => "f64".to_string(),
            "Boolean" => "bool".to_string(),
            other => to_camel_case(other),
        };
        let base = if self.list {
            format!("Vec<{base}>")
        } else {
            base
        };
        if self.optional {
            format!("Option<{base}>")
        } else {
            base
        }
    }

    /// Whether this reference points at a schema-defined type rather than a
    /// builtin scalar.
    pub fn is_named(&self) -> bool {
        !matches!(self.name.as_str(), "String" | "Int" | "Float" | "Boolean")
    }
}

/// The introspected type system, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl Schema {
    pub fn scalars(&self) -> impl Iterator<Item = &ScalarDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Scalar(s) => Some(s),
            _ => None,
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Object(o) => Some(o),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn inputs(&self) -> impl Iterator<Item = &InputDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Input(i) => Some(i),
            _ => None,
        })
    }

    /// Look a type up by name, e.g. to resolve a forward reference while
    /// rendering another type.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Deliver every type exactly once, grouped by kind in the fixed order
    /// scalars, objects, enums, inputs. Within a kind, declaration order is
    /// preserved, so repeated visits over the same schema are identical.
    pub fn visit<E>(&self, mut f: impl FnMut(&TypeDef) -> Result<(), E>) -> Result<(), E> {
        for kind in [
            TypeKind::Scalar,
            TypeKind::Object,
            TypeKind::Enum,
            TypeKind::Input,
        ] {
            for t in self.types.iter().filter(|t| t.kind() == kind) {
                f(t)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema {
            types: vec![
                TypeDef::Object(ObjectDef {
                    name: "Container".into(),
                    description: String::new(),
                    fields: vec![],
                }),
                TypeDef::Scalar(ScalarDef {
                    name: "ContainerId".into(),
                    description: String::new(),
                }),
                TypeDef::Enum(EnumDef {
                    name: "CacheSharingMode".into(),
                    description: String::new(),
                    values: vec![],
                }),
                TypeDef::Input(InputDef {
                    name: "BuildArg".into(),
                    description: String::new(),
                    fields: vec![],
                }),
            ],
        }
    }

    #[test]
    fn visit_groups_by_kind() {
        let mut seen = Vec::new();
        schema()
            .visit::<()>(|t| {
                seen.push(t.name().to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(
            seen,
            vec!["ContainerId", "Container", "CacheSharingMode", "BuildArg"]
        );
    }

    #[test]
    fn visit_delivers_each_type_once() {
        let mut count = 0usize;
        schema()
            .visit::<()>(|_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn rust_type_mapping() {
        assert_eq!(TypeRef::named("String").rust_type(), "String");
        assert_eq!(TypeRef::named("Int").rust_type(), "i32");
        assert_eq!(TypeRef::named("Boolean").rust_type(), "bool");
        assert_eq!(TypeRef::named("ContainerId").rust_type(), "ContainerId");
        assert_eq!(TypeRef::list_of("String").rust_type(), "Vec<String>");
        let opt = TypeRef {
            name: "Int".into(),
            list: false,
            optional: true,
        };
        assert_eq!(opt.rust_type(), "Option<i32>");
    }
}
