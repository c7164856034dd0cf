//! Resolved type model.
//!
//! `ResolvedType` is what a schema fragment turns into after resolution.
//! It is purely structural; textual rendering lives in the `emit` module.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Primitive kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    /// `integer` and `number` both land here.
    Number,
    Boolean,
    Null,
    /// `string` + `format: binary` (multipart/file payloads).
    Binary,
    /// Any other declared kind, passed through verbatim.
    Other(String),
}

/// One field of an [`ResolvedType::ObjectShape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: ResolvedType,
    pub optional: bool,
}

/// Structured result of resolving one schema fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Primitive(PrimitiveKind),
    /// Named schema, by its raw component name.
    Reference(String),
    ArrayOf(Box<ResolvedType>),
    /// Tuple-style `items: [..]`.
    TupleOf(Vec<ResolvedType>),
    /// Properties in document order.
    ObjectShape(IndexMap<String, Field>),
    UnionOf(Vec<ResolvedType>),
    IntersectionOf(Vec<ResolvedType>),
    /// Registry key of an enum entry (carries the enum marker).
    EnumRef(String),
    /// Open object without a known shape.
    DynamicMap,
    /// Open object that declared a `title`.
    NamedObject,
    /// Object whose `additionalProperties` is a schema.
    MapOf(Box<ResolvedType>),
    Nullable(Box<ResolvedType>),
    /// No response body.
    Void,
}

impl ResolvedType {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        Self::Primitive(PrimitiveKind::Number)
    }

    pub fn array_of(inner: Self) -> Self {
        Self::ArrayOf(Box::new(inner))
    }

    /// Wrap in `Nullable`, leaving already-nullable types alone.
    pub fn into_nullable(self) -> Self {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Whether this type declares as an open `{[key:string]:any}` interface.
    pub fn is_open(&self) -> bool {
        match self {
            Self::DynamicMap | Self::NamedObject => true,
            Self::ObjectShape(fields) => fields.is_empty(),
            _ => false,
        }
    }

    /// Names this type points at (`Reference` and `EnumRef`), recursively.
    pub fn referenced_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Reference(name) | Self::EnumRef(name) => {
                names.insert(name.clone());
            }
            Self::ArrayOf(inner) | Self::MapOf(inner) | Self::Nullable(inner) => {
                inner.collect_names(names);
            }
            Self::TupleOf(members) | Self::UnionOf(members) | Self::IntersectionOf(members) => {
                for member in members {
                    member.collect_names(names);
                }
            }
            Self::ObjectShape(fields) => {
                for field in fields.values() {
                    field.ty.collect_names(names);
                }
            }
            Self::Primitive(_) | Self::DynamicMap | Self::NamedObject | Self::Void => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_nullable_is_not_doubled() {
        let ty = ResolvedType::string().into_nullable().into_nullable();
        assert_eq!(
            ty,
            ResolvedType::Nullable(Box::new(ResolvedType::string()))
        );
    }

    #[test]
    fn test_referenced_names_walks_every_branch() {
        let mut fields = IndexMap::new();
        fields.insert(
            "pet".to_string(),
            Field {
                ty: ResolvedType::Reference("Pet".into()),
                optional: false,
            },
        );
        let ty = ResolvedType::UnionOf(vec![
            ResolvedType::array_of(ResolvedType::EnumRef("Status#EnumTypeSuffix".into())),
            ResolvedType::ObjectShape(fields),
            ResolvedType::MapOf(Box::new(ResolvedType::Reference("Tag".into()))),
        ]);

        let names: Vec<_> = ty.referenced_names().into_iter().collect();
        assert_eq!(names, ["Pet", "Status#EnumTypeSuffix", "Tag"]);
    }

    #[test]
    fn test_is_open() {
        assert!(ResolvedType::DynamicMap.is_open());
        assert!(ResolvedType::NamedObject.is_open());
        assert!(ResolvedType::ObjectShape(IndexMap::new()).is_open());
        assert!(!ResolvedType::string().is_open());
    }
}
