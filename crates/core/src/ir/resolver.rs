//! Schema fragment -> [`ResolvedType`].
//!
//! Resolution checks the fragment in a fixed order and the first matching
//! shape wins:
//! 1. `$ref`
//! 2. `oneOf` / `anyOf`
//! 3. `allOf`
//! 4. `items`
//! 5. `enum` (writes into the registry)
//! 6. `properties`
//! 7. titled object
//! 8. other objects
//! 9. binary strings
//! 10. the declared primitive kind
//!
//! Nullability is applied afterwards as a separate pass. `$ref` targets are
//! never expanded, so recursion only follows the fragment itself and always
//! terminates, self-referential documents included.

use indexmap::IndexMap;

use crate::spec::{AdditionalProperties, Items, Schema};

use super::naming::{enum_registry_name, ref_name};
use super::registry::TypeRegistry;
use super::types::{Field, PrimitiveKind, ResolvedType};

/// Resolve `schema` found at `key` (below `parent_key`) into a type.
///
/// Anonymous enums are registered into `registry` as a side effect. The
/// function is total: fragments without usable shape information degrade to
/// [`ResolvedType::DynamicMap`].
pub fn resolve(
    schema: &Schema,
    registry: &mut TypeRegistry,
    key: &str,
    parent_key: &str,
) -> ResolvedType {
    let resolved = resolve_shape(schema, registry, key, parent_key);
    apply_nullability(schema, resolved)
}

fn resolve_shape(
    schema: &Schema,
    registry: &mut TypeRegistry,
    key: &str,
    parent_key: &str,
) -> ResolvedType {
    if let Some(ref_path) = &schema.ref_path {
        let reference = ResolvedType::Reference(ref_name(ref_path).to_string());
        return if schema.kind() == Some("array") {
            ResolvedType::array_of(reference)
        } else {
            reference
        };
    }

    if let Some(members) = schema.one_of.as_ref().or(schema.any_of.as_ref()) {
        return ResolvedType::UnionOf(resolve_members(members, key, parent_key));
    }

    if let Some(members) = &schema.all_of {
        return ResolvedType::IntersectionOf(resolve_members(members, key, parent_key));
    }

    if let Some(items) = &schema.items {
        return match items {
            Items::Tuple(members) => ResolvedType::TupleOf(
                members
                    .iter()
                    .map(|member| resolve(member, registry, key, parent_key))
                    .collect(),
            ),
            Items::Single(item) => ResolvedType::array_of(resolve(item, registry, key, parent_key)),
        };
    }

    if let Some(values) = &schema.enum_values {
        let name = enum_registry_name(parent_key, key);
        registry.register_enum(name.clone(), values.clone());
        return ResolvedType::EnumRef(name);
    }

    let kind = schema.kind();

    if let Some(properties) = &schema.properties
        && matches!(kind, None | Some("object"))
    {
        return resolve_properties(properties, schema.required_names(), registry, key);
    }

    match kind {
        Some("object") if schema.title.is_some() => ResolvedType::NamedObject,
        Some("object") => match &schema.additional_properties {
            Some(AdditionalProperties::Schema(values)) => {
                ResolvedType::MapOf(Box::new(resolve(values, registry, key, parent_key)))
            }
            _ => ResolvedType::DynamicMap,
        },
        Some("string") if schema.format.as_deref() == Some("binary") => {
            ResolvedType::Primitive(PrimitiveKind::Binary)
        }
        Some(kind) => basic_type(kind),
        None => ResolvedType::DynamicMap,
    }
}

/// Union/intersection members resolve against a scratch registry that is
/// dropped afterwards, so members never register anything visible.
fn resolve_members(members: &[Schema], key: &str, parent_key: &str) -> Vec<ResolvedType> {
    members
        .iter()
        .map(|member| {
            let mut scratch = TypeRegistry::new();
            resolve(member, &mut scratch, key, parent_key)
        })
        .collect()
}

fn resolve_properties(
    properties: &IndexMap<String, Schema>,
    required: &[String],
    registry: &mut TypeRegistry,
    key: &str,
) -> ResolvedType {
    let mut fields = IndexMap::with_capacity(properties.len());
    for (name, property) in properties {
        let ty = resolve(property, registry, name, key);
        let optional = !required.contains(name);
        fields.insert(name.clone(), Field { ty, optional });
    }
    ResolvedType::ObjectShape(fields)
}

fn basic_type(kind: &str) -> ResolvedType {
    match kind {
        "integer" | "number" => ResolvedType::number(),
        "string" => ResolvedType::string(),
        "boolean" => ResolvedType::Primitive(PrimitiveKind::Boolean),
        "null" => ResolvedType::Primitive(PrimitiveKind::Null),
        "array" => ResolvedType::array_of(ResolvedType::DynamicMap),
        other => ResolvedType::Primitive(PrimitiveKind::Other(other.to_string())),
    }
}

/// Wrap nullable results; composites take the flag on each member instead.
fn apply_nullability(schema: &Schema, resolved: ResolvedType) -> ResolvedType {
    if !schema.is_nullable() {
        return resolved;
    }

    match resolved {
        ResolvedType::UnionOf(members) => {
            ResolvedType::UnionOf(members.into_iter().map(ResolvedType::into_nullable).collect())
        }
        ResolvedType::IntersectionOf(members) => ResolvedType::IntersectionOf(
            members.into_iter().map(ResolvedType::into_nullable).collect(),
        ),
        other => other.into_nullable(),
    }
}
