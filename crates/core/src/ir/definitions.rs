//! Scanning of `components` into the type registry, and turning the
//! registry into declarations.

use serde_json::Value;
use tracing::debug;

use crate::spec::{Components, RequestBody, Schema};

use super::naming::{interface_name, is_enum_key, strip_enum_marker};
use super::registry::{RegistryEntry, TypeRegistry};
use super::resolver::resolve;
use super::types::{Field, ResolvedType};

const JSON_MEDIA_TYPE: &str = "application/json";

/// One top-level declaration, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `export type Name = 1 | 2;`
    LiteralUnion { name: String, values: Vec<Value> },
    /// `export enum Name { "A" = "A" }`
    Enum { name: String, values: Vec<Value> },
    /// `export interface IName {[key:string]:any}`
    OpenInterface { name: String },
    /// Interface with fields sorted by name.
    Interface {
        name: String,
        fields: Vec<(String, Field)>,
    },
    /// `export type IName = ...;`
    Alias { name: String, ty: ResolvedType },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::LiteralUnion { name, .. }
            | Self::Enum { name, .. }
            | Self::OpenInterface { name }
            | Self::Interface { name, .. }
            | Self::Alias { name, .. } => name,
        }
    }
}

/// Resolve every request body and schema in `components`.
///
/// Request bodies come first, then schemas, each under its declared name.
/// A top-level enum schema is resolved with an empty parent key, so its
/// values land under `Title(name)#EnumTypeSuffix`; the schema name itself
/// only gets an alias entry pointing at that enum.
pub fn scan(components: Option<&Components>) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    let Some(components) = components else {
        return registry;
    };

    let fallback = Schema::default();
    for (name, body) in &components.request_bodies {
        let schema = request_body_schema(body).unwrap_or(&fallback);
        let ty = resolve(schema, &mut registry, name, name);
        registry.insert(name.clone(), ty);
    }

    for (name, schema) in &components.schemas {
        let parent_key = if is_top_level_enum(schema) {
            debug!(schema = %name, "Resolving top-level enum without parent key.");
            ""
        } else {
            name.as_str()
        };

        let ty = resolve(schema, &mut registry, name, parent_key);
        registry.insert(name.clone(), ty);
    }

    registry
}

/// The `application/json` schema of a body with a `content` map, otherwise
/// the body itself read as a schema. `None` when the content map has no
/// JSON schema.
pub fn request_body_schema(body: &RequestBody) -> Option<&Schema> {
    match &body.content {
        Some(content) => content
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref()),
        None => Some(&body.schema),
    }
}

/// Enum schemas that reach the `enum` step of resolution directly.
fn is_top_level_enum(schema: &Schema) -> bool {
    schema.enum_values.is_some()
        && schema.ref_path.is_none()
        && schema.one_of.is_none()
        && schema.any_of.is_none()
        && schema.all_of.is_none()
        && schema.items.is_none()
}

/// One declaration per registry entry, in sorted key order.
pub fn to_declarations(registry: &TypeRegistry) -> Vec<Declaration> {
    registry
        .sorted_keys()
        .into_iter()
        .filter_map(|key| registry.get(key).map(|entry| declaration_for(key, entry)))
        .collect()
}

fn declaration_for(key: &str, entry: &RegistryEntry) -> Declaration {
    let name = declared_name(key);
    match entry {
        RegistryEntry::Enum(values) if entry.is_literal_union() => Declaration::LiteralUnion {
            name,
            values: values.clone(),
        },
        RegistryEntry::Enum(values) => Declaration::Enum {
            name,
            values: values.clone(),
        },
        RegistryEntry::Type(ty) if ty.is_open() => Declaration::OpenInterface { name },
        RegistryEntry::Type(ResolvedType::ObjectShape(shape)) => {
            let mut fields: Vec<_> = shape
                .iter()
                .map(|(name, field)| (name.clone(), field.clone()))
                .collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));
            Declaration::Interface { name, fields }
        }
        RegistryEntry::Type(ty) => Declaration::Alias {
            name,
            ty: ty.clone(),
        },
    }
}

/// Enum keys drop the marker; every other key becomes `I{Title}`.
fn declared_name(key: &str) -> String {
    if is_enum_key(key) {
        strip_enum_marker(key)
    } else {
        interface_name(key)
    }
}
