//! TypeScript text emission via the Emit trait.
//!
//! Each IR node renders itself; composite nodes render their children and
//! add parentheses where TypeScript precedence needs them.

use serde_json::Value;

use super::definitions::Declaration;
use super::naming::{interface_name, strip_enum_marker};
use super::types::{Field, PrimitiveKind, ResolvedType};
use super::utils::quote_if_needed;

/// Open object type used for dynamic maps.
pub const DYNAMIC_MAP: &str = "{[key:string]:any}";

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Types
// =============================================================================

impl Emit for PrimitiveKind {
    fn emit(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Null => "null".to_string(),
            Self::Binary => "FormData".to_string(),
            Self::Other(kind) => kind.clone(),
        }
    }
}

impl Emit for ResolvedType {
    fn emit(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.emit(),
            Self::Reference(name) => interface_name(name),
            Self::ArrayOf(inner) => format!("{}[]", wrap_composite(inner)),
            Self::TupleOf(members) => format!("[{}]", join(members, ", ")),
            Self::ObjectShape(fields) if fields.is_empty() => DYNAMIC_MAP.to_string(),
            Self::ObjectShape(fields) => {
                let mut sorted: Vec<_> = fields.iter().collect();
                sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
                let parts: Vec<_> = sorted
                    .into_iter()
                    .map(|(name, field)| emit_field(name, field))
                    .collect();
                format!("{{ {} }}", parts.join("; "))
            }
            Self::UnionOf(members) if members.is_empty() => "never".to_string(),
            Self::UnionOf(members) => members
                .iter()
                .map(|member| match member {
                    Self::IntersectionOf(_) => format!("({})", member.emit()),
                    _ => member.emit(),
                })
                .collect::<Vec<_>>()
                .join(" | "),
            Self::IntersectionOf(members) if members.is_empty() => "unknown".to_string(),
            Self::IntersectionOf(members) => members
                .iter()
                .map(wrap_composite)
                .collect::<Vec<_>>()
                .join(" & "),
            Self::EnumRef(name) => strip_enum_marker(name),
            Self::DynamicMap => DYNAMIC_MAP.to_string(),
            Self::NamedObject => "object".to_string(),
            Self::MapOf(values) => format!("{{[key:string]:{}}}", values.emit()),
            Self::Nullable(inner) => format!("{} | null", inner.emit()),
            Self::Void => "void".to_string(),
        }
    }
}

fn emit_field(name: &str, field: &Field) -> String {
    let opt = if field.optional { "?" } else { "" };
    format!("{}{}: {}", quote_if_needed(name), opt, field.ty.emit())
}

/// Parenthesise members whose own operators would bind looser.
fn wrap_composite(ty: &ResolvedType) -> String {
    match ty {
        ResolvedType::UnionOf(_) | ResolvedType::IntersectionOf(_) | ResolvedType::Nullable(_) => {
            format!("({})", ty.emit())
        }
        _ => ty.emit(),
    }
}

fn join(types: &[ResolvedType], separator: &str) -> String {
    types.iter().map(Emit::emit).collect::<Vec<_>>().join(separator)
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for Declaration {
    fn emit(&self) -> String {
        match self {
            Self::LiteralUnion { name, values } => {
                let members: Vec<_> = values.iter().map(Value::to_string).collect();
                format!("export type {name} = {};\n", members.join(" | "))
            }
            Self::Enum { name, values } => {
                let mut output = format!("export enum {name} {{\n");
                for value in values {
                    let literal = value.to_string();
                    output.push_str(&format!("  {literal} = {literal},\n"));
                }
                output.push_str("}\n");
                output
            }
            Self::OpenInterface { name } => format!("export interface {name} {DYNAMIC_MAP}\n"),
            Self::Interface { name, fields } => {
                let mut output = format!("export interface {name} {{\n");
                for (field_name, field) in fields {
                    output.push_str(&format!("  {};\n", emit_field(field_name, field)));
                }
                output.push_str("}\n");
                output
            }
            Self::Alias { name, ty } => format!("export type {name} = {};\n", ty.emit()),
        }
    }
}
