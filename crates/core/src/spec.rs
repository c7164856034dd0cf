//! OpenAPI document structs for serde deserialization.
//!
//! Only the subset of OpenAPI 3.x (plus the handful of Swagger 2 parameter
//! shapes still seen in the wild) that drives type resolution is modelled.
//! Every map is an [`IndexMap`] so that document order survives parsing.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::DocumentError;

/// Root API description document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiDocument {
    pub info: Option<Info>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Document metadata, only used for log context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub delete: Option<Operation>,
    pub patch: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    pub request_body: Option<RequestBody>,
    #[serde(default, deserialize_with = "status_keyed")]
    pub responses: IndexMap<String, Response>,
}

/// Either an inline parameter or a `$ref` into `components.parameters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Inline(Parameter),
}

/// A parameter (path, query, cookie or header).
///
/// Swagger 2 documents put `type`/`format`/`enum`/`items` directly on the
/// parameter instead of under `schema`; those land in `inline`.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,
    #[serde(flatten)]
    pub inline: Schema,
}

/// A request body definition.
///
/// Bodies without a `content` map (or `$ref` bodies) are read as a schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    pub content: Option<IndexMap<String, MediaType>>,
    #[serde(flatten)]
    pub schema: Schema,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema fragment as used by OpenAPI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Declared kind (`string`, `object`, ...) or an OAS 3.1 kind list.
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    pub title: Option<String>,

    pub properties: Option<IndexMap<String, Schema>>,

    pub required: Option<Required>,

    pub items: Option<Items>,

    /// Raw enum values, kept untouched for declaration emission.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    pub one_of: Option<Vec<Schema>>,

    pub any_of: Option<Vec<Schema>>,

    pub all_of: Option<Vec<Schema>>,

    pub additional_properties: Option<AdditionalProperties>,

    pub format: Option<String>,

    /// OpenAPI 3.0 nullable flag (3.1 uses kind lists instead).
    pub nullable: Option<bool>,
}

/// Schema kind can be a single kind or a list of kinds (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `items` is a schema, or a list of schemas for tuple-style arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Tuple(Vec<Schema>),
    Single(Box<Schema>),
}

/// `required` is a list of property names on schemas; request bodies and
/// parameters use a boolean flag under the same key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Names(Vec<String>),
    Flag(bool),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

impl OpenApiDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl PathItem {
    /// Operation registered for `method`, if any.
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method {
            "get" => self.get.as_ref(),
            "post" => self.post.as_ref(),
            "put" => self.put.as_ref(),
            "delete" => self.delete.as_ref(),
            "patch" => self.patch.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            _ => None,
        }
    }
}

impl Schema {
    /// First non-null declared kind.
    pub fn kind(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(kind) => Some(kind.as_str()),
            SchemaType::Multiple(kinds) => kinds
                .iter()
                .find(|kind| *kind != "null")
                .or_else(|| kinds.first())
                .map(String::as_str),
        }
    }

    /// Check the OpenAPI 3.0 `nullable` flag and OAS 3.1 `["x", "null"]` kind lists.
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }

        matches!(
            &self.schema_type,
            Some(SchemaType::Multiple(kinds)) if kinds.len() > 1 && kinds.iter().any(|k| k == "null")
        )
    }

    /// Property names listed in `required`.
    pub fn required_names(&self) -> &[String] {
        match &self.required {
            Some(Required::Names(names)) => names,
            _ => &[],
        }
    }

    /// Whether the fragment carries any type information at all.
    pub fn is_empty(&self) -> bool {
        self.schema_type.is_none()
            && self.ref_path.is_none()
            && self.properties.is_none()
            && self.items.is_none()
            && self.enum_values.is_none()
            && self.one_of.is_none()
            && self.any_of.is_none()
            && self.all_of.is_none()
    }
}

/// Response maps are keyed by status codes, which YAML parses as integers.
fn status_keyed<'de, D>(deserializer: D) -> Result<IndexMap<String, Response>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<StatusKey, Response> = IndexMap::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, value)| (key.0, value)).collect())
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct StatusKey(String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusKeyVisitor;

        impl Visitor<'_> for StatusKeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status code or `default`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(StatusKeyVisitor)
    }
}
