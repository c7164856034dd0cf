//! Paths x methods -> [`OperationDescriptor`]s.
//!
//! Parameter, request-body and response schemas all resolve into one shared
//! operations registry, separate from the definitions registry until the
//! pipeline merges them.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::spec::{
    Components, Operation, Parameter, ParameterOrRef, PathItem, RequestBody, Response, Schema,
};

use super::api::{HttpMethod, OperationDescriptor, ParamDescriptor, ParamGroups, ParamLocation, UrlPart};
use super::naming::{ref_name, request_body_name, response_key, to_camel_case};
use super::registry::TypeRegistry;
use super::resolver::resolve;
use super::types::{PrimitiveKind, ResolvedType};

/// Response statuses checked for the response type, in order.
const RESPONSE_STATUS_PRIORITY: [&str; 3] = ["200", "201", "default"];

/// Media types accepted for the response type, in order.
const RESPONSE_MEDIA_PRIORITY: [&str; 2] = ["application/json", "*/*"];

/// Content type recorded for Swagger 2 `in: body` parameters.
const LEGACY_BODY_CONTENT_TYPE: &str = "application/json";

/// Resolve every operation of every path.
///
/// The result is stably sorted by operationId; operations without one keep
/// their encounter order and go last.
pub fn resolve_operations(
    paths: &IndexMap<String, PathItem>,
    components: Option<&Components>,
    registry: &mut TypeRegistry,
) -> Vec<OperationDescriptor> {
    let shared_params = components.map(|c| &c.parameters);
    let declared: HashSet<&str> = paths
        .values()
        .flat_map(|item| {
            HttpMethod::ALL
                .into_iter()
                .filter_map(move |method| item.operation(method.as_str())?.operation_id.as_deref())
        })
        .collect();
    let mut fallbacks = HashSet::new();
    let mut operations = Vec::new();

    for (path, item) in paths {
        for method in HttpMethod::ALL {
            if let Some(op) = item.operation(method.as_str()) {
                let name = match &op.operation_id {
                    Some(id) => id.clone(),
                    None => fallback_name(path, method, &declared, &mut fallbacks),
                };
                operations.push(resolve_operation(
                    path,
                    name,
                    method,
                    op,
                    &item.parameters,
                    shared_params,
                    registry,
                ));
            }
        }
    }

    warn_duplicate_ids(&operations);
    operations.sort_by(|a, b| match (&a.operation_id, &b.operation_id) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    operations
}

fn resolve_operation(
    path: &str,
    name: String,
    method: HttpMethod,
    op: &Operation,
    path_params: &[ParameterOrRef],
    shared_params: Option<&IndexMap<String, Parameter>>,
    registry: &mut TypeRegistry,
) -> OperationDescriptor {
    let mut params = ParamGroups::default();
    let mut legacy_body = None;

    for param in merge_parameters(path_params, &op.parameters, shared_params) {
        if let Some(location) = ParamLocation::parse(&param.location) {
            let ty = resolve_parameter(param, &param.name, registry);
            params.push(
                location,
                ParamDescriptor {
                    name: param.name.clone(),
                    required: param.required,
                    ty,
                },
            );
        } else if param.location == "body" {
            legacy_body = Some(param);
        } else {
            debug!(
                parameter = %param.name,
                location = %param.location,
                operation = %name,
                "Skipping parameter with unsupported location."
            );
        }
    }

    let (request_body, content_type) = match (&op.request_body, legacy_body) {
        (Some(body), _) => resolve_request_body(&name, body, registry),
        (None, Some(param)) => {
            let key = request_body_name(&name);
            let ty = resolve_parameter(param, &key, registry);
            registry.insert(key.clone(), ty);
            (Some(key), Some(LEGACY_BODY_CONTENT_TYPE.to_string()))
        }
        (None, None) => (None, None),
    };

    let response = resolve_response(&name, &op.responses, registry);

    OperationDescriptor {
        operation_id: op.operation_id.clone(),
        url: build_url_parts(path),
        path: path.to_string(),
        name,
        method,
        params,
        request_body,
        content_type,
        response,
    }
}

/// `{method}_{segments}` camel-cased, with `{param}` placeholders as
/// `by_{param}`. A name already declared or handed out gets a numeric suffix.
fn fallback_name(
    path: &str,
    method: HttpMethod,
    declared: &HashSet<&str>,
    taken: &mut HashSet<String>,
) -> String {
    let segments: Vec<_> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => format!("by_{param}"),
            None => s.to_string(),
        })
        .collect();
    let base = to_camel_case(&format!("{}_{}", method.as_str(), segments.join("_")));

    let mut name = base.clone();
    let mut suffix = 2;
    while declared.contains(name.as_str()) || taken.contains(&name) {
        name = format!("{base}{suffix}");
        suffix += 1;
    }
    if name != base {
        warn!(path = %path, fallback = %base, name = %name, "Fallback operation name collides.");
    }

    warn!(
        method = method.as_str(),
        path = %path,
        fallback = %name,
        "Operation has no operationId."
    );
    taken.insert(name.clone());
    name
}

/// Path-level parameters followed by operation-level ones; an
/// operation-level parameter replaces a path-level one with the same name
/// and location.
fn merge_parameters<'a>(
    path_level: &'a [ParameterOrRef],
    op_level: &'a [ParameterOrRef],
    shared: Option<&'a IndexMap<String, Parameter>>,
) -> Vec<&'a Parameter> {
    let mut merged: Vec<&Parameter> = path_level
        .iter()
        .filter_map(|param| lookup_parameter(param, shared))
        .collect();

    for param in op_level.iter().filter_map(|param| lookup_parameter(param, shared)) {
        merged.retain(|existing| !(existing.name == param.name && existing.location == param.location));
        merged.push(param);
    }

    merged
}

fn lookup_parameter<'a>(
    param: &'a ParameterOrRef,
    shared: Option<&'a IndexMap<String, Parameter>>,
) -> Option<&'a Parameter> {
    match param {
        ParameterOrRef::Inline(param) => Some(param),
        ParameterOrRef::Ref { ref_path } => {
            let found = shared.and_then(|params| params.get(ref_name(ref_path)));
            if found.is_none() {
                warn!(reference = %ref_path, "Skipping unresolved parameter reference.");
            }
            found
        }
    }
}

/// Resolve a parameter's `schema`, or the legacy inline type when it has none.
fn resolve_parameter(param: &Parameter, key: &str, registry: &mut TypeRegistry) -> ResolvedType {
    match &param.schema {
        Some(schema) => resolve(schema, registry, key, key),
        None if param.inline.kind() == Some("file") => ResolvedType::Primitive(PrimitiveKind::Binary),
        None if param.inline.is_empty() => ResolvedType::string(),
        None => resolve(&param.inline, registry, key, key),
    }
}

/// Resolve and register the body under `{name}Request`. The first media
/// type of the content map is the content type; later ones are ignored.
fn resolve_request_body(
    name: &str,
    body: &RequestBody,
    registry: &mut TypeRegistry,
) -> (Option<String>, Option<String>) {
    let (content_type, schema) = match &body.content {
        Some(content) => match content.first() {
            Some((media_type, media)) => (Some(media_type.clone()), media.schema.as_ref()),
            None => return (None, None),
        },
        None => (None, Some(&body.schema)),
    };

    let key = request_body_name(name);
    let fallback = Schema::default();
    let ty = resolve(schema.unwrap_or(&fallback), registry, &key, &key);
    registry.insert(key.clone(), ty);
    (Some(key), content_type)
}

/// `200`, then `201`, then `default`; JSON before `*/*` within each.
fn resolve_response(
    name: &str,
    responses: &IndexMap<String, Response>,
    registry: &mut TypeRegistry,
) -> ResolvedType {
    let schema = RESPONSE_STATUS_PRIORITY
        .iter()
        .filter_map(|status| responses.get(*status))
        .find_map(|response| {
            let content = response.content.as_ref()?;
            RESPONSE_MEDIA_PRIORITY
                .iter()
                .find_map(|media_type| content.get(*media_type)?.schema.as_ref())
        });

    match schema {
        Some(schema) => resolve(schema, registry, &response_key(name), ""),
        None => ResolvedType::Void,
    }
}

/// Split a path template into static text and `{param}` placeholders.
fn build_url_parts(path: &str) -> Vec<UrlPart> {
    let mut template = Vec::new();
    let mut current = String::new();
    let mut placeholder: Option<String> = None;

    for c in path.chars() {
        if let Some(name) = placeholder.as_mut() {
            if c == '}' {
                template.push(UrlPart::Param(std::mem::take(name)));
                placeholder = None;
            } else {
                name.push(c);
            }
        } else if c == '{' {
            if !current.is_empty() {
                template.push(UrlPart::Static(std::mem::take(&mut current)));
            }
            placeholder = Some(String::new());
        } else {
            current.push(c);
        }
    }

    // An unterminated placeholder is kept as text.
    if let Some(name) = placeholder {
        current.push('{');
        current.push_str(&name);
    }
    if !current.is_empty() {
        template.push(UrlPart::Static(current));
    }

    template
}

fn warn_duplicate_ids(operations: &[OperationDescriptor]) {
    let mut seen = HashSet::new();
    for op in operations {
        if let Some(id) = &op.operation_id
            && !seen.insert(id.as_str())
        {
            warn!(operation_id = %id, path = %op.path, "Duplicate operationId.");
        }
    }
}
