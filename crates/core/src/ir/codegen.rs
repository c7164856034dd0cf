//! Request function generation from operation descriptors.
//!
//! Each operation becomes an optional `I{Name}Params` interface and one
//! `use{Name}Request` hook wrapper: `get` operations call `useGetRequest`,
//! everything else calls `useMutationRequest`.

use std::collections::HashSet;

use super::api::{OperationDescriptor, ParamDescriptor, ParamLocation, UrlPart};
use super::emit::Emit;
use super::naming::{interface_name, params_interface_name, request_function_name};
use super::utils::{object_entry, quote_if_needed, sanitize_ts_identifier};

/// Shared error type every generated request reports.
pub const RESPONSE_ERROR: &str = "IResponseError";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Render one operation as TypeScript source.
pub fn render_operation(op: &OperationDescriptor) -> String {
    let bindings = param_bindings(op);
    let mut output = String::new();

    let params_arg = if bindings.is_empty() {
        None
    } else {
        let type_name = params_interface_name(&op.name);
        output.push_str(&render_params_interface(&type_name, &bindings));
        output.push('\n');

        let names: Vec<_> = bindings.iter().map(|binding| binding.name.as_str()).collect();
        Some(format!("{{ {} }}: {type_name}", names.join(", ")))
    };

    let request = if op.method.is_query() {
        render_get_request(op, &bindings, params_arg.as_deref())
    } else {
        render_mutation_request(op, &bindings, params_arg.as_deref())
    };
    output.push_str(&request);
    output
}

/// A path, query or header parameter and its local binding.
struct Binding<'a> {
    name: String,
    location: ParamLocation,
    param: &'a ParamDescriptor,
}

/// Bindings for path, query and header parameters, in that order.
///
/// A binding already taken by an earlier parameter gets the location
/// appended (`idQuery`), then a counter.
fn param_bindings(op: &OperationDescriptor) -> Vec<Binding<'_>> {
    let mut taken = HashSet::new();
    let mut bindings = Vec::new();

    for location in [ParamLocation::Path, ParamLocation::Query, ParamLocation::Header] {
        for param in op.params.get(location) {
            let base = sanitize_ts_identifier(&param.name);
            let mut name = base.clone();
            if taken.contains(&name) {
                name = format!("{base}{}", location_suffix(location));
            }
            let mut counter = 2;
            while taken.contains(&name) {
                name = format!("{base}{counter}");
                counter += 1;
            }

            taken.insert(name.clone());
            bindings.push(Binding {
                name,
                location,
                param,
            });
        }
    }

    bindings
}

const fn location_suffix(location: ParamLocation) -> &'static str {
    match location {
        ParamLocation::Path => "Path",
        ParamLocation::Query => "Query",
        ParamLocation::Cookie => "Cookie",
        ParamLocation::Header => "Header",
    }
}

fn render_params_interface(type_name: &str, bindings: &[Binding<'_>]) -> String {
    let mut sorted: Vec<_> = bindings.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut output = format!("export interface {type_name} {{\n");
    for binding in sorted {
        let opt = if binding.param.required { "" } else { "?" };
        output.push_str(&format!(
            "  {}{opt}: {};\n",
            quote_if_needed(&binding.name),
            binding.param.ty.emit()
        ));
    }
    output.push_str("}\n");
    output
}

// =============================================================================
// Request functions
// =============================================================================

fn render_get_request(
    op: &OperationDescriptor,
    bindings: &[Binding<'_>],
    params_arg: Option<&str>,
) -> String {
    let response = op.response.emit();
    let generics = format!("{response}, {RESPONSE_ERROR}");

    let mut output = format!("export const {} = (\n", request_function_name(&op.name));
    if let Some(arg) = params_arg {
        output.push_str(&format!("  {arg},\n"));
    }
    output.push_str(&format!("  SWRConfig?: SWRConfig<{generics}>,\n"));
    output.push_str("  axiosConfig?: AxiosRequestConfig,\n");
    output.push_str(") =>\n");
    output.push_str(&format!("  useGetRequest<{generics}>(\n"));
    output.push_str("    {\n");
    output.push_str(&format!("      url: {},\n", url_template(&op.url, bindings)));
    output.push_str(&format!("      method: \"{}\",\n", op.method.as_str()));
    output.push_str(&format!("      headers: {},\n", headers(op, bindings)));
    if let Some(query) = query_object(bindings) {
        output.push_str(&format!("      params: {query},\n"));
    }
    output.push_str("      ...axiosConfig,\n");
    output.push_str("    },\n");
    output.push_str("    SWRConfig,\n");
    output.push_str("  );\n");
    output
}

fn render_mutation_request(
    op: &OperationDescriptor,
    bindings: &[Binding<'_>],
    params_arg: Option<&str>,
) -> String {
    let body = op
        .request_body
        .as_deref()
        .map_or_else(|| "undefined".to_string(), interface_name);
    let generics = format!(
        "{body}, AxiosResponse<{}>, {RESPONSE_ERROR}",
        op.response.emit()
    );

    let mut output = format!("export const {} = (\n", request_function_name(&op.name));
    if let Some(arg) = params_arg {
        output.push_str(&format!("  {arg},\n"));
    }
    output.push_str(&format!(
        "  mutationConfig?: SWRMutationConfig<{generics}>,\n"
    ));
    output.push_str("  axiosConfig?: AxiosRequestConfig,\n");
    output.push_str(") =>\n");
    output.push_str(&format!("  useMutationRequest<{generics}>({{\n"));
    output.push_str(&format!("    url: {},\n", url_template(&op.url, bindings)));
    output.push_str(&format!("    method: \"{}\",\n", op.method.as_str()));
    output.push_str(&format!("    headers: {},\n", headers(op, bindings)));
    if let Some(query) = query_object(bindings) {
        output.push_str(&format!("    params: {query},\n"));
    }
    output.push_str("    mutationConfig,\n");
    output.push_str("    axiosConfig,\n");
    output.push_str("  });\n");
    output
}

/// Backtick template with `${binding}` for every path placeholder.
fn url_template(template: &[UrlPart], bindings: &[Binding<'_>]) -> String {
    let path: String = template
        .iter()
        .map(|part| match part {
            UrlPart::Static(s) => s.replace('`', "\\`"),
            UrlPart::Param(name) => {
                let binding = bindings
                    .iter()
                    .find(|b| b.location == ParamLocation::Path && b.param.name == *name)
                    .map_or_else(|| sanitize_ts_identifier(name), |b| b.name.clone());
                format!("${{{binding}}}")
            }
        })
        .collect();
    format!("`{path}`")
}

fn located<'b, 'a>(
    bindings: &'b [Binding<'a>],
    location: ParamLocation,
) -> impl Iterator<Item = &'b Binding<'a>> {
    bindings.iter().filter(move |b| b.location == location)
}

fn headers(op: &OperationDescriptor, bindings: &[Binding<'_>]) -> String {
    let mut entries: Vec<_> = located(bindings, ParamLocation::Header)
        .map(|b| object_entry(&b.param.name, &b.name))
        .collect();

    if op.request_body.is_some() {
        let content_type = op.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        entries.push(format!("\"Content-Type\": \"{content_type}\""));
    }

    object_literal(&entries)
}

fn query_object(bindings: &[Binding<'_>]) -> Option<String> {
    let entries: Vec<_> = located(bindings, ParamLocation::Query)
        .map(|b| object_entry(&b.param.name, &b.name))
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(object_literal(&entries))
    }
}

fn object_literal(entries: &[String]) -> String {
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Import block for the helpers the given operations call.
pub fn render_imports(operations: &[OperationDescriptor]) -> String {
    let mut output = String::new();
    if operations.is_empty() {
        return output;
    }

    let has_queries = operations.iter().any(|op| op.method.is_query());
    let has_mutations = operations.iter().any(|op| !op.method.is_query());

    output.push_str("import { AxiosRequestConfig, AxiosResponse } from \"axios\";\n");
    if has_queries {
        output.push_str("import { SWRConfig, useGetRequest } from \"./useGetRequest\";\n");
    }
    if has_mutations {
        output.push_str(
            "import { SWRMutationConfig, useMutationRequest } from \"./useMutationRequest\";\n",
        );
    }
    output.push_str(&format!("import {{ {RESPONSE_ERROR} }} from \"./types\";\n"));
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::api::{HttpMethod, ParamGroups};
    use crate::ir::types::ResolvedType;
    use pretty_assertions::assert_eq;

    fn param(name: &str, required: bool, ty: ResolvedType) -> ParamDescriptor {
        ParamDescriptor {
            name: name.to_string(),
            required,
            ty,
        }
    }

    fn descriptor(method: HttpMethod, url: Vec<UrlPart>) -> OperationDescriptor {
        OperationDescriptor {
            operation_id: Some("op".into()),
            name: "op".into(),
            method,
            path: String::new(),
            url,
            params: ParamGroups::default(),
            request_body: None,
            content_type: None,
            response: ResolvedType::Void,
        }
    }

    #[test]
    fn test_get_with_path_and_query_params() {
        let mut op = descriptor(
            HttpMethod::Get,
            vec![
                UrlPart::Static("/documents/".into()),
                UrlPart::Param("document_id".into()),
                UrlPart::Static("/doc".into()),
            ],
        );
        op.name = "getDocument".into();
        op.params.path.push(param("document_id", true, ResolvedType::string()));
        op.params.query.push(param(
            "from",
            false,
            ResolvedType::EnumRef("FromFrom#EnumTypeSuffix".into()),
        ));
        op.response = ResolvedType::Reference("DocumentVO".into());

        let expected = r#"export interface IGetDocumentParams {
  documentId: string;
  from?: FromFrom;
}

export const useGetDocumentRequest = (
  { documentId, from }: IGetDocumentParams,
  SWRConfig?: SWRConfig<IDocumentVo, IResponseError>,
  axiosConfig?: AxiosRequestConfig,
) =>
  useGetRequest<IDocumentVo, IResponseError>(
    {
      url: `/documents/${documentId}/doc`,
      method: "get",
      headers: {},
      params: { from },
      ...axiosConfig,
    },
    SWRConfig,
  );
"#;
        assert_eq!(render_operation(&op), expected);
    }

    #[test]
    fn test_get_without_params() {
        let mut op = descriptor(HttpMethod::Get, vec![UrlPart::Static("/user/profile".into())]);
        op.name = "userProfile".into();
        op.response = ResolvedType::DynamicMap;

        let output = render_operation(&op);
        assert!(output.starts_with("export const useUserProfileRequest = (\n  SWRConfig?"));
        assert!(!output.contains("Params"));
        assert!(output.contains("useGetRequest<{[key:string]:any}, IResponseError>("));
        assert!(!output.contains("params:"));
    }

    #[test]
    fn test_mutation_with_body_and_headers() {
        let mut op = descriptor(
            HttpMethod::Post,
            vec![
                UrlPart::Static("/book-journey/".into()),
                UrlPart::Param("journeyId".into()),
            ],
        );
        op.name = "updateBookJourney".into();
        op.params.path.push(param("journeyId", true, ResolvedType::string()));
        op.params.header.push(param("User-Id", true, ResolvedType::string()));
        op.request_body = Some("updateBookJourneyRequest".into());
        op.content_type = Some("multipart/form-data".into());
        op.response = ResolvedType::Reference("AttachmentBO".into());

        let expected = r#"export interface IUpdateBookJourneyParams {
  journeyId: string;
  userId: string;
}

export const useUpdateBookJourneyRequest = (
  { journeyId, userId }: IUpdateBookJourneyParams,
  mutationConfig?: SWRMutationConfig<IUpdateBookJourneyRequest, AxiosResponse<IAttachmentBo>, IResponseError>,
  axiosConfig?: AxiosRequestConfig,
) =>
  useMutationRequest<IUpdateBookJourneyRequest, AxiosResponse<IAttachmentBo>, IResponseError>({
    url: `/book-journey/${journeyId}`,
    method: "post",
    headers: { "User-Id": userId, "Content-Type": "multipart/form-data" },
    mutationConfig,
    axiosConfig,
  });
"#;
        assert_eq!(render_operation(&op), expected);
    }

    #[test]
    fn test_mutation_defaults() {
        let mut op = descriptor(HttpMethod::Delete, vec![UrlPart::Static("/items".into())]);
        op.name = "clearItems".into();

        let output = render_operation(&op);
        assert!(output.contains("useMutationRequest<undefined, AxiosResponse<void>, IResponseError>"));
        assert!(output.contains("headers: {},"));
        assert!(output.contains("method: \"delete\","));

        op.request_body = Some("clearItemsRequest".into());
        let output = render_operation(&op);
        assert!(output.contains("headers: { \"Content-Type\": \"application/json\" },"));
    }

    #[test]
    fn test_cookie_params_not_rendered() {
        let mut op = descriptor(HttpMethod::Get, vec![UrlPart::Static("/".into())]);
        op.params.cookie.push(param("session", true, ResolvedType::string()));

        let output = render_operation(&op);
        assert!(!output.contains("session"));
    }

    #[test]
    fn test_reserved_binding_is_prefixed() {
        let mut op = descriptor(HttpMethod::Get, vec![UrlPart::Static("/search".into())]);
        op.params.query.push(param("default", false, ResolvedType::string()));

        let output = render_operation(&op);
        assert!(output.contains("  _default?: string;\n"));
        assert!(output.contains("params: { default: _default },"));
    }

    #[test]
    fn test_colliding_bindings_get_location_suffix() {
        let mut op = descriptor(
            HttpMethod::Get,
            vec![UrlPart::Static("/pets/".into()), UrlPart::Param("pet-id".into())],
        );
        op.name = "getPet".into();
        op.params.path.push(param("pet-id", true, ResolvedType::string()));
        op.params.query.push(param("petId", false, ResolvedType::number()));
        op.params.header.push(param("Pet-Id", false, ResolvedType::string()));

        let expected = r#"export interface IGetPetParams {
  petId: string;
  petIdHeader?: string;
  petIdQuery?: number;
}

export const useGetPetRequest = (
  { petId, petIdQuery, petIdHeader }: IGetPetParams,
  SWRConfig?: SWRConfig<void, IResponseError>,
  axiosConfig?: AxiosRequestConfig,
) =>
  useGetRequest<void, IResponseError>(
    {
      url: `/pets/${petId}`,
      method: "get",
      headers: { "Pet-Id": petIdHeader },
      params: { petId: petIdQuery },
      ...axiosConfig,
    },
    SWRConfig,
  );
"#;
        assert_eq!(render_operation(&op), expected);
    }

    #[test]
    fn test_render_imports() {
        assert_eq!(render_imports(&[]), "");

        let get = descriptor(HttpMethod::Get, vec![]);
        let imports = render_imports(std::slice::from_ref(&get));
        assert!(imports.contains("useGetRequest"));
        assert!(!imports.contains("useMutationRequest"));

        let put = descriptor(HttpMethod::Put, vec![]);
        let imports = render_imports(&[get, put]);
        assert!(imports.contains("import { SWRMutationConfig, useMutationRequest }"));
        assert!(imports.ends_with("import { IResponseError } from \"./types\";\n"));
    }
}
