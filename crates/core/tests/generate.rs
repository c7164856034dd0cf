#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use ts_codegen_core::ir::{HttpMethod, RegistryEntry, ResolvedType};
use ts_codegen_core::{generate, resolve_document, OpenApiDocument};

const BOOKSTORE_JSON: &str = include_str!("fixtures/bookstore.json");
const BOOKSTORE_YAML: &str = include_str!("fixtures/bookstore.yaml");

fn bookstore() -> OpenApiDocument {
    OpenApiDocument::from_json(BOOKSTORE_JSON).unwrap()
}

#[test]
fn test_operations_sorted_with_missing_ids_last() {
    let resolved = resolve_document(&bookstore());
    let names: Vec<_> = resolved.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(
        names,
        ["getBook", "listSchedules", "updateBook", "uploadCover", "deleteSchedules"]
    );

    let delete = &resolved.operations[4];
    assert_eq!(delete.operation_id, None);
    assert_eq!(delete.method, HttpMethod::Delete);
    assert_eq!(
        delete.response,
        ResolvedType::Primitive(ts_codegen_core::ir::PrimitiveKind::Boolean)
    );
}

#[test]
fn test_registry_contents() {
    let resolved = resolve_document(&bookstore());
    let registry = &resolved.registry;

    let keys: Vec<_> = registry.sorted_keys().into_iter().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "AuthorVO",
            "BookBody",
            "BookDetailVO",
            "BookDetailVoType#EnumTypeSuffix",
            "BookStatus",
            "BookStatus#EnumTypeSuffix",
            "FromFrom#EnumTypeSuffix",
            "InputStream",
            "LevelLevel#EnumTypeSuffix",
            "ScheduleVO",
            "updateBookRequest",
            "uploadCoverRequest",
        ]
    );

    assert_eq!(
        registry.get("LevelLevel#EnumTypeSuffix"),
        Some(&RegistryEntry::Enum(vec![json!(1), json!(2), json!(3)]))
    );
    assert!(registry.get("LevelLevel#EnumTypeSuffix").unwrap().is_literal_union());
    assert_eq!(
        registry.get("InputStream"),
        Some(&RegistryEntry::Type(ResolvedType::NamedObject))
    );

    let types = resolved.operations.iter().map(|op| &op.response);
    assert!(registry.dangling_references(types).is_empty());
}

#[test]
fn test_request_body_and_response_selection() {
    let resolved = resolve_document(&bookstore());
    let update = resolved.operations.iter().find(|op| op.name == "updateBook").unwrap();
    assert_eq!(update.request_body.as_deref(), Some("updateBookRequest"));
    assert_eq!(update.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        update.response,
        ResolvedType::MapOf(Box::new(ResolvedType::number()))
    );

    let upload = resolved.operations.iter().find(|op| op.name == "uploadCover").unwrap();
    assert_eq!(upload.content_type.as_deref(), Some("multipart/form-data"));
    assert_eq!(upload.response, ResolvedType::Void);
}

#[test]
fn test_generated_module() {
    let output = generate(&bookstore());

    assert!(output.starts_with(
        "import { AxiosRequestConfig, AxiosResponse } from \"axios\";\n\
         import { SWRConfig, useGetRequest } from \"./useGetRequest\";\n\
         import { SWRMutationConfig, useMutationRequest } from \"./useMutationRequest\";\n\
         import { IResponseError } from \"./types\";\n"
    ));

    assert!(output.contains(
        "export interface IGetBookParams {\n  bookId: string;\n  from?: FromFrom;\n  xTraceId?: string;\n}\n"
    ));
    assert!(output.contains("      url: `/books/${bookId}`,\n"));
    assert!(output.contains("      headers: { \"X-Trace-Id\": xTraceId },\n"));
    assert!(output.contains("      params: { from },\n"));

    assert!(output.contains("  level?: LevelLevel;\n  scheduleDate: number;\n"));
    assert!(output.contains("      params: { schedule_date: scheduleDate, level },\n"));
    assert!(output.contains("useGetRequest<IScheduleVo[], IResponseError>("));

    assert!(output.contains(
        "useMutationRequest<IUploadCoverRequest, AxiosResponse<void>, IResponseError>({\n"
    ));
    assert!(output.contains("    headers: { \"Content-Type\": \"multipart/form-data\" },\n"));
    assert!(output.contains("export const useDeleteSchedulesRequest = (\n"));

    assert!(output.contains(
        "export interface IBookDetailVo {\n\
         \x20 authors?: IAuthorVo[];\n\
         \x20 cover?: string | null;\n\
         \x20 id: string;\n\
         \x20 status?: IBookStatus;\n\
         \x20 title: string;\n\
         \x20 type?: BookDetailVoType;\n\
         }\n"
    ));
    assert!(output.contains("export enum BookDetailVoType {\n  \"NOVEL\" = \"NOVEL\",\n  \"POEM\" = \"POEM\",\n}\n"));
    assert!(output.contains("export type IBookStatus = BookStatus;\n"));
    assert!(output.contains("export type LevelLevel = 1 | 2 | 3;\n"));
    assert!(output.contains("export interface IInputStream {[key:string]:any}\n"));
    assert!(output.contains("  owner?: IAuthorVo | string;\n  schedules?: IBookDetailVo[][] | null;\n"));
    assert!(output.contains("export type IBookBody = IBookDetailVo;\n"));
    assert!(output.contains("export interface IUploadCoverRequest {\n  file?: FormData;\n}\n"));
}

#[test]
fn test_requests_precede_declarations() {
    let output = generate(&bookstore());
    let last_request = output.rfind("export const ").unwrap();
    let first_declaration = output.find("export interface IAuthorVo").unwrap();
    assert!(last_request < first_declaration);
}

#[test]
fn test_yaml_matches_json() {
    let yaml = OpenApiDocument::from_yaml(BOOKSTORE_YAML).unwrap();
    assert_eq!(generate(&yaml), generate(&bookstore()));
}

#[test]
fn test_generation_is_idempotent() {
    let document = bookstore();
    assert_eq!(resolve_document(&document), resolve_document(&document));
    assert_eq!(generate(&document), generate(&document));
}

#[test]
fn test_self_referential_schema_terminates() {
    let document = OpenApiDocument::from_json(
        r##"{
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
                        }
                    }
                }
            }
        }"##,
    )
    .unwrap();

    assert_eq!(
        generate(&document),
        "export interface INode {\n  children?: INode[];\n}\n"
    );
}
