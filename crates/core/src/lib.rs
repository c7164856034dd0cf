//! OpenAPI to TypeScript schema resolution.
//!
//! This crate turns an OpenAPI 3.x document (JSON or YAML, with a few
//! Swagger 2 parameter shapes tolerated) into:
//! - a registry of named TypeScript types built from `components`
//! - one descriptor per operation with typed parameters, body and response
//! - a TypeScript module with request hooks and declarations
//!
//! ```
//! let json = r#"{ "components": { "schemas": { "Id": { "type": "integer" } } } }"#;
//! let module = ts_codegen_core::generate_from_json(json).unwrap();
//! assert_eq!(module, "export type IId = number;\n");
//! ```

mod emitter;
mod error;
pub mod ir;
pub mod spec;

pub use emitter::{generate, generate_from_json, generate_from_yaml, resolve_document, ResolvedDocument};
pub use error::DocumentError;
pub use spec::OpenApiDocument;
