//! Intermediate representation for OpenAPI to TypeScript code generation.
//!
//! The pipeline has three layers:
//! 1. Resolution: schema fragments -> [`ResolvedType`]s plus a shared
//!    [`TypeRegistry`] (`resolver`, `definitions`, `operations`)
//! 2. Model: normalized operations and declarations (`api`, `definitions`)
//! 3. Emission: model -> TypeScript strings via the [`Emit`] trait and
//!    `codegen`
//!
//! ## Module Structure
//!
//! - `types`: resolved type tree
//! - `registry`: name -> type table with enum entries
//! - `naming`: case conversion and generated-name rules
//! - `resolver`: single schema fragment resolution
//! - `definitions`: `components` scanning and declarations
//! - `api`: operation-level IR
//! - `operations`: paths -> operation descriptors
//! - `codegen`: operation descriptors -> request functions
//! - `emit`: types and declarations -> code strings
//! - `utils`: identifier and quoting helpers

pub mod api;
pub mod codegen;
pub mod definitions;
mod emit;
pub mod naming;
pub mod operations;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod utils;

pub use api::{HttpMethod, OperationDescriptor, ParamDescriptor, ParamGroups, ParamLocation, UrlPart};
pub use codegen::render_operation;
pub use definitions::{scan, to_declarations, Declaration};
pub use emit::Emit;
pub use operations::resolve_operations;
pub use registry::{RegistryEntry, TypeRegistry};
pub use resolver::resolve;
pub use types::{Field, PrimitiveKind, ResolvedType};
