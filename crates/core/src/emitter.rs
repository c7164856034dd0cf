//! TypeScript module generation for a whole document.
//!
//! The pipeline is:
//! 1. Scan: `components` -> definitions registry
//! 2. Resolve: paths -> operation descriptors + operations registry
//! 3. Merge: operations registry into definitions (first definition wins)
//! 4. Emit: request functions, then declarations sorted by name

use tracing::{debug, warn};

use crate::ir::codegen::{render_imports, render_operation};
use crate::ir::{scan, resolve_operations, to_declarations, Emit, OperationDescriptor, TypeRegistry};
use crate::spec::OpenApiDocument;

/// Everything resolution produces for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    /// Definitions and operation types merged into one table.
    pub registry: TypeRegistry,
    /// Operations sorted by operationId.
    pub operations: Vec<OperationDescriptor>,
}

/// Resolve definitions and operations without emitting anything.
pub fn resolve_document(document: &OpenApiDocument) -> ResolvedDocument {
    if let Some(info) = &document.info {
        debug!(
            title = info.title.as_deref().unwrap_or_default(),
            version = info.version.as_deref().unwrap_or_default(),
            "Resolving document."
        );
    }

    let components = document.components.as_ref();
    let mut registry = scan(components);

    let mut operations_registry = TypeRegistry::new();
    let operations = resolve_operations(&document.paths, components, &mut operations_registry);
    registry.merge(operations_registry);

    let dangling = registry.dangling_references(operations.iter().flat_map(|op| {
        op.params
            .path
            .iter()
            .chain(&op.params.query)
            .chain(&op.params.cookie)
            .chain(&op.params.header)
            .map(|param| &param.ty)
            .chain(std::iter::once(&op.response))
    }));
    for name in &dangling {
        warn!(name = %name, "Referenced type has no definition.");
    }

    debug!(
        types = registry.len(),
        operations = operations.len(),
        "Resolved document."
    );

    ResolvedDocument {
        registry,
        operations,
    }
}

/// Generate the TypeScript module for `document`.
pub fn generate(document: &OpenApiDocument) -> String {
    let resolved = resolve_document(document);

    let mut blocks = Vec::new();
    let imports = render_imports(&resolved.operations);
    if !imports.is_empty() {
        blocks.push(imports);
    }
    blocks.extend(resolved.operations.iter().map(render_operation));
    blocks.extend(to_declarations(&resolved.registry).iter().map(Emit::emit));

    blocks.join("\n")
}

/// Parse a JSON document and generate its TypeScript module.
pub fn generate_from_json(json: &str) -> Result<String, crate::DocumentError> {
    let document = OpenApiDocument::from_json(json)?;
    Ok(generate(&document))
}

/// Parse a YAML document and generate its TypeScript module.
pub fn generate_from_yaml(yaml: &str) -> Result<String, crate::DocumentError> {
    let document = OpenApiDocument::from_yaml(yaml)?;
    Ok(generate(&document))
}
