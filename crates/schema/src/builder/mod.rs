//! Turns a [`SchemaDefinition`](crate::dsl::SchemaDefinition) into an
//! immutable [`Schema`](crate::Schema).
//!
//! The transformation walks the source graph depth first. Each source node is
//! identified by its `Arc` address and transformed exactly once: the target
//! arena slot is reserved before dependencies are visited, so a cycle that
//! comes back to a node in progress reuses the reserved id instead of
//! recursing. Scalars and directive definitions cannot legally participate in
//! such a cycle, re-entering one of those mid-transform is reported as an
//! error.

mod cache;
mod error;
mod interner;
mod post_process;
#[cfg(test)]
mod tests;
mod types;

pub use error::BuildError;

use fxhash::FxHashMap;

use crate::dsl::SchemaDefinition;
use crate::graph::{Graph, RootOperationTypes, TypeDefinitionId};
use crate::ids::*;
use crate::registry::ResolverRegistry;
use crate::snapshot::RuntimeSnapshot;
use crate::Schema;

use cache::TransformCache;
use interner::Interner;

/// What to do when interface flattening produces two fields with the same
/// name on one type, typically through diamond-shaped interface inheritance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateFieldPolicy {
    /// Keep the first occurrence, in flattening order.
    #[default]
    FirstWins,
    /// Keep the last occurrence, letting the type override inherited fields.
    LastWins,
    /// Refuse to build the schema.
    Reject,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuildConfig {
    pub duplicate_field_policy: DuplicateFieldPolicy,
}

pub(crate) fn build(definition: &SchemaDefinition, config: BuildConfig) -> Result<Schema, BuildError> {
    let mut builder = GraphBuilder::new(config);
    builder.ingest_builtins()?;

    let query = match &definition.query {
        Some(ty) => Some(builder.insert_object(ty)?),
        None => None,
    };
    let mutation = match &definition.mutation {
        Some(ty) => Some(builder.insert_object(ty)?),
        None => None,
    };
    let subscription = match &definition.subscription {
        Some(ty) => Some(builder.insert_object(ty)?),
        None => None,
    };
    builder.graph.root_operation_types = RootOperationTypes {
        query,
        mutation,
        subscription,
    };

    for ty in &definition.additional_types {
        builder.insert_definition(ty)?;
    }
    for directive in &definition.additional_directives {
        builder.insert_directive_definition(directive)?;
    }
    builder.graph.schema_directive_ids = builder.insert_applied_directives(&definition.directives)?;
    builder.graph.description_id = definition
        .description
        .as_deref()
        .map(|description| builder.strings.get_or_new(description));

    builder.finalize()
}

pub(crate) struct GraphBuilder {
    config: BuildConfig,
    graph: Graph,
    strings: Interner<String, StringId>,
    definitions_by_name: FxHashMap<StringId, TypeDefinitionId>,
    registry: ResolverRegistry,
    snapshot: RuntimeSnapshot,

    scalars: TransformCache<ScalarDefinitionId>,
    enums: TransformCache<EnumDefinitionId>,
    objects: TransformCache<ObjectDefinitionId>,
    interfaces: TransformCache<InterfaceDefinitionId>,
    unions: TransformCache<UnionDefinitionId>,
    input_objects: TransformCache<InputObjectDefinitionId>,
    directives: TransformCache<DirectiveDefinitionId>,
}

impl GraphBuilder {
    fn new(config: BuildConfig) -> Self {
        GraphBuilder {
            config,
            graph: Graph {
                description_id: None,
                root_operation_types: RootOperationTypes::default(),
                definitions: Vec::new(),
                schema_directive_ids: Vec::new(),
                strings: Vec::new(),
                object_definitions: Vec::new(),
                interface_definitions: Vec::new(),
                union_definitions: Vec::new(),
                enum_definitions: Vec::new(),
                scalar_definitions: Vec::new(),
                input_object_definitions: Vec::new(),
                field_definitions: Vec::new(),
                input_value_definitions: Vec::new(),
                enum_value_definitions: Vec::new(),
                directive_definitions: Vec::new(),
                applied_directives: Vec::new(),
            },
            strings: Interner::default(),
            definitions_by_name: FxHashMap::default(),
            registry: ResolverRegistry::default(),
            snapshot: RuntimeSnapshot::default(),
            scalars: TransformCache::default(),
            enums: TransformCache::default(),
            objects: TransformCache::default(),
            interfaces: TransformCache::default(),
            unions: TransformCache::default(),
            input_objects: TransformCache::default(),
            directives: TransformCache::default(),
        }
    }

    /// Built-in scalars and directives go through the same transformation as
    /// author-provided ones, they are just inserted first so every schema
    /// carries them.
    fn ingest_builtins(&mut self) -> Result<(), BuildError> {
        for scalar in crate::dsl::builtin_scalars() {
            self.insert_scalar(scalar)?;
        }
        for directive in crate::dsl::builtin_directives() {
            self.insert_directive_definition(directive)?;
        }
        Ok(())
    }
}
