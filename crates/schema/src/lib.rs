//! Transforms an author-facing, possibly-cyclic schema description into an
//! immutable id-based schema graph, together with the resolver registry and
//! the runtime snapshot binding runtime values back to schema ids.

mod builder;
pub mod dsl;
mod graph;
mod ids;
mod registry;
mod snapshot;
mod walkers;

pub use builder::{BuildConfig, BuildError, DuplicateFieldPolicy};
pub use graph::*;
pub use ids::*;
pub use registry::{FieldCoordinates, FieldResolver, ResolverRegistry};
pub use snapshot::RuntimeSnapshot;
pub use walkers::*;

use trellis_response::{ErrorCode, GraphqlError};

/// The built schema: the id-based type graph plus everything the executor
/// needs at runtime. Immutable once built; shared by reference across
/// concurrently executing requests.
pub struct Schema {
    pub(crate) graph: Graph,
    pub(crate) registry: ResolverRegistry,
    pub(crate) snapshot: RuntimeSnapshot,
}

impl std::ops::Deref for Schema {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

impl Schema {
    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> &RuntimeSnapshot {
        &self.snapshot
    }

    pub fn field_resolver(&self, type_name: &str, field_name: &str) -> Option<&FieldResolver> {
        self.registry
            .field_resolver(&FieldCoordinates::new(type_name, field_name))
    }

    /// Resolves a value produced for an abstract type to the concrete object
    /// definition it represents, through the type-discriminator registered
    /// for the union or interface.
    pub fn resolve_abstract_type(
        &self,
        type_name: &str,
        value: &serde_json::Value,
    ) -> Result<ObjectDefinitionId, GraphqlError> {
        let resolver = self.registry.type_resolver(type_name).ok_or_else(|| {
            GraphqlError::new(
                format!("Type was not registered: {type_name}"),
                ErrorCode::TypeNotRegistered,
            )
        })?;
        let object = resolver(value)?;
        self.snapshot.object_id(&object)
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("graph", &self.graph)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
