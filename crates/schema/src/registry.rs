use fxhash::FxHashMap;

use crate::dsl::{HookFn, ResolverContext, ResolverFn, TypeResolverFn};

/// The (owning-type-name, field-name) pair identifying a field's resolver
/// binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldCoordinates {
    pub type_name: String,
    pub field_name: String,
}

impl FieldCoordinates {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        FieldCoordinates {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl std::fmt::Display for FieldCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// A field getter with its inherited hook chain composed in front of it.
/// Hook order: transitively implemented interfaces first (outermost
/// interface first), then the object's own hooks, then the field's own.
pub struct FieldResolver {
    pub(crate) hooks: Vec<HookFn>,
    pub(crate) blocking_hooks: Vec<HookFn>,
    pub(crate) getter: ResolverFn,
    pub(crate) getter_blocking: bool,
}

impl FieldResolver {
    /// Runs the composed chain against the parent object instance. Safe to
    /// invoke concurrently; the schema is immutable by the time any
    /// resolver runs.
    pub fn resolve(
        &self,
        ctx: ResolverContext<'_>,
    ) -> Result<serde_json::Value, trellis_response::GraphqlError> {
        for hook in &self.hooks {
            hook(ctx)?;
        }
        for hook in &self.blocking_hooks {
            hook(ctx)?;
        }
        (self.getter)(ctx)
    }

    /// Whether the caller must schedule this resolver on a worker pool
    /// rather than running it inline.
    pub fn is_blocking(&self) -> bool {
        self.getter_blocking || !self.blocking_hooks.is_empty()
    }
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldResolver")
            .field("hooks", &self.hooks.len())
            .field("blocking_hooks", &self.blocking_hooks.len())
            .field("blocking", &self.is_blocking())
            .finish_non_exhaustive()
    }
}

/// Field resolvers keyed by coordinates and type-discriminators keyed by
/// union/interface name, registered while the schema graph gets built.
#[derive(Default)]
pub struct ResolverRegistry {
    field_resolvers: FxHashMap<FieldCoordinates, FieldResolver>,
    type_resolvers: FxHashMap<String, TypeResolverFn>,
}

impl ResolverRegistry {
    pub(crate) fn register_field_resolver(
        &mut self,
        coordinates: FieldCoordinates,
        resolver: FieldResolver,
    ) {
        self.field_resolvers.insert(coordinates, resolver);
    }

    pub(crate) fn register_type_resolver(&mut self, type_name: String, resolver: TypeResolverFn) {
        self.type_resolvers.insert(type_name, resolver);
    }

    pub fn field_resolver(&self, coordinates: &FieldCoordinates) -> Option<&FieldResolver> {
        self.field_resolvers.get(coordinates)
    }

    pub fn type_resolver(&self, type_name: &str) -> Option<&TypeResolverFn> {
        self.type_resolvers.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.field_resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("field_resolvers", &self.field_resolvers.len())
            .field("type_resolvers", &self.type_resolvers.len())
            .finish()
    }
}
