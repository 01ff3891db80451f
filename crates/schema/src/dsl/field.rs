use std::sync::Arc;

use trellis_response::GraphqlError;

use super::{DirectiveApplication, InputType, ObjectType, OutputType};

/// Everything a resolver gets to look at: the parent object instance and the
/// coerced field arguments. Resolvers run concurrently across sibling
/// fields, hence the shared references.
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    pub parent: &'a serde_json::Value,
    pub arguments: &'a serde_json::Map<String, serde_json::Value>,
    pub type_name: &'a str,
    pub field_name: &'a str,
}

/// Produces a field's value from its parent object and arguments.
pub type ResolverFn =
    Arc<dyn Fn(ResolverContext<'_>) -> Result<serde_json::Value, GraphqlError> + Send + Sync>;

/// Side-effect block running ahead of a getter.
pub type HookFn = Arc<dyn Fn(ResolverContext<'_>) -> Result<(), GraphqlError> + Send + Sync>;

/// Maps a runtime value to the concrete object type it represents, for
/// union and interface result resolution.
pub type TypeResolverFn =
    Arc<dyn Fn(&serde_json::Value) -> Result<Arc<ObjectType>, GraphqlError> + Send + Sync>;

#[derive(Clone)]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: OutputType,
    pub arguments: Vec<ArgumentDef>,
    pub directives: Vec<DirectiveApplication>,
    pub getter: ResolverFn,
    /// Hint that the getter must be scheduled off any latency-sensitive
    /// thread. Preserved through composition, dispatch is the engine's job.
    pub blocking: bool,
    pub on_get: Vec<HookFn>,
    pub on_get_blocking: Vec<HookFn>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: impl Into<OutputType>, getter: ResolverFn) -> Self {
        FieldDef {
            name: name.into(),
            description: None,
            ty: ty.into(),
            arguments: Vec::new(),
            directives: Vec::new(),
            getter,
            blocking: false,
            on_get: Vec::new(),
            on_get_blocking: Vec::new(),
        }
    }

    /// A field resolved by reading the property of the same name off the
    /// parent object.
    pub fn property(name: impl Into<String>, ty: impl Into<OutputType>) -> Self {
        Self::new(
            name,
            ty,
            Arc::new(|ctx: ResolverContext<'_>| {
                Ok(ctx
                    .parent
                    .get(ctx.field_name)
                    .cloned()
                    .unwrap_or(serde_json::Value::Null))
            }),
        )
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDef) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    #[must_use]
    pub fn blocking(mut self) -> Self {
        self.blocking = true;
        self
    }

    #[must_use]
    pub fn on_get(mut self, hook: HookFn) -> Self {
        self.on_get.push(hook);
        self
    }

    #[must_use]
    pub fn on_get_blocking(mut self, hook: HookFn) -> Self {
        self.on_get_blocking.push(hook);
        self
    }
}

/// A field argument or an input object field.
#[derive(Clone)]
pub struct ArgumentDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: InputType,
    pub default_value: Option<serde_json::Value>,
    pub directives: Vec<DirectiveApplication>,
}

impl ArgumentDef {
    pub fn new(name: impl Into<String>, ty: impl Into<InputType>) -> Self {
        ArgumentDef {
            name: name.into(),
            description: None,
            ty: ty.into(),
            default_value: None,
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }
}
