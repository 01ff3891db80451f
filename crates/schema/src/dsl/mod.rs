//! The author-facing schema description: typed builder objects forming a
//! possibly-cyclic graph of type nodes. Nodes are `Arc`-allocated and cached
//! by pointer identity during transformation, so two structurally identical
//! nodes are two distinct schema elements.

mod builtin;
mod definition;
mod directive;
mod field;

pub use builtin::*;
pub use definition::*;
pub use directive::*;
pub use field::*;

use std::sync::Arc;

/// Identity of a source node: the `Arc` allocation address. Unique among
/// live nodes; the transformation keeps every registered `Arc` alive in the
/// runtime snapshot, so an id can never be reused behind our back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SourceId(usize);

impl SourceId {
    pub(crate) fn of<T>(node: &Arc<T>) -> Self {
        SourceId(Arc::as_ptr(node) as usize)
    }
}

/// A type node in output position.
#[derive(Clone)]
pub enum OutputType {
    Scalar(Arc<ScalarType>),
    Enum(Arc<EnumType>),
    Object(Arc<ObjectType>),
    Interface(Arc<InterfaceType>),
    Union(Arc<UnionType>),
    /// Forward reference by name, resolved once the full schema is
    /// assembled.
    Ref(String),
    List(Box<OutputType>),
    Nullable(Box<OutputType>),
}

/// A type node in input position. Objects, interfaces and unions cannot
/// appear here, which the type system enforces at construction time.
#[derive(Clone)]
pub enum InputType {
    Scalar(Arc<ScalarType>),
    Enum(Arc<EnumType>),
    InputObject(Arc<InputObjectType>),
    Ref(String),
    List(Box<InputType>),
    Nullable(Box<InputType>),
}

impl OutputType {
    pub fn reference(name: impl Into<String>) -> Self {
        OutputType::Ref(name.into())
    }

    #[must_use]
    pub fn list(self) -> Self {
        OutputType::List(Box::new(self))
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        OutputType::Nullable(Box::new(self))
    }
}

impl InputType {
    pub fn reference(name: impl Into<String>) -> Self {
        InputType::Ref(name.into())
    }

    #[must_use]
    pub fn list(self) -> Self {
        InputType::List(Box::new(self))
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        InputType::Nullable(Box::new(self))
    }
}

impl From<Arc<ScalarType>> for OutputType {
    fn from(ty: Arc<ScalarType>) -> Self {
        OutputType::Scalar(ty)
    }
}
impl From<Arc<EnumType>> for OutputType {
    fn from(ty: Arc<EnumType>) -> Self {
        OutputType::Enum(ty)
    }
}
impl From<Arc<ObjectType>> for OutputType {
    fn from(ty: Arc<ObjectType>) -> Self {
        OutputType::Object(ty)
    }
}
impl From<Arc<InterfaceType>> for OutputType {
    fn from(ty: Arc<InterfaceType>) -> Self {
        OutputType::Interface(ty)
    }
}
impl From<Arc<UnionType>> for OutputType {
    fn from(ty: Arc<UnionType>) -> Self {
        OutputType::Union(ty)
    }
}

impl From<Arc<ScalarType>> for InputType {
    fn from(ty: Arc<ScalarType>) -> Self {
        InputType::Scalar(ty)
    }
}
impl From<Arc<EnumType>> for InputType {
    fn from(ty: Arc<EnumType>) -> Self {
        InputType::Enum(ty)
    }
}
impl From<Arc<InputObjectType>> for InputType {
    fn from(ty: Arc<InputObjectType>) -> Self {
        InputType::InputObject(ty)
    }
}

/// Any named type definition, the unit registered through
/// `SchemaDefinition::with_additional_type` and resolved through the runtime
/// snapshot.
#[derive(Clone)]
pub enum SourceDefinition {
    Scalar(Arc<ScalarType>),
    Enum(Arc<EnumType>),
    Object(Arc<ObjectType>),
    Interface(Arc<InterfaceType>),
    Union(Arc<UnionType>),
    InputObject(Arc<InputObjectType>),
}

impl SourceDefinition {
    pub fn name(&self) -> &str {
        match self {
            SourceDefinition::Scalar(ty) => &ty.name,
            SourceDefinition::Enum(ty) => &ty.name,
            SourceDefinition::Object(ty) => &ty.name,
            SourceDefinition::Interface(ty) => &ty.name,
            SourceDefinition::Union(ty) => &ty.name,
            SourceDefinition::InputObject(ty) => &ty.name,
        }
    }
}

impl From<Arc<ScalarType>> for SourceDefinition {
    fn from(ty: Arc<ScalarType>) -> Self {
        SourceDefinition::Scalar(ty)
    }
}
impl From<Arc<EnumType>> for SourceDefinition {
    fn from(ty: Arc<EnumType>) -> Self {
        SourceDefinition::Enum(ty)
    }
}
impl From<Arc<ObjectType>> for SourceDefinition {
    fn from(ty: Arc<ObjectType>) -> Self {
        SourceDefinition::Object(ty)
    }
}
impl From<Arc<InterfaceType>> for SourceDefinition {
    fn from(ty: Arc<InterfaceType>) -> Self {
        SourceDefinition::Interface(ty)
    }
}
impl From<Arc<UnionType>> for SourceDefinition {
    fn from(ty: Arc<UnionType>) -> Self {
        SourceDefinition::Union(ty)
    }
}
impl From<Arc<InputObjectType>> for SourceDefinition {
    fn from(ty: Arc<InputObjectType>) -> Self {
        SourceDefinition::InputObject(ty)
    }
}

/// The root schema description handed to the transformation.
#[derive(Default)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub query: Option<Arc<ObjectType>>,
    pub mutation: Option<Arc<ObjectType>>,
    pub subscription: Option<Arc<ObjectType>>,
    /// Types to register even when nothing reachable from the roots
    /// references them.
    pub additional_types: Vec<SourceDefinition>,
    pub additional_directives: Vec<Arc<DirectiveDef>>,
    /// Schema-level directive applications.
    pub directives: Vec<DirectiveApplication>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Arc<ObjectType>) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn with_mutation(mut self, mutation: Arc<ObjectType>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    #[must_use]
    pub fn with_subscription(mut self, subscription: Arc<ObjectType>) -> Self {
        self.subscription = Some(subscription);
        self
    }

    #[must_use]
    pub fn with_additional_type(mut self, ty: impl Into<SourceDefinition>) -> Self {
        self.additional_types.push(ty.into());
        self
    }

    #[must_use]
    pub fn with_additional_directive(mut self, directive: Arc<DirectiveDef>) -> Self {
        self.additional_directives.push(directive);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    /// Transforms this description into an immutable engine schema. Any
    /// configuration error aborts the build; no partial schema is ever
    /// returned.
    pub fn build(&self) -> Result<crate::Schema, crate::BuildError> {
        self.build_with(crate::BuildConfig::default())
    }

    pub fn build_with(
        &self,
        config: crate::BuildConfig,
    ) -> Result<crate::Schema, crate::BuildError> {
        crate::builder::build(self, config)
    }
}
