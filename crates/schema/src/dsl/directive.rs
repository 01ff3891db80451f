use std::sync::Arc;

use super::ArgumentDef;

/// The places a directive may legally be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: Vec<ArgumentDef>,
}

impl DirectiveDef {
    pub fn new(name: impl Into<String>) -> Self {
        DirectiveDef {
            name: name.into(),
            description: None,
            repeatable: false,
            locations: Vec::new(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: DirectiveLocation) -> Self {
        self.locations.push(location);
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDef) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// One use of a directive on a schema element: the definition plus argument
/// values. Applying it ensures the definition itself gets registered first.
#[derive(Clone)]
pub struct DirectiveApplication {
    pub definition: Arc<DirectiveDef>,
    pub arguments: Vec<(String, serde_json::Value)>,
}

impl DirectiveApplication {
    pub fn new(definition: Arc<DirectiveDef>) -> Self {
        DirectiveApplication {
            definition,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_argument(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }
}
