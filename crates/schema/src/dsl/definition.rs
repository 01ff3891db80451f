use std::sync::{Arc, OnceLock};

use super::{ArgumentDef, DirectiveApplication, FieldDef, HookFn, TypeResolverFn};

pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by_url: Option<String>,
    pub directives: Vec<DirectiveApplication>,
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        ScalarType {
            name: name.into(),
            description: None,
            specified_by_url: None,
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_specified_by_url(mut self, url: impl Into<String>) -> Self {
        self.specified_by_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDef>,
    pub directives: Vec<DirectiveApplication>,
}

#[derive(Clone)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<DirectiveApplication>,
}

impl EnumValueDef {
    pub fn new(name: impl Into<String>) -> Self {
        EnumValueDef {
            name: name.into(),
            description: None,
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        EnumType {
            name: name.into(),
            description: None,
            values: Vec::new(),
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<EnumValueDef>) -> Self {
        self.values.push(value.into());
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl From<&str> for EnumValueDef {
    fn from(name: &str) -> Self {
        EnumValueDef::new(name)
    }
}

/// An object type. Fields are installed through a `OnceLock` so a node can
/// reference itself (or a type referencing it back) through `Arc` clones
/// handed out before the field list exists.
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<Arc<InterfaceType>>,
    pub directives: Vec<DirectiveApplication>,
    pub on_get: Vec<HookFn>,
    pub on_get_blocking: Vec<HookFn>,
    fields: OnceLock<Vec<FieldDef>>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        ObjectType {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            directives: Vec::new(),
            on_get: Vec::new(),
            on_get_blocking: Vec::new(),
            fields: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: Arc<InterfaceType>) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_fields(self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields
            .set(fields.into_iter().collect())
            .unwrap_or_else(|_| unreachable!("fields can only have been set through this builder"));
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
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

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Installs the field list after the node was arced, for self or mutual
    /// recursion. Returns the fields back when a list was already installed.
    pub fn set_fields(
        &self,
        fields: impl IntoIterator<Item = FieldDef>,
    ) -> Result<(), Vec<FieldDef>> {
        self.fields.set(fields.into_iter().collect())
    }

    pub fn fields(&self) -> &[FieldDef] {
        self.fields.get().map(Vec::as_slice).unwrap_or_default()
    }
}

/// An interface type. Shape only: resolvers bind to the concrete object
/// fields, the interface itself contributes a type-discriminator.
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<Arc<InterfaceType>>,
    pub directives: Vec<DirectiveApplication>,
    pub type_resolver: TypeResolverFn,
    pub on_get: Vec<HookFn>,
    pub on_get_blocking: Vec<HookFn>,
    fields: OnceLock<Vec<FieldDef>>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>, type_resolver: TypeResolverFn) -> Self {
        InterfaceType {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            directives: Vec::new(),
            type_resolver,
            on_get: Vec::new(),
            on_get_blocking: Vec::new(),
            fields: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: Arc<InterfaceType>) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_fields(self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields
            .set(fields.into_iter().collect())
            .unwrap_or_else(|_| unreachable!("fields can only have been set through this builder"));
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
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

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_fields(
        &self,
        fields: impl IntoIterator<Item = FieldDef>,
    ) -> Result<(), Vec<FieldDef>> {
        self.fields.set(fields.into_iter().collect())
    }

    pub fn fields(&self) -> &[FieldDef] {
        self.fields.get().map(Vec::as_slice).unwrap_or_default()
    }
}

pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<Arc<ObjectType>>,
    pub directives: Vec<DirectiveApplication>,
    pub type_resolver: TypeResolverFn,
}

impl UnionType {
    pub fn new(name: impl Into<String>, type_resolver: TypeResolverFn) -> Self {
        UnionType {
            name: name.into(),
            description: None,
            types: Vec::new(),
            directives: Vec::new(),
            type_resolver,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, ty: Arc<ObjectType>) -> Self {
        self.types.push(ty);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<ArgumentDef>,
    pub directives: Vec<DirectiveApplication>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        InputObjectType {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: ArgumentDef) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveApplication) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}
