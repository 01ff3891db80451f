//! Read-only views pairing an id with the schema it lives in, so call sites
//! can navigate the graph without threading the schema everywhere.

use crate::graph::*;
use crate::ids::*;
use crate::Schema;

#[derive(Clone, Copy)]
pub struct Walker<'a, I> {
    pub(crate) schema: &'a Schema,
    pub(crate) item: I,
}

impl Schema {
    pub fn walk<I>(&self, item: I) -> Walker<'_, I> {
        Walker { schema: self, item }
    }
}

pub type ObjectDefinition<'a> = Walker<'a, ObjectDefinitionId>;
pub type InterfaceDefinition<'a> = Walker<'a, InterfaceDefinitionId>;
pub type UnionDefinition<'a> = Walker<'a, UnionDefinitionId>;
pub type FieldDefinition<'a> = Walker<'a, FieldDefinitionId>;
pub type InputValueDefinition<'a> = Walker<'a, InputValueDefinitionId>;
pub type Type<'a> = Walker<'a, TypeRecord>;

impl<'a> ObjectDefinition<'a> {
    pub fn id(&self) -> ObjectDefinitionId {
        self.item
    }

    pub fn as_ref(&self) -> &'a ObjectDefinitionRecord {
        &self.schema[self.item]
    }

    pub fn name(&self) -> &'a str {
        &self.schema[self.as_ref().name_id]
    }

    pub fn description(&self) -> Option<&'a str> {
        self.as_ref().description_id.map(|id| self.schema[id].as_str())
    }

    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDefinition<'a>> + 'a {
        let schema = self.schema;
        self.as_ref()
            .interface_ids
            .iter()
            .map(move |id| schema.walk(*id))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldDefinition<'a>> + 'a {
        let schema = self.schema;
        self.as_ref().field_ids.iter().map(move |id| schema.walk(*id))
    }
}

impl<'a> InterfaceDefinition<'a> {
    pub fn id(&self) -> InterfaceDefinitionId {
        self.item
    }

    pub fn as_ref(&self) -> &'a InterfaceDefinitionRecord {
        &self.schema[self.item]
    }

    pub fn name(&self) -> &'a str {
        &self.schema[self.as_ref().name_id]
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldDefinition<'a>> + 'a {
        let schema = self.schema;
        self.as_ref().field_ids.iter().map(move |id| schema.walk(*id))
    }
}

impl<'a> UnionDefinition<'a> {
    pub fn as_ref(&self) -> &'a UnionDefinitionRecord {
        &self.schema[self.item]
    }

    pub fn name(&self) -> &'a str {
        &self.schema[self.as_ref().name_id]
    }

    pub fn possible_types(&self) -> impl Iterator<Item = ObjectDefinition<'a>> + 'a {
        let schema = self.schema;
        self.as_ref()
            .possible_type_ids
            .iter()
            .map(move |id| schema.walk(*id))
    }
}

impl<'a> FieldDefinition<'a> {
    pub fn id(&self) -> FieldDefinitionId {
        self.item
    }

    pub fn as_ref(&self) -> &'a FieldDefinitionRecord {
        &self.schema[self.item]
    }

    pub fn name(&self) -> &'a str {
        &self.schema[self.as_ref().name_id]
    }

    pub fn ty(&self) -> Type<'a> {
        self.schema.walk(self.as_ref().ty_record)
    }

    pub fn arguments(&self) -> impl Iterator<Item = InputValueDefinition<'a>> + 'a {
        let schema = self.schema;
        self.as_ref()
            .argument_ids
            .iter()
            .map(move |id| schema.walk(*id))
    }
}

impl<'a> InputValueDefinition<'a> {
    pub fn as_ref(&self) -> &'a InputValueDefinitionRecord {
        &self.schema[self.item]
    }

    pub fn name(&self) -> &'a str {
        &self.schema[self.as_ref().name_id]
    }

    pub fn ty(&self) -> Type<'a> {
        self.schema.walk(self.as_ref().ty_record)
    }

    pub fn default_value(&self) -> Option<&'a serde_json::Value> {
        self.as_ref().default_value.as_ref()
    }
}

impl<'a> Type<'a> {
    pub fn definition_name(&self) -> &'a str {
        self.schema.definition_name(self.item.definition_id())
    }
}

impl std::fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.item.wrapping.write_type_string(self.definition_name(), f)
    }
}

impl std::fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
