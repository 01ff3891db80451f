use trellis_id_newtypes::IdRange;
use trellis_wrapping::Wrapping;

use crate::dsl::DirectiveLocation;
use crate::ids::*;

/// The target schema graph. Every cross-reference is a plain index into one
/// of the arenas below, so references are always valid and cycles cost
/// nothing to represent.
pub struct Graph {
    pub(crate) description_id: Option<StringId>,
    pub(crate) root_operation_types: RootOperationTypes,
    /// All type definitions, sorted by name.
    pub(crate) definitions: Vec<TypeDefinitionId>,
    pub(crate) schema_directive_ids: Vec<AppliedDirectiveId>,

    pub(crate) strings: Vec<String>,
    pub(crate) object_definitions: Vec<ObjectDefinitionRecord>,
    pub(crate) interface_definitions: Vec<InterfaceDefinitionRecord>,
    pub(crate) union_definitions: Vec<UnionDefinitionRecord>,
    pub(crate) enum_definitions: Vec<EnumDefinitionRecord>,
    pub(crate) scalar_definitions: Vec<ScalarDefinitionRecord>,
    pub(crate) input_object_definitions: Vec<InputObjectDefinitionRecord>,
    pub(crate) field_definitions: Vec<FieldDefinitionRecord>,
    pub(crate) input_value_definitions: Vec<InputValueDefinitionRecord>,
    pub(crate) enum_value_definitions: Vec<EnumValueRecord>,
    pub(crate) directive_definitions: Vec<DirectiveDefinitionRecord>,
    pub(crate) applied_directives: Vec<AppliedDirectiveRecord>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RootOperationTypes {
    pub query: Option<ObjectDefinitionId>,
    pub mutation: Option<ObjectDefinitionId>,
    pub subscription: Option<ObjectDefinitionId>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDefinitionId {
    Scalar(ScalarDefinitionId),
    Object(ObjectDefinitionId),
    Interface(InterfaceDefinitionId),
    Union(UnionDefinitionId),
    Enum(EnumDefinitionId),
    InputObject(InputObjectDefinitionId),
}

impl std::fmt::Debug for TypeDefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDefinitionId::Scalar(id) => id.fmt(f),
            TypeDefinitionId::Object(id) => id.fmt(f),
            TypeDefinitionId::Interface(id) => id.fmt(f),
            TypeDefinitionId::Union(id) => id.fmt(f),
            TypeDefinitionId::Enum(id) => id.fmt(f),
            TypeDefinitionId::InputObject(id) => id.fmt(f),
        }
    }
}

impl From<ScalarDefinitionId> for TypeDefinitionId {
    fn from(id: ScalarDefinitionId) -> Self {
        TypeDefinitionId::Scalar(id)
    }
}
impl From<ObjectDefinitionId> for TypeDefinitionId {
    fn from(id: ObjectDefinitionId) -> Self {
        TypeDefinitionId::Object(id)
    }
}
impl From<InterfaceDefinitionId> for TypeDefinitionId {
    fn from(id: InterfaceDefinitionId) -> Self {
        TypeDefinitionId::Interface(id)
    }
}
impl From<UnionDefinitionId> for TypeDefinitionId {
    fn from(id: UnionDefinitionId) -> Self {
        TypeDefinitionId::Union(id)
    }
}
impl From<EnumDefinitionId> for TypeDefinitionId {
    fn from(id: EnumDefinitionId) -> Self {
        TypeDefinitionId::Enum(id)
    }
}
impl From<InputObjectDefinitionId> for TypeDefinitionId {
    fn from(id: InputObjectDefinitionId) -> Self {
        TypeDefinitionId::InputObject(id)
    }
}

impl TypeDefinitionId {
    pub fn is_object(&self) -> bool {
        matches!(self, TypeDefinitionId::Object(_))
    }

    pub fn as_object(&self) -> Option<ObjectDefinitionId> {
        match self {
            TypeDefinitionId::Object(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<InterfaceDefinitionId> {
        match self {
            TypeDefinitionId::Interface(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<UnionDefinitionId> {
        match self {
            TypeDefinitionId::Union(id) => Some(*id),
            _ => None,
        }
    }

    /// Scalars and enums are the only kinds living in both the input and the
    /// output universe.
    pub fn is_output(&self) -> bool {
        !matches!(self, TypeDefinitionId::InputObject(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(
            self,
            TypeDefinitionId::Scalar(_) | TypeDefinitionId::Enum(_) | TypeDefinitionId::InputObject(_)
        )
    }
}

/// Reference to a type definition. `Named` only exists while the graph is
/// being built: a post-processing pass rewrites every named reference to an
/// id before the schema is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefinitionRef {
    Id(TypeDefinitionId),
    Named(StringId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRecord {
    pub definition: TypeDefinitionRef,
    pub wrapping: Wrapping,
}

impl TypeRecord {
    pub fn definition_id(&self) -> TypeDefinitionId {
        match self.definition {
            TypeDefinitionRef::Id(id) => id,
            TypeDefinitionRef::Named(_) => {
                unreachable!("type references are resolved when the schema is built")
            }
        }
    }
}

#[derive(Debug)]
pub struct ObjectDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub interface_ids: Vec<InterfaceDefinitionId>,
    pub field_ids: Vec<FieldDefinitionId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct InterfaceDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub interface_ids: Vec<InterfaceDefinitionId>,
    pub field_ids: Vec<FieldDefinitionId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct UnionDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub possible_type_ids: Vec<ObjectDefinitionId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct EnumDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub value_ids: IdRange<EnumValueId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct EnumValueRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct ScalarDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub specified_by_url_id: Option<StringId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct InputObjectDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub input_field_ids: Vec<InputValueDefinitionId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct FieldDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub ty_record: TypeRecord,
    pub argument_ids: Vec<InputValueDefinitionId>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct InputValueDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub ty_record: TypeRecord,
    pub default_value: Option<serde_json::Value>,
    pub directive_ids: Vec<AppliedDirectiveId>,
}

#[derive(Debug)]
pub struct DirectiveDefinitionRecord {
    pub name_id: StringId,
    pub description_id: Option<StringId>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub argument_ids: Vec<InputValueDefinitionId>,
}

/// One application of a directive to a schema element, with its argument
/// values.
#[derive(Debug)]
pub struct AppliedDirectiveRecord {
    pub definition_id: DirectiveDefinitionId,
    pub arguments: Vec<(StringId, serde_json::Value)>,
}

impl Graph {
    pub fn description(&self) -> Option<&str> {
        self.description_id.map(|id| self[id].as_str())
    }

    pub fn root_operation_types(&self) -> RootOperationTypes {
        self.root_operation_types
    }

    pub fn type_definitions(&self) -> impl ExactSizeIterator<Item = TypeDefinitionId> + '_ {
        self.definitions.iter().copied()
    }

    pub fn schema_directives(&self) -> impl ExactSizeIterator<Item = &AppliedDirectiveRecord> {
        self.schema_directive_ids.iter().map(|id| &self[*id])
    }

    pub fn directive_definitions(&self) -> &[DirectiveDefinitionRecord] {
        &self.directive_definitions
    }

    pub fn definition_by_name(&self, name: &str) -> Option<TypeDefinitionId> {
        self.definitions
            .binary_search_by_key(&name, |definition| self.definition_name(*definition))
            .map(|index| self.definitions[index])
            .ok()
    }

    pub fn definition_name(&self, definition: TypeDefinitionId) -> &str {
        let name_id = match definition {
            TypeDefinitionId::Scalar(id) => self[id].name_id,
            TypeDefinitionId::Object(id) => self[id].name_id,
            TypeDefinitionId::Interface(id) => self[id].name_id,
            TypeDefinitionId::Union(id) => self[id].name_id,
            TypeDefinitionId::Enum(id) => self[id].name_id,
            TypeDefinitionId::InputObject(id) => self[id].name_id,
        };
        &self[name_id]
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("definitions", &self.definitions.len())
            .field("fields", &self.field_definitions.len())
            .finish_non_exhaustive()
    }
}
