use std::sync::Arc;

use fxhash::FxHashMap;

use trellis_response::{ErrorCode, GraphqlError};

use crate::dsl::{
    DirectiveDef, EnumType, InputObjectType, InterfaceType, ObjectType, ScalarType, SourceDefinition,
    SourceId, UnionType,
};
use crate::graph::TypeDefinitionId;
use crate::ids::*;

/// The build-time caches, frozen once transformation completes. Maps source
/// node identity to the id of the target node it became. Read-only, safe
/// for unsynchronized concurrent reads, and holds the source `Arc`s so node
/// identities stay stable for the lifetime of the schema.
#[derive(Default)]
pub struct RuntimeSnapshot {
    pub(crate) scalars: FxHashMap<SourceId, (Arc<ScalarType>, ScalarDefinitionId)>,
    pub(crate) enums: FxHashMap<SourceId, (Arc<EnumType>, EnumDefinitionId)>,
    pub(crate) objects: FxHashMap<SourceId, (Arc<ObjectType>, ObjectDefinitionId)>,
    pub(crate) interfaces: FxHashMap<SourceId, (Arc<InterfaceType>, InterfaceDefinitionId)>,
    pub(crate) unions: FxHashMap<SourceId, (Arc<UnionType>, UnionDefinitionId)>,
    pub(crate) input_objects: FxHashMap<SourceId, (Arc<InputObjectType>, InputObjectDefinitionId)>,
    pub(crate) directives: FxHashMap<String, (Arc<DirectiveDef>, DirectiveDefinitionId)>,
}

fn not_registered(name: &str) -> GraphqlError {
    GraphqlError::new(
        format!("Type was not registered: {name}"),
        ErrorCode::TypeNotRegistered,
    )
}

impl RuntimeSnapshot {
    pub fn scalar_id(&self, ty: &Arc<ScalarType>) -> Result<ScalarDefinitionId, GraphqlError> {
        self.scalars
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn enum_id(&self, ty: &Arc<EnumType>) -> Result<EnumDefinitionId, GraphqlError> {
        self.enums
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn object_id(&self, ty: &Arc<ObjectType>) -> Result<ObjectDefinitionId, GraphqlError> {
        self.objects
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn interface_id(
        &self,
        ty: &Arc<InterfaceType>,
    ) -> Result<InterfaceDefinitionId, GraphqlError> {
        self.interfaces
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn union_id(&self, ty: &Arc<UnionType>) -> Result<UnionDefinitionId, GraphqlError> {
        self.unions
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn input_object_id(
        &self,
        ty: &Arc<InputObjectType>,
    ) -> Result<InputObjectDefinitionId, GraphqlError> {
        self.input_objects
            .get(&SourceId::of(ty))
            .map(|(_, id)| *id)
            .ok_or_else(|| not_registered(&ty.name))
    }

    pub fn directive_id(&self, name: &str) -> Result<DirectiveDefinitionId, GraphqlError> {
        self.directives
            .get(name)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                GraphqlError::new(
                    format!("Directive was not registered: {name}"),
                    ErrorCode::TypeNotRegistered,
                )
            })
    }

    /// Resolves a source definition in output position to its target id,
    /// dispatching across the five output-capable kinds.
    pub fn resolve_output_type(
        &self,
        definition: &SourceDefinition,
    ) -> Result<TypeDefinitionId, GraphqlError> {
        match definition {
            SourceDefinition::Scalar(ty) => self.scalar_id(ty).map(Into::into),
            SourceDefinition::Enum(ty) => self.enum_id(ty).map(Into::into),
            SourceDefinition::Object(ty) => self.object_id(ty).map(Into::into),
            SourceDefinition::Interface(ty) => self.interface_id(ty).map(Into::into),
            SourceDefinition::Union(ty) => self.union_id(ty).map(Into::into),
            SourceDefinition::InputObject(ty) => Err(GraphqlError::new(
                format!("'{}' is an input object type, not an output type", ty.name),
                ErrorCode::InternalServerError,
            )),
        }
    }
}

impl std::fmt::Debug for RuntimeSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeSnapshot")
            .field("scalars", &self.scalars.len())
            .field("enums", &self.enums.len())
            .field("objects", &self.objects.len())
            .field("interfaces", &self.interfaces.len())
            .field("unions", &self.unions.len())
            .field("input_objects", &self.input_objects.len())
            .field("directives", &self.directives.len())
            .finish()
    }
}
