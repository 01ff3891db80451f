use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;

use trellis_wrapping::Wrapping;

use crate::dsl::{
    ArgumentDef, DirectiveApplication, DirectiveDef, EnumType, FieldDef, HookFn, InputObjectType,
    InputType, InterfaceType, ObjectType, OutputType, ScalarType, SourceDefinition, SourceId,
    UnionType,
};
use crate::graph::*;
use crate::ids::*;
use crate::registry::{FieldCoordinates, FieldResolver};

use super::cache::CacheSlot;
use super::{BuildError, DuplicateFieldPolicy, GraphBuilder};

fn base_wrapping(nullable: bool) -> Wrapping {
    Wrapping::new(!nullable)
}

impl GraphBuilder {
    fn intern(&mut self, string: &str) -> StringId {
        self.strings.get_or_new(string)
    }

    fn intern_opt(&mut self, string: Option<&String>) -> Option<StringId> {
        string.map(|string| self.strings.get_or_new(string.as_str()))
    }

    fn register_definition_name(&mut self, name_id: StringId, id: TypeDefinitionId) {
        // First registration wins, consistent with memoization by identity.
        self.definitions_by_name.entry(name_id).or_insert(id);
    }

    pub(super) fn insert_definition(
        &mut self,
        definition: &SourceDefinition,
    ) -> Result<TypeDefinitionId, BuildError> {
        match definition {
            SourceDefinition::Scalar(ty) => self.insert_scalar(ty).map(Into::into),
            SourceDefinition::Enum(ty) => self.insert_enum(ty).map(Into::into),
            SourceDefinition::Object(ty) => self.insert_object(ty).map(Into::into),
            SourceDefinition::Interface(ty) => self.insert_interface(ty).map(Into::into),
            SourceDefinition::Union(ty) => self.insert_union(ty).map(Into::into),
            SourceDefinition::InputObject(ty) => self.insert_input_object(ty).map(Into::into),
        }
    }

    /// Transforms a type in output position. The outer `nullable` unwrapping
    /// of the source node has already been consumed by the caller: a type is
    /// required unless an explicit `Nullable` layer said otherwise.
    fn insert_output_type(
        &mut self,
        ty: &OutputType,
        nullable: bool,
    ) -> Result<TypeRecord, BuildError> {
        match ty {
            OutputType::Nullable(inner) => self.insert_output_type(inner, true),
            OutputType::List(inner) => {
                let mut record = self.insert_output_type(inner, false)?;
                record.wrapping = if nullable {
                    record.wrapping.list()
                } else {
                    record.wrapping.list_non_null()
                };
                Ok(record)
            }
            OutputType::Ref(name) => Ok(TypeRecord {
                definition: TypeDefinitionRef::Named(self.intern(name)),
                wrapping: base_wrapping(nullable),
            }),
            OutputType::Scalar(ty) => {
                let id = self.insert_scalar(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            OutputType::Enum(ty) => {
                let id = self.insert_enum(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            OutputType::Object(ty) => {
                let id = self.insert_object(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            OutputType::Interface(ty) => {
                let id = self.insert_interface(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            OutputType::Union(ty) => {
                let id = self.insert_union(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
        }
    }

    fn insert_input_type(
        &mut self,
        ty: &InputType,
        nullable: bool,
    ) -> Result<TypeRecord, BuildError> {
        match ty {
            InputType::Nullable(inner) => self.insert_input_type(inner, true),
            InputType::List(inner) => {
                let mut record = self.insert_input_type(inner, false)?;
                record.wrapping = if nullable {
                    record.wrapping.list()
                } else {
                    record.wrapping.list_non_null()
                };
                Ok(record)
            }
            InputType::Ref(name) => Ok(TypeRecord {
                definition: TypeDefinitionRef::Named(self.intern(name)),
                wrapping: base_wrapping(nullable),
            }),
            InputType::Scalar(ty) => {
                let id = self.insert_scalar(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            InputType::Enum(ty) => {
                let id = self.insert_enum(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
            InputType::InputObject(ty) => {
                let id = self.insert_input_object(ty)?;
                Ok(TypeRecord {
                    definition: TypeDefinitionRef::Id(id.into()),
                    wrapping: base_wrapping(nullable),
                })
            }
        }
    }

    pub(super) fn insert_scalar(
        &mut self,
        ty: &Arc<ScalarType>,
    ) -> Result<ScalarDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        match self.scalars.get(key) {
            Some(CacheSlot::Done(id)) => return Ok(id),
            // A scalar's only dependencies are its directive applications and
            // those cannot legally lead back to the scalar itself.
            Some(CacheSlot::InProgress(_)) => {
                return Err(BuildError::RecursiveScalar {
                    name: ty.name.clone(),
                })
            }
            None => {}
        }

        let name_id = self.intern(&ty.name);
        let id = ScalarDefinitionId::from(self.graph.scalar_definitions.len());
        self.graph.scalar_definitions.push(ScalarDefinitionRecord {
            name_id,
            description_id: None,
            specified_by_url_id: None,
            directive_ids: Vec::new(),
        });
        self.scalars.start(key, id);
        self.register_definition_name(name_id, id.into());

        let description_id = self.intern_opt(ty.description.as_ref());
        let specified_by_url_id = self.intern_opt(ty.specified_by_url.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.specified_by_url_id = specified_by_url_id;
        record.directive_ids = directive_ids;

        self.scalars.finish(key, id);
        self.snapshot.scalars.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_enum(&mut self, ty: &Arc<EnumType>) -> Result<EnumDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        if let Some(slot) = self.enums.get(key) {
            return Ok(slot.id());
        }

        let name_id = self.intern(&ty.name);
        let id = EnumDefinitionId::from(self.graph.enum_definitions.len());
        self.graph.enum_definitions.push(EnumDefinitionRecord {
            name_id,
            description_id: None,
            value_ids: Default::default(),
            directive_ids: Vec::new(),
        });
        self.enums.start(key, id);
        self.register_definition_name(name_id, id.into());

        let description_id = self.intern_opt(ty.description.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        // Transform values into a staging buffer first: a directive on one of
        // them may pull in another enum, which would otherwise interleave its
        // records with ours and break the contiguous range.
        let mut value_records = Vec::with_capacity(ty.values.len());
        for value in &ty.values {
            let name_id = self.intern(&value.name);
            let description_id = self.intern_opt(value.description.as_ref());
            let directive_ids = self.insert_applied_directives(&value.directives)?;
            value_records.push(EnumValueRecord {
                name_id,
                description_id,
                directive_ids,
            });
        }
        let start = EnumValueId::from(self.graph.enum_value_definitions.len());
        let value_ids = trellis_id_newtypes::IdRange::from_start_and_length(start, value_records.len());
        self.graph.enum_value_definitions.extend(value_records);

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.value_ids = value_ids;
        record.directive_ids = directive_ids;

        self.enums.finish(key, id);
        self.snapshot.enums.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_object(
        &mut self,
        ty: &Arc<ObjectType>,
    ) -> Result<ObjectDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        if let Some(slot) = self.objects.get(key) {
            return Ok(slot.id());
        }

        let name_id = self.intern(&ty.name);
        let id = ObjectDefinitionId::from(self.graph.object_definitions.len());
        self.graph.object_definitions.push(ObjectDefinitionRecord {
            name_id,
            description_id: None,
            interface_ids: Vec::new(),
            field_ids: Vec::new(),
            directive_ids: Vec::new(),
        });
        self.objects.start(key, id);
        self.register_definition_name(name_id, id.into());

        let closure = interface_closure(&ty.interfaces)?;
        let mut interface_ids = Vec::with_capacity(ty.interfaces.len());
        for interface in &ty.interfaces {
            interface_ids.push(self.insert_interface(interface)?);
        }

        let fields = flatten_fields(
            &closure,
            ty.fields(),
            self.config.duplicate_field_policy,
            &ty.name,
        )?;
        let mut field_ids = Vec::with_capacity(fields.len());
        for field in &fields {
            field_ids.push(self.insert_field(field)?);
            self.registry.register_field_resolver(
                FieldCoordinates::new(&ty.name, &field.name),
                compose_resolver(&closure, &ty.on_get, &ty.on_get_blocking, field),
            );
        }

        let description_id = self.intern_opt(ty.description.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.interface_ids = interface_ids;
        record.field_ids = field_ids;
        record.directive_ids = directive_ids;

        self.objects.finish(key, id);
        self.snapshot.objects.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_interface(
        &mut self,
        ty: &Arc<InterfaceType>,
    ) -> Result<InterfaceDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        if let Some(slot) = self.interfaces.get(key) {
            return Ok(slot.id());
        }

        let name_id = self.intern(&ty.name);
        let id = InterfaceDefinitionId::from(self.graph.interface_definitions.len());
        self.graph
            .interface_definitions
            .push(InterfaceDefinitionRecord {
                name_id,
                description_id: None,
                interface_ids: Vec::new(),
                field_ids: Vec::new(),
                directive_ids: Vec::new(),
            });
        self.interfaces.start(key, id);
        self.register_definition_name(name_id, id.into());

        let closure = interface_closure(&ty.interfaces)?;
        let mut interface_ids = Vec::with_capacity(ty.interfaces.len());
        for interface in &ty.interfaces {
            interface_ids.push(self.insert_interface(interface)?);
        }

        let fields = flatten_fields(
            &closure,
            ty.fields(),
            self.config.duplicate_field_policy,
            &ty.name,
        )?;
        let mut field_ids = Vec::with_capacity(fields.len());
        for field in &fields {
            field_ids.push(self.insert_field(field)?);
        }

        let description_id = self.intern_opt(ty.description.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.interface_ids = interface_ids;
        record.field_ids = field_ids;
        record.directive_ids = directive_ids;

        self.registry
            .register_type_resolver(ty.name.clone(), ty.type_resolver.clone());
        self.interfaces.finish(key, id);
        self.snapshot.interfaces.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_union(&mut self, ty: &Arc<UnionType>) -> Result<UnionDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        if let Some(slot) = self.unions.get(key) {
            return Ok(slot.id());
        }

        let name_id = self.intern(&ty.name);
        let id = UnionDefinitionId::from(self.graph.union_definitions.len());
        self.graph.union_definitions.push(UnionDefinitionRecord {
            name_id,
            description_id: None,
            possible_type_ids: Vec::new(),
            directive_ids: Vec::new(),
        });
        self.unions.start(key, id);
        self.register_definition_name(name_id, id.into());

        let mut possible_type_ids = Vec::with_capacity(ty.types.len());
        for member in &ty.types {
            possible_type_ids.push(self.insert_object(member)?);
        }

        let description_id = self.intern_opt(ty.description.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.possible_type_ids = possible_type_ids;
        record.directive_ids = directive_ids;

        self.registry
            .register_type_resolver(ty.name.clone(), ty.type_resolver.clone());
        self.unions.finish(key, id);
        self.snapshot.unions.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_input_object(
        &mut self,
        ty: &Arc<InputObjectType>,
    ) -> Result<InputObjectDefinitionId, BuildError> {
        let key = SourceId::of(ty);
        if let Some(slot) = self.input_objects.get(key) {
            return Ok(slot.id());
        }

        let name_id = self.intern(&ty.name);
        let id = InputObjectDefinitionId::from(self.graph.input_object_definitions.len());
        self.graph
            .input_object_definitions
            .push(InputObjectDefinitionRecord {
                name_id,
                description_id: None,
                input_field_ids: Vec::new(),
                directive_ids: Vec::new(),
            });
        self.input_objects.start(key, id);
        self.register_definition_name(name_id, id.into());

        let mut input_field_ids = Vec::with_capacity(ty.fields.len());
        for field in &ty.fields {
            input_field_ids.push(self.insert_input_value(field)?);
        }

        let description_id = self.intern_opt(ty.description.as_ref());
        let directive_ids = self.insert_applied_directives(&ty.directives)?;

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.input_field_ids = input_field_ids;
        record.directive_ids = directive_ids;

        self.input_objects.finish(key, id);
        self.snapshot.input_objects.insert(key, (ty.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_directive_definition(
        &mut self,
        definition: &Arc<DirectiveDef>,
    ) -> Result<DirectiveDefinitionId, BuildError> {
        let key = SourceId::of(definition);
        match self.directives.get(key) {
            Some(CacheSlot::Done(id)) => return Ok(id),
            // An argument type carrying an application of the directive being
            // defined would need the definition before it exists.
            Some(CacheSlot::InProgress(_)) => {
                return Err(BuildError::RecursiveDirective {
                    name: definition.name.clone(),
                })
            }
            None => {}
        }

        let name_id = self.intern(&definition.name);
        let id = DirectiveDefinitionId::from(self.graph.directive_definitions.len());
        self.graph
            .directive_definitions
            .push(DirectiveDefinitionRecord {
                name_id,
                description_id: None,
                repeatable: definition.repeatable,
                locations: definition.locations.clone(),
                argument_ids: Vec::new(),
            });
        self.directives.start(key, id);

        let description_id = self.intern_opt(definition.description.as_ref());
        let mut argument_ids = Vec::with_capacity(definition.arguments.len());
        for argument in &definition.arguments {
            argument_ids.push(self.insert_input_value(argument)?);
        }

        let record = &mut self.graph[id];
        record.description_id = description_id;
        record.argument_ids = argument_ids;

        self.directives.finish(key, id);
        self.snapshot
            .directives
            .insert(definition.name.clone(), (definition.clone(), id));
        Ok(id)
    }

    pub(super) fn insert_applied_directives(
        &mut self,
        applications: &[DirectiveApplication],
    ) -> Result<Vec<AppliedDirectiveId>, BuildError> {
        let mut ids = Vec::with_capacity(applications.len());
        for application in applications {
            let definition_id = self.insert_directive_definition(&application.definition)?;
            let arguments = application
                .arguments
                .iter()
                .map(|(name, value)| (self.intern(name), value.clone()))
                .collect_vec();
            let id = AppliedDirectiveId::from(self.graph.applied_directives.len());
            self.graph.applied_directives.push(AppliedDirectiveRecord {
                definition_id,
                arguments,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    fn insert_field(&mut self, field: &FieldDef) -> Result<FieldDefinitionId, BuildError> {
        let ty_record = self.insert_output_type(&field.ty, false)?;
        let name_id = self.intern(&field.name);
        let description_id = self.intern_opt(field.description.as_ref());
        let mut argument_ids = Vec::with_capacity(field.arguments.len());
        for argument in &field.arguments {
            argument_ids.push(self.insert_input_value(argument)?);
        }
        let directive_ids = self.insert_applied_directives(&field.directives)?;

        let id = FieldDefinitionId::from(self.graph.field_definitions.len());
        self.graph.field_definitions.push(FieldDefinitionRecord {
            name_id,
            description_id,
            ty_record,
            argument_ids,
            directive_ids,
        });
        Ok(id)
    }

    fn insert_input_value(
        &mut self,
        argument: &ArgumentDef,
    ) -> Result<InputValueDefinitionId, BuildError> {
        let ty_record = self.insert_input_type(&argument.ty, false)?;
        let name_id = self.intern(&argument.name);
        let description_id = self.intern_opt(argument.description.as_ref());
        let directive_ids = self.insert_applied_directives(&argument.directives)?;

        let id = InputValueDefinitionId::from(self.graph.input_value_definitions.len());
        self.graph
            .input_value_definitions
            .push(InputValueDefinitionRecord {
                name_id,
                description_id,
                ty_record,
                default_value: argument.default_value.clone(),
                directive_ids,
            });
        Ok(id)
    }
}

/// Every interface transitively implemented, ancestors ahead of the
/// interfaces declaring them. A diamond contributes the shared ancestor once
/// per path; the duplicate field policy decides what happens to its fields.
fn interface_closure(
    interfaces: &[Arc<InterfaceType>],
) -> Result<Vec<Arc<InterfaceType>>, BuildError> {
    fn visit(
        interface: &Arc<InterfaceType>,
        path: &mut Vec<SourceId>,
        out: &mut Vec<Arc<InterfaceType>>,
    ) -> Result<(), BuildError> {
        let key = SourceId::of(interface);
        if path.contains(&key) {
            return Err(BuildError::CyclicInterface {
                name: interface.name.clone(),
            });
        }
        path.push(key);
        for parent in &interface.interfaces {
            visit(parent, path, out)?;
        }
        path.pop();
        out.push(interface.clone());
        Ok(())
    }

    let mut out = Vec::new();
    let mut path = Vec::new();
    for interface in interfaces {
        visit(interface, &mut path, &mut out)?;
    }
    Ok(out)
}

/// Inherited fields first, in closure order, then the type's own fields.
/// Name collisions are settled by the configured policy.
fn flatten_fields(
    closure: &[Arc<InterfaceType>],
    own_fields: &[FieldDef],
    policy: DuplicateFieldPolicy,
    type_name: &str,
) -> Result<Vec<FieldDef>, BuildError> {
    let mut fields: IndexMap<&str, &FieldDef> = IndexMap::new();
    let inherited = closure.iter().flat_map(|interface| interface.fields());
    for field in inherited.chain(own_fields) {
        match fields.entry(field.name.as_str()) {
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(field);
            }
            indexmap::map::Entry::Occupied(mut entry) => match policy {
                DuplicateFieldPolicy::FirstWins => {}
                DuplicateFieldPolicy::LastWins => {
                    entry.insert(field);
                }
                DuplicateFieldPolicy::Reject => {
                    return Err(BuildError::DuplicateField {
                        ty: type_name.to_string(),
                        field: field.name.clone(),
                    })
                }
            },
        }
    }
    Ok(fields.into_values().cloned().collect())
}

/// Chains hooks outermost-interface first, then the object's own hooks, then
/// the field's, with the non-blocking chain ahead of the blocking one.
fn compose_resolver(
    closure: &[Arc<InterfaceType>],
    type_hooks: &[HookFn],
    type_blocking_hooks: &[HookFn],
    field: &FieldDef,
) -> FieldResolver {
    let mut hooks: Vec<HookFn> = Vec::new();
    let mut blocking_hooks: Vec<HookFn> = Vec::new();
    for interface in closure {
        hooks.extend(interface.on_get.iter().cloned());
        blocking_hooks.extend(interface.on_get_blocking.iter().cloned());
    }
    hooks.extend(type_hooks.iter().cloned());
    blocking_hooks.extend(type_blocking_hooks.iter().cloned());
    hooks.extend(field.on_get.iter().cloned());
    blocking_hooks.extend(field.on_get_blocking.iter().cloned());

    FieldResolver {
        hooks,
        blocking_hooks,
        getter: field.getter.clone(),
        getter_blocking: field.blocking,
    }
}
