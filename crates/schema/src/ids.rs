use crate::graph::{
    AppliedDirectiveRecord, DirectiveDefinitionRecord, EnumDefinitionRecord, EnumValueRecord,
    FieldDefinitionRecord, Graph, InputObjectDefinitionRecord, InputValueDefinitionRecord,
    InterfaceDefinitionRecord, ObjectDefinitionRecord, ScalarDefinitionRecord,
    UnionDefinitionRecord,
};

trellis_id_newtypes::id_newtypes! {
    Graph.strings[StringId] => String unless "Too many strings",
    Graph.object_definitions[ObjectDefinitionId] => ObjectDefinitionRecord unless "Too many objects",
    Graph.interface_definitions[InterfaceDefinitionId] => InterfaceDefinitionRecord unless "Too many interfaces",
    Graph.union_definitions[UnionDefinitionId] => UnionDefinitionRecord unless "Too many unions",
    Graph.enum_definitions[EnumDefinitionId] => EnumDefinitionRecord unless "Too many enums",
    Graph.scalar_definitions[ScalarDefinitionId] => ScalarDefinitionRecord unless "Too many scalars",
    Graph.input_object_definitions[InputObjectDefinitionId] => InputObjectDefinitionRecord unless "Too many input objects",
    Graph.field_definitions[FieldDefinitionId] => FieldDefinitionRecord unless "Too many fields",
    Graph.input_value_definitions[InputValueDefinitionId] => InputValueDefinitionRecord unless "Too many input values",
    Graph.enum_value_definitions[EnumValueId] => EnumValueRecord unless "Too many enum values",
    Graph.directive_definitions[DirectiveDefinitionId] => DirectiveDefinitionRecord unless "Too many directives",
    Graph.applied_directives[AppliedDirectiveId] => AppliedDirectiveRecord unless "Too many applied directives",
}
