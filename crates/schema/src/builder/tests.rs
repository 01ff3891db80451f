use std::sync::{Arc, Mutex};

use serde_json::json;

use trellis_response::{ErrorCode, GraphqlError};

use crate::builder::{BuildConfig, BuildError, DuplicateFieldPolicy};
use crate::dsl::*;
use crate::graph::TypeDefinitionId;
use crate::registry::FieldCoordinates;

fn unreachable_type_resolver() -> TypeResolverFn {
    Arc::new(|_| {
        Err(GraphqlError::new(
            "no type resolver installed",
            ErrorCode::InternalServerError,
        ))
    })
}

fn logging_hook(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> HookFn {
    let log = Arc::clone(log);
    Arc::new(move |_| {
        log.lock().unwrap().push(tag);
        Ok(())
    })
}

fn resolve(
    schema: &crate::Schema,
    type_name: &str,
    field_name: &str,
    parent: &serde_json::Value,
) -> Result<serde_json::Value, GraphqlError> {
    let arguments = serde_json::Map::new();
    schema
        .field_resolver(type_name, field_name)
        .unwrap_or_else(|| panic!("no resolver registered for {type_name}.{field_name}"))
        .resolve(ResolverContext {
            parent,
            arguments: &arguments,
            type_name,
            field_name,
        })
}

#[test]
fn empty_schema_still_carries_builtins() {
    let schema = SchemaDefinition::new().build().unwrap();

    for name in ["Int", "Float", "String", "Boolean", "ID"] {
        let definition = schema.definition_by_name(name);
        assert!(
            matches!(definition, Some(TypeDefinitionId::Scalar(_))),
            "missing built-in scalar {name}"
        );
    }
    let directives: Vec<&str> = schema
        .directive_definitions()
        .iter()
        .map(|record| schema[record.name_id].as_str())
        .collect();
    assert_eq!(directives, ["include", "skip", "specifiedBy", "deprecated"]);
}

#[test]
fn shared_node_is_transformed_once() {
    let address = ObjectType::new("Address")
        .with_fields([FieldDef::property("street", STRING_SCALAR.clone())])
        .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([
            FieldDef::property("home", address.clone()),
            FieldDef::property("work", address.clone()),
        ])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let addresses = schema
        .object_definitions
        .iter()
        .filter(|record| schema[record.name_id] == "Address")
        .count();
    assert_eq!(addresses, 1);
}

#[test]
fn identical_but_distinct_nodes_stay_distinct() {
    let first = ScalarType::new("Custom").into_arc();
    let second = ScalarType::new("Custom").into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(first.clone())
        .with_additional_type(second.clone())
        .build()
        .unwrap();

    let first_id = schema.snapshot().scalar_id(&first).unwrap();
    let second_id = schema.snapshot().scalar_id(&second).unwrap();
    assert_ne!(first_id, second_id);
}

#[test]
fn self_referential_object_reuses_the_reserved_id() {
    let node = ObjectType::new("Node").into_arc();
    assert!(node
        .set_fields([
            FieldDef::property("id", ID_SCALAR.clone()),
            FieldDef::property("next", OutputType::from(node.clone()).nullable()),
        ])
        .is_ok());
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("root", node.clone())])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let node_id = schema.snapshot().object_id(&node).unwrap();
    let next = schema
        .walk(node_id)
        .fields()
        .find(|field| field.name() == "next")
        .unwrap();
    assert_eq!(next.ty().item.definition_id(), node_id.into());
    assert_eq!(next.ty().to_string(), "Node");
    assert_eq!(
        schema.walk(node_id).fields().map(|f| f.name()).collect::<Vec<_>>(),
        ["id", "next"]
    );
}

#[test]
fn mutually_recursive_objects_build() {
    let author = ObjectType::new("Author").into_arc();
    let post = ObjectType::new("Post")
        .with_fields([FieldDef::property("author", author.clone())])
        .into_arc();
    assert!(author
        .set_fields([FieldDef::property(
            "posts",
            OutputType::from(post.clone()).list()
        )])
        .is_ok());
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("feed", OutputType::from(post).list())])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    assert!(schema.definition_by_name("Author").is_some());
    assert!(schema.definition_by_name("Post").is_some());
}

#[rstest::rstest]
#[case(OutputType::from(INT_SCALAR.clone()), "Int!")]
#[case(OutputType::from(INT_SCALAR.clone()).nullable(), "Int")]
#[case(OutputType::from(INT_SCALAR.clone()).nullable().list(), "[Int]!")]
#[case(OutputType::from(INT_SCALAR.clone()).list().nullable(), "[Int!]")]
#[case(OutputType::from(INT_SCALAR.clone()).nullable().list().nullable(), "[Int]")]
fn output_type_rendering(#[case] ty: OutputType, #[case] expected: &str) {
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("f", ty)])
        .into_arc();
    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let query_id = schema.root_operation_types().query.unwrap();
    let field = schema.walk(query_id).fields().next().unwrap();
    assert_eq!(field.ty().to_string(), expected);
}

#[test]
fn nullability_is_explicit() {
    let query = ObjectType::new("Query")
        .with_fields([
            FieldDef::property("a", INT_SCALAR.clone()),
            FieldDef::property("b", OutputType::from(INT_SCALAR.clone()).nullable()),
            FieldDef::property("c", OutputType::from(INT_SCALAR.clone()).list()),
            FieldDef::property(
                "d",
                OutputType::from(INT_SCALAR.clone())
                    .nullable()
                    .list()
                    .nullable(),
            ),
            FieldDef::property(
                "e",
                OutputType::from(INT_SCALAR.clone()).list().list().nullable(),
            ),
        ])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let query_id = schema.root_operation_types().query.unwrap();
    let types: Vec<String> = schema
        .walk(query_id)
        .fields()
        .map(|field| format!("{}: {}", field.name(), field.ty()))
        .collect();
    insta::assert_snapshot!(types.join("\n"), @r###"
    a: Int!
    b: Int
    c: [Int!]!
    d: [Int]
    e: [[Int!]!]
    "###);
}

#[test]
fn interface_fields_come_before_the_objects_own() {
    let named = InterfaceType::new("Named", unreachable_type_resolver())
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    let user = ObjectType::new("User")
        .with_interface(named.clone())
        .with_fields([FieldDef::property("email", STRING_SCALAR.clone())])
        .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("me", user.clone())])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let user_id = schema.snapshot().object_id(&user).unwrap();
    let fields: Vec<&str> = schema.walk(user_id).fields().map(|f| f.name()).collect();
    assert_eq!(fields, ["name", "email"]);

    // The inherited field resolves through the object's coordinates.
    let value = resolve(&schema, "User", "name", &json!({"name": "Alice"})).unwrap();
    assert_eq!(value, json!("Alice"));
}

#[test]
fn transitive_interfaces_are_flattened() {
    let node = InterfaceType::new("Node", unreachable_type_resolver())
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();
    let named = InterfaceType::new("Named", unreachable_type_resolver())
        .with_interface(node.clone())
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    let user = ObjectType::new("User")
        .with_interface(named)
        .with_fields([FieldDef::property("email", STRING_SCALAR.clone())])
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(user.clone())
        .build()
        .unwrap();

    let user_id = schema.snapshot().object_id(&user).unwrap();
    let fields: Vec<&str> = schema.walk(user_id).fields().map(|f| f.name()).collect();
    assert_eq!(fields, ["id", "name", "email"]);
    assert!(schema.field_resolver("User", "id").is_some());
}

#[test]
fn diamond_inheritance_keeps_the_first_field_by_default() {
    let base = InterfaceType::new("Base", unreachable_type_resolver())
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();
    let left = InterfaceType::new("Left", unreachable_type_resolver())
        .with_interface(base.clone())
        .into_arc();
    let right = InterfaceType::new("Right", unreachable_type_resolver())
        .with_interface(base)
        .into_arc();
    let ty = ObjectType::new("Leaf")
        .with_interface(left)
        .with_interface(right)
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(ty.clone())
        .build()
        .unwrap();

    let id = schema.snapshot().object_id(&ty).unwrap();
    let fields: Vec<&str> = schema.walk(id).fields().map(|f| f.name()).collect();
    assert_eq!(fields, ["id"]);
}

#[test]
fn duplicate_fields_can_be_rejected() {
    let base = InterfaceType::new("Base", unreachable_type_resolver())
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();
    let ty = ObjectType::new("Leaf")
        .with_interface(base)
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();

    let result = SchemaDefinition::new()
        .with_additional_type(ty)
        .build_with(BuildConfig {
            duplicate_field_policy: DuplicateFieldPolicy::Reject,
        });

    assert!(matches!(
        result,
        Err(BuildError::DuplicateField { ty, field }) if ty == "Leaf" && field == "id"
    ));
}

#[test]
fn last_wins_lets_a_type_override_an_inherited_getter() {
    let inherited_getter: ResolverFn = Arc::new(|_| Ok(json!("inherited")));
    let own_getter: ResolverFn = Arc::new(|_| Ok(json!("own")));

    let base = InterfaceType::new("Base", unreachable_type_resolver())
        .with_fields([FieldDef::new(
            "label",
            STRING_SCALAR.clone(),
            inherited_getter,
        )])
        .into_arc();
    let ty = ObjectType::new("Leaf")
        .with_interface(base)
        .with_fields([FieldDef::new("label", STRING_SCALAR.clone(), own_getter)])
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(ty)
        .build_with(BuildConfig {
            duplicate_field_policy: DuplicateFieldPolicy::LastWins,
        })
        .unwrap();

    let value = resolve(&schema, "Leaf", "label", &json!({})).unwrap();
    assert_eq!(value, json!("own"));
}

#[test]
fn hooks_compose_interface_then_type_then_field() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let interface = InterfaceType::new("Audited", unreachable_type_resolver())
        .on_get(logging_hook(&log, "interface"))
        .with_fields([])
        .into_arc();
    let ty = ObjectType::new("Account")
        .with_interface(interface)
        .on_get(logging_hook(&log, "type"))
        .with_fields([FieldDef::property("balance", INT_SCALAR.clone())
            .on_get(logging_hook(&log, "field"))])
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(ty)
        .build()
        .unwrap();

    resolve(&schema, "Account", "balance", &json!({"balance": 10})).unwrap();
    assert_eq!(*log.lock().unwrap(), ["interface", "type", "field"]);
}

#[test]
fn blocking_propagates_from_hooks_and_getters() {
    let ty = ObjectType::new("Query")
        .with_fields([
            FieldDef::property("fast", INT_SCALAR.clone()),
            FieldDef::property("slow", INT_SCALAR.clone()).blocking(),
            FieldDef::property("hooked", INT_SCALAR.clone())
                .on_get_blocking(Arc::new(|_| Ok(()))),
        ])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(ty).build().unwrap();

    assert!(!schema.field_resolver("Query", "fast").unwrap().is_blocking());
    assert!(schema.field_resolver("Query", "slow").unwrap().is_blocking());
    assert!(schema.field_resolver("Query", "hooked").unwrap().is_blocking());
}

#[test]
fn named_references_are_resolved_after_the_walk() {
    let node = ObjectType::new("Node")
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("root", OutputType::reference("Node"))])
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_query(query)
        .with_additional_type(node.clone())
        .build()
        .unwrap();

    let query_id = schema.root_operation_types().query.unwrap();
    let root = schema.walk(query_id).fields().next().unwrap();
    let node_id = schema.snapshot().object_id(&node).unwrap();
    assert_eq!(root.ty().item.definition_id(), node_id.into());
}

#[test]
fn unresolved_references_fail_the_build() {
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("root", OutputType::reference("Missing"))])
        .into_arc();

    let result = SchemaDefinition::new().with_query(query).build();

    assert!(matches!(
        result,
        Err(BuildError::UnresolvedTypeReference { name }) if name == "Missing"
    ));
}

#[test]
fn an_object_cannot_be_used_in_input_position() {
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("echo", STRING_SCALAR.clone())
            .with_argument(ArgumentDef::new("input", InputType::reference("Query")))])
        .into_arc();

    let result = SchemaDefinition::new().with_query(query).build();

    assert!(matches!(
        result,
        Err(BuildError::ExpectedInputType { name }) if name == "Query"
    ));
}

#[test]
fn a_shared_ancestor_interface_is_transformed_once() {
    let base = InterfaceType::new("Base", unreachable_type_resolver())
        .with_fields([FieldDef::property("id", ID_SCALAR.clone())])
        .into_arc();
    let left = InterfaceType::new("Left", unreachable_type_resolver())
        .with_interface(base.clone())
        .into_arc();
    let right = InterfaceType::new("Right", unreachable_type_resolver())
        .with_interface(base.clone())
        .into_arc();
    let leaf = ObjectType::new("Leaf")
        .with_interface(left)
        .with_interface(right)
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(leaf)
        .build()
        .unwrap();

    let bases = schema
        .interface_definitions
        .iter()
        .filter(|record| schema[record.name_id] == "Base")
        .count();
    assert_eq!(bases, 1);
    assert!(schema.snapshot().interface_id(&base).is_ok());
}

#[test]
fn union_members_resolve_through_the_type_discriminator() {
    let dog = ObjectType::new("Dog")
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    let cat = ObjectType::new("Cat")
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    let pet = {
        let (dog, cat) = (dog.clone(), cat.clone());
        UnionType::new(
            "Pet",
            Arc::new(move |value: &serde_json::Value| match value["kind"].as_str() {
                Some("dog") => Ok(dog.clone()),
                Some("cat") => Ok(cat.clone()),
                _ => Err(GraphqlError::new(
                    "unknown pet kind",
                    ErrorCode::FieldError,
                )),
            }),
        )
    }
    .with_type(dog.clone())
    .with_type(cat.clone())
    .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("pet", pet.clone())])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let pet_id = schema.snapshot().union_id(&pet).unwrap();
    let possible: Vec<&str> = schema
        .walk(pet_id)
        .possible_types()
        .map(|t| t.name())
        .collect();
    assert_eq!(possible, ["Dog", "Cat"]);

    let resolved = schema
        .resolve_abstract_type("Pet", &json!({"kind": "cat"}))
        .unwrap();
    assert_eq!(resolved, schema.snapshot().object_id(&cat).unwrap());

    let err = schema
        .resolve_abstract_type("Pet", &json!({"kind": "hamster"}))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FieldError);

    let err = schema
        .resolve_abstract_type("Plant", &json!({}))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeNotRegistered);
}

#[test]
fn a_discriminator_result_the_build_never_saw_is_a_registration_miss() {
    let dog = ObjectType::new("Dog")
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    // Never handed to the build; the discriminator returns it anyway.
    let stray = ObjectType::new("Stray")
        .with_fields([FieldDef::property("name", STRING_SCALAR.clone())])
        .into_arc();
    let pet = {
        let stray = stray.clone();
        UnionType::new("Pet", Arc::new(move |_: &serde_json::Value| Ok(stray.clone())))
    }
    .with_type(dog)
    .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("pet", pet)])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let err = schema
        .resolve_abstract_type("Pet", &json!({}))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeNotRegistered);
    assert_eq!(err.message, "Type was not registered: Stray");
    assert!(schema.snapshot().object_id(&stray).is_err());
}

#[test]
fn enum_values_are_stored_contiguously() {
    let status = EnumType::new("Status")
        .with_value("ACTIVE")
        .with_value("SUSPENDED")
        .with_value(EnumValueDef::new("DELETED").with_directive(
            DirectiveApplication::new(DEPRECATED_DIRECTIVE.clone())
                .with_argument("reason", json!("gone")),
        ))
        .into_arc();

    let schema = SchemaDefinition::new()
        .with_additional_type(status.clone())
        .build()
        .unwrap();

    let id = schema.snapshot().enum_id(&status).unwrap();
    let record = &schema[id];
    assert_eq!(record.value_ids.len(), 3);
    let names: Vec<&str> = record
        .value_ids
        .map(|value_id| schema[schema[value_id].name_id].as_str())
        .collect();
    assert_eq!(names, ["ACTIVE", "SUSPENDED", "DELETED"]);

    // Applying @deprecated reuses the pre-seeded definition.
    assert_eq!(schema.directive_definitions().len(), 4);
}

#[test]
fn directives_and_arguments_survive_the_transformation() {
    let tag = DirectiveDef::new("tag")
        .repeatable()
        .with_location(DirectiveLocation::FieldDefinition)
        .with_argument(ArgumentDef::new("name", STRING_SCALAR.clone()))
        .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("version", STRING_SCALAR.clone())
            .with_directive(
                DirectiveApplication::new(tag.clone()).with_argument("name", json!("public")),
            )])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let query_id = schema.root_operation_types().query.unwrap();
    let field = schema.walk(query_id).fields().next().unwrap();
    let directive_ids = &field.as_ref().directive_ids;
    assert_eq!(directive_ids.len(), 1);
    let applied = &schema[directive_ids[0]];
    let definition = &schema[applied.definition_id];
    assert_eq!(schema[definition.name_id], "tag");
    assert!(definition.repeatable);
    assert_eq!(applied.arguments.len(), 1);
    assert_eq!(schema[applied.arguments[0].0], "name");
    assert_eq!(applied.arguments[0].1, json!("public"));
}

#[test]
fn input_objects_nest() {
    let filter = InputObjectType::new("Filter")
        .with_field(ArgumentDef::new(
            "name",
            InputType::from(STRING_SCALAR.clone()).nullable(),
        ))
        .with_field(ArgumentDef::new("and", InputType::reference("Filter").list().nullable()))
        .into_arc();
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("users", OutputType::from(STRING_SCALAR.clone()).list())
            .with_argument(
                ArgumentDef::new("filter", InputType::from(filter.clone()).nullable())
                    .with_default_value(json!({})),
            )])
        .into_arc();

    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let filter_id = schema.snapshot().input_object_id(&filter).unwrap();
    let record = &schema[filter_id];
    assert_eq!(record.input_field_ids.len(), 2);
    let and = schema.walk(record.input_field_ids[1]);
    assert_eq!(and.ty().to_string(), "[Filter!]");
    assert_eq!(and.ty().item.definition_id(), filter_id.into());
}

#[test]
fn schema_description_and_directives_are_kept() {
    let internal = DirectiveDef::new("internal")
        .with_location(DirectiveLocation::Schema)
        .into_arc();
    let schema = SchemaDefinition::new()
        .with_description("The service schema.")
        .with_directive(DirectiveApplication::new(internal))
        .build()
        .unwrap();

    assert_eq!(schema.description(), Some("The service schema."));
    assert_eq!(schema.schema_directives().len(), 1);
}

#[test]
fn definitions_are_sorted_by_name() {
    let schema = SchemaDefinition::new()
        .with_additional_type(ScalarType::new("Zoo").into_arc())
        .with_additional_type(ScalarType::new("Aardvark").into_arc())
        .build()
        .unwrap();

    let names: Vec<&str> = schema
        .type_definitions()
        .map(|id| schema.definition_name(id))
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(schema.definition_by_name("Aardvark").is_some());
    assert!(schema.definition_by_name("Zoo").is_some());
}

#[test]
fn field_resolvers_are_looked_up_by_coordinates() {
    let query = ObjectType::new("Query")
        .with_fields([FieldDef::property("ping", STRING_SCALAR.clone())])
        .into_arc();
    let schema = SchemaDefinition::new().with_query(query).build().unwrap();

    let coordinates = FieldCoordinates::new("Query", "ping");
    assert_eq!(coordinates.to_string(), "Query.ping");
    assert!(schema.registry().field_resolver(&coordinates).is_some());
    assert!(schema.field_resolver("Query", "pong").is_none());
}
