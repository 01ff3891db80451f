//! Built-in scalars and directives, constructed once per process and seeded
//! into every transform context ahead of user definitions.

use std::sync::{Arc, LazyLock};

use super::{ArgumentDef, DirectiveDef, DirectiveLocation, InputType, ScalarType};

pub static INT_SCALAR: LazyLock<Arc<ScalarType>> = LazyLock::new(|| {
    ScalarType::new("Int")
        .with_description("A signed 32-bit integer.")
        .into_arc()
});

pub static FLOAT_SCALAR: LazyLock<Arc<ScalarType>> = LazyLock::new(|| {
    ScalarType::new("Float")
        .with_description("A signed double-precision floating-point value.")
        .into_arc()
});

pub static STRING_SCALAR: LazyLock<Arc<ScalarType>> = LazyLock::new(|| {
    ScalarType::new("String")
        .with_description("A UTF-8 character sequence.")
        .into_arc()
});

pub static BOOLEAN_SCALAR: LazyLock<Arc<ScalarType>> =
    LazyLock::new(|| ScalarType::new("Boolean").with_description("true or false.").into_arc());

pub static ID_SCALAR: LazyLock<Arc<ScalarType>> = LazyLock::new(|| {
    ScalarType::new("ID")
        .with_description("A unique identifier, serialized as a string.")
        .into_arc()
});

pub static INCLUDE_DIRECTIVE: LazyLock<Arc<DirectiveDef>> = LazyLock::new(|| {
    DirectiveDef::new("include")
        .with_description("Includes a field or fragment only when the `if` argument is true.")
        .with_location(DirectiveLocation::Field)
        .with_location(DirectiveLocation::FragmentSpread)
        .with_location(DirectiveLocation::InlineFragment)
        .with_argument(ArgumentDef::new("if", InputType::from(BOOLEAN_SCALAR.clone())))
        .into_arc()
});

pub static SKIP_DIRECTIVE: LazyLock<Arc<DirectiveDef>> = LazyLock::new(|| {
    DirectiveDef::new("skip")
        .with_description("Skips a field or fragment when the `if` argument is true.")
        .with_location(DirectiveLocation::Field)
        .with_location(DirectiveLocation::FragmentSpread)
        .with_location(DirectiveLocation::InlineFragment)
        .with_argument(ArgumentDef::new("if", InputType::from(BOOLEAN_SCALAR.clone())))
        .into_arc()
});

pub static SPECIFIED_BY_DIRECTIVE: LazyLock<Arc<DirectiveDef>> = LazyLock::new(|| {
    DirectiveDef::new("specifiedBy")
        .with_description("Exposes the specification URL of a custom scalar.")
        .with_location(DirectiveLocation::Scalar)
        .with_argument(ArgumentDef::new("url", InputType::from(STRING_SCALAR.clone())))
        .into_arc()
});

pub static DEPRECATED_DIRECTIVE: LazyLock<Arc<DirectiveDef>> = LazyLock::new(|| {
    DirectiveDef::new("deprecated")
        .with_description("Marks the schema element as no longer supported.")
        .with_location(DirectiveLocation::FieldDefinition)
        .with_location(DirectiveLocation::ArgumentDefinition)
        .with_location(DirectiveLocation::InputFieldDefinition)
        .with_location(DirectiveLocation::EnumValue)
        .with_argument(
            ArgumentDef::new("reason", InputType::from(STRING_SCALAR.clone()).nullable())
                .with_default_value("No longer supported".into()),
        )
        .into_arc()
});

pub(crate) fn builtin_scalars() -> [&'static Arc<ScalarType>; 5] {
    [
        &INT_SCALAR,
        &FLOAT_SCALAR,
        &STRING_SCALAR,
        &BOOLEAN_SCALAR,
        &ID_SCALAR,
    ]
}

pub(crate) fn builtin_directives() -> [&'static Arc<DirectiveDef>; 4] {
    [
        &INCLUDE_DIRECTIVE,
        &SKIP_DIRECTIVE,
        &SPECIFIED_BY_DIRECTIVE,
        &DEPRECATED_DIRECTIVE,
    ]
}
