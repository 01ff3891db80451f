/// Failure while turning a schema definition into an immutable [`Schema`](crate::Schema).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Scalar '{name}' is referenced by its own directives")]
    RecursiveScalar { name: String },
    #[error("Directive '@{name}' is referenced by its own argument definitions")]
    RecursiveDirective { name: String },
    #[error("Interface '{name}' implements itself, directly or transitively")]
    CyclicInterface { name: String },
    #[error("No type named '{name}' was registered")]
    UnresolvedTypeReference { name: String },
    #[error("'{name}' is not an output type, it cannot be used as a field type")]
    ExpectedOutputType { name: String },
    #[error("'{name}' is not an input type, it cannot be used as an argument type")]
    ExpectedInputType { name: String },
    #[error("Field '{field}' is defined more than once on '{ty}'")]
    DuplicateField { ty: String, field: String },
}
