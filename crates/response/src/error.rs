use std::borrow::Cow;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::ErrorPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    /// A type-discriminator returned a source type unknown to the built schema.
    TypeNotRegistered,
    FieldError,
    InternalServerError,
}

/// Structured error entry of a response envelope.
///
/// The underlying cause, when any, is kept for logging but never serialized.
#[derive(Debug, Clone)]
pub struct GraphqlError {
    pub message: Cow<'static, str>,
    pub code: ErrorCode,
    pub locations: Vec<Location>,
    pub path: Option<ErrorPath>,
    // Serialized as a map, but kept as a Vec for efficiency.
    pub extensions: Vec<(Cow<'static, str>, serde_json::Value)>,
    pub cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl GraphqlError {
    pub fn new(message: impl Into<Cow<'static, str>>, code: ErrorCode) -> Self {
        GraphqlError {
            message: message.into(),
            code,
            locations: Vec::new(),
            path: None,
            extensions: Vec::new(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: ErrorPath) -> Self {
        self.path = Some(path);
        self
    }

    #[must_use]
    pub fn with_extension(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extensions.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }
}

impl std::fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for GraphqlError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.message)?;
        if !self.locations.is_empty() {
            map.serialize_entry("locations", &self.locations)?;
        }
        if let Some(path) = &self.path {
            map.serialize_entry("path", path)?;
        }
        map.serialize_entry("extensions", &SerializableExtensions(self))?;
        map.end()
    }
}

/// The error code always ends up in the extensions map, alongside whatever
/// the error carries itself.
struct SerializableExtensions<'a>(&'a GraphqlError);

impl Serialize for SerializableExtensions<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.extensions.len() + 1))?;
        map.serialize_entry("code", &self.0.code)?;
        for (key, value) in &self.0.extensions {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serialization_shape() {
        let error = GraphqlError::new("something went wrong", ErrorCode::FieldError)
            .with_location(Location { line: 2, column: 7 })
            .with_path(["user", "name"].into_iter().collect())
            .with_extension("hint", "check the resolver");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "message": "something went wrong",
                "locations": [{"line": 2, "column": 7}],
                "path": ["user", "name"],
                "extensions": {
                    "code": "FIELD_ERROR",
                    "hint": "check the resolver",
                },
            })
        );
    }

    #[test]
    fn cause_is_never_serialized() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error = GraphqlError::new("boom", ErrorCode::InternalServerError).with_cause(io);
        let serialized = serde_json::to_value(&error).unwrap();
        assert!(serialized.get("cause").is_none());
        assert_eq!(error.cause.as_ref().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn display_is_the_message() {
        let error = GraphqlError::new("nope", ErrorCode::BadRequest);
        assert_eq!(error.to_string(), "nope");
    }
}
