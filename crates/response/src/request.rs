use serde::{Deserialize, Serialize};

/// The variables document of a request. Always a JSON object, defaulting to
/// an empty one when absent from the payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(serde_json::Map<String, serde_json::Value>);

impl Variables {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Deref for Variables {
    type Target = serde_json::Map<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for Variables {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Variables {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Variables(map)
    }
}

/// GraphQL request.
///
/// Deserialized from the usual wire shape: the query string, the operation
/// name and the variables, all `camelCase` (e.g. `operationName`). A request
/// carrying only `query` selects the default (only) operation with no
/// variables.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The query source of the request.
    pub query: String,

    /// The operation name of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// The variables of the request.
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Request {
            query: query.into(),
            operation_name: None,
            variables: Variables::default(),
        }
    }

    #[must_use]
    pub fn with_operation_name(self, name: impl Into<String>) -> Self {
        Request {
            operation_name: Some(name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_variables(self, variables: impl Into<Variables>) -> Self {
        Request {
            variables: variables.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_query_is_the_default_operation() {
        let request: Request = serde_json::from_str(r#"{"query": "{ field }"}"#).unwrap();
        assert_eq!(request.query, "{ field }");
        assert_eq!(request.operation_name, None);
        assert!(request.variables.is_empty());
    }

    #[test]
    fn full_envelope() {
        let request: Request = serde_json::from_str(
            r#"{"query": "query Q($a: Int) { field(a: $a) }", "operationName": "Q", "variables": {"a": 1}}"#,
        )
        .unwrap();
        assert_eq!(request.operation_name.as_deref(), Some("Q"));
        assert_eq!(request.variables.get("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn missing_query_is_rejected() {
        let result = serde_json::from_str::<Request>(r#"{"operationName": "Q"}"#);
        assert!(result.is_err());
    }
}
