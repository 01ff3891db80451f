mod error;
mod path;
mod request;

pub use error::{ErrorCode, GraphqlError};
pub use path::{ErrorPath, ErrorPathSegment};
pub use request::{Request, Variables};

use serde::Serialize;

/// A single GraphQL response envelope. Subscriptions produce a stream of
/// these, one per emitted event.
#[derive(Debug, Default, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Lazy, potentially infinite, non-restartable sequence of responses.
pub type ResponseStream = futures_util::stream::BoxStream<'static, Response>;

impl Response {
    pub fn from_data(data: serde_json::Value) -> Self {
        Response {
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn from_errors(errors: impl IntoIterator<Item = GraphqlError>) -> Self {
        Response {
            errors: errors.into_iter().collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions
            .get_or_insert_with(Default::default)
            .insert(key.into(), value);
        self
    }

    pub fn into_stream(self) -> ResponseStream {
        Box::pin(futures_util::stream::once(std::future::ready(self)))
    }
}

impl From<GraphqlError> for Response {
    fn from(error: GraphqlError) -> Self {
        Response::from_errors([error])
    }
}
