use serde::Serialize;

/// Path from the response root down to the value an error is attached to,
/// alternating field names and list indices.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorPath(Vec<ErrorPathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorPathSegment {
    Field(Box<str>),
    Index(usize),
}

impl std::ops::Deref for ErrorPath {
    type Target = Vec<ErrorPathSegment>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ErrorPath {
    pub fn push(&mut self, segment: impl Into<ErrorPathSegment>) {
        self.0.push(segment.into());
    }
}

impl From<&str> for ErrorPathSegment {
    fn from(field: &str) -> Self {
        ErrorPathSegment::Field(field.into())
    }
}

impl From<String> for ErrorPathSegment {
    fn from(field: String) -> Self {
        ErrorPathSegment::Field(field.into_boxed_str())
    }
}

impl From<usize> for ErrorPathSegment {
    fn from(index: usize) -> Self {
        ErrorPathSegment::Index(index)
    }
}

impl<S: Into<ErrorPathSegment>> FromIterator<S> for ErrorPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ErrorPath(iter.into_iter().map(Into::into).collect())
    }
}
