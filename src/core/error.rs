use crate::core::kind::ValueKind;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    MissingInput,
    MalformedInput,
    MissingKey,
    TypeMismatch,
}

impl ErrorKind {
    /// Whether a default-variant accessor may substitute its default.
    pub fn defaults_apply(self) -> bool {
        matches!(self, ErrorKind::MissingKey)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    key: Option<String>,
    expected: Option<ValueKind>,
    found: Option<ValueKind>,
    index: Option<usize>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            key: None,
            expected: None,
            found: None,
            index: None,
            hint: None,
            source: None,
        }
    }

    pub fn missing_key(key: &str) -> Self {
        Self::new(ErrorKind::MissingKey)
            .with_message(format!("no '{key}' key specified in the endpoint"))
            .with_key(key)
    }

    pub fn type_mismatch(key: &str, expected: ValueKind, found: ValueKind) -> Self {
        Self::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "'{key}' key in the endpoint is {}, but {expected} was expected",
                found.with_article()
            ))
            .with_key(key)
            .with_expected(expected)
            .with_found(found)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn expected(&self) -> Option<ValueKind> {
        self.expected
    }

    pub fn found(&self) -> Option<ValueKind> {
        self.found
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_expected(mut self, expected: ValueKind) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_found(mut self, found: ValueKind) -> Self {
        self.found = Some(found);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {index})")?;
        }
        if let Some(expected) = self.expected {
            write!(f, " (expected: {expected})")?;
        }
        if let Some(found) = self.found {
            write!(f, " (found: {found})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::MissingInput => 3,
        ErrorKind::MalformedInput => 4,
        ErrorKind::MissingKey => 5,
        ErrorKind::TypeMismatch => 6,
    }
}
