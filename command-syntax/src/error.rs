use thiserror::Error;

/// Errors shared by every command surface. The parsing engine itself only
/// ever produces [`ParseError::Parsing`]; the remaining variants belong to
/// the callers that dispatch commands.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unspecified error")]
    Unspecified,
    #[error("not found")]
    NotFound,
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("exceptional error: {0}")]
    Exceptional(#[source] anyhow::Error),
    #[error("{0}")]
    Parsing(String),
}

impl ParseError {
    pub fn parsing(message: impl Into<String>) -> Self {
        ParseError::Parsing(message.into())
    }

    /// The user-facing message of a [`ParseError::Parsing`] failure.
    pub fn parsing_message(&self) -> Option<&str> {
        match self {
            ParseError::Parsing(message) => Some(message),
            _ => None,
        }
    }
}

impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParseError::Unspecified, ParseError::Unspecified) => true,
            (ParseError::NotFound, ParseError::NotFound) => true,
            (ParseError::InvalidArguments(a), ParseError::InvalidArguments(b)) => a == b,
            (ParseError::Parsing(a), ParseError::Parsing(b)) => a == b,
            // causes are opaque, compare their rendered chain
            (ParseError::Exceptional(a), ParseError::Exceptional(b)) => {
                format!("{a:#}") == format!("{b:#}")
            }
            _ => false,
        }
    }
}

/// A rejected input together with whatever the matched spans left behind, so
/// callers can still show the unrecognized part of the command.
#[derive(Debug, Error, PartialEq)]
#[error("{error}")]
pub struct ParseFailure {
    pub error: ParseError,
    pub leftover: String,
}

impl ParseFailure {
    pub fn new(error: ParseError, leftover: impl Into<String>) -> Self {
        Self {
            error,
            leftover: leftover.into(),
        }
    }
}

/// Mistakes made while declaring fields, rules or setters. These are caught
/// when a registration is built, never while parsing user input.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("field name {0:?} must be a non-empty ASCII identifier")]
    InvalidFieldName(String),
    #[error("field {0:?} is declared twice")]
    DuplicateField(String),
    #[error("field {0:?} needs at least one alias")]
    MissingAlias(String),
    #[error("alias {alias:?} of field {field:?} must not be empty or contain whitespace")]
    InvalidAlias { field: String, alias: String },
    #[error("{context} refers to unknown field {field:?}")]
    UnknownField { context: &'static str, field: String },
    #[error("field {0:?} already has a setter")]
    DuplicateSetter(String),
    #[error("composed pattern was rejected: {0}")]
    Pattern(#[from] regex::Error),
}
