use thiserror::Error;

/// Failure while turning an inspection document into a [`ContainerSpecification`](super::ContainerSpecification).
#[derive(Error, Debug)]
pub enum ParseError {
    /// Not valid JSON, or a field has the wrong type
    #[error("inspect JSON inválido: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Valid array with no container records
    #[error("inspect retornou uma lista vazia")]
    EmptyResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedJson,
    EmptyResult,
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::MalformedJson(_) => ParseErrorKind::MalformedJson,
            Self::EmptyResult => ParseErrorKind::EmptyResult,
        }
    }
}
