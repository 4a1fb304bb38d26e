use crate::refs::RefType;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unrecognized document variant `{0}`")]
    /// The requested variant name is not one the renderer knows how to build
    UnknownVariant(String),

    #[error("the `{modifier}` modifier cannot be applied to the {variant} variant")]
    /// Bilingual / compact only layer on top of student and teacher papers
    UnsupportedModifier {
        modifier: &'static str,
        variant: &'static str,
    },

    #[error("invalid render options: {0}")]
    /// The render options record could not be deserialized
    InvalidOptions(#[source] serde_json::Error),

    #[error("invalid exam input: {0}")]
    /// The question list or exam metadata could not be deserialized
    InvalidInput(#[source] serde_json::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse an embedded font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// An I/O error occurred while writing the document
    Io(#[from] std::io::Error),

    #[error("PDF object reference {0:?} was used before it was generated")]
    /// Internal ordering fault while serializing the document
    UnresolvedReference(RefType),
}

impl RenderError {
    /// Configuration errors are the caller's fault and fail the whole call;
    /// everything else is either an input or a serialization fault
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RenderError::UnknownVariant(_)
                | RenderError::UnsupportedModifier { .. }
                | RenderError::InvalidOptions(_)
        )
    }
}
