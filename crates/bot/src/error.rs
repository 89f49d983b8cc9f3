use anilist::AnilistError;
use thiserror::Error;

/// Why a lookup ended without a record.
///
/// The `Display` text is the reply sent back to the user.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// No search term and no id
    #[error("You have to tell me what to search.")]
    MissingInput,

    /// The API could not be reached
    #[error("Error: Communication with AniList failed.")]
    Communication(#[source] AnilistError),

    /// The API answered with something that is not the expected JSON
    #[error("Error: JSON decoding failed.")]
    Decode(#[source] AnilistError),

    /// The API found nothing
    #[error("No results found for '{query}'.")]
    NoMatch { query: String },
}

impl ReplyError {
    pub fn no_match(query: impl Into<String>) -> Self {
        Self::NoMatch {
            query: query.into(),
        }
    }

    /// Failures caused by the service rather than the user's input
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Communication(_) | Self::Decode(_))
    }
}

impl From<AnilistError> for ReplyError {
    fn from(e: AnilistError) -> Self {
        match e {
            AnilistError::MissingLookup => Self::MissingInput,
            AnilistError::Request(_) => Self::Communication(e),
            AnilistError::Json { .. } | AnilistError::MissingField(_) => Self::Decode(e),
        }
    }
}
