use thiserror::Error;

/// AniList client errors
#[derive(Debug, Error)]
pub enum AnilistError {
    /// Neither a search term nor an id was supplied
    #[error("No search term or id given")]
    MissingLookup,

    /// The HTTP call itself failed
    #[error("Communication with AniList failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not decode into the expected shape
    #[error("JSON decoding failed at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field the reply depends on was null
    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl AnilistError {
    /// Whether this error means the payload could not be understood.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json { .. } | Self::MissingField(_))
    }
}
