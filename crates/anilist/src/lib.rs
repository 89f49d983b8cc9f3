//! AniList GraphQL API client library.
//!
//! Builds one query per entity kind (anime, manga, character, staff),
//! sends it to `https://graphql.anilist.co/` and decodes the answer into
//! typed records.
//!
//! # Example
//!
//! ```rust,ignore
//! use anilist::{AnilistClient, EntityKind, Lookup, MediaData, Anime, QueryTemplates};
//!
//! let templates = QueryTemplates::new();
//! let request = templates.build(EntityKind::Anime, &Lookup::Name("Frieren".into()));
//! let client = AnilistClient::new(reqwest::Client::new());
//! let response = client.query::<MediaData<Anime>>(&request).await?;
//! ```

mod client;
mod error;
pub mod models;
mod query;

pub use client::{AnilistClient, DEFAULT_ENDPOINT};
pub use error::AnilistError;
pub use models::{
    Anime, Character, CharacterData, FuzzyDate, GraphQlError, GraphQlResponse, Manga, MediaData,
    MediaRef, MediaTitle, Payload, PersonName, Record, Staff, StaffData, TitleLanguage,
};
pub use query::{EntityKind, GraphQlRequest, Lookup, QueryTemplate, QueryTemplates, Variables};

pub type Result<T> = std::result::Result<T, AnilistError>;
