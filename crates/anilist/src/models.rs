use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::AnilistError;

/// Decode `null` as the type's default (AniList sends `null` for some empty lists)
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope as sent on the wire; `data` is kept untyped until `errors` is checked
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<Value>,
}

/// Top-level GraphQL response envelope
#[derive(Debug, Clone)]
pub struct GraphQlResponse<D> {
    pub data: Option<D>,
    pub errors: Vec<GraphQlError>,
}

impl<D: DeserializeOwned> GraphQlResponse<D> {
    /// Decode a response body.
    ///
    /// `errors` entries are read leniently and, when any are present, `data`
    /// is not decoded at all. Otherwise `data` must match `D`.
    pub fn decode(body: &str) -> crate::Result<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(body);
        let raw: RawResponse =
            serde_path_to_error::deserialize(deserializer).map_err(|e| AnilistError::Json {
                path: e.path().to_string(),
                source: e.into_inner(),
            })?;

        if !raw.errors.is_empty() {
            return Ok(Self {
                data: None,
                errors: raw.errors.iter().map(GraphQlError::from_value).collect(),
            });
        }

        let data = match raw.data {
            Some(value) => Some(serde_path_to_error::deserialize(value).map_err(|e| {
                AnilistError::Json {
                    path: data_path(e.path()),
                    source: e.into_inner(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            data,
            errors: Vec::new(),
        })
    }
}

impl<D: Payload> GraphQlResponse<D> {
    /// AniList reports "nothing found" as an `errors` array
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The record, if the response carries one
    pub fn into_record(self) -> Option<D::Record> {
        self.data.and_then(D::into_record)
    }
}

/// Path of a decode failure inside `data`, as seen from the body root
fn data_path(path: &serde_path_to_error::Path) -> String {
    if path.iter().next().is_none() {
        "data".to_string()
    } else {
        format!("data.{}", path)
    }
}

/// Error entry in a GraphQL response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlError {
    pub message: String,
    pub status: Option<u16>,
}

impl GraphQlError {
    /// Best-effort read of one `errors` entry; any shape is accepted
    fn from_value(value: &Value) -> Self {
        let message = match value.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None if value.is_object() => String::new(),
            None => value.to_string(),
        };
        let status = value.get("status").and_then(|status| match status {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        Self { message, status }
    }
}

/// Root object of a `data` payload
pub trait Payload {
    type Record: Record;

    fn into_record(self) -> Option<Self::Record>;
}

/// A record the bot knows how to reply with
pub trait Record {
    /// Reject records whose required fields are null
    fn validate(&self) -> crate::Result<()>;
}

/// `data` of an anime or manga query
#[derive(Debug, Clone, Deserialize)]
pub struct MediaData<T> {
    #[serde(rename = "Media")]
    pub media: Option<T>,
}

impl<T: Record> Payload for MediaData<T> {
    type Record = T;

    fn into_record(self) -> Option<T> {
        self.media
    }
}

/// `data` of a character query
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterData {
    #[serde(rename = "Character")]
    pub character: Option<Character>,
}

impl Payload for CharacterData {
    type Record = Character;

    fn into_record(self) -> Option<Character> {
        self.character
    }
}

/// `data` of a staff query
#[derive(Debug, Clone, Deserialize)]
pub struct StaffData {
    #[serde(rename = "Staff")]
    pub staff: Option<Staff>,
}

impl Payload for StaffData {
    type Record = Staff;

    fn into_record(self) -> Option<Staff> {
        self.staff
    }
}

/// Title language variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleLanguage {
    Romaji,
    English,
    Native,
}

/// Media title in its three language variants
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    pub fn get(&self, language: TitleLanguage) -> Option<&str> {
        match language {
            TitleLanguage::Romaji => self.romaji.as_deref(),
            TitleLanguage::English => self.english.as_deref(),
            TitleLanguage::Native => self.native.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.romaji.is_none() && self.english.is_none() && self.native.is_none()
    }
}

/// Person name; `full` falls back to `native`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonName {
    pub full: Option<String>,
    pub native: Option<String>,
}

impl PersonName {
    pub fn display(&self) -> Option<&str> {
        self.full.as_deref().or(self.native.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
}

/// `{ nodes: [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Node that only carries a person name
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPerson {
    pub name: PersonName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Studio {
    pub name: String,
}

/// Main character of an anime along with its Japanese voice actors
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEdge {
    pub node: Option<NamedPerson>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub voice_actors: Vec<NamedPerson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterEdges {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<CharacterEdge>,
}

/// Anime record from `Media(type: ANIME)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub title: MediaTitle,
    pub format: Option<String>,
    pub season_year: Option<i32>,
    pub average_score: Option<i32>,
    pub status: Option<String>,
    pub episodes: Option<i32>,
    pub site_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: CharacterEdges,
    #[serde(default, deserialize_with = "null_as_default")]
    pub studios: Connection<Studio>,
}

impl Anime {
    pub fn studio_names(&self) -> impl Iterator<Item = &str> {
        self.studios.nodes.iter().map(|studio| studio.name.as_str())
    }

    /// Voice actors of all main characters, in credit order
    pub fn voice_actor_names(&self) -> impl Iterator<Item = &str> {
        self.characters
            .edges
            .iter()
            .flat_map(|edge| edge.voice_actors.iter())
            .filter_map(|va| va.name.display())
    }
}

impl Record for Anime {
    fn validate(&self) -> crate::Result<()> {
        validate_title(&self.title)
    }
}

/// Manga record from `Media(type: MANGA)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub title: MediaTitle,
    pub format: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: FuzzyDate,
    pub average_score: Option<i32>,
    pub status: Option<String>,
    pub volumes: Option<i32>,
    pub site_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Connection<NamedPerson>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub staff: Connection<NamedPerson>,
}

impl Manga {
    pub fn staff_names(&self) -> impl Iterator<Item = &str> {
        self.staff.nodes.iter().filter_map(|p| p.name.display())
    }

    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.characters.nodes.iter().filter_map(|p| p.name.display())
    }
}

impl Record for Manga {
    fn validate(&self) -> crate::Result<()> {
        validate_title(&self.title)
    }
}

/// Media linked to a character
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub id: i64,
    pub title: MediaTitle,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

/// Character record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: PersonName,
    pub site_url: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Connection<MediaRef>,
}

impl Character {
    /// First linked title, which AniList orders by relevance
    pub fn first_media(&self) -> Option<&MediaRef> {
        self.media.nodes.first()
    }
}

impl Record for Character {
    fn validate(&self) -> crate::Result<()> {
        if self.name.display().is_none() {
            return Err(AnilistError::MissingField("Character.name".to_string()));
        }
        Ok(())
    }
}

/// Staff record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: i64,
    pub name: PersonName,
    pub site_url: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_occupations: Vec<String>,
    /// Zero, one (still active) or two (start, end) years
    #[serde(default, deserialize_with = "null_as_default")]
    pub years_active: Vec<i32>,
}

impl Record for Staff {
    fn validate(&self) -> crate::Result<()> {
        if self.name.display().is_none() {
            return Err(AnilistError::MissingField("Staff.name".to_string()));
        }
        Ok(())
    }
}

fn validate_title(title: &MediaTitle) -> crate::Result<()> {
    if title.is_empty() {
        return Err(AnilistError::MissingField("Media.title".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_anime_response() {
        let body = json!({
            "data": {
                "Media": {
                    "title": { "romaji": "Sousou no Frieren", "english": "Frieren: Beyond Journey's End", "native": null },
                    "format": "TV",
                    "seasonYear": 2023,
                    "averageScore": 91,
                    "status": "FINISHED",
                    "episodes": 28,
                    "siteUrl": "https://anilist.co/anime/154587",
                    "genres": ["Adventure", "Drama", "Fantasy"],
                    "description": "The adventure is over...",
                    "characters": { "edges": [
                        { "node": { "name": { "full": "Frieren" } },
                          "voiceActors": [{ "name": { "full": "Atsumi Tanezaki" } }] },
                        { "node": { "name": { "full": "Fern" } },
                          "voiceActors": [{ "name": { "full": "Kana Ichinose" } }] }
                    ]},
                    "studios": { "nodes": [{ "name": "MADHOUSE" }] }
                }
            }
        });

        let response = GraphQlResponse::<MediaData<Anime>>::decode(&body.to_string()).unwrap();
        assert!(!response.has_errors());

        let anime = response.into_record().unwrap();
        assert!(anime.validate().is_ok());
        assert_eq!(anime.season_year, Some(2023));
        assert_eq!(anime.studio_names().collect::<Vec<_>>(), vec!["MADHOUSE"]);
        assert_eq!(
            anime.voice_actor_names().collect::<Vec<_>>(),
            vec!["Atsumi Tanezaki", "Kana Ichinose"]
        );
    }

    #[test]
    fn test_decode_not_found_response() {
        let body = json!({
            "errors": [{ "message": "Not Found.", "status": 404 }],
            "data": { "Media": null }
        });

        let response = GraphQlResponse::<MediaData<Anime>>::decode(&body.to_string()).unwrap();
        assert!(response.has_errors());
        assert_eq!(response.errors[0].status, Some(404));
        assert!(response.into_record().is_none());
    }

    #[test]
    fn test_errors_skip_data_decoding() {
        // `data` would fail to decode: title must be an object
        let body = json!({
            "errors": [{ "message": "Not Found.", "status": 404 }],
            "data": { "Media": { "title": null } }
        });

        let response = GraphQlResponse::<MediaData<Anime>>::decode(&body.to_string()).unwrap();
        assert!(response.has_errors());
        assert!(response.into_record().is_none());
    }

    #[test]
    fn test_error_entries_read_leniently() {
        let body = json!({
            "errors": [
                { "status": 404 },
                { "message": "x", "status": "404" },
                "rate limited"
            ],
            "data": null
        });

        let response = GraphQlResponse::<StaffData>::decode(&body.to_string()).unwrap();
        assert_eq!(
            response.errors,
            vec![
                GraphQlError { message: String::new(), status: Some(404) },
                GraphQlError { message: "x".to_string(), status: Some(404) },
                GraphQlError { message: "\"rate limited\"".to_string(), status: None },
            ]
        );
    }

    #[test]
    fn test_data_decode_error_path() {
        let body = json!({ "data": { "Staff": { "id": "one" } } });
        match GraphQlResponse::<StaffData>::decode(&body.to_string()) {
            Err(AnilistError::Json { path, .. }) => assert_eq!(path, "data.Staff.id"),
            other => panic!("unexpected result: {other:?}"),
        }

        let body = json!({ "data": 5 });
        match GraphQlResponse::<StaffData>::decode(&body.to_string()) {
            Err(AnilistError::Json { path, .. }) => assert_eq!(path, "data"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body() {
        let err = GraphQlResponse::<CharacterData>::decode("<html>502</html>").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let body = json!({
            "title": { "romaji": null, "english": null, "native": "ワンピース" },
            "format": "MANGA",
            "startDate": { "year": 1997 },
            "averageScore": null,
            "status": "RELEASING",
            "volumes": null,
            "siteUrl": "https://anilist.co/manga/30013",
            "genres": null,
            "description": null,
            "characters": { "nodes": null },
            "staff": null
        });

        let manga: Manga = serde_json::from_value(body).unwrap();
        assert!(manga.genres.is_empty());
        assert_eq!(manga.character_names().count(), 0);
        assert_eq!(manga.staff_names().count(), 0);
        assert_eq!(manga.start_date.year, Some(1997));
    }

    #[test]
    fn test_validate_rejects_missing_title() {
        let body = json!({
            "title": { "romaji": null, "english": null, "native": null },
            "siteUrl": "https://anilist.co/anime/1"
        });

        let anime: Anime = serde_json::from_value(body).unwrap();
        let err = anime.validate().unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.to_string(), "Missing required field: Media.title");
    }

    #[test]
    fn test_person_name_fallback() {
        let name = PersonName {
            full: None,
            native: Some("花澤香菜".to_string()),
        };
        assert_eq!(name.display(), Some("花澤香菜"));

        let staff = Staff {
            id: 1,
            name: PersonName::default(),
            site_url: String::new(),
            description: None,
            primary_occupations: vec![],
            years_active: vec![],
        };
        assert!(matches!(staff.validate(), Err(AnilistError::MissingField(_))));
    }

    #[test]
    fn test_title_language_from_config_value() {
        let languages: Vec<TitleLanguage> =
            serde_json::from_value(json!(["romaji", "native", "english"])).unwrap();
        assert_eq!(
            languages,
            vec![TitleLanguage::Romaji, TitleLanguage::Native, TitleLanguage::English]
        );
    }
}
