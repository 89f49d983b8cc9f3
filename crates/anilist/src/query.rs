use std::fmt;

use serde::Serialize;

use crate::AnilistError;

/// Kind of record a command or link asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Anime,
    Manga,
    Character,
    Staff,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Anime, Self::Manga, Self::Character, Self::Staff];

    /// Path segment used in `https://anilist.co/<kind>/<id>` links
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Character => "character",
            Self::Staff => "staff",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "anime" => Some(Self::Anime),
            "manga" => Some(Self::Manga),
            "character" => Some(Self::Character),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Free-text search
    Name(String),
    /// Numeric id, usually taken from a link
    Id(i64),
}

impl Lookup {
    /// Pick the lookup mode from what the caller has.
    ///
    /// An id takes precedence. A name that is blank after trimming counts
    /// as absent.
    pub fn from_parts(name: Option<&str>, id: Option<i64>) -> crate::Result<Self> {
        if let Some(id) = id {
            return Ok(Self::Id(id));
        }
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Ok(Self::Name(name.to_string())),
            _ => Err(AnilistError::MissingLookup),
        }
    }

    fn declaration(&self) -> &'static str {
        match self {
            Self::Name(_) => "$name: String",
            Self::Id(_) => "$id: Int",
        }
    }

    fn argument(&self) -> &'static str {
        match self {
            Self::Name(_) => "search: $name",
            Self::Id(_) => "id: $id",
        }
    }

    fn variables(&self) -> Variables {
        match self {
            Self::Name(name) => Variables {
                name: Some(name.clone()),
                id: None,
            },
            Self::Id(id) => Variables {
                name: None,
                id: Some(*id),
            },
        }
    }
}

/// Variable bindings sent next to the query document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Request body for POST https://graphql.anilist.co/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Variables,
}

/// One parameterised query: `<root> (<lookup>, <extra>) { <selection> }`
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    root: &'static str,
    extra_arguments: Option<&'static str>,
    selection: &'static str,
}

impl QueryTemplate {
    pub const fn new(
        root: &'static str,
        extra_arguments: Option<&'static str>,
        selection: &'static str,
    ) -> Self {
        Self {
            root,
            extra_arguments,
            selection,
        }
    }

    /// Render the query document for the given lookup mode
    pub fn render(&self, lookup: &Lookup) -> String {
        let arguments = match self.extra_arguments {
            Some(extra) => format!("{}, {}", lookup.argument(), extra),
            None => lookup.argument().to_string(),
        };
        format!(
            "query ({}) {{\n    {} ({}) {}\n}}",
            lookup.declaration(),
            self.root,
            arguments,
            self.selection.trim()
        )
    }
}

const ANIME_SELECTION: &str = r#"
{
        title {
            romaji
            english
            native
        }
        format
        seasonYear
        averageScore
        status
        episodes
        siteUrl
        genres
        description (asHtml: true)
        characters (role: MAIN) {
            edges {
                node {
                    name {
                        full
                    }
                }
                voiceActors (language: JAPANESE) {
                    name {
                        full
                    }
                }
            }
        }
        studios (isMain: true) {
            nodes {
                name
            }
        }
    }
"#;

const MANGA_SELECTION: &str = r#"
{
        title {
            romaji
            english
            native
        }
        format
        startDate {
            year
        }
        averageScore
        status
        volumes
        siteUrl
        genres
        description (asHtml: true)
        characters (role: MAIN) {
            nodes {
                name {
                    full
                }
            }
        }
        staff {
            nodes {
                name {
                    full
                }
            }
        }
    }
"#;

const CHARACTER_SELECTION: &str = r#"
{
        id
        name {
            full
            native
        }
        siteUrl
        description (asHtml: true)
        media {
            nodes {
                id
                title {
                    romaji
                    english
                    native
                }
                type
            }
        }
    }
"#;

const STAFF_SELECTION: &str = r#"
{
        id
        name {
            full
            native
        }
        siteUrl
        description (asHtml: true)
        primaryOccupations
        yearsActive
    }
"#;

/// The fixed set of query templates, one per entity kind.
///
/// Built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct QueryTemplates {
    anime: QueryTemplate,
    manga: QueryTemplate,
    character: QueryTemplate,
    staff: QueryTemplate,
}

impl QueryTemplates {
    pub fn new() -> Self {
        Self {
            anime: QueryTemplate::new("Media", Some("type: ANIME"), ANIME_SELECTION),
            manga: QueryTemplate::new("Media", Some("type: MANGA"), MANGA_SELECTION),
            character: QueryTemplate::new("Character", None, CHARACTER_SELECTION),
            staff: QueryTemplate::new("Staff", None, STAFF_SELECTION),
        }
    }

    pub fn template(&self, kind: EntityKind) -> &QueryTemplate {
        match kind {
            EntityKind::Anime => &self.anime,
            EntityKind::Manga => &self.manga,
            EntityKind::Character => &self.character,
            EntityKind::Staff => &self.staff,
        }
    }

    /// Build a ready-to-send request for `kind`
    pub fn build(&self, kind: EntityKind, lookup: &Lookup) -> GraphQlRequest {
        GraphQlRequest {
            query: self.template(kind).render(lookup),
            variables: lookup.variables(),
        }
    }
}

impl Default for QueryTemplates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_parts() {
        assert_eq!(
            Lookup::from_parts(Some("Frieren"), None).unwrap(),
            Lookup::Name("Frieren".to_string())
        );
        assert_eq!(
            Lookup::from_parts(Some("  Frieren "), None).unwrap(),
            Lookup::Name("Frieren".to_string())
        );
        // id wins over a name
        assert_eq!(
            Lookup::from_parts(Some("ignored"), Some(154587)).unwrap(),
            Lookup::Id(154587)
        );
        assert_eq!(Lookup::from_parts(None, Some(1)).unwrap(), Lookup::Id(1));
    }

    #[test]
    fn test_lookup_missing() {
        assert!(matches!(
            Lookup::from_parts(None, None),
            Err(AnilistError::MissingLookup)
        ));
        assert!(matches!(
            Lookup::from_parts(Some("   "), None),
            Err(AnilistError::MissingLookup)
        ));
    }

    #[test]
    fn test_build_search_query() {
        let templates = QueryTemplates::new();
        let request = templates.build(EntityKind::Anime, &Lookup::Name("Frieren".into()));

        assert!(request.query.starts_with("query ($name: String) {"));
        assert!(request
            .query
            .contains("Media (search: $name, type: ANIME) {"));
        assert!(request.query.contains("voiceActors (language: JAPANESE)"));
        assert_eq!(request.variables.name.as_deref(), Some("Frieren"));
        assert_eq!(request.variables.id, None);
    }

    #[test]
    fn test_build_id_query() {
        let templates = QueryTemplates::new();
        let request = templates.build(EntityKind::Manga, &Lookup::Id(30013));

        assert!(request.query.starts_with("query ($id: Int) {"));
        assert!(request.query.contains("Media (id: $id, type: MANGA) {"));
        assert!(request.query.contains("volumes"));
        assert_eq!(request.variables.id, Some(30013));
        assert_eq!(request.variables.name, None);
    }

    #[test]
    fn test_build_person_queries() {
        let templates = QueryTemplates::new();

        let character = templates.build(EntityKind::Character, &Lookup::Id(40));
        assert!(character.query.contains("Character (id: $id) {"));
        assert!(character.query.contains("siteUrl"));

        let staff = templates.build(EntityKind::Staff, &Lookup::Name("Kana Hanazawa".into()));
        assert!(staff.query.contains("Staff (search: $name) {"));
        assert!(staff.query.contains("yearsActive"));
        assert!(staff.query.contains("primaryOccupations"));
    }

    #[test]
    fn test_request_serialization_omits_absent_variables() {
        let templates = QueryTemplates::new();
        let request = templates.build(EntityKind::Staff, &Lookup::Id(95185));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["variables"], serde_json::json!({ "id": 95185 }));
        assert!(value["query"].as_str().unwrap().contains("Staff"));
    }

    #[test]
    fn test_entity_kind_path_segments() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_path_segment(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::from_path_segment("studio"), None);
    }
}
