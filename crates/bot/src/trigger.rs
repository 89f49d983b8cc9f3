use anilist::EntityKind;
use regex::Regex;

use crate::{BotConfig, ConfigError};

/// Command names and the entity kind each one looks up
static COMMANDS: phf::Map<&'static str, EntityKind> = phf::phf_map! {
    "anilist" => EntityKind::Anime,
    "al" => EntityKind::Anime,
    "anilistmanga" => EntityKind::Manga,
    "alm" => EntityKind::Manga,
    "anilistchar" => EntityKind::Character,
    "alc" => EntityKind::Character,
    "aniliststaff" => EntityKind::Staff,
    "als" => EntityKind::Staff,
};

/// A recognised lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub kind: EntityKind,
    /// Search term from a command; `None` when the command had no argument
    pub search: Option<String>,
    /// Id from a link
    pub id: Option<i64>,
}

impl Trigger {
    pub fn search(kind: EntityKind, search: impl Into<String>) -> Self {
        Self {
            kind,
            search: Some(search.into()),
            id: None,
        }
    }

    pub fn id(kind: EntityKind, id: i64) -> Self {
        Self {
            kind,
            search: None,
            id: Some(id),
        }
    }

    /// What the user asked for, as quoted back in "no results" replies
    pub fn query_text(&self) -> String {
        match (&self.search, self.id) {
            (_, Some(id)) => id.to_string(),
            (Some(search), None) => search.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Recognises commands (`.al <search>`) and AniList links in chat lines
#[derive(Debug, Clone)]
pub struct TriggerParser {
    prefix: String,
    link_pattern: Regex,
}

impl TriggerParser {
    pub fn new(config: &BotConfig) -> Result<Self, ConfigError> {
        let link_pattern = Regex::new(&format!(
            r"(?i)https?://(?:www\.)?{}/(?P<kind>anime|manga|character|staff)/(?P<id>\d+)",
            regex::escape(&config.site_host)
        ))?;

        Ok(Self {
            prefix: config.prefix.clone(),
            link_pattern,
        })
    }

    /// Commands win over links when a line has both
    pub fn parse(&self, text: &str) -> Option<Trigger> {
        self.parse_command(text).or_else(|| self.parse_link(text))
    }

    fn parse_command(&self, text: &str) -> Option<Trigger> {
        let rest = text.trim_start().strip_prefix(self.prefix.as_str())?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let kind = *COMMANDS.get(name.to_lowercase().as_str())?;
        tracing::debug!("Command '{}' -> {} lookup", name, kind);

        Some(Trigger {
            kind,
            search: Some(args.to_string()).filter(|s| !s.is_empty()),
            id: None,
        })
    }

    fn parse_link(&self, text: &str) -> Option<Trigger> {
        let captures = self.link_pattern.captures(text)?;
        let kind = EntityKind::from_path_segment(&captures["kind"].to_lowercase())?;
        // Ids too large for i64 are not AniList ids
        let id = captures["id"].parse().ok()?;
        tracing::debug!("Link -> {} lookup for id {}", kind, id);

        Some(Trigger::id(kind, id))
    }
}
