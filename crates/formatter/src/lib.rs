//! Single-line chat replies for AniList records.
//!
//! Every reply is one line: fields joined by ` | `, list fields joined by
//! `, `, HTML descriptions flattened to plain text. [`truncate`] then cuts
//! the line to what a chat client will display.
//!
//! # Example
//!
//! ```
//! use formatter::{truncate, MAX_REPLY_LENGTH};
//!
//! let line = "short enough";
//! assert_eq!(truncate(line, MAX_REPLY_LENGTH), "short enough");
//! ```

mod html;
mod media;
mod person;
mod title;
mod truncate;

pub use html::{clean_html, NO_DESCRIPTION};
pub use title::TitlePriority;
pub use truncate::{truncate, ELLIPSIS, MAX_REPLY_LENGTH};

use anilist::{Anime, Character, Manga, Staff};

/// Rendered in place of a null scalar field
pub const UNKNOWN: &str = "?";

/// Join list items with ", "; an empty list gives an empty string
pub fn join<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

/// Formats records into reply lines, one template per entity kind
#[derive(Debug, Clone, Default)]
pub struct ReplyFormatter {
    priority: TitlePriority,
}

impl ReplyFormatter {
    pub fn new(priority: TitlePriority) -> Self {
        Self { priority }
    }

    pub fn anime(&self, anime: &Anime) -> String {
        media::format_anime(anime, &self.priority)
    }

    pub fn manga(&self, manga: &Manga) -> String {
        media::format_manga(manga, &self.priority)
    }

    pub fn character(&self, character: &Character) -> String {
        person::format_character(character, &self.priority)
    }

    pub fn staff(&self, staff: &Staff) -> String {
        person::format_staff(staff)
    }
}
