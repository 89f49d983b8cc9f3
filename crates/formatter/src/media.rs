use anilist::{Anime, Manga};

use crate::{clean_html, join, or_unknown, TitlePriority, UNKNOWN};

/// `{title} ({year}) | {format} | Studio: … | Score: … | {status} | Eps: … | {url} | Genres: … | VA: … | Synopsis: …`
pub(crate) fn format_anime(anime: &Anime, priority: &TitlePriority) -> String {
    format!(
        "{} ({}) | {} | Studio: {} | Score: {} | {} | Eps: {} | {} | Genres: {} | VA: {} | Synopsis: {}",
        priority.select(&anime.title).unwrap_or(UNKNOWN),
        or_unknown(anime.season_year),
        or_unknown(anime.format.as_deref()),
        join(anime.studio_names()),
        or_unknown(anime.average_score),
        or_unknown(anime.status.as_deref()),
        or_unknown(anime.episodes),
        anime.site_url,
        join(anime.genres.iter().map(String::as_str)),
        join(anime.voice_actor_names()),
        clean_html(anime.description.as_deref()),
    )
}

/// `{title} ({year}) | {format} | Staff: … | Score: … | {status} | Vols: … | {url} | Genres: … | MC: … | Synopsis: …`
pub(crate) fn format_manga(manga: &Manga, priority: &TitlePriority) -> String {
    format!(
        "{} ({}) | {} | Staff: {} | Score: {} | {} | Vols: {} | {} | Genres: {} | MC: {} | Synopsis: {}",
        priority.select(&manga.title).unwrap_or(UNKNOWN),
        or_unknown(manga.start_date.year),
        or_unknown(manga.format.as_deref()),
        join(manga.staff_names()),
        or_unknown(manga.average_score),
        or_unknown(manga.status.as_deref()),
        or_unknown(manga.volumes),
        manga.site_url,
        join(manga.genres.iter().map(String::as_str)),
        join(manga.character_names()),
        clean_html(manga.description.as_deref()),
    )
}
