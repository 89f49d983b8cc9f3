use anilist::{Character, Staff};

use crate::{clean_html, join, TitlePriority, UNKNOWN};

const NO_DATA: &str = "(no data)";

/// `{name} from {title} | {url} | {description}`
///
/// The ` from {title}` part is left out for characters without linked media.
pub(crate) fn format_character(character: &Character, priority: &TitlePriority) -> String {
    let name = character.name.display().unwrap_or(UNKNOWN);
    let origin = character
        .first_media()
        .and_then(|media| priority.select(&media.title));

    let head = match origin {
        Some(title) => format!("{} from {}", name, title),
        None => name.to_string(),
    };

    format!(
        "{} | {} | {}",
        head,
        character.site_url,
        clean_html(character.description.as_deref())
    )
}

/// `{name} | {occupations} | Active: {years} | {url} | {description}`
pub(crate) fn format_staff(staff: &Staff) -> String {
    format!(
        "{} | {} | Active: {} | {} | {}",
        staff.name.display().unwrap_or(UNKNOWN),
        join(staff.primary_occupations.iter().map(String::as_str)),
        years_active(&staff.years_active),
        staff.site_url,
        clean_html(staff.description.as_deref())
    )
}

/// `[start, end]` → "start—end", `[start]` → "start–present", `[]` → "(no data)"
pub(crate) fn years_active(years: &[i32]) -> String {
    match years {
        [] => NO_DATA.to_string(),
        [start] => format!("{}\u{2013}present", start),
        [start, end, ..] => format!("{}\u{2014}{}", start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_years_active() {
        assert_eq!(years_active(&[]), "(no data)");
        assert_eq!(years_active(&[2010]), "2010–present");
        assert_eq!(years_active(&[2010, 2020]), "2010—2020");
    }

    #[test]
    fn test_format_character() {
        let character: Character = serde_json::from_value(json!({
            "id": 176754,
            "name": { "full": "Frieren", "native": "フリーレン" },
            "siteUrl": "https://anilist.co/character/176754",
            "description": "An <b>elf</b> mage.",
            "media": { "nodes": [
                { "id": 118586, "title": { "romaji": "Sousou no Frieren", "english": "Frieren", "native": null }, "type": "MANGA" },
                { "id": 154587, "title": { "romaji": "Sousou no Frieren", "english": null, "native": null }, "type": "ANIME" }
            ]}
        }))
        .unwrap();

        let line = format_character(&character, &TitlePriority::default());
        assert_eq!(
            line,
            "Frieren from Sousou no Frieren | https://anilist.co/character/176754 | An elf mage."
        );
    }

    #[test]
    fn test_format_character_native_name_without_media() {
        let character: Character = serde_json::from_value(json!({
            "id": 1,
            "name": { "full": null, "native": "名無し" },
            "siteUrl": "https://anilist.co/character/1",
            "description": null,
            "media": { "nodes": [] }
        }))
        .unwrap();

        let line = format_character(&character, &TitlePriority::default());
        assert_eq!(
            line,
            "名無し | https://anilist.co/character/1 | [no description available]"
        );
    }

    #[test]
    fn test_format_staff() {
        let staff: Staff = serde_json::from_value(json!({
            "id": 95185,
            "name": { "full": "Kana Hanazawa", "native": "花澤香菜" },
            "siteUrl": "https://anilist.co/staff/95185",
            "description": "Japanese voice actress.",
            "primaryOccupations": ["Voice Actor", "Singer"],
            "yearsActive": [2003]
        }))
        .unwrap();

        assert_eq!(
            format_staff(&staff),
            "Kana Hanazawa | Voice Actor, Singer | Active: 2003–present | \
             https://anilist.co/staff/95185 | Japanese voice actress."
        );
    }

    #[test]
    fn test_format_staff_without_data() {
        let staff: Staff = serde_json::from_value(json!({
            "id": 2,
            "name": { "full": "Somebody", "native": null },
            "siteUrl": "https://anilist.co/staff/2",
            "description": "",
            "primaryOccupations": null,
            "yearsActive": null
        }))
        .unwrap();

        assert_eq!(
            format_staff(&staff),
            "Somebody |  | Active: (no data) | https://anilist.co/staff/2 | [no description available]"
        );
    }
}
