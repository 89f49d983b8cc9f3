use anilist::{MediaTitle, TitleLanguage};

/// Title languages in preference order (first = highest priority)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePriority {
    languages: Vec<TitleLanguage>,
}

impl TitlePriority {
    /// Romaji first, then native, then English
    pub const DEFAULT_ORDER: [TitleLanguage; 3] = [
        TitleLanguage::Romaji,
        TitleLanguage::Native,
        TitleLanguage::English,
    ];

    pub fn new(languages: Vec<TitleLanguage>) -> Self {
        Self { languages }
    }

    /// First non-null title in priority order
    pub fn select<'a>(&self, title: &'a MediaTitle) -> Option<&'a str> {
        self.languages
            .iter()
            .find_map(|&language| title.get(language))
    }
}

impl Default for TitlePriority {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ORDER.to_vec())
    }
}
