#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    Spanish,
    German,
    Italian,
}

impl Language {
    /// Two-letter code used in the `langpair` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Italian => "it",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            "es" => Some(Language::Spanish),
            "de" => Some(Language::German),
            "it" => Some(Language::Italian),
            _ => None,
        }
    }

    pub fn all() -> Vec<Language> {
        vec![
            Language::English,
            Language::French,
            Language::Spanish,
            Language::German,
            Language::Italian,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Italian => "Italian",
        }
    }

    /// Next language in picker order, wrapping around
    pub fn next(&self) -> Language {
        let all = Language::all();
        let i = all.iter().position(|l| l == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn prev(&self) -> Language {
        let all = Language::all();
        let i = all.iter().position(|l| l == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
