//! Display language selection.

use serde::Serialize;
use std::fmt;

/// The two languages the rank list is published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The document default.
    #[default]
    Japanese,
    /// Used for every non-Japanese locale.
    English,
}

impl Language {
    /// Decide the startup language from a reported locale.
    ///
    /// Accepts BCP-47 (`ja-JP`) and POSIX (`ja_JP.UTF-8`) forms.  Returns
    /// `Some(English)` when the primary subtag is anything but `ja`, and `None`
    /// when the locale is Japanese, meaning the default stays untouched.
    pub fn detect(locale: &str) -> Option<Language> {
        if primary_subtag(locale).eq_ignore_ascii_case("ja") {
            None
        } else {
            Some(Language::English)
        }
    }

    /// The `lang` attribute value, `ja` or `en`.
    pub fn code(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }

    /// The other language.
    pub fn toggled(self) -> Language {
        match self {
            Language::Japanese => Language::English,
            Language::English => Language::Japanese,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `ja-JP` -> `ja`, `en_US.UTF-8` -> `en`, `C` -> `C`.
fn primary_subtag(locale: &str) -> &str {
    let locale = locale.trim();
    let end = locale
        .find(['-', '_', '.', '@'])
        .unwrap_or(locale.len());
    &locale[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_switches_to_english() {
        assert_eq!(Language::detect("fr-FR"), Some(Language::English));
    }

    #[test]
    fn japanese_keeps_default() {
        assert_eq!(Language::detect("ja-JP"), None);
        assert_eq!(Language::detect("ja"), None);
        assert_eq!(Language::detect("JA-jp"), None);
    }

    #[test]
    fn posix_locales() {
        assert_eq!(Language::detect("ja_JP.UTF-8"), None);
        assert_eq!(Language::detect("en_US.UTF-8"), Some(Language::English));
        assert_eq!(Language::detect("C"), Some(Language::English));
    }

    #[test]
    fn empty_locale_is_not_japanese() {
        assert_eq!(Language::detect(""), Some(Language::English));
    }

    #[test]
    fn prefix_of_ja_is_not_enough() {
        assert_eq!(Language::detect("jam"), Some(Language::English));
    }

    #[test]
    fn codes_and_toggle() {
        assert_eq!(Language::default(), Language::Japanese);
        assert_eq!(Language::Japanese.code(), "ja");
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::Japanese.toggled(), Language::English);
        assert_eq!(Language::English.toggled(), Language::Japanese);
    }
}
