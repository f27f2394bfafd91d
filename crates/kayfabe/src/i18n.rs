//! UI labels for the two published languages.

use kayfabe_rank::Language;

/// Every user-visible string the rank list renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub search_prompt: &'static str,
    pub search_placeholder: &'static str,
    pub all_promotions: &'static str,
    pub promotion: &'static str,
    pub rank: &'static str,
    pub name: &'static str,
    pub gimmicks: &'static str,
    pub score: &'static str,
    pub no_results: &'static str,
    pub page: &'static str,
    pub of: &'static str,
    pub matches: &'static str,
    pub searching: &'static str,
    pub help: &'static str,
    pub language_ja: &'static str,
    pub language_en: &'static str,
}

const JAPANESE: Labels = Labels {
    title: "プロレスラー ランキング",
    search_prompt: "ギミック",
    search_placeholder: "ギミックで検索…",
    all_promotions: "全団体",
    promotion: "団体",
    rank: "順位",
    name: "名前",
    gimmicks: "ギミック",
    score: "スコア",
    no_results: "該当するレスラーはいません",
    page: "ページ",
    of: "/",
    matches: "件",
    searching: "検索中…",
    help: "Tab 団体  ←/→ ページ  F1-F9 移動  Ctrl+L 言語  Esc クリア  Ctrl+C 終了",
    language_ja: "日本語",
    language_en: "English",
};

const ENGLISH: Labels = Labels {
    title: "Wrestler Ranking",
    search_prompt: "Gimmick",
    search_placeholder: "Search by gimmick…",
    all_promotions: "All",
    promotion: "Promotion",
    rank: "Rank",
    name: "Name",
    gimmicks: "Gimmicks",
    score: "Score",
    no_results: "No wrestlers match",
    page: "Page",
    of: "of",
    matches: "matches",
    searching: "searching…",
    help: "Tab promotion  ←/→ page  F1-F9 jump  Ctrl+L language  Esc clear  Ctrl+C quit",
    language_ja: "日本語",
    language_en: "English",
};

/// Labels for `language`.
pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Japanese => &JAPANESE,
        Language::English => &ENGLISH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_differ() {
        assert_ne!(labels(Language::Japanese), labels(Language::English));
        assert_eq!(labels(Language::English).all_promotions, "All");
        assert_eq!(labels(Language::Japanese).all_promotions, "全団体");
    }
}
