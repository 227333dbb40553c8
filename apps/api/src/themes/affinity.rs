//! Reporter ↔ theme affinity scoring.
//!
//! Algorithm, per interest word `w` of the reporter (interests, then specialties):
//! - +2 when some theme keyword contains `w` or is contained in `w`
//! - +1 when the theme description contains `w`
//!
//! Matching is case-sensitive substring containment. Words and keywords are
//! trimmed, and blank ones never match (an empty string is a substring of
//! everything).
//! Zero scores are dropped; ranking is by score descending with ties kept in
//! input order.

use serde::Serialize;

use crate::models::{Reporter, Theme};

pub const DEFAULT_TOP_N: usize = 3;

const KEYWORD_POINTS: u32 = 2;
const DESCRIPTION_POINTS: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ThemeMatch {
    pub theme: Theme,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReporterMatch {
    pub reporter_id: uuid::Uuid,
    pub name: String,
    pub company: String,
    pub score: u32,
}

/// Score of a single reporter/theme pair.
pub fn affinity_score(reporter: &Reporter, theme: &Theme) -> u32 {
    let keywords: Vec<&str> = theme
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    reporter
        .interest_words()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut points = 0;
            if keywords.iter().any(|&k| k.contains(word) || word.contains(k)) {
                points += KEYWORD_POINTS;
            }
            if theme.description.contains(word) {
                points += DESCRIPTION_POINTS;
            }
            points
        })
        .sum()
}

/// Ranks `themes` for `reporter`, returning at most `top_n` non-zero matches.
pub fn match_themes_for_reporter(
    reporter: &Reporter,
    themes: &[Theme],
    top_n: usize,
) -> Vec<ThemeMatch> {
    let scored = themes.iter().map(|theme| ThemeMatch {
        score: affinity_score(reporter, theme),
        theme: theme.clone(),
    });
    rank(scored, |m| m.score, top_n)
}

/// The inverse ranking: which reporters a theme should be pitched to.
pub fn match_reporters_for_theme(
    theme: &Theme,
    reporters: &[Reporter],
    top_n: usize,
) -> Vec<ReporterMatch> {
    let scored = reporters.iter().map(|reporter| ReporterMatch {
        reporter_id: reporter.id,
        name: reporter.name.clone(),
        company: reporter.company.clone(),
        score: affinity_score(reporter, theme),
    });
    rank(scored, |m| m.score, top_n)
}

fn rank<T>(items: impl Iterator<Item = T>, score: impl Fn(&T) -> u32, top_n: usize) -> Vec<T> {
    let mut kept: Vec<T> = items.filter(|item| score(item) > 0).collect();
    // sort_by is stable, so equal scores keep input order
    kept.sort_by(|a, b| score(b).cmp(&score(a)));
    kept.truncate(top_n);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactPreference, NewReporter, NewTheme, Priority};
    use chrono::Utc;

    fn reporter(interests: &[&str], specialties: &[&str]) -> Reporter {
        NewReporter {
            name: "田中 太郎".to_string(),
            company: "日本経済新聞".to_string(),
            email: "tanaka@nikkei.com".to_string(),
            phone: None,
            position: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            contact_preference: ContactPreference::Email,
            notes: None,
        }
        .into_reporter(Utc::now())
    }

    fn theme(title: &str, description: &str, keywords: &[&str]) -> Theme {
        NewTheme {
            title: title.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            category: None,
            priority: Priority::Medium,
            source_url: None,
            upload_id: None,
        }
        .into_theme(Utc::now())
    }

    #[test]
    fn test_keyword_match_scores_two() {
        let r = reporter(&["AI"], &[]);
        let t = theme("t", "no overlap here", &["AI", "機械学習"]);
        assert_eq!(affinity_score(&r, &t), 2);
    }

    #[test]
    fn test_description_match_scores_one() {
        let r = reporter(&["DX"], &[]);
        let t = theme("t", "中小企業のDX推進事例", &["中小企業"]);
        assert_eq!(affinity_score(&r, &t), 1);
    }

    #[test]
    fn test_keyword_and_description_both_apply() {
        let r = reporter(&["フィンテック"], &[]);
        let t = theme("t", "フィンテック企業の動向", &["フィンテック"]);
        assert_eq!(affinity_score(&r, &t), 3);
    }

    #[test]
    fn test_substring_works_in_both_directions() {
        // keyword contained in the word
        let r = reporter(&["AIスタートアップ"], &[]);
        let t = theme("t", "", &["AI"]);
        assert_eq!(affinity_score(&r, &t), 2);

        // word contained in the keyword
        let r = reporter(&["AI"], &[]);
        let t = theme("t", "", &["生成AI"]);
        assert_eq!(affinity_score(&r, &t), 2);
    }

    #[test]
    fn test_specialties_count_like_interests() {
        let r = reporter(&[], &["金融"]);
        let t = theme("t", "", &["金融"]);
        assert_eq!(affinity_score(&r, &t), 2);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let r = reporter(&["ai"], &[]);
        let t = theme("t", "AI", &["AI"]);
        assert_eq!(affinity_score(&r, &t), 0);

        let r = reporter(&["ESG"], &[]);
        let t = theme("t", "ESG investing", &["ESG"]);
        assert_eq!(affinity_score(&r, &t), 3);
    }

    #[test]
    fn test_blank_words_and_keywords_never_match() {
        let r = reporter(&["", "  "], &[]);
        let t = theme("t", "anything", &["", "AI"]);
        assert_eq!(affinity_score(&r, &t), 0);

        let r = reporter(&["AI"], &[]);
        let t = theme("t", "", &[""]);
        assert_eq!(affinity_score(&r, &t), 0);
    }

    #[test]
    fn test_zero_scores_are_dropped() {
        let r = reporter(&["政治"], &[]);
        let themes = vec![theme("a", "経済", &["金融"]), theme("b", "技術", &["AI"])];
        assert!(match_themes_for_reporter(&r, &themes, 3).is_empty());
    }

    #[test]
    fn test_ranking_descends_and_keeps_ties_in_order() {
        let r = reporter(&["AI", "DX"], &[]);
        // scores: one = 2, two = (2 + 1) * 2, three = 2
        let themes = vec![
            theme("one", "", &["DX"]),
            theme("two", "AI と DX", &["AI", "DX"]),
            theme("three", "", &["AI"]),
        ];
        let ranked = match_themes_for_reporter(&r, &themes, 3);
        let titles: Vec<&str> = ranked.iter().map(|m| m.theme.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "one", "three"]);
        assert_eq!(ranked[0].score, 6);
    }

    #[test]
    fn test_top_n_truncates() {
        let r = reporter(&["AI"], &[]);
        let themes: Vec<Theme> = (0..5).map(|i| theme(&format!("t{i}"), "", &["AI"])).collect();
        assert_eq!(match_themes_for_reporter(&r, &themes, DEFAULT_TOP_N).len(), 3);
        assert_eq!(match_themes_for_reporter(&r, &themes, 1).len(), 1);
    }

    #[test]
    fn test_empty_inputs_give_empty_result() {
        let r = reporter(&[], &[]);
        let themes = vec![theme("a", "AI", &["AI"])];
        assert!(match_themes_for_reporter(&r, &themes, 3).is_empty());

        let r = reporter(&["AI"], &[]);
        assert!(match_themes_for_reporter(&r, &[], 3).is_empty());
    }

    #[test]
    fn test_reporters_for_theme_uses_same_score() {
        let t = theme("AI活用", "AI技術を活用した業務効率化", &["AI", "業務効率化"]);
        let reporters = vec![
            reporter(&["政治"], &[]),
            reporter(&["AI"], &["業務効率化"]),
            reporter(&["AI"], &[]),
        ];
        let ranked = match_reporters_for_theme(&t, &reporters, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].reporter_id, reporters[1].id);
        assert_eq!(ranked[0].score, affinity_score(&reporters[1], &t));
        assert_eq!(ranked[1].reporter_id, reporters[2].id);
    }
}
