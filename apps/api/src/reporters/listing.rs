use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{cmp_optional, matches_search, SortDirection, SortState};
use crate::models::{Article, ContactHistory, Reporter};

/// One row of the reporter list view.
#[derive(Debug, Clone, Serialize)]
pub struct ReporterSummary {
    pub id: Uuid,
    pub name: String,
    pub company: String,
    pub email: String,
    pub position: Option<String>,
    pub interests: Vec<String>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub article_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterSortKey {
    #[default]
    Name,
    Company,
    LastContactDate,
    ArticleCount,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReporterListQuery {
    pub search: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub sort: ReporterSortKey,
    pub direction: Option<SortDirection>,
    pub toggle: Option<ReporterSortKey>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReporterListQuery {
    pub fn sort_state(&self) -> SortState<ReporterSortKey> {
        let direction = self.direction.unwrap_or(SortDirection::Asc);
        SortState::resolve(self.sort, direction, self.toggle)
    }
}

/// Joins each reporter with its latest contact date and article count.
pub fn summarize(
    reporters: Vec<Reporter>,
    articles: &[Article],
    contacts: &[ContactHistory],
) -> Vec<ReporterSummary> {
    let mut article_counts: HashMap<Uuid, usize> = HashMap::new();
    for article in articles {
        *article_counts.entry(article.reporter_id).or_default() += 1;
    }
    let mut last_contact: HashMap<Uuid, DateTime<Utc>> = HashMap::new();
    for contact in contacts {
        last_contact
            .entry(contact.reporter_id)
            .and_modify(|d| *d = (*d).max(contact.date))
            .or_insert(contact.date);
    }

    reporters
        .into_iter()
        .map(|r| ReporterSummary {
            last_contact_date: last_contact.get(&r.id).copied(),
            article_count: article_counts.get(&r.id).copied().unwrap_or(0),
            id: r.id,
            name: r.name,
            company: r.company,
            email: r.email,
            position: r.position,
            interests: r.interests,
        })
        .collect()
}

pub fn filter_and_sort_reporters(
    mut rows: Vec<ReporterSummary>,
    query: &ReporterListQuery,
) -> Vec<ReporterSummary> {
    let company = query
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    rows.retain(|r| {
        company.map_or(true, |c| r.company == c)
            && matches_search(query.search.as_deref(), [r.name.as_str(), r.company.as_str()])
    });

    let SortState { sort, direction } = query.sort_state();
    rows.sort_by(|a, b| match sort {
        ReporterSortKey::Name => direction.apply(a.name.cmp(&b.name)),
        ReporterSortKey::Company => direction.apply(a.company.cmp(&b.company)),
        ReporterSortKey::LastContactDate => cmp_optional(
            a.last_contact_date.as_ref(),
            b.last_contact_date.as_ref(),
            direction,
        ),
        ReporterSortKey::ArticleCount => direction.apply(a.article_count.cmp(&b.article_count)),
    });
    rows
}

/// Distinct outlets, ascending, for the company filter.
pub fn companies(reporters: &[Reporter]) -> Vec<String> {
    reporters
        .iter()
        .map(|r| r.company.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::SeedData;

    fn seeded_rows() -> Vec<ReporterSummary> {
        let seed = SeedData::build();
        summarize(seed.reporters, &seed.articles, &seed.contacts)
    }

    #[test]
    fn test_summary_counts_articles_and_latest_contact() {
        let seed = SeedData::build();
        let mut contacts = seed.contacts.clone();
        let tanaka = seed.reporters[0].id;
        let later = contacts[0].date + chrono::Duration::days(10);
        let mut newer = contacts[0].clone();
        newer.id = Uuid::new_v4();
        newer.date = later;
        contacts.push(newer);

        let rows = summarize(seed.reporters, &seed.articles, &contacts);
        let row = rows.iter().find(|r| r.id == tanaka).unwrap();
        assert_eq!(row.article_count, 1);
        assert_eq!(row.last_contact_date, Some(later));
    }

    #[test]
    fn test_search_matches_name_or_company() {
        let query = ReporterListQuery {
            search: Some("techcrunch".to_string()),
            ..Default::default()
        };
        let rows = filter_and_sort_reporters(seeded_rows(), &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "佐藤 花子");
    }

    #[test]
    fn test_company_filter_is_exact() {
        let query = ReporterListQuery {
            company: Some("朝日新聞".to_string()),
            ..Default::default()
        };
        let rows = filter_and_sort_reporters(seeded_rows(), &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "朝日新聞");
    }

    #[test]
    fn test_never_contacted_sorts_last() {
        let mut rows = seeded_rows();
        rows[1].last_contact_date = None;
        let never = rows[1].id;
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = ReporterListQuery {
                sort: ReporterSortKey::LastContactDate,
                direction: Some(direction),
                ..Default::default()
            };
            let sorted = filter_and_sort_reporters(rows.clone(), &query);
            assert_eq!(sorted.last().map(|r| r.id), Some(never));
        }
    }

    #[test]
    fn test_last_contact_descending() {
        let query = ReporterListQuery {
            sort: ReporterSortKey::LastContactDate,
            direction: Some(SortDirection::Desc),
            ..Default::default()
        };
        let rows = filter_and_sort_reporters(seeded_rows(), &query);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["田中 太郎", "佐藤 花子", "山田 次郎"]);
    }

    #[test]
    fn test_companies_are_distinct_and_sorted() {
        let mut reporters = SeedData::build().reporters;
        let mut dup = reporters[0].clone();
        dup.id = Uuid::new_v4();
        reporters.push(dup);
        let list = companies(&reporters);
        assert_eq!(list.len(), 3);
        let mut sorted = list.clone();
        sorted.sort();
        assert_eq!(list, sorted);
    }
}
