//! Field alias tables.
//!
//! Each canonical field is looked up through an ordered list of source key
//! spellings; the first key present with a non-null value wins.

use strum_macros::EnumIter;

use crate::models::StatisticKind;

/// Canonical fields of a normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    Label,
    Clicks,
    Impressions,
    AveragePosition,
    Ctr,
}

const CLICKS: &[&str] = &["Clicks", "clicks"];
const IMPRESSIONS: &[&str] = &["Impressions", "impressions"];
const CTR: &[&str] = &["CTR", "ctr"];

// Rank and traffic rows never carry the short `position` spelling
const TRAFFIC_POSITION: &[&str] = &["AveragePosition", "average_position"];
const POSITION: &[&str] = &["AveragePosition", "average_position", "position"];

const TRAFFIC_LABEL: &[&str] = &["Date", "date"];
const KEYWORD_LABEL: &[&str] = &["Keyword", "keyword", "query"];
const PAGE_LABEL: &[&str] = &["PageUrl", "page_url", "url"];
const QUERY_LABEL: &[&str] = &["Query", "query", "search_query"];

/// Returns the ordered source keys for `field` in rows of `kind`.
pub fn aliases_for(kind: StatisticKind, field: Field) -> &'static [&'static str] {
    match field {
        Field::Label => match kind {
            StatisticKind::Traffic => TRAFFIC_LABEL,
            StatisticKind::Keyword => KEYWORD_LABEL,
            StatisticKind::Page => PAGE_LABEL,
            StatisticKind::Query => QUERY_LABEL,
        },
        Field::Clicks => CLICKS,
        Field::Impressions => IMPRESSIONS,
        Field::AveragePosition => match kind {
            StatisticKind::Traffic => TRAFFIC_POSITION,
            _ => POSITION,
        },
        Field::Ctr => CTR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_field_has_aliases_for_every_kind() {
        for kind in StatisticKind::iter() {
            for field in Field::iter() {
                assert!(
                    !aliases_for(kind, field).is_empty(),
                    "{:?}/{:?} should have aliases",
                    kind,
                    field
                );
            }
        }
    }

    #[test]
    fn test_pascal_case_alias_comes_first() {
        assert_eq!(aliases_for(StatisticKind::Page, Field::Clicks)[0], "Clicks");
        assert_eq!(aliases_for(StatisticKind::Page, Field::Label)[0], "PageUrl");
        assert_eq!(aliases_for(StatisticKind::Traffic, Field::Label)[0], "Date");
        assert_eq!(aliases_for(StatisticKind::Query, Field::Ctr)[0], "CTR");
    }

    #[test]
    fn test_label_aliases_are_kind_specific() {
        assert_eq!(
            aliases_for(StatisticKind::Keyword, Field::Label),
            &["Keyword", "keyword", "query"]
        );
        assert_eq!(
            aliases_for(StatisticKind::Query, Field::Label),
            &["Query", "query", "search_query"]
        );
    }
}
