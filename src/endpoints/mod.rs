//! Endpoint surface of the Webmaster API.
//!
//! Each endpoint knows its path, HTTP method and whether its responses may be
//! cached. Query parameters are built by the option types in `params`.

mod params;

use crate::models::StatisticKind;
use crate::transport::Method;

pub use params::{DateRange, StatsOptions, TrafficOptions, DATE_FORMAT};

/// A remote operation exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UserSites,
    RankAndTrafficStats,
    KeywordStats,
    PageStats,
    QueryStats,
    SubmitUrl,
    SubmitSitemap,
}

impl Endpoint {
    /// Operation name as used by the API, e.g. `GetUserSites`.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::UserSites => "GetUserSites",
            Endpoint::RankAndTrafficStats => "GetRankAndTrafficStats",
            Endpoint::KeywordStats => "GetKeywordStats",
            Endpoint::PageStats => "GetPageStats",
            Endpoint::QueryStats => "GetQueryStats",
            Endpoint::SubmitUrl => "SubmitUrl",
            Endpoint::SubmitSitemap => "SubmitSitemap",
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::SubmitUrl | Endpoint::SubmitSitemap => Method::Post,
            _ => Method::Get,
        }
    }

    /// Only reads are cached; submissions always reach the transport.
    pub fn is_cacheable(&self) -> bool {
        self.method() == Method::Get
    }

    /// Statistic kind of the records this endpoint returns, if any.
    pub fn statistic_kind(&self) -> Option<StatisticKind> {
        match self {
            Endpoint::RankAndTrafficStats => Some(StatisticKind::Traffic),
            Endpoint::KeywordStats => Some(StatisticKind::Keyword),
            Endpoint::PageStats => Some(StatisticKind::Page),
            Endpoint::QueryStats => Some(StatisticKind::Query),
            Endpoint::UserSites | Endpoint::SubmitUrl | Endpoint::SubmitSitemap => None,
        }
    }

    /// Statistics endpoint for `kind`.
    pub fn for_statistic(kind: StatisticKind) -> Self {
        match kind {
            StatisticKind::Traffic => Endpoint::RankAndTrafficStats,
            StatisticKind::Keyword => Endpoint::KeywordStats,
            StatisticKind::Page => Endpoint::PageStats,
            StatisticKind::Query => Endpoint::QueryStats,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::UserSites.path(), "/GetUserSites");
        assert_eq!(
            Endpoint::RankAndTrafficStats.path(),
            "/GetRankAndTrafficStats"
        );
        assert_eq!(Endpoint::SubmitSitemap.path(), "/SubmitSitemap");
    }

    #[test]
    fn test_only_reads_are_cacheable() {
        assert!(Endpoint::UserSites.is_cacheable());
        assert!(Endpoint::QueryStats.is_cacheable());
        assert!(!Endpoint::SubmitUrl.is_cacheable());
        assert!(!Endpoint::SubmitSitemap.is_cacheable());
        assert_eq!(Endpoint::SubmitUrl.method(), Method::Post);
    }

    #[test]
    fn test_statistic_endpoints_round_trip_kind() {
        for kind in StatisticKind::iter() {
            assert_eq!(Endpoint::for_statistic(kind).statistic_kind(), Some(kind));
        }
        assert_eq!(Endpoint::UserSites.statistic_kind(), None);
    }
}
