//! Query parameter builders for the statistics endpoints.

use chrono::{Days, NaiveDate};

use crate::config::Aggregation;

/// Date format expected by the `startDate` and `endDate` parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days` days before `today`, ending yesterday.
    ///
    /// Saturates at the bounds of `NaiveDate` instead of overflowing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bing_webmaster::endpoints::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    /// let range = DateRange::trailing(30, today);
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 30).unwrap());
    /// ```
    pub fn trailing(days: i64, today: NaiveDate) -> Self {
        let offset = Days::new(days.unsigned_abs());
        let start = if days >= 0 {
            today.checked_sub_days(offset).unwrap_or(NaiveDate::MIN)
        } else {
            today.checked_add_days(offset).unwrap_or(NaiveDate::MAX)
        };
        Self {
            start,
            end: today.pred_opt().unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Options for `GetRankAndTrafficStats`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub aggregation: Option<Aggregation>,
    pub limit: Option<u32>,
}

impl TrafficOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.start_date = Some(range.start);
        self.end_date = Some(range.end);
        self
    }

    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for `site_url`.
    ///
    /// Unset options are omitted; the limit falls back to `default_limit`
    /// when one is configured.
    pub fn to_params(&self, site_url: &str, default_limit: Option<u32>) -> Vec<(String, String)> {
        let mut params = base_params(site_url, self.start_date, self.end_date);
        if let Some(aggregation) = self.aggregation {
            params.push(("aggregation".to_string(), aggregation.as_str().to_string()));
        }
        if let Some(limit) = self.limit.or(default_limit) {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Options for the keyword, page and query statistics endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl StatsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.start_date = Some(range.start);
        self.end_date = Some(range.end);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query parameters for `site_url`. `limit` is always sent.
    pub fn to_params(&self, site_url: &str, default_limit: u32) -> Vec<(String, String)> {
        let mut params = base_params(site_url, self.start_date, self.end_date);
        params.push((
            "limit".to_string(),
            self.limit.unwrap_or(default_limit).to_string(),
        ));
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }
}

fn base_params(
    site_url: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<(String, String)> {
    let mut params = vec![("siteUrl".to_string(), site_url.to_string())];
    if let Some(start) = start_date {
        params.push(("startDate".to_string(), start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = end_date {
        params.push(("endDate".to_string(), end.format(DATE_FORMAT).to_string()));
    }
    params
}
