//! Filter criteria for the list view. Never persisted, never mutates records.

use crate::model::DailyRecord;
use chrono::NaiveDate;

/// A free-text query plus an inclusive date range.
///
/// The query is a case-insensitive substring match over a record's date and
/// notes. Date bounds are compared as ISO strings, which for `YYYY-MM-DD`
/// values is the same as comparing the dates themselves.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Filter {
    pub query: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Filter {
    pub fn new(query: impl Into<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            query: query.into(),
            from,
            to,
        }
    }

    /// Returns true if `record` passes the date range and the text query.
    pub fn matches(&self, record: &DailyRecord) -> bool {
        if let Some(from) = self.from {
            if record.date < from.format("%Y-%m-%d").to_string() {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.date > to.format("%Y-%m-%d").to_string() {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", record.date, record.notes).to_lowercase();
        haystack.contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordDraft;

    fn record(date: &str, notes: &str) -> DailyRecord {
        let mut r = RecordDraft {
            notes: Some(notes.to_string()),
            ..RecordDraft::default()
        }
        .normalize();
        r.date = date.to_string();
        r
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        assert!(filter.matches(&record("2024-01-01", "")));
        assert!(filter.matches(&record("1999-12-31", "anything")));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = Filter::new("", Some(date("2024-01-10")), Some(date("2024-01-31")));
        assert!(!filter.matches(&record("2024-01-01", "")));
        assert!(filter.matches(&record("2024-01-10", "")));
        assert!(filter.matches(&record("2024-01-15", "")));
        assert!(filter.matches(&record("2024-01-31", "")));
        assert!(!filter.matches(&record("2024-02-01", "")));
    }

    #[test]
    fn test_lower_bound_only() {
        let filter = Filter::new("", Some(date("2024-01-15")), None);
        assert!(!filter.matches(&record("2024-01-14", "")));
        assert!(filter.matches(&record("2024-06-01", "")));
    }

    #[test]
    fn test_query_matches_notes() {
        let filter = Filter::new("aeroporto", None, None);
        assert!(filter.matches(&record("2024-01-01", "viagem aeroporto")));
        assert!(!filter.matches(&record("2024-01-01", "hotel")));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let filter = Filter::new("AeroPorto", None, None);
        assert!(filter.matches(&record("2024-01-01", "Aeroporto de manhã")));
    }

    #[test]
    fn test_query_matches_date_text() {
        let filter = Filter::new("2024-01", None, None);
        assert!(filter.matches(&record("2024-01-20", "")));
        assert!(!filter.matches(&record("2024-02-20", "")));
    }

    #[test]
    fn test_query_and_range_combine() {
        let filter = Filter::new("hotel", Some(date("2024-01-10")), Some(date("2024-01-31")));
        assert!(filter.matches(&record("2024-01-15", "hotel")));
        assert!(!filter.matches(&record("2024-01-15", "aeroporto")));
        assert!(!filter.matches(&record("2024-02-15", "hotel")));
    }
}
