//! Interpretation of the truncation signals a list response carries.
//!
//! The backend caps list results and reports, in response headers, whether
//! more rows matched than were returned and how many matched in total. Missing
//! or malformed signals never fail; they read as "not truncated, 0 total".

/// Header set to `"true"` when the backend returned a capped window.
pub const HAS_MORE_RECORDS_HEADER: &str = "X-Has-More-Records";
/// Header with the total number of matching rows.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryMetadata {
    pub has_more_records: bool,
    pub total_count: u64,
}

impl QueryMetadata {
    /// Builds metadata from the raw signal values, as read from the response.
    pub fn from_signals(has_more_records: Option<&str>, total_count: Option<&str>) -> Self {
        Self {
            has_more_records: has_more_records.is_some_and(|v| v.trim() == "true"),
            total_count: total_count
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0),
        }
    }

    /// Builds metadata by looking signals up by header name.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        Self::from_signals(lookup(HAS_MORE_RECORDS_HEADER), lookup(TOTAL_COUNT_HEADER))
    }

    /// Advisory banner for a capped result, `None` when nothing was cut off.
    pub fn truncation_notice(&self, current_count: usize) -> Option<TruncationNotice> {
        if !self.has_more_records {
            return None;
        }
        Some(TruncationNotice {
            current_count,
            total_count: self.total_count,
        })
    }
}

/// "Showing N of M results" banner. Advisory only: the rows that were
/// returned stay fully usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationNotice {
    pub current_count: usize,
    pub total_count: u64,
}

impl TruncationNotice {
    pub fn advice(&self) -> &'static str {
        "Not all matching records are shown. Narrow your filters to see the rest."
    }
}

impl std::fmt::Display for TruncationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} of {} results",
            self.current_count, self.total_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_truncated_response() {
        let meta = QueryMetadata::from_signals(Some("true"), Some("137"));
        assert_eq!(
            meta,
            QueryMetadata {
                has_more_records: true,
                total_count: 137
            }
        );
        let notice = meta.truncation_notice(25).unwrap();
        assert_eq!(notice.to_string(), "Showing 25 of 137 results");
    }

    #[test]
    fn test_missing_total_count() {
        let meta = QueryMetadata::from_signals(Some("true"), None);
        assert!(meta.has_more_records);
        assert_eq!(meta.total_count, 0);
    }

    #[test]
    fn test_missing_signals_degrade_to_default() {
        assert_eq!(QueryMetadata::from_signals(None, None), QueryMetadata::default());
    }

    #[test]
    fn test_malformed_signals() {
        let meta = QueryMetadata::from_signals(Some("yes"), Some("many"));
        assert_eq!(meta, QueryMetadata::default());
        let meta = QueryMetadata::from_signals(Some("TRUE"), Some("-4"));
        assert_eq!(meta, QueryMetadata::default());
    }

    #[test]
    fn test_whitespace_tolerated() {
        let meta = QueryMetadata::from_signals(Some(" true "), Some(" 12\n"));
        assert!(meta.has_more_records);
        assert_eq!(meta.total_count, 12);
    }

    #[test]
    fn test_no_notice_when_not_truncated() {
        let meta = QueryMetadata::from_signals(Some("false"), Some("10"));
        assert_eq!(meta.total_count, 10);
        assert!(meta.truncation_notice(10).is_none());
    }

    #[test]
    fn test_from_lookup_uses_header_names() {
        let headers: HashMap<&str, &str> = HashMap::from([
            (HAS_MORE_RECORDS_HEADER, "true"),
            (TOTAL_COUNT_HEADER, "500"),
        ]);
        let meta = QueryMetadata::from_lookup(|name| headers.get(name).copied());
        assert!(meta.has_more_records);
        assert_eq!(meta.total_count, 500);
    }

    #[test]
    fn test_notice_advice() {
        let notice = QueryMetadata::from_signals(Some("true"), Some("3"))
            .truncation_notice(1)
            .unwrap();
        assert!(notice.advice().contains("Narrow your filters"));
    }
}
