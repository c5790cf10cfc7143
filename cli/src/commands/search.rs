use crate::filter_args;
use anyhow::{Context, Result};
use erp_client::{ListScreen, SearchOutcome, Transport};
use std::fmt::Write;

pub fn handle_query_command(screen: &mut ListScreen, filters: &[String]) -> Result<()> {
    filter_args::apply_all(filters, screen.filters_mut())?;
    println!("{}", request_line(screen.list_path(), &screen.filters().to_query_string()));
    Ok(())
}

pub async fn handle_search_command(
    screen: &mut ListScreen,
    transport: &dyn Transport,
    filters: &[String],
    json: bool,
) -> Result<()> {
    filter_args::apply_all(filters, screen.filters_mut())?;
    let outcome = screen
        .search(transport)
        .await
        .with_context(|| format!("Search on {} failed", screen.name()))?;
    print!("{}", render_outcome(&outcome, json)?);
    Ok(())
}

fn request_line(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn render_outcome(outcome: &SearchOutcome, json: bool) -> Result<String> {
    let mut out = String::new();
    if json {
        out.push_str(&serde_json::to_string_pretty(&outcome.rows)?);
        out.push('\n');
    } else {
        for row in &outcome.rows {
            let _ = writeln!(out, "{}", row);
        }
    }

    match outcome.truncation_notice() {
        Some(notice) => {
            let _ = writeln!(out, "{}", notice);
            let _ = writeln!(out, "{}", notice.advice());
        }
        None => {
            let _ = writeln!(out, "{} result(s)", outcome.current_count());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use erp_common::QueryMetadata;
    use serde_json::json;

    fn outcome(rows: usize, has_more: bool, total: u64) -> SearchOutcome {
        SearchOutcome {
            rows: (0..rows).map(|i| json!({"id": i})).collect(),
            metadata: QueryMetadata {
                has_more_records: has_more,
                total_count: total,
            },
            query: String::new(),
        }
    }

    #[test]
    fn test_request_line() {
        assert_eq!(request_line("/api/products", ""), "/api/products");
        assert_eq!(
            request_line("/api/products", "name_contains=widget"),
            "/api/products?name_contains=widget"
        );
    }

    #[test]
    fn test_render_truncated_outcome() {
        let out = render_outcome(&outcome(25, true, 137), false).unwrap();
        assert!(out.starts_with("{\"id\":0}\n"));
        assert!(out.contains("Showing 25 of 137 results\n"));
        assert!(out.contains("Narrow your filters"));
    }

    #[test]
    fn test_render_complete_outcome_as_json() {
        let out = render_outcome(&outcome(2, false, 2), true).unwrap();
        let rows: serde_json::Value =
            serde_json::from_str(out.trim_end_matches("2 result(s)\n")).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 2);
        assert!(!out.contains("Showing"));
    }
}
