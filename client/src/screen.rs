//! One list screen: its filters, its dropdown options and the searches it runs.

use crate::options::OptionResolver;
use crate::transport::{ListResponse, Transport};
use anyhow::Result;
use erp_common::{FieldSchema, FilterState, QueryMetadata, ScreenDefinition, TruncationNotice};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A search that has been started but whose response is not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub path: String,
    pub query: String,
}

/// Rows returned by a search together with the truncation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub rows: Vec<Value>,
    pub metadata: QueryMetadata,
    pub query: String,
}

impl SearchOutcome {
    pub fn current_count(&self) -> usize {
        self.rows.len()
    }

    pub fn truncation_notice(&self) -> Option<TruncationNotice> {
        self.metadata.truncation_notice(self.current_count())
    }
}

#[derive(Debug)]
pub struct ListScreen {
    name: String,
    list_path: String,
    filters: FilterState,
    options: OptionResolver,
    search_generation: u64,
}

impl ListScreen {
    pub fn new(name: impl Into<String>, list_path: impl Into<String>, schema: Arc<FieldSchema>) -> Self {
        let name = name.into();
        if let Err(e) = schema.validate() {
            warn!(screen = %name, "Filter schema is inconsistent: {}", e);
        }
        Self {
            name,
            list_path: list_path.into(),
            filters: FilterState::new(schema.clone()),
            options: OptionResolver::new(schema),
            search_generation: 0,
        }
    }

    pub fn from_definition(definition: ScreenDefinition) -> Self {
        Self::new(
            definition.name,
            definition.list_path,
            Arc::new(definition.schema),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        self.filters.schema()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn options(&self) -> &OptionResolver {
        &self.options
    }

    /// Loads the remote dropdown options of the screen.
    pub async fn mount(&mut self, transport: &dyn Transport) {
        debug!(screen = %self.name, "Mounting list screen");
        self.options.resolve_all(transport).await;
    }

    /// Replaces the schema. When it is a different schema the filters are
    /// reset and cached options are dropped; returns whether that happened.
    pub fn set_schema(&mut self, schema: Arc<FieldSchema>) -> bool {
        if !self.options.set_schema(schema.clone()) {
            return false;
        }
        self.filters = FilterState::new(schema);
        self.search_generation += 1;
        true
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Snapshots the current filters into a search. Starting a new search
    /// invalidates every earlier ticket.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.search_generation += 1;
        let ticket = SearchTicket {
            generation: self.search_generation,
            path: self.list_path.clone(),
            query: self.filters.to_query_string(),
        };
        debug!(
            screen = %self.name,
            generation = ticket.generation,
            query = %ticket.query,
            "Starting search"
        );
        ticket
    }

    /// Applies a list response. Responses of superseded searches are dropped.
    pub fn accept(&self, ticket: &SearchTicket, response: ListResponse) -> Option<SearchOutcome> {
        if ticket.generation != self.search_generation {
            warn!(
                screen = %self.name,
                generation = ticket.generation,
                current = self.search_generation,
                "Discarding stale search results"
            );
            return None;
        }

        let metadata = response.signals.metadata();
        let outcome = SearchOutcome {
            rows: response.rows,
            metadata,
            query: ticket.query.clone(),
        };
        info!(
            screen = %self.name,
            rows = outcome.current_count(),
            total = metadata.total_count,
            has_more = metadata.has_more_records,
            "Search completed"
        );
        Some(outcome)
    }

    /// Runs a search with the current filters.
    pub async fn search(&mut self, transport: &dyn Transport) -> Result<SearchOutcome> {
        let ticket = self.begin_search();
        let response = transport.get_list(&ticket.path, &ticket.query).await?;
        self.accept(&ticket, response)
            .ok_or_else(|| anyhow::anyhow!("Search on {} was superseded", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use crate::transport::ResponseSignals;
    use erp_common::{screens, DropdownOption, FilterFieldSpec, Operator};
    use serde_json::json;

    fn product_screen() -> ListScreen {
        let schema = FieldSchema::new(vec![
            FilterFieldSpec::string("name", "Name"),
            FilterFieldSpec::number("price", "Price"),
            FilterFieldSpec::dropdown_remote("categoryId", "Category", "/api/categories", "id", "name"),
        ]);
        ListScreen::new("products", "/api/products", Arc::new(schema))
    }

    fn rows(count: usize) -> Vec<Value> {
        (0..count).map(|i| json!({"id": i})).collect()
    }

    #[tokio::test]
    async fn test_search_reports_truncation() {
        let transport = FakeTransport::new().with_list(rows(25), Some("true"), Some("137"));
        let mut screen = product_screen();
        screen.filters_mut().set_value("name", "widget").unwrap();

        let outcome = screen.search(&transport).await.unwrap();
        assert_eq!(outcome.current_count(), 25);
        assert_eq!(outcome.query, "name_contains=widget");
        let notice = outcome.truncation_notice().unwrap();
        assert_eq!(notice.to_string(), "Showing 25 of 137 results");
        assert_eq!(transport.calls(), vec!["/api/products?name_contains=widget"]);
    }

    #[tokio::test]
    async fn test_search_without_signals_is_not_truncated() {
        let transport = FakeTransport::new().with_list(rows(3), None, None);
        let mut screen = product_screen();

        let outcome = screen.search(&transport).await.unwrap();
        assert_eq!(outcome.query, "");
        assert_eq!(outcome.metadata, QueryMetadata::default());
        assert!(outcome.truncation_notice().is_none());
        assert_eq!(transport.calls(), vec!["/api/products"]);
    }

    #[tokio::test]
    async fn test_search_has_more_without_total() {
        let transport = FakeTransport::new().with_list(rows(50), Some("true"), None);
        let mut screen = product_screen();

        let outcome = screen.search(&transport).await.unwrap();
        assert!(outcome.metadata.has_more_records);
        assert_eq!(outcome.metadata.total_count, 0);
        let notice = outcome.truncation_notice().unwrap();
        assert_eq!(notice.to_string(), "Showing 50 of 0 results");
    }

    #[tokio::test]
    async fn test_search_transport_error_propagates() {
        let transport = FakeTransport::new();
        let mut screen = product_screen();
        let err = screen.search(&transport).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_stale_search_is_discarded() {
        let mut screen = product_screen();
        let first = screen.begin_search();
        screen.filters_mut().set_value("name", "bolt").unwrap();
        let second = screen.begin_search();

        let response = ListResponse {
            rows: rows(2),
            signals: ResponseSignals::default(),
        };
        assert!(screen.accept(&first, response.clone()).is_none());
        let outcome = screen.accept(&second, response).unwrap();
        assert_eq!(outcome.query, "name_contains=bolt");
    }

    #[test]
    fn test_ticket_snapshots_filters() {
        let mut screen = product_screen();
        screen.filters_mut().set_operator("price", Operator::Between).unwrap();
        screen.filters_mut().set_value("price", "10").unwrap();
        screen.filters_mut().set_value_to("price", "50").unwrap();
        let ticket = screen.begin_search();
        screen.clear_filters();

        assert_eq!(ticket.path, "/api/products");
        assert_eq!(ticket.query, "price_from=10&price_to=50");
        assert!(screen.filters().is_empty());
    }

    #[tokio::test]
    async fn test_mount_resolves_options() {
        let transport = FakeTransport::new()
            .with_lookup("/api/categories", json!([{"id": 4, "name": "Tools"}]));
        let mut screen = product_screen();
        screen.mount(&transport).await;
        assert_eq!(
            screen.options().options("categoryId"),
            &[DropdownOption::new(4, "Tools")]
        );
    }

    #[test]
    fn test_set_schema_resets_filters() {
        let mut screen = product_screen();
        screen.filters_mut().set_value("name", "widget").unwrap();
        let pending = screen.begin_search();

        let same = screen.schema().clone();
        assert!(!screen.set_schema(same));
        assert!(!screen.filters().is_empty());

        let replacement = Arc::new(FieldSchema::new(vec![FilterFieldSpec::string("sku", "SKU")]));
        assert!(screen.set_schema(replacement));
        assert!(screen.filters().is_empty());
        assert!(screen.filters_mut().set_value("name", "x").is_err());
        assert!(screen
            .accept(&pending, ListResponse::default())
            .is_none());
    }

    #[test]
    fn test_from_builtin_definition() {
        let definition = screens::builtin("orders").unwrap();
        let screen = ListScreen::from_definition(definition);
        assert_eq!(screen.name(), "orders");
        assert_eq!(screen.list_path(), "/api/orders");
        assert!(screen.schema().get("status").is_some());
        assert_eq!(screen.options().options("status").len(), 5);
    }
}
