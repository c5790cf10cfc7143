//! Dropdown option resolution for one screen instance.
//!
//! Static option lists are available as soon as the resolver is built. Remote
//! lists are fetched once per field; each fetch carries a ticket and only the
//! newest ticket of a field may store its result, so a slow response can never
//! overwrite a newer one or leak into a replaced schema.

use crate::transport::Transport;
use anyhow::Result;
use erp_common::{
    map_option_payload, DropdownConfig, DropdownOption, DropdownOptionSet, FieldSchema,
    RemoteOptions,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A remote lookup to perform for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRequest {
    pub field: String,
    pub source: RemoteOptions,
    pub ticket: u64,
}

/// Outcome of an [`OptionRequest`], handed back to [`OptionResolver::apply`].
#[derive(Debug)]
pub struct OptionResponse {
    pub field: String,
    pub ticket: u64,
    pub result: Result<DropdownOptionSet>,
}

#[derive(Debug)]
pub struct OptionResolver {
    schema: Arc<FieldSchema>,
    sets: HashMap<String, DropdownOptionSet>,
    /// Newest ticket issued per field still waiting for its response
    pending: HashMap<String, u64>,
    next_ticket: u64,
}

impl OptionResolver {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        let mut resolver = Self {
            schema,
            sets: HashMap::new(),
            pending: HashMap::new(),
            next_ticket: 0,
        };
        resolver.load_static();
        resolver
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    fn load_static(&mut self) {
        for field in self.schema.dropdown_fields() {
            if let Some(DropdownConfig::Static(config)) = &field.dropdown_config {
                self.sets
                    .insert(field.name.clone(), config.static_options.clone());
            }
        }
    }

    /// Swaps in a new schema. Cached options are dropped only when the schema
    /// actually is a different one; returns whether that happened.
    pub fn set_schema(&mut self, schema: Arc<FieldSchema>) -> bool {
        if Arc::ptr_eq(&self.schema, &schema) {
            return false;
        }
        debug!(
            discarded = self.sets.len(),
            in_flight = self.pending.len(),
            "Schema replaced, dropping cached dropdown options"
        );
        self.schema = schema;
        self.sets.clear();
        self.pending.clear();
        self.load_static();
        true
    }

    /// Issues requests for every remote dropdown not resolved yet. A field
    /// already in flight gets a fresh ticket that supersedes the old one.
    pub fn begin_resolution(&mut self) -> Vec<OptionRequest> {
        let mut requests = Vec::new();
        for field in self.schema.dropdown_fields() {
            let Some(DropdownConfig::Remote(source)) = &field.dropdown_config else {
                continue;
            };
            if self.sets.contains_key(&field.name) {
                continue;
            }
            self.next_ticket += 1;
            self.pending.insert(field.name.clone(), self.next_ticket);
            requests.push(OptionRequest {
                field: field.name.clone(),
                source: source.clone(),
                ticket: self.next_ticket,
            });
        }
        requests
    }

    /// Performs one lookup. Holds no borrow of the resolver, so lookups for
    /// different fields can run concurrently.
    pub async fn fetch(request: OptionRequest, transport: &dyn Transport) -> OptionResponse {
        let result: Result<DropdownOptionSet> = match transport.get_json(&request.source.endpoint).await {
            Ok(payload) => map_option_payload(&payload, &request.source).map_err(Into::into),
            Err(e) => Err(e),
        };
        OptionResponse {
            field: request.field,
            ticket: request.ticket,
            result,
        }
    }

    /// Stores a lookup result. Failures leave the field with no options.
    /// Returns false when the response was stale and got discarded.
    pub fn apply(&mut self, response: OptionResponse) -> bool {
        if self.pending.get(&response.field) != Some(&response.ticket) {
            warn!(
                field = %response.field,
                ticket = response.ticket,
                "Discarding stale dropdown options"
            );
            return false;
        }
        self.pending.remove(&response.field);

        let options = match response.result {
            Ok(options) => {
                debug!(field = %response.field, count = options.len(), "Dropdown options resolved");
                options
            }
            Err(e) => {
                warn!(field = %response.field, "Failed to load dropdown options: {:#}", e);
                Vec::new()
            }
        };
        self.sets.insert(response.field, options);
        true
    }

    /// Resolves every outstanding remote dropdown. One failing lookup does not
    /// affect the others.
    pub async fn resolve_all(&mut self, transport: &dyn Transport) {
        let requests = self.begin_resolution();
        if requests.is_empty() {
            return;
        }
        let responses = join_all(
            requests
                .into_iter()
                .map(|request| Self::fetch(request, transport)),
        )
        .await;
        for response in responses {
            self.apply(response);
        }
    }

    /// Options of a field; empty while unresolved or after a failed lookup.
    pub fn options(&self, field: &str) -> &[DropdownOption] {
        self.sets.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_resolved(&self, field: &str) -> bool {
        self.sets.contains_key(field)
    }

    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.contains_key(field)
    }
}
