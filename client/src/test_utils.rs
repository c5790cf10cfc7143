use crate::transport::{ListResponse, ResponseSignals, Transport};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory backend recording every call it receives.
#[derive(Default)]
pub struct FakeTransport {
    lookups: HashMap<String, Result<Value, String>>,
    list: Option<ListResponse>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup(mut self, endpoint: &str, payload: Value) -> Self {
        self.lookups.insert(endpoint.to_string(), Ok(payload));
        self
    }

    pub fn with_failing_lookup(mut self, endpoint: &str, message: &str) -> Self {
        self.lookups
            .insert(endpoint.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_list(mut self, rows: Vec<Value>, has_more: Option<&str>, total: Option<&str>) -> Self {
        self.list = Some(ListResponse {
            rows,
            signals: ResponseSignals {
                has_more_records: has_more.map(str::to_string),
                total_count: total.map(str::to_string),
            },
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, endpoint: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        match self.lookups.get(endpoint) {
            Some(Ok(payload)) => Ok(payload.clone()),
            Some(Err(message)) => Err(anyhow!("{}", message)),
            None => Err(anyhow!("HTTP 404 for GET {}", endpoint)),
        }
    }

    async fn get_list(&self, path: &str, query: &str) -> Result<ListResponse> {
        let call = if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        };
        self.calls.lock().unwrap().push(call);
        self.list
            .clone()
            .ok_or_else(|| anyhow!("HTTP 404 for GET {}", path))
    }
}
