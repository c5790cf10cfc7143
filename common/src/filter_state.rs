//! Per-screen store of the filters the user is editing.
//!
//! Each field holds at most one entry. Partial entries are kept while the user
//! types and are simply left out of `to_active_filters`; they are never
//! reported as errors.

use crate::error::FilterError;
use crate::field_type::Operator;
use crate::query;
use crate::schema::{FieldSchema, FilterFieldSpec};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

/// Wire format of date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Operator and operands currently chosen for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    pub operator: Operator,
    pub value: Option<String>,
    /// Upper bound, only meaningful for `between`
    pub value_to: Option<String>,
}

impl FilterEntry {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            value: None,
            value_to: None,
        }
    }

    /// Whether the entry takes part in the query.
    pub fn is_active(&self) -> bool {
        let value_set = is_filled(&self.value);
        if self.operator.is_range() {
            value_set && is_filled(&self.value_to)
        } else {
            value_set
        }
    }
}

fn finite(name: &str, value: f64) -> Result<String, FilterError> {
    if value.is_finite() {
        Ok(value.to_string())
    } else {
        Err(FilterError::InvalidNumber(name.to_string(), value))
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A filter that will be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterValue {
    pub field: String,
    pub operator: Operator,
    pub value: String,
    pub value_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FilterState {
    schema: Arc<FieldSchema>,
    entries: HashMap<String, FilterEntry>,
}

impl FilterState {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self {
            schema,
            entries: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    fn field(&self, name: &str) -> Result<&FilterFieldSpec, FilterError> {
        self.schema
            .get(name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut FilterEntry, FilterError> {
        let default_op = self.field(name)?.default_operator();
        Ok(self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| FilterEntry::new(default_op)))
    }

    /// Picks an operator for a field. Any operands already entered are dropped
    /// so a value typed for one operator is never reused by another.
    pub fn set_operator(&mut self, name: &str, op: Operator) -> Result<(), FilterError> {
        let field = self.field(name)?;
        if !field.offers(op) {
            return Err(FilterError::OperatorNotOffered(name.to_string(), op));
        }
        self.entries.insert(name.to_string(), FilterEntry::new(op));
        Ok(())
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FilterError> {
        self.entry_mut(name)?.value = Some(value.into());
        Ok(())
    }

    pub fn set_value_to(&mut self, name: &str, value: impl Into<String>) -> Result<(), FilterError> {
        self.entry_mut(name)?.value_to = Some(value.into());
        Ok(())
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), FilterError> {
        self.set_value(name, value.to_string())
    }

    /// Rejects NaN and infinities; the backend only understands decimals.
    pub fn set_number(&mut self, name: &str, value: f64) -> Result<(), FilterError> {
        let value = finite(name, value)?;
        self.set_value(name, value)
    }

    pub fn set_number_to(&mut self, name: &str, value: f64) -> Result<(), FilterError> {
        let value = finite(name, value)?;
        self.set_value_to(name, value)
    }

    pub fn set_date(&mut self, name: &str, value: NaiveDate) -> Result<(), FilterError> {
        self.set_value(name, value.format(DATE_FORMAT).to_string())
    }

    pub fn set_date_to(&mut self, name: &str, value: NaiveDate) -> Result<(), FilterError> {
        self.set_value_to(name, value.format(DATE_FORMAT).to_string())
    }

    /// Drops the entry of a single field.
    pub fn remove(&mut self, name: &str) -> Option<FilterEntry> {
        self.entries.remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, name: &str) -> Option<&FilterEntry> {
        self.entries.get(name)
    }

    /// Operator shown for a field: the chosen one, else the field default.
    pub fn selected_operator(&self, name: &str) -> Option<Operator> {
        match self.entries.get(name) {
            Some(entry) => Some(entry.operator),
            None => self.schema.get(name).map(|field| field.default_operator()),
        }
    }

    /// Complete entries in schema declaration order.
    pub fn to_active_filters(&self) -> Vec<FilterValue> {
        self.schema
            .iter()
            .filter_map(|field| {
                let entry = self.entries.get(&field.name)?;
                if !entry.is_active() {
                    return None;
                }
                Some(FilterValue {
                    field: field.name.clone(),
                    operator: entry.operator,
                    value: entry.value.clone().unwrap_or_default(),
                    value_to: if entry.operator.is_range() {
                        entry.value_to.clone()
                    } else {
                        None
                    },
                })
            })
            .collect()
    }

    pub fn to_query_string(&self) -> String {
        query::serialize(&self.to_active_filters())
    }
}

#[cfg(test)]
mod tests;
