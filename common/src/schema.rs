//! Declarative description of the filterable attributes of a list screen.
//!
//! A schema is plain data: screens build it once (in code or from a JSON, YAML
//! or TOML document) and never mutate it afterwards. Shared blocks such as the
//! audit fields are reused by concatenating field lists.

use crate::error::SchemaError;
use crate::field_type::{FieldType, Operator};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Identifier of a selectable dropdown value, as the backend spells it.
///
/// Integers that fit `i64` stay numeric. Any other number keeps its decimal
/// spelling as text, for static options and remote payloads alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum OptionId {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for OptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OptionIdVisitor)
    }
}

struct OptionIdVisitor;

impl<'de> Visitor<'de> for OptionIdVisitor {
    type Value = OptionId;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string or number option id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<OptionId, E> {
        Ok(OptionId::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<OptionId, E> {
        Ok(i64::try_from(v)
            .map(OptionId::Int)
            .unwrap_or_else(|_| OptionId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<OptionId, E> {
        Ok(OptionId::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OptionId, E> {
        Ok(OptionId::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<OptionId, E> {
        Ok(OptionId::Text(v))
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionId::Int(id) => write!(f, "{}", id),
            OptionId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for OptionId {
    fn from(id: i64) -> Self {
        OptionId::Int(id)
    }
}

impl From<i32> for OptionId {
    fn from(id: i32) -> Self {
        OptionId::Int(id.into())
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        OptionId::Text(id.to_string())
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        OptionId::Text(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub id: OptionId,
    pub name: String,
}

impl DropdownOption {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Where a dropdown field gets its options from. An object carrying both
/// `staticOptions` and `endpoint` matches neither variant and fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropdownConfig {
    Static(StaticOptions),
    Remote(RemoteOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaticOptions {
    pub static_options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoteOptions {
    pub endpoint: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default = "default_name_field")]
    pub name_field: String,
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_name_field() -> String {
    "name".to_string()
}

/// One filterable attribute of a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFieldSpec {
    /// Backend attribute identifier, also the prefix of the wire parameters
    pub name: String,
    /// Display label; translation happens in the UI layer
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<Operator>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown_config: Option<DropdownConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl FilterFieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            operators: None,
            default_operator: None,
            dropdown_config: None,
            section: None,
        }
    }

    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::String)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Date)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Boolean)
    }

    /// Dropdown with a fixed option list.
    pub fn dropdown_static(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<DropdownOption>,
    ) -> Self {
        let mut spec = Self::new(name, label, FieldType::Dropdown);
        spec.dropdown_config = Some(DropdownConfig::Static(StaticOptions {
            static_options: options,
        }));
        spec
    }

    /// Dropdown whose options are read from `endpoint`.
    pub fn dropdown_remote(
        name: impl Into<String>,
        label: impl Into<String>,
        endpoint: impl Into<String>,
        id_field: impl Into<String>,
        name_field: impl Into<String>,
    ) -> Self {
        let mut spec = Self::new(name, label, FieldType::Dropdown);
        spec.dropdown_config = Some(DropdownConfig::Remote(RemoteOptions {
            endpoint: endpoint.into(),
            id_field: id_field.into(),
            name_field: name_field.into(),
        }));
        spec
    }

    pub fn with_operators(mut self, operators: &[Operator]) -> Self {
        self.operators = Some(operators.to_vec());
        self
    }

    pub fn with_default_operator(mut self, op: Operator) -> Self {
        self.default_operator = Some(op);
        self
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Operators offered for this field: the explicit list verbatim, else the
    /// type's default table.
    pub fn resolved_operators(&self) -> &[Operator] {
        match &self.operators {
            Some(ops) => ops,
            None => self.field_type.default_operators(),
        }
    }

    /// Operator pre-selected when the user has not picked one.
    pub fn default_operator(&self) -> Operator {
        self.default_operator
            .or_else(|| self.resolved_operators().first().copied())
            .unwrap_or(Operator::Eq)
    }

    pub fn offers(&self, op: Operator) -> bool {
        self.resolved_operators().contains(&op)
    }

    /// A single-operator field has its operator fixed; the selector is hidden.
    pub fn shows_operator_selector(&self) -> bool {
        self.resolved_operators().len() > 1
    }

    fn validate(&self) -> Result<(), SchemaError> {
        match (self.field_type, &self.dropdown_config) {
            (FieldType::Dropdown, None) => {
                return Err(SchemaError::MissingOptionSource(self.name.clone()))
            }
            (FieldType::Dropdown, Some(_)) | (_, None) => {}
            (other, Some(_)) => {
                return Err(SchemaError::UnexpectedOptionSource(
                    self.name.clone(),
                    other,
                ))
            }
        }
        if matches!(&self.operators, Some(ops) if ops.is_empty()) {
            return Err(SchemaError::EmptyOperators(self.name.clone()));
        }
        if let Some(op) = self.default_operator {
            if !self.offers(op) {
                return Err(SchemaError::DefaultOperatorNotOffered(
                    self.name.clone(),
                    op,
                ));
            }
        }
        Ok(())
    }
}

/// Fields sharing a section label, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub name: Option<&'a str>,
    pub fields: Vec<&'a FilterFieldSpec>,
}

/// Ordered list of filterable fields for one screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: Vec<FilterFieldSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    List(Vec<FilterFieldSpec>),
    Table { fields: Vec<FilterFieldSpec> },
}

/// Source format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
    Toml,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(SchemaFormat::Json),
            Some("yaml") | Some("yml") => Ok(SchemaFormat::Yaml),
            Some("toml") => Ok(SchemaFormat::Toml),
            _ => Err(SchemaError::UnknownFormat(path.display().to_string())),
        }
    }
}

impl FieldSchema {
    pub fn new(fields: Vec<FilterFieldSpec>) -> Self {
        Self { fields }
    }

    /// Appends a shared block of fields after this schema's own fields.
    pub fn concat(mut self, shared: impl IntoIterator<Item = FilterFieldSpec>) -> Self {
        self.fields.extend(shared);
        self
    }

    /// Parses a schema document. JSON and YAML accept either a bare list of
    /// fields or an object with a `fields` list; TOML needs the latter.
    pub fn parse(contents: &str, format: SchemaFormat) -> Result<Self, SchemaError> {
        let document: SchemaDocument = match format {
            SchemaFormat::Json => {
                serde_json::from_str(contents).map_err(|e| SchemaError::Parse(e.to_string()))?
            }
            SchemaFormat::Yaml => serde_yaml_ng::from_str(contents)
                .map_err(|e| SchemaError::Parse(e.to_string()))?,
            SchemaFormat::Toml => {
                toml::from_str(contents).map_err(|e| SchemaError::Parse(e.to_string()))?
            }
        };
        let fields = match document {
            SchemaDocument::List(fields) | SchemaDocument::Table { fields } => fields,
        };
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FilterFieldSpec] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterFieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FilterFieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declaration index of a field; filter output follows this order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn dropdown_fields(&self) -> impl Iterator<Item = &FilterFieldSpec> {
        self.fields
            .iter()
            .filter(|field| field.field_type == FieldType::Dropdown)
    }

    /// Checks every field; stops at the first problem found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            field.validate()?;
        }
        Ok(())
    }

    /// Groups fields by section. Unsectioned fields come first, then named
    /// sections in order of first appearance.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections: Vec<Section<'_>> = Vec::new();
        let unsectioned: Vec<_> = self
            .fields
            .iter()
            .filter(|field| field.section.is_none())
            .collect();
        if !unsectioned.is_empty() {
            sections.push(Section {
                name: None,
                fields: unsectioned,
            });
        }
        for field in &self.fields {
            let Some(name) = field.section.as_deref() else {
                continue;
            };
            match sections.iter_mut().find(|s| s.name == Some(name)) {
                Some(section) => section.fields.push(field),
                None => sections.push(Section {
                    name: Some(name),
                    fields: vec![field],
                }),
            }
        }
        sections
    }
}
